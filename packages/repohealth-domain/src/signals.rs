use time::OffsetDateTime;

use repohealth_config::{Scoring, ScoringCompatibility, ScoringDocs, ScoringFreshness};

/// Midpoint used when a signal column carries no information.
pub const NEUTRAL_SIGNAL: f64 = 50.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// One repository as coerced from the upstream search payload.
#[derive(Clone, Debug)]
pub struct RawRecord {
	pub id: u64,
	pub name: String,
	pub owner: String,
	pub full_name: String,
	pub html_url: String,
	pub description: Option<String>,
	pub stars: u64,
	pub forks: u64,
	pub watchers: u64,
	pub open_issues: u64,
	pub language: Option<String>,
	pub license: Option<String>,
	pub updated_at: Option<OffsetDateTime>,
}

#[derive(Clone, Copy, Debug)]
pub struct NormalizedSignals {
	pub activity: f64,
	pub community: f64,
	pub docs: f64,
	pub freshness: f64,
	pub compatibility: f64,
}

/// Derives the five 0-100 signals for every record. Activity, community and
/// freshness are relative to the batch; docs and compatibility depend only on
/// the record itself.
pub fn normalize_batch(
	records: &[RawRecord],
	scoring: &Scoring,
	now: OffsetDateTime,
) -> Vec<NormalizedSignals> {
	let forks: Vec<_> = records.iter().map(|record| record.forks as f64).collect();
	let watchers: Vec<_> = records.iter().map(|record| record.watchers as f64).collect();
	let staleness: Vec<_> = records
		.iter()
		.map(|record| days_since_update(record.updated_at, &scoring.freshness, now))
		.collect();
	let activity = min_max(&forks);
	let community = min_max(&watchers);
	let freshness = min_max_inverse(&staleness);

	records
		.iter()
		.enumerate()
		.map(|(i, record)| NormalizedSignals {
			activity: activity[i],
			community: community[i],
			docs: docs_signal(record, &scoring.docs),
			freshness: freshness[i],
			compatibility: compatibility_signal(record, &scoring.compatibility),
		})
		.collect()
}

pub fn min_max(values: &[f64]) -> Vec<f64> {
	if values.iter().any(|value| !value.is_finite()) {
		return vec![NEUTRAL_SIGNAL; values.len()];
	}

	let min = values.iter().copied().fold(f64::INFINITY, f64::min);
	let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

	if !min.is_finite() || max == min {
		return vec![NEUTRAL_SIGNAL; values.len()];
	}

	values.iter().map(|value| (value - min) / (max - min) * 100.0).collect()
}

/// Min-max where smaller input is better, e.g. days since the last update.
pub fn min_max_inverse(values: &[f64]) -> Vec<f64> {
	min_max(values).into_iter().map(|value| 100.0 - value).collect()
}

pub fn days_since_update(
	updated_at: Option<OffsetDateTime>,
	freshness: &ScoringFreshness,
	now: OffsetDateTime,
) -> f64 {
	let Some(updated_at) = updated_at else {
		return freshness.staleness_horizon_days;
	};
	let days = (now - updated_at).as_seconds_f64() / SECONDS_PER_DAY;

	days.min(freshness.staleness_horizon_days)
}

pub fn docs_signal(record: &RawRecord, docs: &ScoringDocs) -> f64 {
	let length = record.description.as_deref().unwrap_or("").trim().chars().count() as f64;
	let description_score = clamp_signal(length / docs.desc_len_ref * 100.0);
	let license_score =
		if record.license.is_some() { docs.license_present } else { docs.license_absent };

	clamp_signal(0.7 * description_score + 0.3 * license_score)
}

pub fn compatibility_signal(record: &RawRecord, compatibility: &ScoringCompatibility) -> f64 {
	let language_score = if record.language.is_some() {
		compatibility.language_present
	} else {
		compatibility.language_absent
	};
	let license_score = if record.license.is_some() {
		compatibility.license_present
	} else {
		compatibility.license_absent
	};

	clamp_signal(0.6 * language_score + 0.4 * license_score)
}

pub fn clamp_signal(value: f64) -> f64 {
	value.clamp(0.0, 100.0)
}
