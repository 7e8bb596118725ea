use time::OffsetDateTime;

use repohealth_config::{Scoring, ScoringLabels, ScoringWeights};

use crate::signals::{self, NormalizedSignals, RawRecord};

pub const HIGHLY_RECOMMENDED: &str = "Highly recommended";
pub const PROMISING: &str = "Promising";
pub const NEEDS_REVIEW: &str = "Needs review";

#[derive(Clone, Debug)]
pub struct HealthResult {
	pub record: RawRecord,
	pub health_score: f64,
	pub health_label: &'static str,
	pub narrative: Option<String>,
}

pub fn score_batch(
	records: Vec<RawRecord>,
	scoring: &Scoring,
	now: OffsetDateTime,
) -> Vec<HealthResult> {
	let normalized = signals::normalize_batch(&records, scoring, now);

	records
		.into_iter()
		.zip(normalized)
		.map(|(record, signals)| {
			let health_score = health_score(&signals, &scoring.weights);

			HealthResult {
				record,
				health_score,
				health_label: health_label(health_score, &scoring.labels),
				narrative: None,
			}
		})
		.collect()
}

pub fn health_score(signals: &NormalizedSignals, weights: &ScoringWeights) -> f64 {
	let score = weights.activity * signals.activity
		+ weights.community * signals.community
		+ weights.docs * signals.docs
		+ weights.freshness * signals.freshness
		+ weights.compatibility * signals.compatibility;

	round_to_tenth(score)
}

pub fn health_label(score: f64, labels: &ScoringLabels) -> &'static str {
	if score >= labels.highly_recommended_min {
		HIGHLY_RECOMMENDED
	} else if score >= labels.promising_min {
		PROMISING
	} else {
		NEEDS_REVIEW
	}
}

fn round_to_tenth(value: f64) -> f64 {
	(value * 10.0).round() / 10.0
}
