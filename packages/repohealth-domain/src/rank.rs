use std::cmp::Ordering;

use crate::score::HealthResult;

/// Ranking policy identifier reported in search responses.
pub const RANKING: &str = "composite-health-score";

/// Sorts by health score descending and drops rows below the requested floor.
/// The sort is stable, so equal scores keep their upstream order. A floor of
/// zero or less keeps everything; the floor itself is inclusive.
pub fn rank_and_filter(mut results: Vec<HealthResult>, health_min: f64) -> Vec<HealthResult> {
	results.sort_by(|a, b| cmp_f64_desc(a.health_score, b.health_score));

	if health_min.is_finite() && health_min > 0.0 {
		results.retain(|result| result.health_score >= health_min);
	}

	results
}

pub fn cmp_f64_desc(a: f64, b: f64) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}
