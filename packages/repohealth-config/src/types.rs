use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
	pub service: Service,
	pub github: Github,
	pub narrative: Narrative,
	pub search: Search,
	pub scoring: Scoring,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}
impl Default for Service {
	fn default() -> Self {
		Self { http_bind: "127.0.0.1:8080".to_string(), log_level: "info".to_string() }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Github {
	pub api_base: String,
	pub token: Option<String>,
	pub user_agent: String,
	pub timeout_ms: u64,
	pub default_headers: Map<String, Value>,
}
impl Default for Github {
	fn default() -> Self {
		Self {
			api_base: "https://api.github.com".to_string(),
			token: None,
			user_agent: "repohealth-preview".to_string(),
			timeout_ms: 10_000,
			default_headers: Map::new(),
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Narrative {
	pub api_base: String,
	pub model: String,
	pub api_key: Option<String>,
	pub temperature: f64,
	pub max_output_tokens: u32,
	pub timeout_ms: u64,
	pub default_headers: Map<String, Value>,
}
impl Default for Narrative {
	fn default() -> Self {
		Self {
			api_base: "https://generativelanguage.googleapis.com".to_string(),
			model: "gemini-1.5-flash".to_string(),
			api_key: None,
			temperature: 0.4,
			max_output_tokens: 800,
			timeout_ms: 15_000,
			default_headers: Map::new(),
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	pub default_per_page: u32,
	pub max_per_page: u32,
	pub ai_max_per_page: u32,
}
impl Default for Search {
	fn default() -> Self {
		Self { default_per_page: 20, max_per_page: 50, ai_max_per_page: 20 }
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Scoring {
	pub weights: ScoringWeights,
	pub docs: ScoringDocs,
	pub compatibility: ScoringCompatibility,
	pub freshness: ScoringFreshness,
	pub labels: ScoringLabels,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
	pub activity: f64,
	pub community: f64,
	pub docs: f64,
	pub freshness: f64,
	pub compatibility: f64,
}
impl Default for ScoringWeights {
	fn default() -> Self {
		Self { activity: 0.30, community: 0.25, docs: 0.15, freshness: 0.15, compatibility: 0.15 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScoringDocs {
	/// Description length (chars) that earns the full description score.
	pub desc_len_ref: f64,
	pub license_present: f64,
	pub license_absent: f64,
}
impl Default for ScoringDocs {
	fn default() -> Self {
		Self { desc_len_ref: 120.0, license_present: 100.0, license_absent: 50.0 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScoringCompatibility {
	pub language_present: f64,
	pub language_absent: f64,
	pub license_present: f64,
	pub license_absent: f64,
}
impl Default for ScoringCompatibility {
	fn default() -> Self {
		Self {
			language_present: 100.0,
			language_absent: 50.0,
			license_present: 100.0,
			license_absent: 60.0,
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScoringFreshness {
	/// Updates older than this count as maximally stale.
	pub staleness_horizon_days: f64,
}
impl Default for ScoringFreshness {
	fn default() -> Self {
		Self { staleness_horizon_days: 730.0 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScoringLabels {
	pub highly_recommended_min: f64,
	pub promising_min: f64,
}
impl Default for ScoringLabels {
	fn default() -> Self {
		Self { highly_recommended_min: 80.0, promising_min: 60.0 }
	}
}
