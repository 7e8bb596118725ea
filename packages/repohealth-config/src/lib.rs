mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, Github, Narrative, Scoring, ScoringCompatibility, ScoringDocs, ScoringFreshness,
	ScoringLabels, ScoringWeights, Search, Service,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.github.api_base.trim().is_empty() {
		return Err(Error::Validation { message: "github.api_base must be non-empty.".to_string() });
	}
	if cfg.github.user_agent.trim().is_empty() {
		return Err(Error::Validation {
			message: "github.user_agent must be non-empty.".to_string(),
		});
	}
	if cfg.github.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "github.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.narrative.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "narrative.api_base must be non-empty.".to_string(),
		});
	}
	if cfg.narrative.model.trim().is_empty() {
		return Err(Error::Validation { message: "narrative.model must be non-empty.".to_string() });
	}
	if !cfg.narrative.temperature.is_finite() || cfg.narrative.temperature < 0.0 {
		return Err(Error::Validation {
			message: "narrative.temperature must be zero or greater.".to_string(),
		});
	}
	if cfg.narrative.max_output_tokens == 0 {
		return Err(Error::Validation {
			message: "narrative.max_output_tokens must be greater than zero.".to_string(),
		});
	}
	if cfg.narrative.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "narrative.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.default_per_page == 0 {
		return Err(Error::Validation {
			message: "search.default_per_page must be greater than zero.".to_string(),
		});
	}
	if cfg.search.max_per_page == 0 {
		return Err(Error::Validation {
			message: "search.max_per_page must be greater than zero.".to_string(),
		});
	}
	if cfg.search.ai_max_per_page == 0 {
		return Err(Error::Validation {
			message: "search.ai_max_per_page must be greater than zero.".to_string(),
		});
	}
	if cfg.search.default_per_page > cfg.search.max_per_page {
		return Err(Error::Validation {
			message: "search.default_per_page must not exceed search.max_per_page.".to_string(),
		});
	}

	let weights = &cfg.scoring.weights;

	for (label, weight) in [
		("activity", weights.activity),
		("community", weights.community),
		("docs", weights.docs),
		("freshness", weights.freshness),
		("compatibility", weights.compatibility),
	] {
		if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
			return Err(Error::Validation {
				message: format!("scoring.weights.{label} must be in the range 0.0-1.0."),
			});
		}
	}

	let sum = weights.activity
		+ weights.community
		+ weights.docs
		+ weights.freshness
		+ weights.compatibility;

	if (sum - 1.0).abs() > 1e-9 {
		return Err(Error::Validation { message: "scoring.weights must sum to 1.0.".to_string() });
	}

	if !cfg.scoring.docs.desc_len_ref.is_finite() || cfg.scoring.docs.desc_len_ref <= 0.0 {
		return Err(Error::Validation {
			message: "scoring.docs.desc_len_ref must be greater than zero.".to_string(),
		});
	}
	if !cfg.scoring.freshness.staleness_horizon_days.is_finite()
		|| cfg.scoring.freshness.staleness_horizon_days <= 0.0
	{
		return Err(Error::Validation {
			message: "scoring.freshness.staleness_horizon_days must be greater than zero."
				.to_string(),
		});
	}

	for (label, value) in [
		("docs.license_present", cfg.scoring.docs.license_present),
		("docs.license_absent", cfg.scoring.docs.license_absent),
		("compatibility.language_present", cfg.scoring.compatibility.language_present),
		("compatibility.language_absent", cfg.scoring.compatibility.language_absent),
		("compatibility.license_present", cfg.scoring.compatibility.license_present),
		("compatibility.license_absent", cfg.scoring.compatibility.license_absent),
	] {
		if !value.is_finite() || !(0.0..=100.0).contains(&value) {
			return Err(Error::Validation {
				message: format!("scoring.{label} must be in the range 0.0-100.0."),
			});
		}
	}

	let labels = &cfg.scoring.labels;

	for (label, value) in [
		("highly_recommended_min", labels.highly_recommended_min),
		("promising_min", labels.promising_min),
	] {
		if !value.is_finite() || !(0.0..=100.0).contains(&value) {
			return Err(Error::Validation {
				message: format!("scoring.labels.{label} must be in the range 0.0-100.0."),
			});
		}
	}

	if labels.promising_min > labels.highly_recommended_min {
		return Err(Error::Validation {
			message:
				"scoring.labels.promising_min must not exceed scoring.labels.highly_recommended_min."
					.to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.github.token.as_deref().map(|token| token.trim().is_empty()).unwrap_or(false) {
		cfg.github.token = None;
	}
	if cfg.narrative.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		cfg.narrative.api_key = None;
	}
}
