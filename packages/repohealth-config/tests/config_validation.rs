use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use repohealth_config::{Config, Error};

fn write_temp_config(payload: &str) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("repohealth_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_and_remove(payload: &str) -> repohealth_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = repohealth_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

#[test]
fn defaults_are_valid() {
	assert!(repohealth_config::validate(&Config::default()).is_ok());
}

#[test]
fn empty_file_loads_defaults() {
	let cfg = load_and_remove("").expect("Expected empty config to load defaults.");

	assert_eq!(cfg.service.http_bind, "127.0.0.1:8080");
	assert_eq!(cfg.github.api_base, "https://api.github.com");
	assert_eq!(cfg.search.default_per_page, 20);
	assert_eq!(cfg.search.ai_max_per_page, 20);
	assert_eq!(cfg.scoring.weights.activity, 0.30);
	assert_eq!(cfg.scoring.freshness.staleness_horizon_days, 730.0);
	assert_eq!(cfg.scoring.labels.highly_recommended_min, 80.0);
}

#[test]
fn partial_file_keeps_remaining_defaults() {
	let cfg = load_and_remove("[service]\nhttp_bind = \"0.0.0.0:9090\"\n")
		.expect("Expected partial config to load.");

	assert_eq!(cfg.service.http_bind, "0.0.0.0:9090");
	assert_eq!(cfg.service.log_level, "info");
	assert_eq!(cfg.github.user_agent, "repohealth-preview");
	assert_eq!(cfg.narrative.model, "gemini-1.5-flash");
}

#[test]
fn missing_file_is_a_read_error() {
	let mut path = env::temp_dir();

	path.push("repohealth_config_test_does_not_exist.toml");

	let err = repohealth_config::load(&path).expect_err("Expected read error for missing file.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error: {err}");
}

#[test]
fn blank_github_token_normalizes_to_none() {
	let cfg = load_and_remove("[github]\ntoken = \"   \"\n").expect("Expected config to load.");

	assert!(cfg.github.token.is_none());
}

#[test]
fn blank_narrative_api_key_normalizes_to_none() {
	let cfg = load_and_remove("[narrative]\napi_key = \"\"\n").expect("Expected config to load.");

	assert!(cfg.narrative.api_key.is_none());

	let cfg = load_and_remove("[narrative]\napi_key = \"k-123\"\n")
		.expect("Expected config to load.");

	assert_eq!(cfg.narrative.api_key.as_deref(), Some("k-123"));
}

#[test]
fn weights_must_sum_to_one() {
	let mut cfg = Config::default();

	cfg.scoring.weights.activity = 0.5;

	let err = repohealth_config::validate(&cfg).expect_err("Expected weight sum validation error.");

	assert!(
		err.to_string().contains("scoring.weights must sum to 1.0."),
		"Unexpected error: {err}"
	);
}

#[test]
fn weights_must_be_in_range() {
	let mut cfg = Config::default();

	cfg.scoring.weights.docs = f64::NAN;

	let err =
		repohealth_config::validate(&cfg).expect_err("Expected weight range validation error.");

	assert!(
		err.to_string().contains("scoring.weights.docs must be in the range 0.0-1.0."),
		"Unexpected error: {err}"
	);

	cfg = Config::default();
	cfg.scoring.weights.community = 1.5;

	let err =
		repohealth_config::validate(&cfg).expect_err("Expected weight range validation error.");

	assert!(
		err.to_string().contains("scoring.weights.community must be in the range 0.0-1.0."),
		"Unexpected error: {err}"
	);
}

#[test]
fn per_page_caps_must_be_positive() {
	let mut cfg = Config::default();

	cfg.search.max_per_page = 0;

	let err = repohealth_config::validate(&cfg).expect_err("Expected per-page validation error.");

	assert!(
		err.to_string().contains("search.max_per_page must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn default_per_page_cannot_exceed_max() {
	let mut cfg = Config::default();

	cfg.search.default_per_page = 60;

	let err =
		repohealth_config::validate(&cfg).expect_err("Expected per-page bound validation error.");

	assert!(
		err.to_string().contains("search.default_per_page must not exceed search.max_per_page."),
		"Unexpected error: {err}"
	);
}

#[test]
fn label_thresholds_must_be_ordered() {
	let mut cfg = Config::default();

	cfg.scoring.labels.promising_min = 90.0;

	let err =
		repohealth_config::validate(&cfg).expect_err("Expected label order validation error.");

	assert!(
		err.to_string().contains(
			"scoring.labels.promising_min must not exceed scoring.labels.highly_recommended_min."
		),
		"Unexpected error: {err}"
	);
}

#[test]
fn desc_len_ref_must_be_positive() {
	let mut cfg = Config::default();

	cfg.scoring.docs.desc_len_ref = 0.0;

	let err =
		repohealth_config::validate(&cfg).expect_err("Expected desc_len_ref validation error.");

	assert!(
		err.to_string().contains("scoring.docs.desc_len_ref must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn timeouts_must_be_positive() {
	let mut cfg = Config::default();

	cfg.github.timeout_ms = 0;

	let err = repohealth_config::validate(&cfg).expect_err("Expected timeout validation error.");

	assert!(
		err.to_string().contains("github.timeout_ms must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn repohealth_example_toml_is_valid() {
	let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

	path.push("../../repohealth.example.toml");

	repohealth_config::load(&path).expect("Expected repohealth.example.toml to be a valid config.");
}
