use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use repohealth_config::Narrative;

use crate::{Error, Result};

pub async fn generate(cfg: &Narrative, api_key: &str, prompt: &str) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}/v1beta/models/{}:generateContent", cfg.api_base, cfg.model);
	let body = serde_json::json!({
		"contents": [{ "parts": [{ "text": prompt }] }],
		"generationConfig": {
			"temperature": cfg.temperature,
			"maxOutputTokens": cfg.max_output_tokens,
			"responseMimeType": "application/json",
		},
	});
	let res = client
		.post(url)
		.headers(crate::base_headers(&cfg.default_headers)?)
		.query(&[("key", api_key)])
		.json(&body)
		.send()
		.await?;
	let status = res.status();

	if !status.is_success() {
		let body: Value = res.json().await.unwrap_or(Value::Null);
		let message = body
			.get("error")
			.and_then(|error| error.get("message"))
			.and_then(Value::as_str)
			.unwrap_or("Gemini request failed")
			.to_string();

		return Err(Error::Status { status: status.as_u16(), message });
	}

	let json: Value = res.json().await?;

	Ok(candidate_text(&json))
}

/// Text of the first candidate; some responses carry the legacy `output`
/// field instead. Missing both means empty text, not an error.
pub fn candidate_text(json: &Value) -> String {
	let first_candidate =
		json.get("candidates").and_then(Value::as_array).and_then(|candidates| candidates.first());
	let Some(candidate) = first_candidate else {
		return String::new();
	};
	let parts_text = candidate
		.get("content")
		.and_then(|content| content.get("parts"))
		.and_then(Value::as_array)
		.and_then(|parts| parts.first())
		.and_then(|part| part.get("text"))
		.and_then(Value::as_str);

	if let Some(text) = parts_text {
		return text.to_string();
	}

	candidate.get("output").and_then(Value::as_str).unwrap_or("").to_string()
}
