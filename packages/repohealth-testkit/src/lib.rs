use serde_json::Value;
use time::macros::datetime;

use repohealth_domain::signals::RawRecord;

/// A plausible search record; tests overwrite the fields they exercise.
pub fn record(id: u64, owner: &str, name: &str) -> RawRecord {
	RawRecord {
		id,
		name: name.to_string(),
		owner: owner.to_string(),
		full_name: format!("{owner}/{name}"),
		html_url: format!("https://github.com/{owner}/{name}"),
		description: Some(format!("{name} keeps small services honest.")),
		stars: 120,
		forks: 30,
		watchers: 45,
		open_issues: 6,
		language: Some("Rust".to_string()),
		license: Some("MIT".to_string()),
		updated_at: Some(datetime!(2026-08-01 00:00 UTC)),
	}
}

/// The JSON array text a summary model is expected to return.
pub fn narrative_text(rows: &[(&str, &str)]) -> String {
	let rows = rows
		.iter()
		.map(|(full_name, summary)| {
			serde_json::json!({ "fullName": full_name, "summary": summary })
		})
		.collect::<Vec<_>>();

	Value::Array(rows).to_string()
}
