use std::collections::HashMap;

use serde_json::Value;

use crate::score::HealthResult;

pub fn narrative_prompt(results: &[HealthResult]) -> String {
	let projection: Vec<Value> = results
		.iter()
		.map(|result| {
			serde_json::json!({
				"fullName": result.record.full_name,
				"description": result.record.description.as_deref().unwrap_or(""),
				"stars": result.record.stars,
				"language": result.record.language.as_deref().unwrap_or(""),
			})
		})
		.collect();
	let data = serde_json::to_string_pretty(&projection).unwrap_or_else(|_| "[]".to_string());

	format!(
		"You are a technical writer summarizing GitHub repositories. For each repository in the \
		 data below, write one concise professional paragraph describing what the project does, \
		 why it is useful, and which technologies stand out. Avoid bullet points and marketing \
		 language.\n\nReturn ONLY a JSON array where each element has exactly these fields:\n\
		 {{\n  \"fullName\": string,\n  \"summary\": string\n}}\n\nHere is the data:\n{data}"
	)
}

/// Extracts narratives keyed by repository full name from raw model text.
/// Rows missing either string field are dropped; summaries are kept trimmed,
/// empty included.
pub fn narrative_map(text: &str) -> HashMap<String, String> {
	let mut narratives = HashMap::new();

	for row in extract_rows(text) {
		let Some(full_name) = row.get("fullName").and_then(Value::as_str) else {
			continue;
		};
		let Some(summary) = row.get("summary").and_then(Value::as_str) else {
			continue;
		};

		narratives.insert(full_name.to_string(), summary.trim().to_string());
	}

	narratives
}

/// Left-join of narratives onto ranked results. Order and scores are never
/// touched; a missing key becomes an empty narrative.
pub fn attach_narratives(results: &mut [HealthResult], narratives: &HashMap<String, String>) {
	for result in results {
		result.narrative =
			Some(narratives.get(&result.record.full_name).cloned().unwrap_or_default());
	}
}

fn extract_rows(text: &str) -> Vec<Value> {
	if let Ok(Value::Array(rows)) = serde_json::from_str::<Value>(text) {
		return rows;
	}

	let Some(start) = text.find('[') else {
		return Vec::new();
	};
	let Some(end) = text.rfind(']') else {
		return Vec::new();
	};

	if end <= start {
		return Vec::new();
	}

	match serde_json::from_str::<Value>(&text[start..=end]) {
		Ok(Value::Array(rows)) => rows,
		_ => Vec::new(),
	}
}
