use serde::{Deserialize, Serialize};

use repohealth_config::Search;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SearchMode {
	Normal,
	Ai,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Timeframe {
	Any,
	Week,
	Month,
	Year,
}
impl Timeframe {
	fn parse(value: &str) -> Self {
		match value {
			"week" => Self::Week,
			"month" => Self::Month,
			"year" => Self::Year,
			_ => Self::Any,
		}
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortOrder {
	BestMatch,
	Stars,
	Updated,
}
impl SortOrder {
	fn parse(value: &str) -> Self {
		match value {
			"stars" => Self::Stars,
			"updated" => Self::Updated,
			_ => Self::BestMatch,
		}
	}

	/// Upstream `sort` parameter; best-match relevance is the upstream default
	/// and needs none.
	pub fn api_param(self) -> Option<&'static str> {
		match self {
			Self::BestMatch => None,
			Self::Stars => Some("stars"),
			Self::Updated => Some("updated"),
		}
	}
}

/// Query-string filters exactly as they arrive on the wire. Every field is
/// optional; values that fail to parse fall back to defaults instead of
/// rejecting the request.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawFilter {
	pub query: Option<String>,
	pub ai_prompt: Option<String>,
	pub language: Option<String>,
	pub license: Option<String>,
	pub stars_min: Option<String>,
	pub timeframe: Option<String>,
	pub sort: Option<String>,
	pub topics: Option<String>,
	pub page: Option<String>,
	pub per_page: Option<String>,
	pub health_min: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FilterSpec {
	pub terms: String,
	pub language: Option<String>,
	pub license: Option<String>,
	pub stars_min: Option<u64>,
	pub timeframe: Timeframe,
	pub sort: SortOrder,
	pub topics: Vec<String>,
	pub page: u32,
	pub per_page: u32,
	pub health_min: f64,
	pub mode: SearchMode,
}
impl Default for FilterSpec {
	fn default() -> Self {
		Self {
			terms: String::new(),
			language: None,
			license: None,
			stars_min: None,
			timeframe: Timeframe::Any,
			sort: SortOrder::BestMatch,
			topics: Vec::new(),
			page: 1,
			per_page: 20,
			health_min: 0.0,
			mode: SearchMode::Normal,
		}
	}
}

pub fn resolve_filter(raw: &RawFilter, mode: SearchMode, search: &Search) -> FilterSpec {
	let query = raw.query.as_deref().unwrap_or("").trim();
	let terms = match mode {
		SearchMode::Normal => query.to_string(),
		SearchMode::Ai => {
			let prompt = raw.ai_prompt.as_deref().unwrap_or("").trim();

			[query, prompt]
				.iter()
				.filter(|part| !part.is_empty())
				.copied()
				.collect::<Vec<_>>()
				.join(" ")
		},
	};
	let per_page_cap = match mode {
		SearchMode::Normal => search.max_per_page,
		SearchMode::Ai => search.ai_max_per_page,
	};

	FilterSpec {
		terms,
		language: constraint(raw.language.as_deref()),
		license: constraint(raw.license.as_deref()),
		stars_min: raw.stars_min.as_deref().and_then(|value| value.trim().parse::<u64>().ok()),
		timeframe: Timeframe::parse(raw.timeframe.as_deref().unwrap_or("").trim()),
		sort: SortOrder::parse(raw.sort.as_deref().unwrap_or("").trim()),
		topics: topics(raw.topics.as_deref()),
		page: parse_u32(raw.page.as_deref()).unwrap_or(1).max(1),
		per_page: parse_u32(raw.per_page.as_deref())
			.unwrap_or(search.default_per_page)
			.clamp(1, per_page_cap),
		health_min: raw
			.health_min
			.as_deref()
			.and_then(|value| value.trim().parse::<f64>().ok())
			.filter(|value| value.is_finite())
			.unwrap_or(0.0),
		mode,
	}
}

fn constraint(value: Option<&str>) -> Option<String> {
	let value = value.unwrap_or("").trim();

	if value.is_empty() || value == "any" { None } else { Some(value.to_string()) }
}

fn topics(value: Option<&str>) -> Vec<String> {
	value
		.unwrap_or("")
		.split(',')
		.map(str::trim)
		.filter(|topic| !topic.is_empty())
		.map(str::to_string)
		.collect()
}

fn parse_u32(value: Option<&str>) -> Option<u32> {
	value.and_then(|value| value.trim().parse::<u32>().ok())
}
