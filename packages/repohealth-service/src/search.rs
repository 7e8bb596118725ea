use repohealth_domain::{
	filter::{FilterSpec, SearchMode, resolve_filter},
	query::build_query,
	rank::{RANKING, rank_and_filter},
	score::{HealthResult, score_batch},
	signals::RawRecord,
};
use repohealth_providers::github::RepoSearchArgs;

use crate::{RawFilter, RepoHealthService, Result};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
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
	#[serde(default, with = "crate::time_serde")]
	pub updated_at: Option<time::OffsetDateTime>,
	pub health_score: f64,
	pub health_label: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub narrative: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
	pub total_count: u64,
	pub items: Vec<SearchItem>,
	pub ranking: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub advisory: Option<String>,
}

impl From<HealthResult> for SearchItem {
	fn from(result: HealthResult) -> Self {
		let record = result.record;

		Self {
			id: record.id,
			name: record.name,
			owner: record.owner,
			full_name: record.full_name,
			html_url: record.html_url,
			description: record.description,
			stars: record.stars,
			forks: record.forks,
			watchers: record.watchers,
			open_issues: record.open_issues,
			language: record.language,
			license: record.license,
			updated_at: record.updated_at,
			health_score: result.health_score,
			health_label: result.health_label.to_string(),
			narrative: result.narrative,
		}
	}
}

impl RepoHealthService {
	pub async fn search(&self, request: RawFilter) -> Result<SearchResponse> {
		let spec = resolve_filter(&request, SearchMode::Normal, &self.cfg.search);
		let records = self.fetch_records(&spec).await?;
		let results = self.score_records(records, &spec);

		Ok(build_response(results, None))
	}

	pub(crate) async fn fetch_records(&self, spec: &FilterSpec) -> Result<Vec<RawRecord>> {
		let today = time::OffsetDateTime::now_utc().date();
		let query = build_query(spec, today);

		tracing::debug!(query = %query, "Composed repository search query.");

		let args = RepoSearchArgs {
			query: &query,
			sort: spec.sort.api_param(),
			page: spec.page,
			per_page: spec.per_page,
		};

		self.providers.repository.search_repositories(&self.cfg.github, args).await
	}

	pub(crate) fn score_records(
		&self,
		records: Vec<RawRecord>,
		spec: &FilterSpec,
	) -> Vec<HealthResult> {
		let scored = score_batch(records, &self.cfg.scoring, time::OffsetDateTime::now_utc());

		rank_and_filter(scored, spec.health_min)
	}
}

pub(crate) fn build_response(
	results: Vec<HealthResult>,
	advisory: Option<String>,
) -> SearchResponse {
	let total_count = results.len() as u64;
	let items = results.into_iter().map(SearchItem::from).collect();

	SearchResponse { total_count, items, ranking: RANKING.to_string(), advisory }
}
