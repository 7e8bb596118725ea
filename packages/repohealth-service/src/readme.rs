use repohealth_providers::github::RepoStats;

use crate::{Error, RepoHealthService, Result};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReadmeRequest {
	pub owner: Option<String>,
	pub repo: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ReadmeStats {
	pub open_issues: u64,
	pub stargazers: u64,
	pub watchers: u64,
	pub forks: u64,
	pub language: Option<String>,
	pub updated_at: Option<String>,
	pub good_first_issues: u64,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ReadmeResponse {
	pub readme: String,
	pub stats: ReadmeStats,
}

impl RepoHealthService {
	/// Readme text plus contribution stats for one repository. Each upstream
	/// call degrades to its default on failure so a partial answer still
	/// renders.
	pub async fn readme(&self, request: ReadmeRequest) -> Result<ReadmeResponse> {
		let owner = request.owner.as_deref().map(str::trim).unwrap_or("");
		let repo = request.repo.as_deref().map(str::trim).unwrap_or("");
		if owner.is_empty() || repo.is_empty() {
			return Err(Error::InvalidRequest {
				message: "owner and repo are required.".to_string(),
			});
		}

		let cfg = &self.cfg.github;
		let readme = match self.providers.repository.readme(cfg, owner, repo).await {
			Ok(text) => text,
			Err(err) => {
				tracing::warn!(error = %err, owner, repo, "Readme fetch failed; using empty text.");

				String::new()
			},
		};
		let stats = match self.providers.repository.repository(cfg, owner, repo).await {
			Ok(stats) => stats,
			Err(err) => {
				tracing::warn!(error = %err, owner, repo, "Stats fetch failed; using defaults.");

				RepoStats::default()
			},
		};
		let good_first_issues =
			match self.providers.repository.good_first_issues(cfg, owner, repo).await {
				Ok(count) => count,
				Err(err) => {
					tracing::warn!(error = %err, owner, repo, "Issue count failed; using zero.");

					0
				},
			};

		Ok(ReadmeResponse {
			readme,
			stats: ReadmeStats {
				open_issues: stats.open_issues,
				stargazers: stats.stargazers,
				watchers: stats.watchers,
				forks: stats.forks,
				language: stats.language,
				updated_at: stats.updated_at,
				good_first_issues,
			},
		})
	}
}
