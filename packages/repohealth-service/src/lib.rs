pub mod ai_search;
pub mod readme;
pub mod search;
pub mod time_serde;

mod error;

use std::{future::Future, pin::Pin, sync::Arc};

pub use error::{Error, Result};
pub use readme::{ReadmeRequest, ReadmeResponse, ReadmeStats};
use repohealth_config::{Config, Github, Narrative};
pub use repohealth_domain::filter::RawFilter;
use repohealth_domain::signals::RawRecord;
use repohealth_providers::{
	github::{self, RepoSearchArgs, RepoStats},
	narrative,
};
pub use search::{SearchItem, SearchResponse};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait RepositorySource
where
	Self: Send + Sync,
{
	fn search_repositories<'a>(
		&'a self,
		cfg: &'a Github,
		args: RepoSearchArgs<'a>,
	) -> BoxFuture<'a, Result<Vec<RawRecord>>>;

	fn repository<'a>(
		&'a self,
		cfg: &'a Github,
		owner: &'a str,
		repo: &'a str,
	) -> BoxFuture<'a, Result<RepoStats>>;

	fn readme<'a>(
		&'a self,
		cfg: &'a Github,
		owner: &'a str,
		repo: &'a str,
	) -> BoxFuture<'a, Result<String>>;

	fn good_first_issues<'a>(
		&'a self,
		cfg: &'a Github,
		owner: &'a str,
		repo: &'a str,
	) -> BoxFuture<'a, Result<u64>>;
}

pub trait NarrativeSource
where
	Self: Send + Sync,
{
	fn generate<'a>(
		&'a self,
		cfg: &'a Narrative,
		api_key: &'a str,
		prompt: &'a str,
	) -> BoxFuture<'a, Result<String>>;
}

#[derive(Clone)]
pub struct Providers {
	pub repository: Arc<dyn RepositorySource>,
	pub narrative: Arc<dyn NarrativeSource>,
}

pub struct RepoHealthService {
	pub cfg: Config,
	pub providers: Providers,
}

struct DefaultProviders;

impl RepositorySource for DefaultProviders {
	fn search_repositories<'a>(
		&'a self,
		cfg: &'a Github,
		args: RepoSearchArgs<'a>,
	) -> BoxFuture<'a, Result<Vec<RawRecord>>> {
		Box::pin(async move { Ok(github::search_repositories(cfg, args).await?) })
	}

	fn repository<'a>(
		&'a self,
		cfg: &'a Github,
		owner: &'a str,
		repo: &'a str,
	) -> BoxFuture<'a, Result<RepoStats>> {
		Box::pin(async move { Ok(github::repository(cfg, owner, repo).await?) })
	}

	fn readme<'a>(
		&'a self,
		cfg: &'a Github,
		owner: &'a str,
		repo: &'a str,
	) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move { Ok(github::readme(cfg, owner, repo).await?) })
	}

	fn good_first_issues<'a>(
		&'a self,
		cfg: &'a Github,
		owner: &'a str,
		repo: &'a str,
	) -> BoxFuture<'a, Result<u64>> {
		Box::pin(async move { Ok(github::good_first_issues(cfg, owner, repo).await?) })
	}
}

impl NarrativeSource for DefaultProviders {
	fn generate<'a>(
		&'a self,
		cfg: &'a Narrative,
		api_key: &'a str,
		prompt: &'a str,
	) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move { Ok(narrative::generate(cfg, api_key, prompt).await?) })
	}
}

impl Providers {
	pub fn new(repository: Arc<dyn RepositorySource>, narrative: Arc<dyn NarrativeSource>) -> Self {
		Self { repository, narrative }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);
		Self { repository: provider.clone(), narrative: provider }
	}
}

impl RepoHealthService {
	pub fn new(cfg: Config) -> Self {
		Self { cfg, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, providers: Providers) -> Self {
		Self { cfg, providers }
	}
}
