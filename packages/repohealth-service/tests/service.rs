use std::sync::{
	Arc, Mutex,
	atomic::{AtomicUsize, Ordering},
};

use repohealth_config::{Config, Github, Narrative};
use repohealth_domain::signals::RawRecord;
use repohealth_providers::github::{RepoSearchArgs, RepoStats};
use repohealth_service::{
	BoxFuture, Error, NarrativeSource, Providers, RawFilter, ReadmeRequest, RepoHealthService,
	RepositorySource, Result, ai_search::MISSING_KEY_ADVISORY,
};
use repohealth_testkit::{narrative_text, record};

#[derive(Clone, Debug)]
struct RecordedSearch {
	query: String,
	sort: Option<String>,
	page: u32,
	per_page: u32,
}

#[derive(Default)]
struct FakeRepository {
	records: Vec<RawRecord>,
	readme: Option<String>,
	stats: Option<RepoStats>,
	good_first_issues: Option<u64>,
	search_error: Option<u16>,
	searches: Mutex<Vec<RecordedSearch>>,
}
impl FakeRepository {
	fn with_records(records: Vec<RawRecord>) -> Self {
		Self { records, ..Default::default() }
	}

	fn recorded(&self) -> Vec<RecordedSearch> {
		self.searches.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}
}
impl RepositorySource for FakeRepository {
	fn search_repositories<'a>(
		&'a self,
		_cfg: &'a Github,
		args: RepoSearchArgs<'a>,
	) -> BoxFuture<'a, Result<Vec<RawRecord>>> {
		let recorded = RecordedSearch {
			query: args.query.to_string(),
			sort: args.sort.map(str::to_string),
			page: args.page,
			per_page: args.per_page,
		};

		self.searches.lock().unwrap_or_else(|err| err.into_inner()).push(recorded);

		let result = match self.search_error {
			Some(status) =>
				Err(Error::Upstream { status, message: "API rate limit exceeded".to_string() }),
			None => Ok(self.records.clone()),
		};

		Box::pin(async move { result })
	}

	fn repository<'a>(
		&'a self,
		_cfg: &'a Github,
		_owner: &'a str,
		_repo: &'a str,
	) -> BoxFuture<'a, Result<RepoStats>> {
		let result = match &self.stats {
			Some(stats) => Ok(stats.clone()),
			None => Err(Error::Upstream { status: 500, message: "stats unavailable".to_string() }),
		};

		Box::pin(async move { result })
	}

	fn readme<'a>(
		&'a self,
		_cfg: &'a Github,
		_owner: &'a str,
		_repo: &'a str,
	) -> BoxFuture<'a, Result<String>> {
		let result = match &self.readme {
			Some(text) => Ok(text.clone()),
			None => Err(Error::Upstream { status: 404, message: "readme missing".to_string() }),
		};

		Box::pin(async move { result })
	}

	fn good_first_issues<'a>(
		&'a self,
		_cfg: &'a Github,
		_owner: &'a str,
		_repo: &'a str,
	) -> BoxFuture<'a, Result<u64>> {
		let result = match self.good_first_issues {
			Some(count) => Ok(count),
			None => Err(Error::Upstream { status: 500, message: "count unavailable".to_string() }),
		};

		Box::pin(async move { result })
	}
}

struct FakeNarrative {
	text: Option<String>,
	calls: AtomicUsize,
}
impl FakeNarrative {
	fn new(text: Option<&str>) -> Self {
		Self { text: text.map(str::to_string), calls: AtomicUsize::new(0) }
	}

	fn count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}
impl NarrativeSource for FakeNarrative {
	fn generate<'a>(
		&'a self,
		_cfg: &'a Narrative,
		_api_key: &'a str,
		_prompt: &'a str,
	) -> BoxFuture<'a, Result<String>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		let result = match &self.text {
			Some(text) => Ok(text.clone()),
			None => Err(Error::Upstream { status: 503, message: "model overloaded".to_string() }),
		};

		Box::pin(async move { result })
	}
}

fn test_config() -> Config {
	let mut cfg = Config::default();

	cfg.narrative.api_key = Some("test-key".to_string());

	cfg
}

fn service_with(
	cfg: Config,
	repository: Arc<FakeRepository>,
	narrative: Arc<FakeNarrative>,
) -> RepoHealthService {
	RepoHealthService::with_providers(cfg, Providers::new(repository, narrative))
}

#[tokio::test]
async fn search_scores_and_ranks_the_batch() {
	let mut alpha = record(1, "acme", "alpha");
	let mut beta = record(2, "acme", "beta");
	let mut gamma = record(3, "acme", "gamma");

	alpha.forks = 100;
	alpha.watchers = 200;
	beta.forks = 50;
	beta.watchers = 100;
	gamma.forks = 0;
	gamma.watchers = 0;

	let repository = Arc::new(FakeRepository::with_records(vec![gamma, alpha, beta]));
	let narrative = Arc::new(FakeNarrative::new(None));
	let service = service_with(test_config(), repository, narrative);
	let response = service.search(RawFilter::default()).await.expect("Failed to search.");

	assert_eq!(response.total_count, 3);
	assert_eq!(response.ranking, "composite-health-score");
	assert_eq!(response.advisory, None);

	let names = response.items.iter().map(|item| item.name.as_str()).collect::<Vec<_>>();

	assert_eq!(names, ["alpha", "beta", "gamma"]);
	assert!(response.items.iter().all(|item| item.narrative.is_none()));
	assert!(response.items.iter().all(|item| !item.health_label.is_empty()));
	assert!(response.items[0].health_score >= response.items[2].health_score);
}

#[tokio::test]
async fn search_composes_the_github_query() {
	let repository = Arc::new(FakeRepository::with_records(vec![record(1, "acme", "alpha")]));
	let narrative = Arc::new(FakeNarrative::new(None));
	let service = service_with(test_config(), repository.clone(), narrative);
	let request = RawFilter {
		query: Some("web".to_string()),
		language: Some("Go".to_string()),
		license: Some("mit".to_string()),
		stars_min: Some("100".to_string()),
		sort: Some("stars".to_string()),
		page: Some("3".to_string()),
		per_page: Some("500".to_string()),
		..Default::default()
	};

	service.search(request).await.expect("Failed to search.");

	let recorded = repository.recorded();

	assert_eq!(recorded.len(), 1);
	assert_eq!(recorded[0].query, "web language:Go license:mit stars:>=100 archived:false");
	assert_eq!(recorded[0].sort.as_deref(), Some("stars"));
	assert_eq!(recorded[0].page, 3);
	assert_eq!(recorded[0].per_page, 50);
}

#[tokio::test]
async fn search_applies_the_health_floor() {
	let records = vec![record(1, "acme", "alpha"), record(2, "acme", "beta")];
	let repository = Arc::new(FakeRepository::with_records(records));
	let narrative = Arc::new(FakeNarrative::new(None));
	let service = service_with(test_config(), repository, narrative);
	let request = RawFilter { health_min: Some("90".to_string()), ..Default::default() };
	let response = service.search(request).await.expect("Failed to search.");

	assert_eq!(response.total_count, 0);
	assert!(response.items.is_empty());
	assert_eq!(response.ranking, "composite-health-score");
}

#[tokio::test]
async fn search_surfaces_upstream_failures() {
	let repository = Arc::new(FakeRepository { search_error: Some(403), ..Default::default() });
	let narrative = Arc::new(FakeNarrative::new(None));
	let service = service_with(test_config(), repository, narrative);
	let result = service.search(RawFilter::default()).await;

	assert!(matches!(result, Err(Error::Upstream { status: 403, .. })));
}

#[tokio::test]
async fn ai_search_joins_summaries_by_full_name() {
	let mut alpha = record(1, "acme", "alpha");
	let beta = record(2, "acme", "beta");

	alpha.forks = 100;
	alpha.watchers = 200;

	let text = narrative_text(&[("acme/alpha", "Solid."), ("acme/zeta", "ignored")]);
	let repository = Arc::new(FakeRepository::with_records(vec![alpha, beta]));
	let narrative = Arc::new(FakeNarrative::new(Some(&text)));
	let service = service_with(test_config(), repository, narrative.clone());
	let request = RawFilter {
		ai_prompt: Some("resilient web tooling".to_string()),
		..Default::default()
	};
	let response = service.ai_search(request).await.expect("Failed to ai-search.");

	assert_eq!(narrative.count(), 1);
	assert_eq!(response.advisory, None);
	assert_eq!(response.items[0].full_name, "acme/alpha");
	assert_eq!(response.items[0].narrative.as_deref(), Some("Solid."));
	assert_eq!(response.items[1].narrative.as_deref(), Some(""));
}

#[tokio::test]
async fn ai_search_without_a_key_degrades_to_an_advisory() {
	let mut cfg = test_config();

	cfg.narrative.api_key = None;

	let repository = Arc::new(FakeRepository::with_records(vec![record(1, "acme", "alpha")]));
	let narrative = Arc::new(FakeNarrative::new(Some("unused")));
	let service = service_with(cfg, repository, narrative.clone());
	let response = service.ai_search(RawFilter::default()).await.expect("Failed to ai-search.");

	assert_eq!(narrative.count(), 0);
	assert_eq!(response.advisory.as_deref(), Some(MISSING_KEY_ADVISORY));
	assert_eq!(response.total_count, 1);
	assert!(response.items.iter().all(|item| item.narrative.as_deref() == Some("")));
}

#[tokio::test]
async fn ai_search_keeps_scores_when_the_model_fails() {
	let repository = Arc::new(FakeRepository::with_records(vec![record(1, "acme", "alpha")]));
	let narrative = Arc::new(FakeNarrative::new(None));
	let service = service_with(test_config(), repository, narrative.clone());
	let response = service.ai_search(RawFilter::default()).await.expect("Failed to ai-search.");

	assert_eq!(narrative.count(), 1);

	let advisory = response.advisory.expect("Missing advisory.");

	assert!(advisory.contains("model overloaded"), "Unexpected advisory: {advisory}");
	assert_eq!(response.total_count, 1);
	assert!(response.items[0].health_score > 0.0);
	assert_eq!(response.items[0].narrative.as_deref(), Some(""));
}

#[tokio::test]
async fn ai_search_with_unusable_text_keeps_empty_summaries() {
	let repository = Arc::new(FakeRepository::with_records(vec![record(1, "acme", "alpha")]));
	let narrative = Arc::new(FakeNarrative::new(Some("no json here")));
	let service = service_with(test_config(), repository, narrative);
	let response = service.ai_search(RawFilter::default()).await.expect("Failed to ai-search.");

	assert_eq!(response.advisory, None);
	assert!(response.items.iter().all(|item| item.narrative.as_deref() == Some("")));
}

#[tokio::test]
async fn ai_search_skips_the_model_for_an_empty_batch() {
	let repository = Arc::new(FakeRepository::default());
	let narrative = Arc::new(FakeNarrative::new(Some("unused")));
	let service = service_with(test_config(), repository, narrative.clone());
	let response = service.ai_search(RawFilter::default()).await.expect("Failed to ai-search.");

	assert_eq!(narrative.count(), 0);
	assert_eq!(response.total_count, 0);
	assert_eq!(response.advisory, None);
}

#[tokio::test]
async fn ai_search_caps_per_page_at_the_ai_limit() {
	let repository = Arc::new(FakeRepository::with_records(vec![record(1, "acme", "alpha")]));
	let narrative = Arc::new(FakeNarrative::new(Some("[]")));
	let service = service_with(test_config(), repository.clone(), narrative);
	let request = RawFilter { per_page: Some("500".to_string()), ..Default::default() };

	service.ai_search(request).await.expect("Failed to ai-search.");

	let recorded = repository.recorded();

	assert_eq!(recorded[0].per_page, 20);
}

#[tokio::test]
async fn readme_requires_owner_and_repo() {
	let repository = Arc::new(FakeRepository::default());
	let narrative = Arc::new(FakeNarrative::new(None));
	let service = service_with(test_config(), repository, narrative);
	let request = ReadmeRequest { owner: Some("  ".to_string()), repo: None };
	let err = service.readme(request).await.expect_err("Expected a request validation error.");

	assert!(matches!(err, Error::InvalidRequest { .. }));
	assert!(err.to_string().contains("owner and repo"), "Unexpected error: {err}");
}

#[tokio::test]
async fn readme_returns_text_and_stats() {
	let stats = RepoStats {
		open_issues: 12,
		stargazers: 3_400,
		watchers: 80,
		forks: 210,
		language: Some("Rust".to_string()),
		updated_at: Some("2026-08-01T00:00:00Z".to_string()),
	};
	let repository = Arc::new(FakeRepository {
		readme: Some("# Alpha".to_string()),
		stats: Some(stats),
		good_first_issues: Some(4),
		..Default::default()
	});
	let narrative = Arc::new(FakeNarrative::new(None));
	let service = service_with(test_config(), repository, narrative);
	let request =
		ReadmeRequest { owner: Some("acme".to_string()), repo: Some("alpha".to_string()) };
	let response = service.readme(request).await.expect("Failed to fetch readme.");

	assert_eq!(response.readme, "# Alpha");
	assert_eq!(response.stats.stargazers, 3_400);
	assert_eq!(response.stats.forks, 210);
	assert_eq!(response.stats.language.as_deref(), Some("Rust"));
	assert_eq!(response.stats.good_first_issues, 4);
}

#[tokio::test]
async fn readme_degrades_to_defaults_when_calls_fail() {
	let repository = Arc::new(FakeRepository::default());
	let narrative = Arc::new(FakeNarrative::new(None));
	let service = service_with(test_config(), repository, narrative);
	let request =
		ReadmeRequest { owner: Some("acme".to_string()), repo: Some("alpha".to_string()) };
	let response = service.readme(request).await.expect("Failed to fetch readme.");

	assert_eq!(response.readme, "");
	assert_eq!(response.stats.stargazers, 0);
	assert_eq!(response.stats.language, None);
	assert_eq!(response.stats.good_first_issues, 0);
}
