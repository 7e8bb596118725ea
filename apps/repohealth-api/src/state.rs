use std::sync::Arc;

use repohealth_service::RepoHealthService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<RepoHealthService>,
}
impl AppState {
	pub fn new(config: repohealth_config::Config) -> Self {
		Self { service: Arc::new(RepoHealthService::new(config)) }
	}
}
