use axum::{
	Json, Router,
	extract::{Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};

use repohealth_service::{
	Error as ServiceError, RawFilter, ReadmeRequest, ReadmeResponse, SearchResponse,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/api/health", get(health))
		.route("/api/search", get(search))
		.route("/api/ai-search", get(ai_search))
		.route("/api/readme", get(readme))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	Query(request): Query<RawFilter>,
) -> Result<Json<SearchResponse>, ApiError> {
	let response = state.service.search(request).await?;

	Ok(Json(response))
}

async fn ai_search(
	State(state): State<AppState>,
	Query(request): Query<RawFilter>,
) -> Result<Json<SearchResponse>, ApiError> {
	let response = state.service.ai_search(request).await?;

	Ok(Json(response))
}

async fn readme(
	State(state): State<AppState>,
	Query(request): Query<ReadmeRequest>,
) -> Result<Json<ReadmeResponse>, ApiError> {
	let response = state.service.readme(request).await?;

	Ok(Json(response))
}

#[derive(Debug, serde::Serialize)]
struct ErrorBody {
	error: String,
	status: u16,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	message: String,
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let status = match &err {
			ServiceError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
			ServiceError::Upstream { status, .. } =>
				StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
			ServiceError::Provider { .. } => StatusCode::INTERNAL_SERVER_ERROR,
		};

		Self { status, message: err.to_string() }
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error: self.message, status: self.status.as_u16() };

		(self.status, Json(body)).into_response()
	}
}
