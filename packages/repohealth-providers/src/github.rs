use std::time::Duration;

use reqwest::{
	Client, Response,
	header::{ACCEPT, AUTHORIZATION, HeaderMap, USER_AGENT},
};
use serde_json::Value;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use repohealth_config::Github;
use repohealth_domain::signals::RawRecord;

use crate::{Error, Result};

pub const ACCEPT_JSON: &str = "application/vnd.github+json";
pub const ACCEPT_RAW: &str = "application/vnd.github.raw";

const ERROR_FALLBACK: &str = "GitHub API error";

#[derive(Clone, Copy, Debug)]
pub struct RepoSearchArgs<'a> {
	pub query: &'a str,
	pub sort: Option<&'a str>,
	pub page: u32,
	pub per_page: u32,
}

/// Repository details backing the readme endpoint's stats block.
#[derive(Clone, Debug, Default)]
pub struct RepoStats {
	pub open_issues: u64,
	pub stargazers: u64,
	pub watchers: u64,
	pub forks: u64,
	pub language: Option<String>,
	pub updated_at: Option<String>,
}

pub async fn search_repositories(cfg: &Github, args: RepoSearchArgs<'_>) -> Result<Vec<RawRecord>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}/search/repositories", cfg.api_base);
	let mut params: Vec<(&str, String)> = vec![("q", args.query.to_string())];

	if let Some(sort) = args.sort {
		params.push(("sort", sort.to_string()));
		params.push(("order", "desc".to_string()));
	}

	params.push(("per_page", args.per_page.to_string()));
	params.push(("page", args.page.to_string()));

	let res = client
		.get(url)
		.headers(github_headers(cfg, ACCEPT_JSON)?)
		.query(&params)
		.send()
		.await?;
	let body = checked_json(res).await?;

	Ok(parse_search_records(&body))
}

pub async fn repository(cfg: &Github, owner: &str, repo: &str) -> Result<RepoStats> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}/repos/{owner}/{repo}", cfg.api_base);
	let res = client.get(url).headers(github_headers(cfg, ACCEPT_JSON)?).send().await?;
	let body = checked_json(res).await?;

	Ok(parse_repo_stats(&body))
}

pub async fn readme(cfg: &Github, owner: &str, repo: &str) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}/repos/{owner}/{repo}/readme", cfg.api_base);
	let res = client.get(url).headers(github_headers(cfg, ACCEPT_RAW)?).send().await?;
	let status = res.status();

	if !status.is_success() {
		return Err(Error::Status {
			status: status.as_u16(),
			message: format!("GitHub readme request failed for {owner}/{repo}."),
		});
	}

	Ok(res.text().await?)
}

pub async fn good_first_issues(cfg: &Github, owner: &str, repo: &str) -> Result<u64> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}/search/issues", cfg.api_base);
	let query = format!("repo:{owner}/{repo} label:\"good first issue\" state:open");
	let res = client
		.get(url)
		.headers(github_headers(cfg, ACCEPT_JSON)?)
		.query(&[("q", query.as_str()), ("per_page", "1")])
		.send()
		.await?;
	let body = checked_json(res).await?;

	Ok(body.get("total_count").and_then(Value::as_u64).unwrap_or(0))
}

pub fn github_headers(cfg: &Github, accept: &str) -> Result<HeaderMap> {
	let mut headers = crate::base_headers(&cfg.default_headers)?;

	headers.insert(ACCEPT, accept.parse()?);
	headers.insert(USER_AGENT, cfg.user_agent.parse()?);

	if let Some(token) = cfg.token.as_deref() {
		headers.insert(AUTHORIZATION, format!("Bearer {token}").parse()?);
	}

	Ok(headers)
}

/// Upstream failures keep their status and message; success bodies must be
/// JSON.
async fn checked_json(res: Response) -> Result<Value> {
	let status = res.status();

	if !status.is_success() {
		let body: Value = res.json().await.unwrap_or(Value::Null);
		let message =
			body.get("message").and_then(Value::as_str).unwrap_or(ERROR_FALLBACK).to_string();

		return Err(Error::Status { status: status.as_u16(), message });
	}

	Ok(res.json().await?)
}

fn parse_search_records(body: &Value) -> Vec<RawRecord> {
	let Some(items) = body.get("items").and_then(Value::as_array) else {
		return Vec::new();
	};

	items.iter().map(record_from_item).collect()
}

/// Wrong-typed or missing fields default instead of failing; scoring treats
/// the defaults as absent signals.
fn record_from_item(item: &Value) -> RawRecord {
	RawRecord {
		id: item.get("id").and_then(Value::as_u64).unwrap_or(0),
		name: string_field(item, "name"),
		owner: item
			.get("owner")
			.and_then(|owner| owner.get("login"))
			.and_then(Value::as_str)
			.unwrap_or("")
			.to_string(),
		full_name: string_field(item, "full_name"),
		html_url: string_field(item, "html_url"),
		description: optional_string_field(item, "description"),
		stars: u64_field(item, "stargazers_count"),
		forks: u64_field(item, "forks_count"),
		watchers: u64_field(item, "watchers_count"),
		open_issues: u64_field(item, "open_issues_count"),
		language: optional_string_field(item, "language"),
		license: license_id(item),
		updated_at: item
			.get("updated_at")
			.and_then(Value::as_str)
			.and_then(|raw| OffsetDateTime::parse(raw, &Rfc3339).ok()),
	}
}

fn parse_repo_stats(body: &Value) -> RepoStats {
	RepoStats {
		open_issues: u64_field(body, "open_issues_count"),
		stargazers: u64_field(body, "stargazers_count"),
		// `watchers_count` mirrors stargazers; the subscriber count is the
		// real watcher number.
		watchers: u64_field(body, "subscribers_count"),
		forks: u64_field(body, "forks_count"),
		language: optional_string_field(body, "language"),
		updated_at: optional_string_field(body, "updated_at"),
	}
}

// SPDX id preferred; empty strings fall through to the license key.
fn license_id(item: &Value) -> Option<String> {
	let license = item.get("license")?;
	let spdx = license.get("spdx_id").and_then(Value::as_str).filter(|value| !value.is_empty());
	let key = license.get("key").and_then(Value::as_str).filter(|value| !value.is_empty());

	spdx.or(key).map(str::to_string)
}

fn string_field(item: &Value, key: &str) -> String {
	item.get(key).and_then(Value::as_str).unwrap_or("").to_string()
}

fn u64_field(item: &Value, key: &str) -> u64 {
	item.get(key).and_then(Value::as_u64).unwrap_or(0)
}

fn optional_string_field(item: &Value, key: &str) -> Option<String> {
	item.get(key).and_then(Value::as_str).filter(|value| !value.is_empty()).map(str::to_string)
}
