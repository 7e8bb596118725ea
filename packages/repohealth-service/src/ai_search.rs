use std::collections::HashMap;

use repohealth_domain::{
	filter::{SearchMode, resolve_filter},
	narrative::{attach_narratives, narrative_map, narrative_prompt},
};

use crate::{RawFilter, RepoHealthService, Result, SearchResponse, search::build_response};

pub const MISSING_KEY_ADVISORY: &str = "Missing Gemini API key. AI summaries are unavailable.";

impl RepoHealthService {
	/// Search, score, and rank exactly like [`Self::search`], then enrich the
	/// ranked items with model-written summaries. Enrichment never changes
	/// order or scores, and any narrative failure degrades to an advisory.
	pub async fn ai_search(&self, request: RawFilter) -> Result<SearchResponse> {
		let spec = resolve_filter(&request, SearchMode::Ai, &self.cfg.search);
		let records = self.fetch_records(&spec).await?;
		let mut results = self.score_records(records, &spec);

		if results.is_empty() {
			return Ok(build_response(results, None));
		}

		let Some(api_key) = self.cfg.narrative.api_key.as_deref() else {
			attach_narratives(&mut results, &HashMap::new());

			return Ok(build_response(results, Some(MISSING_KEY_ADVISORY.to_string())));
		};
		let prompt = narrative_prompt(&results);
		let (summaries, advisory) =
			match self.providers.narrative.generate(&self.cfg.narrative, api_key, &prompt).await {
				Ok(text) => (narrative_map(&text), None),
				Err(err) => {
					tracing::warn!(error = %err, "Narrative generation failed; scores kept.");

					(HashMap::new(), Some(err.to_string()))
				},
			};

		attach_narratives(&mut results, &summaries);

		Ok(build_response(results, advisory))
	}
}
