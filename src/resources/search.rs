use serde::Deserialize;
use tracing::debug;

use crate::domain::{SearchHit, SearchResult};
use crate::error::Result;
use crate::transport::{ApiRequest, ApiSession};

pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    search: Vec<SearchHit>,
}

/// Raw `wbsearchentities` hits for `keyword`, restricted to items.
pub fn fetch_search_results(
    session: &dyn ApiSession,
    keyword: &str,
    language: &str,
) -> Result<Vec<SearchHit>> {
    let request = ApiRequest::new()
        .param("action", "wbsearchentities")
        .param("format", "json")
        .param("errorformat", "plaintext")
        .param("language", language)
        .param("uselang", language)
        .param("type", "item")
        .param("search", keyword);

    let payload = session.submit(&request)?;
    let response: SearchResponse = serde_json::from_value(payload)?;
    debug!(keyword, language, hits = response.search.len(), "entity search done");
    Ok(response.search)
}

pub fn process_search_results(hits: Vec<SearchHit>, language: &str) -> Vec<SearchResult> {
    hits.into_iter()
        .map(|hit| SearchResult::from_hit(hit, language))
        .collect()
}

pub fn search_keyword(
    session: &dyn ApiSession,
    keyword: &str,
    language: &str,
) -> Result<Vec<SearchResult>> {
    let hits = fetch_search_results(session, keyword, language)?;
    Ok(process_search_results(hits, language))
}
