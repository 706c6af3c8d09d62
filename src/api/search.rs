use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use ulwazi_backend::search::{ParsedQuery, SearchRow};

use super::{store_error_response, ApiResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    /// Kept as a raw string so garbage pagination input coerces to page 1
    /// instead of rejecting the request.
    #[serde(default)]
    pub page: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub parsed: ParsedQuery,
    pub results: Vec<SearchRow>,
    pub total_results: u64,
    /// Literal occurrence total of the query across the corpus; 0 for
    /// category searches, which never compute it.
    pub total_occurrences: u64,
    pub page: u32,
    pub total_pages: u64,
    pub is_category_search: bool,
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<SearchResponse>>, (StatusCode, Json<Value>)> {
    let page = params
        .page
        .as_deref()
        .and_then(|p| p.parse::<u32>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1);

    let parsed = state.parser.parse(&params.q);

    let results = state
        .executor
        .search(&parsed, page, state.config.search.page_size)
        .await
        .map_err(store_error_response)?;

    let total_occurrences = if parsed.is_category_search() || parsed.is_empty() {
        0
    } else {
        state
            .stats
            .count_occurrences(&parsed.raw)
            .await
            .map_err(store_error_response)?
    };

    Ok(Json(ApiResponse::success(SearchResponse {
        query: parsed.raw.clone(),
        total_results: results.total_results,
        total_occurrences,
        page: results.page,
        total_pages: results.total_pages,
        is_category_search: results.is_category_search,
        results: results.rows,
        parsed,
    })))
}
