use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;
use std::sync::Arc;

use ulwazi_backend::search::CorpusStatistics;

use super::{store_error_response, ApiResponse};
use crate::state::AppState;

/// Full corpus statistics, recomputed from the approved corpus on every
/// call.
pub async fn statistics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<CorpusStatistics>>, (StatusCode, Json<Value>)> {
    let stats = state
        .stats
        .compute_statistics()
        .await
        .map_err(store_error_response)?;

    Ok(Json(ApiResponse::success(stats)))
}
