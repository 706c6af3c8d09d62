use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

use ulwazi_backend::models::{NewText, TextRecord, TextStatus};
use ulwazi_backend::store::{CorpusStore, TextQuery};

use super::{store_error_response, ApiResponse};
use crate::state::AppState;

/// Upper bound on the moderation queue listing.
const PENDING_LIMIT: u32 = 100;

#[derive(Debug, Serialize)]
pub struct CreatedText {
    pub id: i64,
    pub status: TextStatus,
}

fn bad_request(message: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({"error": message})))
}

/// Detail lookup. A missing id is a 404, never an empty success.
pub async fn get_text(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<TextRecord>>, (StatusCode, Json<Value>)> {
    let record = state
        .store
        .fetch_by_id(id)
        .await
        .map_err(store_error_response)?;
    Ok(Json(ApiResponse::success(record)))
}

/// Contribution endpoint. New texts always enter the moderation queue in
/// pending status; word metrics are fixed by the store at write time.
pub async fn create_text(
    State(state): State<Arc<AppState>>,
    Json(text): Json<NewText>,
) -> Result<Json<ApiResponse<CreatedText>>, (StatusCode, Json<Value>)> {
    let required = [
        ("title", &text.title),
        ("title_en", &text.title_en),
        ("content", &text.content),
        ("content_en", &text.content_en),
    ];
    for (name, value) in required {
        if value.trim().is_empty() {
            return Err(bad_request(&format!("field '{}' is required", name)));
        }
    }
    if !state.vocab.contains_key(&text.category) {
        return Err(bad_request(&format!("unknown category '{}'", text.category)));
    }

    let id = state
        .store
        .insert(&text, TextStatus::Pending)
        .await
        .map_err(store_error_response)?;

    tracing::info!("Text {} submitted for review", id);
    Ok(Json(ApiResponse::success(CreatedText {
        id,
        status: TextStatus::Pending,
    })))
}

/// Moderation queue, newest submissions first.
pub async fn pending_texts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<TextRecord>>>, (StatusCode, Json<Value>)> {
    let query = TextQuery {
        status: Some(TextStatus::Pending),
        ..Default::default()
    };
    let rows = state
        .store
        .fetch_page(&query, PENDING_LIMIT, 0)
        .await
        .map_err(store_error_response)?;
    Ok(Json(ApiResponse::success(rows)))
}

pub async fn approve_text(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Value>>, (StatusCode, Json<Value>)> {
    moderate(state, id, TextStatus::Approved).await
}

pub async fn reject_text(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Value>>, (StatusCode, Json<Value>)> {
    moderate(state, id, TextStatus::Rejected).await
}

/// The transition is one-way: only pending texts can be moderated, and
/// exactly once.
async fn moderate(
    state: Arc<AppState>,
    id: i64,
    status: TextStatus,
) -> Result<Json<ApiResponse<Value>>, (StatusCode, Json<Value>)> {
    let record = state
        .store
        .fetch_by_id(id)
        .await
        .map_err(store_error_response)?;

    if record.status != TextStatus::Pending {
        return Err(bad_request("text has already been moderated"));
    }

    state
        .store
        .update_status(id, status)
        .await
        .map_err(store_error_response)?;

    tracing::info!("Text {} moderated: {:?}", id, status);
    Ok(Json(ApiResponse::success(json!({"id": id, "status": status}))))
}
