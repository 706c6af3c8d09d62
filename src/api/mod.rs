pub mod search;
pub mod server;
pub mod stats;
pub mod texts;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use ulwazi_backend::error::StoreError;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            code: 500,
            message: message.to_string(),
            data: None,
        }
    }
}

/// Map a store failure to an HTTP reply. A missing record is 404 and keeps
/// its own body; an unreachable store is 503 so callers can distinguish
/// "retry later" from a real query failure. Zero search results never come
/// through here.
pub fn store_error_response(e: StoreError) -> (StatusCode, Json<Value>) {
    match e {
        StoreError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": format!("text {} not found", id)})),
        ),
        StoreError::Unavailable(err) => {
            tracing::error!("corpus store unavailable: {:#}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"error": "corpus store unavailable"})),
            )
        }
        StoreError::Query(err) => {
            tracing::error!("corpus store query failed: {:#}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "corpus store error"})),
            )
        }
    }
}
