// src/error.rs
//! Request-level error taxonomy. Handlers catch capability and store faults
//! and degrade to structured `{success: false, error: ...}` bodies; only the
//! variants below escape as HTTP error statuses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Caller asked for a capability outside the closed {chat, search} set.
    /// Client error, never a server fault; no capability gets constructed.
    #[error("unknown agent type '{0}'")]
    UnknownAgentType(String),

    /// The persistence dependency failed at request granularity.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::UnknownAgentType(_) => StatusCode::BAD_REQUEST,
            ApiError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}
