use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use recorte_client::CutsApiError;
use recorte_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`CutsApiError`] for upstream
/// failures. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `recorte-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure reported by (or while reaching) the external cuts API.
    #[error(transparent)]
    Upstream(#[from] CutsApiError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            AppError::Upstream(err) => classify_upstream_error(err),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify an upstream failure into an HTTP status, error code, and message.
///
/// Upstream HTTP statuses pass through together with the server-provided
/// message; that message is the one users should see on a failed write.
/// Transport failures map to 502 with a sanitized message.
fn classify_upstream_error(err: &CutsApiError) -> (StatusCode, &'static str, String) {
    match err {
        CutsApiError::Api { status, message } => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
            "UPSTREAM_ERROR",
            message.clone(),
        ),
        CutsApiError::Request(err) => {
            tracing::error!(error = %err, "Cuts API request failed");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_UNAVAILABLE",
                "The cuts service could not be reached".to_string(),
            )
        }
    }
}
