//! Bearer-token extraction for handlers.
//!
//! Tokens come from the external identity provider and are opaque here: the
//! dashboard forwards them to the cuts API and never decodes or validates
//! them locally.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use recorte_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Required bearer token. Handlers using this extractor reject
/// unauthenticated requests outright. Used by all write endpoints and the
/// assembly view.
#[derive(Debug, Clone)]
pub struct Bearer(pub String);

/// Bearer token, if present.
///
/// List views use this: without a token the fetch is skipped entirely and
/// the page renders its empty state instead of erroring.
#[derive(Debug, Clone)]
pub struct MaybeBearer(pub Option<String>);

fn token_from_parts(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

impl FromRequestParts<AppState> for Bearer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        token_from_parts(parts).map(Bearer).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing Authorization header. Expected: Bearer <token>".into(),
            ))
        })
    }
}

impl FromRequestParts<AppState> for MaybeBearer {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeBearer(token_from_parts(parts)))
    }
}
