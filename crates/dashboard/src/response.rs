//! Shared response envelope types for handlers.
//!
//! All successful responses use a `{ "data": ... }` envelope, the same shape
//! the upstream cuts API uses for its list endpoint. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })` for compile-time
//! type safety and consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
