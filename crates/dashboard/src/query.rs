//! Shared query parameter types for handlers.
//!
//! Parameter names are camelCase on the wire, matching the page URLs the
//! original front end navigates with.

use serde::Deserialize;

/// Query parameters accepted by the list views.
///
/// `q` and `selected` are client-page state carried in the URL; they are
/// never forwarded to the upstream API.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "cutType")]
    pub cut_type: Option<String>,
    pub material: Option<String>,
    /// Page-local search box contents.
    pub q: Option<String>,
    /// Comma-separated selection (visualization view only).
    pub selected: Option<String>,
}

/// Query parameters for the assembly view.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AssemblyParams {
    /// Comma-separated list of exactly 3 numeric cut ids.
    pub ids: Option<String>,
}

/// Query parameters for the delete endpoint.
///
/// The browser confirmation prompt becomes an explicit `confirm=true`
/// parameter here: without it no upstream request is issued.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteParams {
    pub confirm: bool,
}
