//! HTTP handlers, one module per page or resource.

pub mod assembly;
pub mod cuts;
pub mod dashboard;
pub mod health;
pub mod visualization;

use recorte_client::{CutsPage, ListCutsQuery};
use recorte_core::pagination::PaginationMeta;

use crate::state::AppState;

/// Fetch one page of cuts, degrading to the empty state instead of failing
/// the view.
///
/// A missing token skips the request entirely; an upstream failure is
/// logged. Either way the caller renders an empty page with fallback
/// pagination metadata and a notice.
pub(crate) async fn fetch_page(
    state: &AppState,
    token: Option<&str>,
    query: &ListCutsQuery,
) -> (CutsPage, Option<String>) {
    let fallback = CutsPage {
        data: Vec::new(),
        meta: PaginationMeta::fallback(query.page.max(1), query.limit.max(1)),
    };

    let Some(token) = token else {
        tracing::warn!("No auth token present; skipping cuts fetch");
        return (fallback, Some("authentication required".to_string()));
    };

    match state.api.list_cuts(token, query).await {
        Ok(page) => (page, None),
        Err(err) => {
            tracing::warn!(error = %err, "Failed to fetch cuts; rendering empty page");
            (fallback, Some("could not load cuts".to_string()))
        }
    }
}
