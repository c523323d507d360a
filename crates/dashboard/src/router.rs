//! Route table for the dashboard service.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Path of the management list page.
pub const DASHBOARD_PATH: &str = "/dashboard";
/// Path of the visualization (selection) page.
pub const VISUALIZATION_PATH: &str = "/visualization";
/// Path of the assembled preview page.
pub const ASSEMBLY_PATH: &str = "/visualization/assembly";

/// Build the dashboard router with all routes wired to `state`.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(DASHBOARD_PATH, get(handlers::dashboard::dashboard_view))
        .route(
            VISUALIZATION_PATH,
            get(handlers::visualization::visualization_view),
        )
        .route(ASSEMBLY_PATH, get(handlers::assembly::assembly_view))
        .route("/cuts", post(handlers::cuts::create_cut))
        .route(
            "/cuts/{id}",
            put(handlers::cuts::update_cut).delete(handlers::cuts::delete_cut),
        )
        .with_state(state)
}
