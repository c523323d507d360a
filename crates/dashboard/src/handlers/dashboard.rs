//! The management list page.

use axum::extract::{Query, RawQuery, State};
use axum::Json;
use recorte_client::ListCutsQuery;
use recorte_core::cut::StatusTabs;
use recorte_core::page_filter::filter_page;
use recorte_core::query_state::parse_query;

use crate::auth::MaybeBearer;
use crate::error::AppResult;
use crate::handlers::fetch_page;
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::router::DASHBOARD_PATH;
use crate::state::AppState;
use crate::views::{CutRow, DashboardView, PaginationView, SortView};

/// GET /dashboard
///
/// Renders the management list: one upstream page of cuts (optionally
/// narrowed by the page-local search query `q`), tab counters, and sort plus
/// pagination links that preserve the rest of the URL.
pub async fn dashboard_view(
    State(state): State<AppState>,
    MaybeBearer(token): MaybeBearer,
    Query(params): Query<ListParams>,
    RawQuery(raw_query): RawQuery,
) -> AppResult<Json<DataResponse<DashboardView>>> {
    let pairs = parse_query(raw_query.as_deref().unwrap_or(""));

    let query = ListCutsQuery {
        page: params.page.unwrap_or(1).max(1),
        limit: params.limit.unwrap_or(state.config.default_page_size).max(1),
        sort_by: params.sort_by.clone(),
        cut_type: params.cut_type.clone(),
        material: params.material.clone(),
    };

    let (page, notice) = fetch_page(&state, token.as_deref(), &query).await;

    let rows = filter_page(&page.data, params.q.as_deref().unwrap_or(""))
        .into_iter()
        .map(CutRow::from_cut)
        .collect();

    let view = DashboardView {
        rows,
        tabs: StatusTabs::from_page(&page.data, page.meta.total),
        sort: SortView::build(DASHBOARD_PATH, &pairs, params.sort_by.as_deref()),
        pagination: PaginationView::build(DASHBOARD_PATH, &pairs, page.meta),
        new_cut_href: "/dashboard/cuts/new",
        notice,
    };

    Ok(Json(DataResponse { data: view }))
}
