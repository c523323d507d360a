//! The visualization page: the list with selection checkboxes.
//!
//! Selection travels in the `selected` URL parameter, so this handler is as
//! stateless as the plain list. Each row links to the URL that toggles it;
//! replaying an overflowing parameter is what surfaces the rejection notice.

use axum::extract::{Query, RawQuery, State};
use axum::Json;
use recorte_client::ListCutsQuery;
use recorte_core::cut::StatusTabs;
use recorte_core::page_filter::filter_page;
use recorte_core::query_state::parse_query;
use recorte_core::selection::SelectionSet;

use crate::auth::MaybeBearer;
use crate::error::AppResult;
use crate::handlers::fetch_page;
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::router::VISUALIZATION_PATH;
use crate::state::AppState;
use crate::views::{PaginationView, SelectionView, SortView, VisualizationRow, VisualizationView};

/// GET /visualization
///
/// Same chrome as the dashboard list, plus per-row selection state and the
/// generate action. The cut-type and material filters are dashboard-only;
/// this view fetches by page, limit, and sort alone.
pub async fn visualization_view(
    State(state): State<AppState>,
    MaybeBearer(token): MaybeBearer,
    Query(params): Query<ListParams>,
    RawQuery(raw_query): RawQuery,
) -> AppResult<Json<DataResponse<VisualizationView>>> {
    let pairs = parse_query(raw_query.as_deref().unwrap_or(""));

    let query = ListCutsQuery {
        page: params.page.unwrap_or(1).max(1),
        limit: params.limit.unwrap_or(state.config.default_page_size).max(1),
        sort_by: params.sort_by.clone(),
        cut_type: None,
        material: None,
    };

    let (page, notice) = fetch_page(&state, token.as_deref(), &query).await;

    let (selection, rejected) = match params.selected.as_deref() {
        Some(param) => SelectionSet::from_param(param),
        None => (SelectionSet::new(), false),
    };

    let rows = filter_page(&page.data, params.q.as_deref().unwrap_or(""))
        .into_iter()
        .map(|cut| VisualizationRow::build(cut, &selection, &pairs))
        .collect();

    let view = VisualizationView {
        rows,
        tabs: StatusTabs::from_page(&page.data, page.meta.total),
        sort: SortView::build(VISUALIZATION_PATH, &pairs, params.sort_by.as_deref()),
        pagination: PaginationView::build(VISUALIZATION_PATH, &pairs, page.meta),
        selection: SelectionView::build(&selection, rejected),
        notice,
    };

    Ok(Json(DataResponse { data: view }))
}
