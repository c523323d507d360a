//! The assembled preview: three cuts stacked by display order.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::future::try_join_all;
use recorte_client::CutsApiError;
use recorte_core::assembly::{order_layers, parse_ids_param};
use recorte_core::error::CoreError;
use serde::Serialize;

use crate::auth::MaybeBearer;
use crate::query::AssemblyParams;
use crate::response::DataResponse;
use crate::router::VISUALIZATION_PATH;
use crate::state::AppState;
use crate::views::AssemblyView;

/// GET /visualization/assembly?ids=a,b,c
///
/// Parses and validates the id list, fetches the three cuts concurrently
/// with all-or-nothing semantics (the first failure aborts the whole view),
/// sorts by display order, and returns the layered preview. There is never a
/// partial assembly: every failure renders the dedicated error state with a
/// link back to the selection page.
pub async fn assembly_view(
    State(state): State<AppState>,
    MaybeBearer(token): MaybeBearer,
    Query(params): Query<AssemblyParams>,
) -> Result<Json<DataResponse<AssemblyView>>, AssemblyError> {
    let Some(token) = token else {
        return Err(AssemblyError::Unauthorized);
    };

    let ids = parse_ids_param(params.ids.as_deref()).map_err(AssemblyError::Selection)?;

    let fetches = ids.iter().map(|&id| state.api.get_cut(&token, id));
    let cuts = try_join_all(fetches).await.map_err(AssemblyError::Upstream)?;

    let layers = order_layers(cuts).map_err(AssemblyError::Selection)?;
    Ok(Json(DataResponse {
        data: AssemblyView::build(layers),
    }))
}

/// Failures that abort the assembly view.
#[derive(Debug)]
pub enum AssemblyError {
    /// No token: the view cannot fetch anything.
    Unauthorized,
    /// Malformed `ids` parameter or wrong cut count.
    Selection(CoreError),
    /// One of the three fetches failed.
    Upstream(CutsApiError),
}

/// Dedicated error payload: message plus a way back to the selection page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AssemblyErrorView {
    error: String,
    back_href: &'static str,
}

impl IntoResponse for AssemblyError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AssemblyError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Authentication is required to view the assembly".to_string(),
            ),
            AssemblyError::Selection(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AssemblyError::Upstream(err) => {
                tracing::warn!(error = %err, "Assembly fetch failed");
                let status = match &err {
                    CutsApiError::Api { status, .. } => {
                        StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
                    }
                    CutsApiError::Request(_) => StatusCode::BAD_GATEWAY,
                };
                (status, format!("Failed to load the selected cuts: {err}"))
            }
        };

        (
            status,
            Json(AssemblyErrorView {
                error: message,
                back_href: VISUALIZATION_PATH,
            }),
        )
            .into_response()
    }
}
