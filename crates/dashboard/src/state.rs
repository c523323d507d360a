use std::sync::Arc;

use recorte_client::CutsApi;

use crate::config::DashboardConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheaply cloneable: inner data is behind `Arc`. There is deliberately no
/// cache or session store here; every request rebuilds its view from the
/// URL and the upstream API.
#[derive(Clone)]
pub struct AppState {
    /// Client for the external cuts API.
    pub api: Arc<CutsApi>,
    /// Service configuration.
    pub config: Arc<DashboardConfig>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let api = Arc::new(CutsApi::new(config.cuts_api_url.clone()));
        Self {
            api,
            config: Arc::new(config),
        }
    }
}
