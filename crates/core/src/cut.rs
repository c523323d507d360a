//! The cut record and its status taxonomy.
//!
//! A cut is one cut-out image asset of the cap configurator. The record is
//! owned by the external cuts API; this is its wire shape (camelCase JSON).

use serde::{Deserialize, Serialize};

use crate::types::{CutId, Timestamp};

/// Lifecycle status of a cut, as encoded by the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CutStatus {
    #[serde(rename = "ATIVO")]
    Ativo,
    #[serde(rename = "PENDENTE")]
    Pendente,
    #[serde(rename = "EXPIRADO")]
    Expirado,
}

impl CutStatus {
    /// Label for list rows and status pills.
    pub fn label(&self) -> &'static str {
        match self {
            CutStatus::Ativo => "Active",
            CutStatus::Pendente => "Pending",
            CutStatus::Expirado => "Expired",
        }
    }
}

/// A single cut-out asset record, as served by `GET /cuts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cut {
    pub id: CutId,
    pub sku: String,
    pub model_name: String,
    pub cut_type: String,
    pub position: String,
    pub product_type: String,
    pub material: String,
    pub material_color: Option<String>,
    /// Stacking order used by the assembly view. Not guaranteed unique or
    /// dense; ordering among equal values is resolved by a stable sort.
    pub display_order: i64,
    pub image_url: String,
    pub status: CutStatus,
    /// Owner reference, assigned by the server. Never mutated here.
    pub user_id: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Counters for the `All / Active / Expired` tabs above a list.
///
/// `all` comes from the backend total in the pagination metadata; the two
/// status counts are computed from the currently loaded page only, so they
/// undercount whenever more than one page exists. The field names keep that
/// limitation visible instead of papering over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusTabs {
    pub all: i64,
    pub active_on_page: usize,
    pub expired_on_page: usize,
}

impl StatusTabs {
    /// Compute tab counters from the loaded page plus the backend total.
    pub fn from_page(cuts: &[Cut], backend_total: i64) -> Self {
        Self {
            all: backend_total,
            active_on_page: cuts.iter().filter(|c| c.status == CutStatus::Ativo).count(),
            expired_on_page: cuts.iter().filter(|c| c.status == CutStatus::Expirado).count(),
        }
    }
}
