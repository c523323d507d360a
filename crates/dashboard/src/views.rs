//! Serializable view models for the dashboard pages.
//!
//! A view model is everything a page needs to render: rows, tab counters,
//! and, because navigation is URL-driven, ready-built hrefs for page
//! links, sort links, and selection toggles. Hrefs re-encode the full query
//! string so sort and filter state survive every navigation.

use recorte_core::assembly::AssemblyLayer;
use recorte_core::cut::{Cut, CutStatus, StatusTabs};
use recorte_core::image_key::extract_key;
use recorte_core::pagination::{page_window, PaginationMeta};
use recorte_core::query_state::{encode_query, with_page, with_sort, QueryPairs};
use recorte_core::selection::{SelectionSet, SELECTION_FULL_NOTICE};
use recorte_core::types::CutId;
use serde::Serialize;

use crate::router::{ASSEMBLY_PATH, VISUALIZATION_PATH};

/// Sort options offered by the list filter dropdown.
///
/// Keys are forwarded verbatim in `sortBy`; legality is the server's call.
pub const SORT_OPTIONS: &[(&str, &str)] = &[
    ("modelName", "Model name"),
    ("sku", "SKU"),
    ("displayOrder", "Display order"),
    ("createdAt", "Most recent"),
];

/// One row of the management list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CutRow {
    pub id: CutId,
    pub model_name: String,
    pub sku: String,
    pub product_type: String,
    pub display_order: i64,
    pub status: CutStatus,
    pub status_label: &'static str,
    pub edit_href: String,
}

impl CutRow {
    pub fn from_cut(cut: &Cut) -> Self {
        Self {
            id: cut.id,
            model_name: cut.model_name.clone(),
            sku: cut.sku.clone(),
            product_type: cut.product_type.clone(),
            display_order: cut.display_order,
            status: cut.status,
            status_label: cut.status.label(),
            edit_href: format!("/dashboard/cuts/edit/{}", cut.id),
        }
    }
}

/// A numbered page link.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLink {
    pub number: i64,
    pub href: String,
    pub current: bool,
}

/// Previous/next navigation control. The href is always present; `enabled`
/// gates whether it is navigable.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    pub href: String,
    pub enabled: bool,
}

/// Pagination chrome for a list page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationView {
    pub meta: PaginationMeta,
    pub pages: Vec<PageLink>,
    pub prev: NavLink,
    pub next: NavLink,
}

impl PaginationView {
    /// Build the pagination chrome for the current URL.
    pub fn build(base_path: &str, pairs: &QueryPairs, meta: PaginationMeta) -> Self {
        let href_for = |page: i64| format!("{base_path}?{}", encode_query(&with_page(pairs, page)));
        let pages = page_window(meta.page, meta.total_pages)
            .into_iter()
            .map(|number| PageLink {
                number,
                href: href_for(number),
                current: number == meta.page,
            })
            .collect();
        let prev = NavLink {
            href: href_for(meta.page - 1),
            enabled: meta.has_prev(),
        };
        let next = NavLink {
            href: href_for(meta.page + 1),
            enabled: meta.has_next(),
        };
        Self {
            meta,
            pages,
            prev,
            next,
        }
    }
}

/// One entry of the sort dropdown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortOption {
    pub key: &'static str,
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// Sort state plus the links that change it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortView {
    pub current: Option<String>,
    pub options: Vec<SortOption>,
    /// Removes `sortBy` entirely and resets to page 1.
    pub clear_href: String,
}

impl SortView {
    /// Build sort links for the current URL. Selecting a sort always resets
    /// to page 1; every other parameter is preserved.
    pub fn build(base_path: &str, pairs: &QueryPairs, current: Option<&str>) -> Self {
        let options = SORT_OPTIONS
            .iter()
            .map(|&(key, label)| SortOption {
                key,
                label,
                href: format!("{base_path}?{}", encode_query(&with_sort(pairs, Some(key)))),
                active: current == Some(key),
            })
            .collect();
        Self {
            current: current.map(str::to_string),
            options,
            clear_href: format!("{base_path}?{}", encode_query(&with_sort(pairs, None))),
        }
    }
}

/// View model for the management list page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub rows: Vec<CutRow>,
    pub tabs: StatusTabs,
    pub sort: SortView,
    pub pagination: PaginationView,
    pub new_cut_href: &'static str,
    /// Set when the backing fetch failed or was skipped; the page renders
    /// its empty state instead of crashing.
    pub notice: Option<String>,
}

/// One row of the visualization list: a [`CutRow`] plus selection state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationRow {
    pub id: CutId,
    pub model_name: String,
    pub sku: String,
    pub display_order: i64,
    pub status: CutStatus,
    pub status_label: &'static str,
    pub image_url: String,
    /// Human-readable key derived from the image URL.
    pub key: String,
    pub selected: bool,
    /// Re-encodes the current URL with this row's id toggled.
    pub toggle_href: String,
}

impl VisualizationRow {
    pub fn build(cut: &Cut, selection: &SelectionSet, pairs: &QueryPairs) -> Self {
        let attempt = selection.attempt_param(cut.id);
        let selected_value = if attempt.is_empty() {
            None
        } else {
            Some(attempt.as_str())
        };
        let toggled = recorte_core::query_state::with_param(pairs, "selected", selected_value);
        Self {
            id: cut.id,
            model_name: cut.model_name.clone(),
            sku: cut.sku.clone(),
            display_order: cut.display_order,
            status: cut.status,
            status_label: cut.status.label(),
            image_url: cut.image_url.clone(),
            key: extract_key(Some(&cut.image_url)),
            selected: selection.contains(cut.id),
            toggle_href: format!("{VISUALIZATION_PATH}?{}", encode_query(&toggled)),
        }
    }
}

/// Selection summary for the visualization page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionView {
    pub count: usize,
    pub required: usize,
    pub complete: bool,
    /// Always shows the current count, e.g. `GENERATE (2)`.
    pub action_label: String,
    /// Present only when exactly three cuts are selected.
    pub generate_href: Option<String>,
    /// Overflow notice, set when the URL carried a rejected fourth id.
    pub notice: Option<&'static str>,
}

impl SelectionView {
    pub fn build(selection: &SelectionSet, rejected: bool) -> Self {
        let generate_href = selection
            .assembly_ids()
            .ok()
            .map(|ids| format!("{ASSEMBLY_PATH}?ids={ids}"));
        Self {
            count: selection.len(),
            required: recorte_core::selection::REQUIRED_SELECTIONS,
            complete: selection.is_complete(),
            action_label: selection.action_label(),
            generate_href,
            notice: rejected.then_some(SELECTION_FULL_NOTICE),
        }
    }
}

/// View model for the visualization (selection) page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationView {
    pub rows: Vec<VisualizationRow>,
    pub tabs: StatusTabs,
    pub sort: SortView,
    pub pagination: PaginationView,
    pub selection: SelectionView,
    pub notice: Option<String>,
}

/// Side-panel entry of the assembly page, in render order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelEntry {
    /// 1-based position in the stack, bottom first.
    pub position: usize,
    pub model_name: String,
    pub key: String,
    pub display_order: i64,
}

/// View model for the assembled preview.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyView {
    pub title: String,
    /// Full-bleed layers, bottom of the stack first.
    pub layers: Vec<AssemblyLayer>,
    /// Side-panel listing in the same order as `layers`.
    pub panel: Vec<PanelEntry>,
    pub back_href: &'static str,
}

impl AssemblyView {
    pub fn build(layers: Vec<AssemblyLayer>) -> Self {
        let title = recorte_core::assembly::assembly_title(&layers);
        let panel = layers
            .iter()
            .map(|layer| PanelEntry {
                position: layer.z_index + 1,
                model_name: layer.model_name.clone(),
                key: layer.key.clone(),
                display_order: layer.display_order,
            })
            .collect();
        Self {
            title,
            layers,
            panel,
            back_href: VISUALIZATION_PATH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recorte_core::query_state::parse_query;

    // -- Pagination hrefs --

    #[test]
    fn page_links_preserve_other_params() {
        let pairs = parse_query("page=2&sortBy=sku&cutType=aba");
        let meta = PaginationMeta { page: 2, per_page: 10, total: 50, total_pages: 5 };
        let view = PaginationView::build("/dashboard", &pairs, meta);
        assert_eq!(view.pages.len(), 4);
        let second = &view.pages[1];
        assert_eq!(second.number, 2);
        assert!(second.current);
        assert_eq!(second.href, "/dashboard?page=2&sortBy=sku&cutType=aba");
        assert!(view.prev.enabled);
        assert_eq!(view.prev.href, "/dashboard?page=1&sortBy=sku&cutType=aba");
    }

    #[test]
    fn next_disabled_on_last_page() {
        let pairs = parse_query("page=5");
        let meta = PaginationMeta { page: 5, per_page: 10, total: 50, total_pages: 5 };
        let view = PaginationView::build("/dashboard", &pairs, meta);
        assert!(!view.next.enabled);
        assert!(view.prev.enabled);
    }

    // -- Sort hrefs --

    #[test]
    fn sort_links_reset_page_and_keep_filters() {
        let pairs = parse_query("page=3&cutType=aba");
        let view = SortView::build("/dashboard", &pairs, None);
        let model_name = view
            .options
            .iter()
            .find(|option| option.key == "modelName")
            .unwrap();
        assert_eq!(model_name.href, "/dashboard?page=1&cutType=aba&sortBy=modelName");
        assert!(!model_name.active);
        assert_eq!(view.clear_href, "/dashboard?page=1&cutType=aba");
    }

    #[test]
    fn active_sort_is_marked() {
        let pairs = parse_query("sortBy=sku");
        let view = SortView::build("/visualization", &pairs, Some("sku"));
        let sku = view.options.iter().find(|option| option.key == "sku").unwrap();
        assert!(sku.active);
        assert_eq!(view.current.as_deref(), Some("sku"));
    }
}
