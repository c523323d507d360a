//! Ordering and layering for the three-cut assembly view.
//!
//! The assembly page receives three cut ids in its URL, fetches the records,
//! and paints them as stacked full-bleed layers. This module owns the pure
//! parts: id parsing, the display-order sort, and layer assignment.

use serde::Serialize;

use crate::cut::Cut;
use crate::error::CoreError;
use crate::image_key::extract_key;
use crate::types::CutId;

/// Exactly this many cuts make up an assembly.
pub const ASSEMBLY_SIZE: usize = 3;

const DEFAULT_TITLE: &str = "Assembly preview";

/// One rendered layer of the assembled preview.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyLayer {
    /// Paint order: 0 is the bottom of the stack.
    pub z_index: usize,
    pub cut_id: CutId,
    pub model_name: String,
    pub image_url: String,
    /// Raw stacking weight as entered by the user.
    pub display_order: i64,
    /// Human-readable key derived from the image URL.
    pub key: String,
}

/// Parse the `ids` query parameter for the assembly view.
///
/// Unparsable entries are dropped; the survivors must number exactly
/// [`ASSEMBLY_SIZE`]. Anything else aborts the whole view; the selection is
/// never padded or truncated.
pub fn parse_ids_param(ids: Option<&str>) -> Result<Vec<CutId>, CoreError> {
    let raw = ids.map(str::trim).filter(|raw| !raw.is_empty());
    let Some(raw) = raw else {
        return Err(CoreError::Validation(
            "No cuts selected for assembly".to_string(),
        ));
    };
    let ids: Vec<CutId> = raw
        .split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect();
    if ids.len() != ASSEMBLY_SIZE {
        return Err(CoreError::Validation(format!(
            "Invalid number of selected cuts ({}). Exactly {ASSEMBLY_SIZE} are required.",
            ids.len()
        )));
    }
    Ok(ids)
}

/// Order fetched cuts into render layers.
///
/// Sorts ascending by `displayOrder` (a stable sort, so ties keep their
/// fetched order) and assigns z-indices bottom-up: the lowest
/// `displayOrder` is painted first, at the bottom of the stack. A count
/// other than three means the upstream returned an inconsistent selection
/// and fails the whole view.
pub fn order_layers(mut cuts: Vec<Cut>) -> Result<Vec<AssemblyLayer>, CoreError> {
    if cuts.len() != ASSEMBLY_SIZE {
        return Err(CoreError::Validation(format!(
            "Could not load all {ASSEMBLY_SIZE} selected cuts (got {})",
            cuts.len()
        )));
    }
    cuts.sort_by_key(|cut| cut.display_order);
    Ok(cuts
        .into_iter()
        .enumerate()
        .map(|(z_index, cut)| {
            let key = extract_key(Some(&cut.image_url));
            AssemblyLayer {
                z_index,
                cut_id: cut.id,
                model_name: cut.model_name,
                image_url: cut.image_url,
                display_order: cut.display_order,
                key,
            }
        })
        .collect())
}

/// Page title for an assembled preview: named after the bottom layer's model.
pub fn assembly_title(layers: &[AssemblyLayer]) -> String {
    match layers.first() {
        Some(layer) if !layer.model_name.is_empty() => {
            format!("Assembly: {}", layer.model_name)
        }
        _ => DEFAULT_TITLE.to_string(),
    }
}
