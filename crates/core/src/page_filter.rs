//! Page-local search over the loaded list rows.
//!
//! This narrows the rows already fetched for the current page; it is not a
//! server-side search and never triggers additional requests. Rows on other
//! pages are invisible to it, which is the documented behavior of the search
//! box, not a bug.

use crate::cut::Cut;

/// Filter the loaded page by a free-text query.
///
/// Matching is a case-insensitive substring test against `modelName` and
/// `sku`. An empty or whitespace-only query returns the page unchanged,
/// preserving order.
pub fn filter_page<'a>(cuts: &'a [Cut], query: &str) -> Vec<&'a Cut> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return cuts.iter().collect();
    }
    cuts.iter().filter(|cut| matches(cut, &needle)).collect()
}

fn matches(cut: &Cut, needle: &str) -> bool {
    cut.model_name.to_lowercase().contains(needle) || cut.sku.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cut::CutStatus;
    use chrono::TimeZone;

    fn cut(id: i64, model_name: &str, sku: &str) -> Cut {
        let at = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Cut {
            id,
            sku: sku.to_string(),
            model_name: model_name.to_string(),
            cut_type: "Americano".to_string(),
            position: "Frente".to_string(),
            product_type: "Cap".to_string(),
            material: "Cotton".to_string(),
            material_color: None,
            display_order: id,
            image_url: format!("https://cdn.example.com/cuts/{sku}.png"),
            status: CutStatus::Ativo,
            user_id: "user-1".to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    fn page() -> Vec<Cut> {
        vec![
            cut(1, "Bone Aba Reta", "ABA-001"),
            cut(2, "Bone Trucker", "TRK-002"),
            cut(3, "Viseira", "VIS-003"),
        ]
    }

    #[test]
    fn empty_query_returns_page_unchanged() {
        let cuts = page();
        let out = filter_page(&cuts, "");
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].id, 1);
        assert_eq!(out[2].id, 3);
    }

    #[test]
    fn whitespace_query_returns_page_unchanged() {
        let cuts = page();
        assert_eq!(filter_page(&cuts, "   ").len(), 3);
    }

    #[test]
    fn matches_model_name_case_insensitive() {
        let cuts = page();
        let out = filter_page(&cuts, "bone");
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, 1);
        assert_eq!(out[1].id, 2);
    }

    #[test]
    fn matches_sku_substring() {
        let cuts = page();
        let out = filter_page(&cuts, "vis-0");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 3);
    }

    #[test]
    fn no_match_yields_empty() {
        let cuts = page();
        assert!(filter_page(&cuts, "camiseta").is_empty());
    }
}
