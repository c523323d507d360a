//! Selection state for the visualization list.
//!
//! The selection lives in the page URL (`?selected=12,7`), so every request
//! rebuilds it by replaying toggles in order; nothing is stored between
//! requests and navigating away discards it.

use crate::error::CoreError;
use crate::types::CutId;

/// Number of cuts an assembly requires.
pub const REQUIRED_SELECTIONS: usize = 3;

/// Notice shown when a fourth selection is attempted.
pub const SELECTION_FULL_NOTICE: &str =
    "Select exactly 3 cuts. Deselect one before selecting another.";

/// Outcome of a single toggle attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The id was added to the selection.
    Added,
    /// The id was already selected and has been removed.
    Removed,
    /// The selection already holds three ids; nothing changed.
    Rejected,
}

/// Insertion-ordered set of up to three selected cut ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<CutId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a selection from a comma-separated URL parameter.
    ///
    /// Entries are replayed through [`toggle`](Self::toggle) in order:
    /// unparsable entries are skipped, duplicates deselect, and anything past
    /// the third id is rejected. The second value reports whether any entry
    /// was rejected, so the caller can surface the notice for the attempt
    /// that carried it here.
    pub fn from_param(param: &str) -> (Self, bool) {
        let mut set = Self::new();
        let mut rejected = false;
        for part in param.split(',') {
            let Ok(id) = part.trim().parse::<CutId>() else {
                continue;
            };
            if set.toggle(id) == Toggle::Rejected {
                rejected = true;
            }
        }
        (set, rejected)
    }

    /// Toggle one id.
    ///
    /// Removal is always allowed; adding is allowed only while fewer than
    /// [`REQUIRED_SELECTIONS`] ids are selected. A rejected toggle leaves the
    /// selection unchanged.
    pub fn toggle(&mut self, id: CutId) -> Toggle {
        if let Some(pos) = self.ids.iter().position(|&existing| existing == id) {
            self.ids.remove(pos);
            return Toggle::Removed;
        }
        if self.ids.len() < REQUIRED_SELECTIONS {
            self.ids.push(id);
            Toggle::Added
        } else {
            Toggle::Rejected
        }
    }

    pub fn contains(&self, id: CutId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// True when exactly three ids are selected and generation is possible.
    pub fn is_complete(&self) -> bool {
        self.ids.len() == REQUIRED_SELECTIONS
    }

    /// Selected ids in insertion order.
    pub fn ids(&self) -> &[CutId] {
        &self.ids
    }

    /// Action label, always showing the current count.
    pub fn action_label(&self) -> String {
        format!("GENERATE ({})", self.ids.len())
    }

    /// Parameter value encoding the attempt to toggle `id`: the selected ids
    /// with the candidate appended, or without it when already selected.
    ///
    /// Appending past three is intentional: replaying the parameter on the
    /// next render is what surfaces the rejection notice.
    pub fn attempt_param(&self, id: CutId) -> String {
        let ids: Vec<String> = if self.contains(id) {
            self.ids
                .iter()
                .filter(|&&existing| existing != id)
                .map(|existing| existing.to_string())
                .collect()
        } else {
            self.ids
                .iter()
                .chain(std::iter::once(&id))
                .map(|existing| existing.to_string())
                .collect()
        };
        ids.join(",")
    }

    /// Comma-joined ids for the assembly navigation target, insertion order.
    ///
    /// Re-checks the exactly-three invariant even though callers gate the
    /// action on [`is_complete`](Self::is_complete).
    pub fn assembly_ids(&self) -> Result<String, CoreError> {
        if !self.is_complete() {
            return Err(CoreError::Validation(format!(
                "An assembly needs exactly {REQUIRED_SELECTIONS} cuts, {} selected",
                self.ids.len()
            )));
        }
        Ok(self
            .ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(","))
    }
}
