//! Capped symptom selection.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Maximum number of symptoms a user may select at once.
pub const MAX_SELECTED_SYMPTOMS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The cap was reached; the selection is unchanged.
    Rejected,
}

/// Ordered set of selected symptom ids, never larger than its cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomSelection {
    ids: IndexSet<String>,
    cap: usize,
}

impl Default for SymptomSelection {
    fn default() -> Self {
        Self::new(MAX_SELECTED_SYMPTOMS)
    }
}

impl SymptomSelection {
    /// Selection with a cap of its own, clamped to `1..=MAX_SELECTED_SYMPTOMS`.
    pub fn new(cap: usize) -> Self {
        Self {
            ids: IndexSet::new(),
            cap: cap.clamp(1, MAX_SELECTED_SYMPTOMS),
        }
    }

    /// Add the id if absent, remove it if present.
    pub fn toggle(&mut self, id: &str) -> ToggleOutcome {
        if self.ids.shift_remove(id) {
            ToggleOutcome::Removed
        } else if self.ids.len() < self.cap {
            self.ids.insert(id.to_owned());
            ToggleOutcome::Added
        } else {
            ToggleOutcome::Rejected
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= self.cap
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = SymptomSelection::default();
        assert_eq!(selection.toggle("stress"), ToggleOutcome::Added);
        assert!(selection.contains("stress"));
        assert_eq!(selection.toggle("stress"), ToggleOutcome::Removed);
        assert!(selection.is_empty());
    }

    #[test]
    fn sixth_add_is_rejected_but_removal_still_works() {
        let mut selection = SymptomSelection::default();
        for id in ["a", "b", "c", "d", "e"] {
            assert_eq!(selection.toggle(id), ToggleOutcome::Added);
        }
        assert!(selection.is_full());
        assert_eq!(selection.toggle("f"), ToggleOutcome::Rejected);
        assert_eq!(selection.len(), 5);

        assert_eq!(selection.toggle("c"), ToggleOutcome::Removed);
        assert_eq!(selection.toggle("f"), ToggleOutcome::Added);
        assert_eq!(selection.ids(), ["a", "b", "d", "e", "f"]);
    }

    #[test]
    fn cap_is_clamped_to_the_hard_limit() {
        let mut selection = SymptomSelection::new(9);
        assert_eq!(selection.cap(), MAX_SELECTED_SYMPTOMS);
        for id in ["a", "b", "c", "d", "e", "f", "g"] {
            selection.toggle(id);
        }
        assert_eq!(selection.len(), MAX_SELECTED_SYMPTOMS);

        assert_eq!(SymptomSelection::new(0).cap(), 1);
        assert_eq!(SymptomSelection::new(3).cap(), 3);
    }

    proptest! {
        #[test]
        fn selection_never_exceeds_cap(toggles in proptest::collection::vec("[a-h]", 0..64)) {
            let mut selection = SymptomSelection::default();
            for id in &toggles {
                selection.toggle(id);
                prop_assert!(selection.len() <= MAX_SELECTED_SYMPTOMS);
            }
        }
    }
}
