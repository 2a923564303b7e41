//! Selection of the person the next split is recorded against
//!
//! At most one person is selected at a time. Selecting and clearing always
//! close the add-person form, so the two modes can never be open together.

use crate::ids::PersonId;
use serde::{Deserialize, Serialize};

/// Currently selected person, if any
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    selected_id: Option<PersonId>,
}

impl SelectionState {
    pub fn none() -> Self {
        Self { selected_id: None }
    }

    pub fn of(id: PersonId) -> Self {
        Self {
            selected_id: Some(id),
        }
    }

    pub fn selected_id(&self) -> Option<&PersonId> {
        self.selected_id.as_ref()
    }

    pub fn is_selected(&self, id: &PersonId) -> bool {
        self.selected_id.as_ref() == Some(id)
    }

    pub fn is_none(&self) -> bool {
        self.selected_id.is_none()
    }
}

/// Result of a selection change: the new selection plus the add-mode flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOutcome {
    pub selection: SelectionState,
    pub add_mode_open: bool,
}

/// Toggle semantics for selection
///
/// Membership is not checked here; the engine validates ids against the
/// roster before calling in.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionController;

impl SelectionController {
    /// Select `id`, or deselect when it is already the selection
    ///
    /// # Example
    /// ```
    /// use split_ledger_core::models::selection::{SelectionController, SelectionState};
    /// use split_ledger_core::PersonId;
    ///
    /// let clark = PersonId::from("118836");
    /// let first = SelectionController::select(&SelectionState::none(), &clark);
    /// assert!(first.selection.is_selected(&clark));
    ///
    /// let second = SelectionController::select(&first.selection, &clark);
    /// assert!(second.selection.is_none());
    /// assert!(!second.add_mode_open);
    /// ```
    pub fn select(current: &SelectionState, id: &PersonId) -> SelectionOutcome {
        let selection = if current.is_selected(id) {
            SelectionState::none()
        } else {
            SelectionState::of(id.clone())
        };

        SelectionOutcome {
            selection,
            add_mode_open: false,
        }
    }

    pub fn clear() -> SelectionOutcome {
        SelectionOutcome {
            selection: SelectionState::none(),
            add_mode_open: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_switches_between_people() {
        let clark = PersonId::from("1");
        let sarah = PersonId::from("2");

        let first = SelectionController::select(&SelectionState::none(), &clark);
        let second = SelectionController::select(&first.selection, &sarah);

        assert!(second.selection.is_selected(&sarah));
        assert!(!second.selection.is_selected(&clark));
    }

    #[test]
    fn test_clear_always_none() {
        let outcome = SelectionController::clear();

        assert!(outcome.selection.is_none());
        assert!(!outcome.add_mode_open);
    }
}
