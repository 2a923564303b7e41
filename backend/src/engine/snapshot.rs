//! Ledger snapshot - the complete immutable state at one point in time
//!
//! The engine never mutates a published snapshot. Each committed transition
//! builds the next snapshot from a copy and swaps it in whole.
//!
//! # Critical Invariants
//!
//! - **Unique Ids**: No person id appears twice in the roster
//! - **Member Selection**: A selected id always names a roster member
//! - **Exclusive Modes**: The add-person form and a selection are never open together
//! - **Keyed Draft**: A pending split exists exactly when someone is selected,
//!   and belongs to that person

use crate::error::{LedgerError, LedgerResult};
use crate::ids::PersonId;
use crate::models::roster::Roster;
use crate::models::selection::SelectionState;
use crate::split::PendingSplit;
use serde::Serialize;
use std::collections::HashSet;

/// Which form the ledger is showing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "person_id", rename_all = "snake_case")]
pub enum LedgerMode {
    /// Nothing open
    Idle,
    /// Add-person form open
    Adding,
    /// Split form open for this person
    Selected(PersonId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerSnapshot {
    pub(crate) roster: Roster,
    pub(crate) selection: SelectionState,
    pub(crate) add_mode_open: bool,
    pub(crate) pending: Option<PendingSplit>,
}

impl LedgerSnapshot {
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn add_mode_open(&self) -> bool {
        self.add_mode_open
    }

    pub fn pending(&self) -> Option<&PendingSplit> {
        self.pending.as_ref()
    }

    pub fn mode(&self) -> LedgerMode {
        match self.selection.selected_id() {
            Some(id) => LedgerMode::Selected(id.clone()),
            None if self.add_mode_open => LedgerMode::Adding,
            None => LedgerMode::Idle,
        }
    }

    /// Drop any selection and its draft
    pub(crate) fn clear_selection(&mut self) {
        self.selection = SelectionState::none();
        self.pending = None;
    }
}

/// Validate snapshot integrity
///
/// Checks the invariants listed in the module docs.
pub fn validate_snapshot(snapshot: &LedgerSnapshot) -> LedgerResult<()> {
    // 1. Unique ids
    let mut seen = HashSet::new();
    for person in snapshot.roster.iter() {
        if !seen.insert(person.id()) {
            return Err(LedgerError::StateValidation(format!(
                "Duplicate person id in roster: {}",
                person.id()
            )));
        }
    }

    match snapshot.selection.selected_id() {
        Some(id) => {
            // 2. Member selection
            if !snapshot.roster.contains(id) {
                return Err(LedgerError::StateValidation(format!(
                    "Selected id {} is not in the roster",
                    id
                )));
            }

            // 3. Exclusive modes
            if snapshot.add_mode_open {
                return Err(LedgerError::StateValidation(format!(
                    "Add form open while {} is selected",
                    id
                )));
            }

            // 4. Keyed draft
            match &snapshot.pending {
                Some(pending) if pending.person_id() == id => {}
                Some(pending) => {
                    return Err(LedgerError::StateValidation(format!(
                        "Pending split belongs to {} but {} is selected",
                        pending.person_id(),
                        id
                    )))
                }
                None => {
                    return Err(LedgerError::StateValidation(format!(
                        "No pending split for selected {}",
                        id
                    )))
                }
            }
        }
        None => {
            if let Some(pending) = &snapshot.pending {
                return Err(LedgerError::StateValidation(format!(
                    "Pending split for {} without a selection",
                    pending.person_id()
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::person::PersonRecord;

    fn snapshot_with_clark() -> LedgerSnapshot {
        let mut roster = Roster::new();
        roster
            .insert_seed(PersonRecord::with_balance(PersonId::from("1"), "Clark", "img", -7))
            .unwrap();
        LedgerSnapshot {
            roster,
            ..LedgerSnapshot::default()
        }
    }

    #[test]
    fn test_empty_snapshot_is_idle_and_valid() {
        let snapshot = LedgerSnapshot::default();

        assert_eq!(snapshot.mode(), LedgerMode::Idle);
        assert!(validate_snapshot(&snapshot).is_ok());
    }

    #[test]
    fn test_selected_snapshot_valid() {
        let mut snapshot = snapshot_with_clark();
        snapshot.selection = SelectionState::of(PersonId::from("1"));
        snapshot.pending = Some(PendingSplit::new(PersonId::from("1")));

        assert_eq!(snapshot.mode(), LedgerMode::Selected(PersonId::from("1")));
        assert!(validate_snapshot(&snapshot).is_ok());
    }

    #[test]
    fn test_selection_with_add_mode_invalid() {
        let mut snapshot = snapshot_with_clark();
        snapshot.selection = SelectionState::of(PersonId::from("1"));
        snapshot.pending = Some(PendingSplit::new(PersonId::from("1")));
        snapshot.add_mode_open = true;

        assert!(matches!(
            validate_snapshot(&snapshot),
            Err(LedgerError::StateValidation(_))
        ));
    }

    #[test]
    fn test_selection_of_non_member_invalid() {
        let mut snapshot = snapshot_with_clark();
        snapshot.selection = SelectionState::of(PersonId::from("2"));
        snapshot.pending = Some(PendingSplit::new(PersonId::from("2")));

        assert!(validate_snapshot(&snapshot).is_err());
    }

    #[test]
    fn test_orphan_pending_invalid() {
        let mut snapshot = snapshot_with_clark();
        snapshot.pending = Some(PendingSplit::new(PersonId::from("1")));

        assert!(validate_snapshot(&snapshot).is_err());
    }

    #[test]
    fn test_clear_selection_drops_draft() {
        let mut snapshot = snapshot_with_clark();
        snapshot.selection = SelectionState::of(PersonId::from("1"));
        snapshot.pending = Some(PendingSplit::new(PersonId::from("1")));

        snapshot.clear_selection();

        assert_eq!(snapshot.mode(), LedgerMode::Idle);
        assert!(snapshot.pending().is_none());
    }
}
