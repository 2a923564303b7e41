//! Ledger Engine
//!
//! Orchestrates the roster, the selection and the split calculator behind a
//! small set of transitions:
//!
//! ```text
//! Idle     --toggle_add_mode-->        Adding
//! Adding   --toggle_add_mode-->        Idle
//! Idle/Adding --select_person(id)-->   Selected(id)
//! Selected(id) --select_person(id)-->  Idle            (toggle-off)
//! Selected(id) --select_person(id2)--> Selected(id2)   (fresh draft)
//! Selected(id) --toggle_add_mode-->    Adding
//! *        --add_person-->             roster + 1, add form closed
//! Selected(id) --submit_split-->       Idle            (balance of id updated)
//! *        --remove_person(id)-->      roster - 1, selection cleared if it was id
//! *        --clear_all [confirmed]-->  Idle, empty roster
//! ```
//!
//! Each operation works on a copy of the current snapshot and swaps it in only
//! when the whole transition succeeded. A failed operation leaves the snapshot,
//! the event log and the sequence counter untouched.
//!
//! # Example
//!
//! ```rust
//! use split_ledger_core::engine::{LedgerConfig, LedgerEngine};
//! use split_ledger_core::split::Payer;
//! use split_ledger_core::PersonId;
//!
//! let mut engine = LedgerEngine::new(LedgerConfig::demo()).unwrap();
//! let clark = PersonId::from("118836");
//!
//! engine.select_person(&clark).unwrap();
//! let updated = engine.submit_split(Some(100), Some(40), Payer::User).unwrap();
//!
//! assert_eq!(updated.balance(), 53);
//! assert!(engine.selection().is_none());
//! ```

use crate::engine::config::LedgerConfig;
use crate::engine::confirm::Confirm;
use crate::engine::snapshot::{validate_snapshot, LedgerMode, LedgerSnapshot};
use crate::error::{LedgerError, LedgerResult, ValidationError};
use crate::ids::{IdGenerator, PersonId};
use crate::models::event::{Event, EventLog};
use crate::models::person::PersonRecord;
use crate::models::roster::Roster;
use crate::models::selection::{SelectionController, SelectionState};
use crate::split::{compute_shares, Payer, PendingSplit, SplitShares};

pub struct LedgerEngine {
    /// Current published state
    snapshot: LedgerSnapshot,

    /// Injected id source for new people
    ids: Box<dyn IdGenerator>,

    config: LedgerConfig,

    /// Committed transitions
    event_log: EventLog,

    /// Sequence number of the next committed transition
    next_seq: u64,
}

impl LedgerEngine {
    /// Create an engine using the id generator named in the config
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the config fails validation.
    pub fn new(config: LedgerConfig) -> LedgerResult<Self> {
        let ids = config.id_generator.build();
        Self::with_id_generator(config, ids)
    }

    /// Create an engine with an explicitly injected id generator
    ///
    /// The config's `id_generator` field is ignored.
    pub fn with_id_generator(config: LedgerConfig, ids: Box<dyn IdGenerator>) -> LedgerResult<Self> {
        config.validate()?;

        let mut roster = Roster::new();
        for seed in &config.initial_people {
            roster
                .insert_seed(PersonRecord::with_balance(
                    seed.id.clone(),
                    seed.name.trim(),
                    seed.avatar_ref.trim(),
                    seed.balance,
                ))
                .map_err(|e| LedgerError::InvalidConfig(e.to_string()))?;
        }

        tracing::debug!(people = roster.len(), "ledger initialized");

        Ok(Self {
            snapshot: LedgerSnapshot {
                roster,
                ..LedgerSnapshot::default()
            },
            ids,
            config,
            event_log: EventLog::new(),
            next_seq: 1,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current immutable snapshot
    pub fn snapshot(&self) -> &LedgerSnapshot {
        &self.snapshot
    }

    pub fn roster(&self) -> &Roster {
        self.snapshot.roster()
    }

    pub fn selection(&self) -> &SelectionState {
        self.snapshot.selection()
    }

    pub fn mode(&self) -> LedgerMode {
        self.snapshot.mode()
    }

    pub fn add_mode_open(&self) -> bool {
        self.snapshot.add_mode_open()
    }

    pub fn pending(&self) -> Option<&PendingSplit> {
        self.snapshot.pending()
    }

    pub fn person(&self, id: &PersonId) -> Option<&PersonRecord> {
        self.snapshot.roster().get(id)
    }

    /// Currently selected person, if any
    pub fn selected_person(&self) -> Option<&PersonRecord> {
        self.selection()
            .selected_id()
            .and_then(|id| self.snapshot.roster().get(id))
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ========================================================================
    // Add-person form
    // ========================================================================

    /// Open or close the add-person form, returning the new flag
    ///
    /// Opening the form drops any selection and its draft.
    pub fn toggle_add_mode(&mut self) -> bool {
        let mut next = self.snapshot.clone();
        let open = !next.add_mode_open;
        if open {
            next.clear_selection();
        }
        next.add_mode_open = open;

        tracing::info!(open, "add-person form toggled");
        self.commit(next, |seq| Event::AddModeToggled { seq, open });
        open
    }

    /// Append a new person with balance 0 and close the add-person form
    ///
    /// The current selection, if any, is kept.
    ///
    /// # Errors
    ///
    /// * `EmptyName` / `EmptyAvatar` for blank fields
    /// * `IdSpaceExhausted` if no fresh id could be drawn
    pub fn add_person(&mut self, name: &str, avatar_ref: &str) -> LedgerResult<PersonRecord> {
        let mut next = self.snapshot.clone();
        let person = next
            .roster
            .add_person_tagged(
                name,
                avatar_ref,
                self.ids.as_mut(),
                self.config.tag_avatar_with_id,
            )
            .map_err(|e| reject("add_person", e))?;
        next.add_mode_open = false;

        tracing::info!(id = %person.id(), name = person.name(), "person added");
        self.commit(next, |seq| Event::PersonAdded {
            seq,
            person_id: person.id().clone(),
            name: person.name().to_string(),
        });
        Ok(person)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Select a person, or deselect them if they are already selected
    ///
    /// Closes the add-person form. A new selection always starts with a fresh
    /// draft; the previous person's draft is discarded.
    ///
    /// # Errors
    ///
    /// `UnknownPerson` if `id` is not in the roster.
    pub fn select_person(&mut self, id: &PersonId) -> LedgerResult<SelectionState> {
        if !self.snapshot.roster.contains(id) {
            return Err(reject(
                "select_person",
                ValidationError::UnknownPerson(id.clone()).into(),
            ));
        }

        let outcome = SelectionController::select(&self.snapshot.selection, id);
        let mut next = self.snapshot.clone();
        next.pending = outcome
            .selection
            .selected_id()
            .map(|selected| PendingSplit::new(selected.clone()));
        next.selection = outcome.selection.clone();
        next.add_mode_open = outcome.add_mode_open;

        let person_id = id.clone();
        if outcome.selection.is_none() {
            tracing::info!(id = %id, "selection toggled off");
            self.commit(next, |seq| Event::SelectionCleared { seq, person_id });
        } else {
            tracing::info!(id = %id, "person selected");
            self.commit(next, |seq| Event::PersonSelected { seq, person_id });
        }
        Ok(outcome.selection)
    }

    /// Drop the selection (and its draft) and close the add-person form
    pub fn deselect(&mut self) -> SelectionState {
        let outcome = SelectionController::clear();
        let previous = self.snapshot.selection.selected_id().cloned();
        let was_adding = self.snapshot.add_mode_open;

        let mut next = self.snapshot.clone();
        next.clear_selection();
        next.add_mode_open = outcome.add_mode_open;

        match previous {
            Some(person_id) => {
                tracing::info!(id = %person_id, "selection cleared");
                self.commit(next, |seq| Event::SelectionCleared { seq, person_id });
            }
            None if was_adding => {
                tracing::info!("add-person form closed");
                self.commit(next, |seq| Event::AddModeToggled { seq, open: false });
            }
            None => {}
        }
        outcome.selection
    }

    // ========================================================================
    // Split draft
    // ========================================================================

    /// Set or clear the bill value of the current draft
    pub fn set_total_bill(&mut self, total_bill: Option<i64>) -> LedgerResult<()> {
        self.edit_pending("set_total_bill", |pending| pending.set_total_bill(total_bill))
    }

    /// Set or clear the user's expense of the current draft
    ///
    /// # Errors
    ///
    /// `ContributionExceedsBill` if the value is above the draft's bill; the
    /// previous value is kept.
    pub fn set_user_contribution(&mut self, contribution: Option<i64>) -> LedgerResult<()> {
        self.edit_pending("set_user_contribution", |pending| {
            pending.set_user_contribution(contribution)
        })
    }

    pub fn set_payer(&mut self, payer: Payer) -> LedgerResult<()> {
        self.edit_pending("set_payer", |pending| {
            pending.set_payer(payer);
            Ok(())
        })
    }

    /// Submit the current draft for the selected person
    pub fn submit_pending_split(&mut self) -> LedgerResult<PersonRecord> {
        let shares = match self.snapshot.pending() {
            Some(pending) => pending.shares().map_err(LedgerError::from),
            None => Err(ValidationError::NoSelection.into()),
        }
        .map_err(|e| reject("submit_pending_split", e))?;

        self.apply_split(shares)
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    /// Record a bill split with the selected person
    ///
    /// Empty form fields are passed as `None`. On success the selected
    /// person's balance moves by the split's delta and the selection is
    /// cleared. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// * `NoSelection` if nobody is selected
    /// * `MissingBill`, `ZeroBill`, `MissingContribution`, `NegativeAmount`
    ///   from the calculator
    /// * `BalanceOverflow` if the new balance does not fit in i64
    pub fn submit_split(
        &mut self,
        total_bill: Option<i64>,
        user_contribution: Option<i64>,
        payer: Payer,
    ) -> LedgerResult<PersonRecord> {
        let shares = if self.snapshot.selection.is_none() {
            Err(ValidationError::NoSelection)
        } else {
            compute_shares(total_bill, user_contribution, payer)
        }
        .map_err(|e| reject("submit_split", e.into()))?;

        self.apply_split(shares)
    }

    /// Remove a person; clears the selection if it pointed at them
    ///
    /// # Errors
    ///
    /// `NotFound` if `id` is not in the roster.
    pub fn remove_person(&mut self, id: &PersonId) -> LedgerResult<PersonRecord> {
        let mut next = self.snapshot.clone();
        let removed = next
            .roster
            .remove(id)
            .map_err(|e| reject("remove_person", e))?;
        if next.selection.is_selected(id) {
            next.clear_selection();
        }

        tracing::info!(id = %id, final_balance = removed.balance(), "person removed");
        self.commit(next, |seq| Event::PersonRemoved {
            seq,
            person_id: removed.id().clone(),
            final_balance: removed.balance(),
        });
        Ok(removed)
    }

    /// Empty the roster after confirmation
    ///
    /// Returns `false` without asking when the roster is already empty, and
    /// `false` when confirmation is withheld. Otherwise clears everything,
    /// returns the ledger to `Idle` and returns `true`.
    pub fn clear_all(&mut self, mut confirm: impl Confirm) -> bool {
        if self.snapshot.roster.is_empty() {
            tracing::debug!("clear_all on empty roster ignored");
            return false;
        }
        if !confirm.confirm() {
            tracing::debug!("clear_all not confirmed");
            return false;
        }

        let removed = self.snapshot.roster.len();
        let mut next = self.snapshot.clone();
        next.roster.clear();
        next.clear_selection();
        next.add_mode_open = false;

        tracing::info!(removed, "roster cleared");
        self.commit(next, |seq| Event::RosterCleared { seq, removed });
        true
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn apply_split(&mut self, shares: SplitShares) -> LedgerResult<PersonRecord> {
        let id = self
            .snapshot
            .selection
            .selected_id()
            .cloned()
            .ok_or_else(|| reject("submit_split", ValidationError::NoSelection.into()))?;

        let delta = shares.friend_balance_delta();
        let mut next = self.snapshot.clone();
        let updated = next
            .roster
            .apply_balance_delta(&id, delta)
            .map_err(|e| reject("submit_split", e))?;
        next.clear_selection();

        tracing::info!(
            id = %id,
            total_bill = shares.total_bill,
            user_expense = shares.user_expense,
            payer = %shares.payer,
            delta,
            new_balance = updated.balance(),
            "split recorded"
        );
        self.commit(next, |seq| Event::SplitRecorded {
            seq,
            person_id: id.clone(),
            total_bill: shares.total_bill,
            user_expense: shares.user_expense,
            payer: shares.payer,
            delta,
            new_balance: updated.balance(),
        });
        Ok(updated)
    }

    /// Apply an edit to the draft of the selected person
    ///
    /// Draft edits replace the snapshot but are not logged as events.
    fn edit_pending<F>(&mut self, op: &'static str, edit: F) -> LedgerResult<()>
    where
        F: FnOnce(&mut PendingSplit) -> Result<(), ValidationError>,
    {
        let mut next = self.snapshot.clone();
        let pending = next
            .pending
            .as_mut()
            .ok_or_else(|| reject(op, ValidationError::NoSelection.into()))?;
        edit(pending).map_err(|e| reject(op, e.into()))?;

        self.snapshot = next;
        Ok(())
    }

    /// Publish `next` and log the event for this transition
    fn commit<F>(&mut self, next: LedgerSnapshot, event: F)
    where
        F: FnOnce(u64) -> Event,
    {
        debug_assert!(
            validate_snapshot(&next).is_ok(),
            "transition produced an invalid snapshot: {:?}",
            validate_snapshot(&next)
        );

        let seq = self.next_seq;
        self.next_seq += 1;
        self.snapshot = next;
        self.event_log.log(event(seq));
    }
}

fn reject(op: &'static str, err: LedgerError) -> LedgerError {
    tracing::debug!(op, error = %err, "transition rejected");
    err
}

impl std::fmt::Debug for LedgerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerEngine")
            .field("mode", &self.snapshot.mode())
            .field("people", &self.snapshot.roster.len())
            .field("events", &self.event_log.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIdGenerator;

    fn engine() -> LedgerEngine {
        LedgerEngine::with_id_generator(
            LedgerConfig::demo(),
            Box::new(SequentialIdGenerator::new("friend_")),
        )
        .unwrap()
    }

    fn clark() -> PersonId {
        PersonId::from("118836")
    }

    #[test]
    fn test_seeded_roster() {
        let engine = engine();

        assert_eq!(engine.roster().len(), 3);
        assert_eq!(engine.person(&clark()).map(|p| p.balance()), Some(-7));
        assert_eq!(engine.mode(), LedgerMode::Idle);
        assert!(engine.event_log().is_empty());
    }

    #[test]
    fn test_events_are_sequenced() {
        let mut engine = engine();

        engine.toggle_add_mode();
        engine.add_person("Dana", "img").unwrap();
        engine.select_person(&clark()).unwrap();

        let seqs: Vec<u64> = engine.event_log().events().iter().map(Event::seq).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
    }

    #[test]
    fn test_rejection_does_not_consume_seq() {
        let mut engine = engine();

        assert!(engine.submit_split(Some(10), Some(5), Payer::User).is_err());
        engine.select_person(&clark()).unwrap();

        assert_eq!(engine.event_log().len(), 1);
        assert_eq!(engine.event_log().last().map(Event::seq), Some(1));
    }

    #[test]
    fn test_draft_edits_not_logged() {
        let mut engine = engine();
        engine.select_person(&clark()).unwrap();

        engine.set_total_bill(Some(100)).unwrap();
        engine.set_user_contribution(Some(40)).unwrap();

        assert_eq!(engine.event_log().len(), 1);
        assert_eq!(engine.pending().and_then(|p| p.friend_expense()), Some(60));
    }

    #[test]
    fn test_deselect_when_idle_is_noop() {
        let mut engine = engine();
        let before = engine.snapshot().clone();

        assert!(engine.deselect().is_none());
        assert_eq!(engine.snapshot(), &before);
        assert!(engine.event_log().is_empty());
    }

    #[test]
    fn test_tagged_avatar() {
        let config = LedgerConfig {
            tag_avatar_with_id: true,
            ..LedgerConfig::default()
        };
        let mut engine =
            LedgerEngine::with_id_generator(config, Box::new(SequentialIdGenerator::new("p"))).unwrap();

        let person = engine.add_person("Dana", "https://i.pravatar.cc/48").unwrap();

        assert_eq!(person.avatar_ref(), "https://i.pravatar.cc/48?u=p00000001");
    }

    #[test]
    fn test_debug_output() {
        let engine = engine();
        let debug = format!("{:?}", engine);

        assert!(debug.contains("LedgerEngine"));
        assert!(debug.contains("people: 3"));
    }
}
