//! Audit log of committed ledger transitions.
//!
//! Every transition the engine commits appends exactly one [`Event`].
//! Rejected transitions append nothing, so replaying the log over the
//! starting roster reproduces the current balances.
//!
//! # Event Types
//!
//! - **Roster**: person added, removed, roster cleared
//! - **Selection**: person selected, selection cleared, add form toggled
//! - **Split**: a bill split recorded against the selected person
//!
//! # Example
//!
//! ```rust
//! use split_ledger_core::models::{Event, EventLog};
//! use split_ledger_core::PersonId;
//!
//! let mut log = EventLog::new();
//! log.log(Event::PersonAdded {
//!     seq: 1,
//!     person_id: PersonId::from("118836"),
//!     name: "Clark".to_string(),
//! });
//!
//! assert_eq!(log.events_of_type("PersonAdded").len(), 1);
//! ```

use crate::ids::PersonId;
use crate::split::Payer;
use serde::Serialize;

/// Ledger event capturing one committed transition.
///
/// `seq` increases by one per committed transition and orders the log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    /// New person appended to the roster
    PersonAdded {
        seq: u64,
        person_id: PersonId,
        name: String,
    },

    /// Person became the selection
    PersonSelected { seq: u64, person_id: PersonId },

    /// Selection dropped (toggle-off or explicit deselect)
    SelectionCleared {
        seq: u64,
        person_id: PersonId,
    },

    /// Add-person form opened or closed
    AddModeToggled { seq: u64, open: bool },

    /// Bill split applied to a person's balance
    SplitRecorded {
        seq: u64,
        person_id: PersonId,
        total_bill: i64,
        user_expense: i64,
        payer: Payer,
        delta: i64,
        new_balance: i64,
    },

    /// Person removed from the roster
    PersonRemoved {
        seq: u64,
        person_id: PersonId,
        final_balance: i64,
    },

    /// Whole roster emptied after confirmation
    RosterCleared { seq: u64, removed: usize },
}

impl Event {
    /// Sequence number of the transition that produced this event
    pub fn seq(&self) -> u64 {
        match self {
            Event::PersonAdded { seq, .. } => *seq,
            Event::PersonSelected { seq, .. } => *seq,
            Event::SelectionCleared { seq, .. } => *seq,
            Event::AddModeToggled { seq, .. } => *seq,
            Event::SplitRecorded { seq, .. } => *seq,
            Event::PersonRemoved { seq, .. } => *seq,
            Event::RosterCleared { seq, .. } => *seq,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::PersonAdded { .. } => "PersonAdded",
            Event::PersonSelected { .. } => "PersonSelected",
            Event::SelectionCleared { .. } => "SelectionCleared",
            Event::AddModeToggled { .. } => "AddModeToggled",
            Event::SplitRecorded { .. } => "SplitRecorded",
            Event::PersonRemoved { .. } => "PersonRemoved",
            Event::RosterCleared { .. } => "RosterCleared",
        }
    }

    /// Get person ID if event relates to a specific person
    pub fn person_id(&self) -> Option<&PersonId> {
        match self {
            Event::PersonAdded { person_id, .. } => Some(person_id),
            Event::PersonSelected { person_id, .. } => Some(person_id),
            Event::SelectionCleared { person_id, .. } => Some(person_id),
            Event::SplitRecorded { person_id, .. } => Some(person_id),
            Event::PersonRemoved { person_id, .. } => Some(person_id),
            Event::AddModeToggled { .. } | Event::RosterCleared { .. } => None,
        }
    }
}

/// Event log for storing and querying ledger events.
///
/// This is a simple wrapper around Vec<Event> with convenience methods.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Most recent event, if any
    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific person
    pub fn events_for_person(&self, person_id: &PersonId) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.person_id() == Some(person_id))
            .collect()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
