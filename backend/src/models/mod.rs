//! Domain models for the split ledger

pub mod event;
pub mod person;
pub mod roster;
pub mod selection;

// Re-exports
pub use event::{Event, EventLog};
pub use person::{PersonRecord, Standing};
pub use roster::Roster;
pub use selection::{SelectionController, SelectionOutcome, SelectionState};
