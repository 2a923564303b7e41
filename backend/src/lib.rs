//! Split Ledger Core
//!
//! Shared-expense ledger: a roster of friends with running balances, one
//! selected friend at a time, and bill splits that move that friend's balance.
//!
//! # Architecture
//!
//! - **ids**: Person ids and injectable id generators
//! - **models**: Domain types (PersonRecord, Roster, Selection, Event)
//! - **split**: Share calculator and the pending split draft
//! - **engine**: Ledger state machine, configuration and snapshots
//!
//! # Critical Invariants
//!
//! 1. All money values are i64
//! 2. Every transition commits fully or not at all
//! 3. At most one person is selected, never while the add form is open

pub mod engine;
pub mod error;
pub mod ids;
pub mod models;
pub mod split;

// Re-exports for convenience
pub use engine::{Confirm, LedgerConfig, LedgerEngine, LedgerMode, LedgerSnapshot};
pub use error::{LedgerError, LedgerResult, ValidationError};
pub use ids::{IdGenerator, PersonId};
pub use models::{
    event::{Event, EventLog},
    person::{PersonRecord, Standing},
    roster::Roster,
    selection::SelectionState,
};
pub use split::{compute_shares, Payer, PendingSplit, SplitShares};
