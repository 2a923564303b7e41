//! Engine - the ledger state machine
//!
//! See `ledger.rs` for the transition table.

pub mod config;
pub mod confirm;
pub mod ledger;
pub mod snapshot;

// Re-export main types for convenience
pub use config::{IdGeneratorConfig, LedgerConfig, PersonSeed, DEFAULT_AVATAR};
pub use confirm::Confirm;
pub use ledger::LedgerEngine;
pub use snapshot::{validate_snapshot, LedgerMode, LedgerSnapshot};
