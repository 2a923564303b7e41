//! Person identifiers and id generation
//!
//! The engine never draws ids from ambient randomness. Every id comes from an
//! injected [`IdGenerator`], so a ledger session is reproducible whenever the
//! generator is.

mod xorshift;

pub use xorshift::{SeededIdGenerator, SEEDED_ID_MAX, SEEDED_ID_MIN};

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a person in the roster
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PersonId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PersonId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Source of fresh person ids
///
/// Implementations are not required to guarantee uniqueness; the roster
/// redraws ids it has already issued.
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> PersonId;
}

/// Random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> PersonId {
        PersonId(Uuid::new_v4().to_string())
    }
}

/// Counter-based ids: `"{prefix}{n:08}"`, starting at 1
///
/// # Example
/// ```
/// use split_ledger_core::ids::{IdGenerator, SequentialIdGenerator};
///
/// let mut ids = SequentialIdGenerator::new("friend_");
/// assert_eq!(ids.next_id().as_str(), "friend_00000001");
/// assert_eq!(ids.next_id().as_str(), "friend_00000002");
/// ```
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> PersonId {
        let id = format!("{}{:08}", self.prefix, self.next);
        self.next += 1;
        PersonId(id)
    }
}

impl<F> IdGenerator for F
where
    F: FnMut() -> PersonId + Send,
{
    fn next_id(&mut self) -> PersonId {
        self()
    }
}
