//! Seeded person-id generator built on xorshift64*
//!
//! Produces the short numeric ids the roster has always used for friends
//! (e.g. `118836`), but from a seed so that a whole session can be replayed.
//!
//! # Determinism
//!
//! Same seed → same sequence of ids. Tests and demos rely on this to assert
//! exact ids without stubbing the generator.

use super::{IdGenerator, PersonId};
use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) of generated numeric ids
pub const SEEDED_ID_MIN: u64 = 100_000;

/// Upper bound (exclusive) of generated numeric ids
pub const SEEDED_ID_MAX: u64 = 1_000_000;

/// Deterministic id generator using xorshift64*
///
/// # Example
/// ```
/// use split_ledger_core::ids::{IdGenerator, SeededIdGenerator};
///
/// let mut a = SeededIdGenerator::new(12345);
/// let mut b = SeededIdGenerator::new(12345);
/// assert_eq!(a.next_id(), b.next_id());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeededIdGenerator {
    /// Internal state (64-bit, never zero)
    state: u64,
}

impl SeededIdGenerator {
    /// Create a new generator with given seed
    ///
    /// A zero seed is remapped to 1 (xorshift cannot leave the zero state).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Advance the xorshift64* state and return the next raw value
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Get current state (a generator rebuilt from it continues the sequence)
    pub fn state(&self) -> u64 {
        self.state
    }
}

impl IdGenerator for SeededIdGenerator {
    fn next_id(&mut self) -> PersonId {
        let span = SEEDED_ID_MAX - SEEDED_ID_MIN;
        let value = SEEDED_ID_MIN + self.next_u64() % span;
        PersonId::new(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_converted_to_nonzero() {
        let ids = SeededIdGenerator::new(0);
        assert_ne!(ids.state(), 0, "Zero seed should be converted to 1");
    }

    #[test]
    fn test_ids_are_six_digits() {
        let mut ids = SeededIdGenerator::new(118836);

        for _ in 0..1000 {
            let id = ids.next_id();
            assert_eq!(id.as_str().len(), 6, "id {} is not six digits", id);
            assert!(id.as_str().chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut ids1 = SeededIdGenerator::new(99999);
        let mut ids2 = SeededIdGenerator::new(99999);

        for _ in 0..100 {
            assert_eq!(ids1.next_id(), ids2.next_id(), "ids not deterministic");
        }
    }

    #[test]
    fn test_resume_from_state() {
        let mut ids = SeededIdGenerator::new(42);
        ids.next_id();

        let mut resumed = SeededIdGenerator::new(ids.state());
        assert_eq!(ids.next_id(), resumed.next_id());
    }
}
