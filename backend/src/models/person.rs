//! Person (friend) model
//!
//! Represents one person the user shares expenses with.
//! Each person has:
//! - Stable id, display name and avatar reference
//! - Running balance (i64 whole currency units)
//!
//! # Sign Convention
//!
//! - Negative balance: the user owes this person `abs(balance)`
//! - Positive balance: this person owes the user `balance`
//! - Zero: settled
//!
//! CRITICAL: All money values are i64

use crate::error::ValidationError;
use crate::ids::PersonId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A person in the roster
///
/// # Example
/// ```
/// use split_ledger_core::{PersonId, PersonRecord};
///
/// let clark = PersonRecord::new(PersonId::from("118836"), "Clark", "https://i.pravatar.cc/48?u=118836");
/// assert_eq!(clark.balance(), 0);
/// assert_eq!(clark.describe(), "You and Clark are even");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Unique person identifier, never reissued within a session
    id: PersonId,

    /// Display name (non-empty)
    name: String,

    /// Opaque avatar reference (usually an image URL)
    avatar_ref: String,

    /// Net amount owed between the user and this person
    balance: i64,
}

impl PersonRecord {
    /// Create a settled person (balance 0)
    pub fn new(id: PersonId, name: impl Into<String>, avatar_ref: impl Into<String>) -> Self {
        Self::with_balance(id, name, avatar_ref, 0)
    }

    /// Create a person with an opening balance (roster seeding)
    pub fn with_balance(
        id: PersonId,
        name: impl Into<String>,
        avatar_ref: impl Into<String>,
        balance: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            avatar_ref: avatar_ref.into(),
            balance,
        }
    }

    pub fn id(&self) -> &PersonId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn avatar_ref(&self) -> &str {
        &self.avatar_ref
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// Where the user stands with this person
    pub fn standing(&self) -> Standing {
        Standing::from_balance(self.balance)
    }

    /// Human-readable standing, e.g. `"You owe Clark $7"`
    pub fn describe(&self) -> String {
        match self.standing() {
            Standing::YouOwe(amount) => format!("You owe {} ${}", self.name, amount),
            Standing::OwesYou(amount) => format!("{} owes you ${}", self.name, amount),
            Standing::Even => format!("You and {} are even", self.name),
        }
    }

    /// Add a signed delta to the balance
    ///
    /// # Errors
    /// `BalanceOverflow` if the result does not fit in i64. The balance is
    /// unchanged on error.
    pub(crate) fn apply_delta(&mut self, delta: i64) -> Result<(), ValidationError> {
        self.balance = self
            .balance
            .checked_add(delta)
            .ok_or_else(|| ValidationError::BalanceOverflow {
                id: self.id.clone(),
            })?;
        Ok(())
    }
}

/// Presentation of a balance from the user's point of view
///
/// Lossless: `Standing::from_balance(b).balance() == b` for every i64.
/// Amounts built by hand outside the i64 range saturate in `balance()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum Standing {
    /// The user owes the person this amount
    YouOwe(u64),
    /// The person owes the user this amount
    OwesYou(u64),
    /// Settled
    Even,
}

impl Standing {
    pub fn from_balance(balance: i64) -> Self {
        match balance {
            b if b < 0 => Standing::YouOwe(b.unsigned_abs()),
            b if b > 0 => Standing::OwesYou(b.unsigned_abs()),
            _ => Standing::Even,
        }
    }

    /// Signed balance this standing was derived from
    ///
    /// Saturates at `i64::MIN` / `i64::MAX` for amounts no balance can hold.
    pub fn balance(&self) -> i64 {
        match *self {
            Standing::YouOwe(amount) => 0i64.checked_sub_unsigned(amount).unwrap_or(i64::MIN),
            Standing::OwesYou(amount) => i64::try_from(amount).unwrap_or(i64::MAX),
            Standing::Even => 0,
        }
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Standing::YouOwe(amount) => write!(f, "you owe ${}", amount),
            Standing::OwesYou(amount) => write!(f, "owes you ${}", amount),
            Standing::Even => f.write_str("even"),
        }
    }
}
