//! Bill splitting between the user and one friend
//!
//! - **calculator**: pure share computation and the balance delta it implies
//! - **draft**: the pending split being edited for the current selection

pub mod calculator;
pub mod draft;

pub use calculator::{compute_shares, implied_user_expense, SplitShares};
pub use draft::PendingSplit;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who paid the bill up front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payer {
    #[default]
    User,
    Friend,
}

impl fmt::Display for Payer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payer::User => f.write_str("user"),
            Payer::Friend => f.write_str("friend"),
        }
    }
}

impl FromStr for Payer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" | "you" | "me" => Ok(Payer::User),
            "friend" | "them" => Ok(Payer::Friend),
            other => Err(format!("unknown payer '{}', expected 'you' or 'friend'", other)),
        }
    }
}
