//! Share computation
//!
//! Collapses a two-party bill into the single signed delta applied to the
//! friend's balance.
//!
//! # Rules
//!
//! - `friend_expense = total_bill - user_expense`
//! - User paid: the friend now owes their own expense → delta `+friend_expense`
//! - Friend paid: the user now owes their own expense → delta `-user_expense`
//! - A user expense above the bill is clamped to the bill
//!
//! CRITICAL: `|delta| <= total_bill` for every accepted input

use super::Payer;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Validated split of one bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitShares {
    pub total_bill: i64,
    pub user_expense: i64,
    pub friend_expense: i64,
    pub payer: Payer,
}

impl SplitShares {
    /// Signed change to the friend's balance
    pub fn friend_balance_delta(&self) -> i64 {
        match self.payer {
            Payer::User => self.friend_expense,
            Payer::Friend => -self.user_expense,
        }
    }
}

/// Compute each party's share of a bill
///
/// # Errors
///
/// * `MissingBill` / `ZeroBill` when there is no bill to split
/// * `MissingContribution` when the user's expense is empty
/// * `NegativeAmount` for negative inputs
///
/// # Example
/// ```
/// use split_ledger_core::split::{compute_shares, Payer};
///
/// let shares = compute_shares(Some(100), Some(40), Payer::User).unwrap();
/// assert_eq!(shares.friend_expense, 60);
/// assert_eq!(shares.friend_balance_delta(), 60);
///
/// let shares = compute_shares(Some(50), Some(20), Payer::Friend).unwrap();
/// assert_eq!(shares.friend_balance_delta(), -20);
/// ```
pub fn compute_shares(
    total_bill: Option<i64>,
    user_contribution: Option<i64>,
    payer: Payer,
) -> Result<SplitShares, ValidationError> {
    let total_bill = match total_bill {
        None => return Err(ValidationError::MissingBill),
        Some(0) => return Err(ValidationError::ZeroBill),
        Some(v) if v < 0 => {
            return Err(ValidationError::NegativeAmount {
                field: "bill value",
                value: v,
            })
        }
        Some(v) => v,
    };

    let user_contribution = user_contribution.ok_or(ValidationError::MissingContribution)?;
    if user_contribution < 0 {
        return Err(ValidationError::NegativeAmount {
            field: "your expense",
            value: user_contribution,
        });
    }

    let user_expense = user_contribution.min(total_bill);
    Ok(SplitShares {
        total_bill,
        user_expense,
        friend_expense: total_bill - user_expense,
        payer,
    })
}

/// Re-derive the user's expense from an applied delta
///
/// Inverse of [`SplitShares::friend_balance_delta`] for a known bill and payer.
pub fn implied_user_expense(total_bill: i64, delta: i64, payer: Payer) -> i64 {
    match payer {
        Payer::User => total_bill - delta,
        Payer::Friend => -delta,
    }
}
