//! Pending split: the draft edited while a person is selected
//!
//! The draft belongs to one selected person. Changing the selection
//! discards it; nothing in it is validated until submit, except that the
//! user's expense may never be edited above the bill value.

use super::calculator::{compute_shares, SplitShares};
use super::Payer;
use crate::error::ValidationError;
use crate::ids::PersonId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSplit {
    /// Person the draft was opened for
    person_id: PersonId,
    total_bill: Option<i64>,
    user_contribution: Option<i64>,
    payer: Payer,
}

impl PendingSplit {
    /// Fresh, empty draft for `person_id` (payer defaults to the user)
    pub fn new(person_id: PersonId) -> Self {
        Self {
            person_id,
            total_bill: None,
            user_contribution: None,
            payer: Payer::User,
        }
    }

    pub fn person_id(&self) -> &PersonId {
        &self.person_id
    }

    pub fn total_bill(&self) -> Option<i64> {
        self.total_bill
    }

    pub fn user_contribution(&self) -> Option<i64> {
        self.user_contribution
    }

    pub fn payer(&self) -> Payer {
        self.payer
    }

    /// Set or clear the bill value
    ///
    /// Does not touch the user's expense; an expense left above a lowered
    /// bill is clamped at submit time.
    pub fn set_total_bill(&mut self, total_bill: Option<i64>) -> Result<(), ValidationError> {
        if let Some(value) = total_bill.filter(|v| *v < 0) {
            return Err(ValidationError::NegativeAmount {
                field: "bill value",
                value,
            });
        }
        self.total_bill = total_bill;
        Ok(())
    }

    /// Set or clear the user's expense
    ///
    /// # Errors
    ///
    /// `ContributionExceedsBill` when the value is above the current bill
    /// (an empty bill counts as 0). The previous value is kept.
    pub fn set_user_contribution(&mut self, contribution: Option<i64>) -> Result<(), ValidationError> {
        if let Some(value) = contribution {
            if value < 0 {
                return Err(ValidationError::NegativeAmount {
                    field: "your expense",
                    value,
                });
            }
            let total_bill = self.total_bill.unwrap_or(0);
            if value > total_bill {
                return Err(ValidationError::ContributionExceedsBill {
                    contribution: value,
                    total_bill,
                });
            }
        }
        self.user_contribution = contribution;
        Ok(())
    }

    pub fn set_payer(&mut self, payer: Payer) {
        self.payer = payer;
    }

    /// The friend's expense as shown next to the form, once a bill is entered
    pub fn friend_expense(&self) -> Option<i64> {
        self.total_bill
            .map(|bill| bill - self.user_contribution.unwrap_or(0).min(bill))
    }

    /// Validate the draft into shares
    pub fn shares(&self) -> Result<SplitShares, ValidationError> {
        compute_shares(self.total_bill, self.user_contribution, self.payer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PendingSplit {
        PendingSplit::new(PersonId::from("118836"))
    }

    #[test]
    fn test_fresh_draft_is_empty() {
        let split = draft();

        assert_eq!(split.total_bill(), None);
        assert_eq!(split.user_contribution(), None);
        assert_eq!(split.payer(), Payer::User);
        assert_eq!(split.friend_expense(), None);
    }

    #[test]
    fn test_contribution_above_bill_keeps_previous() {
        let mut split = draft();
        split.set_total_bill(Some(100)).unwrap();
        split.set_user_contribution(Some(40)).unwrap();

        let err = split.set_user_contribution(Some(101)).unwrap_err();

        assert_eq!(
            err,
            ValidationError::ContributionExceedsBill {
                contribution: 101,
                total_bill: 100
            }
        );
        assert_eq!(split.user_contribution(), Some(40));
        assert_eq!(split.friend_expense(), Some(60));
    }

    #[test]
    fn test_contribution_without_bill_rejected() {
        let mut split = draft();
        assert!(split.set_user_contribution(Some(1)).is_err());
        assert_eq!(split.user_contribution(), None);
    }

    #[test]
    fn test_lowered_bill_clamps_at_submit() {
        let mut split = draft();
        split.set_total_bill(Some(100)).unwrap();
        split.set_user_contribution(Some(80)).unwrap();
        split.set_total_bill(Some(50)).unwrap();

        assert_eq!(split.friend_expense(), Some(0));
        assert_eq!(split.shares().unwrap().user_expense, 50);
    }

    #[test]
    fn test_shares_use_payer() {
        let mut split = draft();
        split.set_total_bill(Some(50)).unwrap();
        split.set_user_contribution(Some(20)).unwrap();
        split.set_payer(Payer::Friend);

        assert_eq!(split.shares().unwrap().friend_balance_delta(), -20);
    }
}
