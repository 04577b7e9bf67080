use serde::{Deserialize, Serialize};
use thiserror::Error;

use ironbank_core::AccountId;

/// Per-transfer amount ceiling, in the smallest currency unit.
pub const TRANSFER_CEILING: i64 = 1_000;

/// A request to move funds between two accounts.
///
/// Transient: exists only for the duration of one transfer operation and is
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub source: AccountId,
    pub target: AccountId,
    pub amount: i64,
}

/// Business limits applied to every transfer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TransferPolicy {
    /// Maximum amount a single transfer may move.
    pub ceiling: i64,
}

impl Default for TransferPolicy {
    fn default() -> Self {
        Self {
            ceiling: TRANSFER_CEILING,
        }
    }
}

/// Transfer rejection taxonomy.
///
/// Messages are deliberately terse and non-diagnostic. In particular,
/// `Unauthorized` reads the same as a missing account: whether the source
/// account does not exist or merely belongs to someone else must be
/// indistinguishable to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// Amount is not a positive integer, or exceeds the ceiling.
    #[error("invalid amount")]
    InvalidAmount,

    /// Source account is absent or not owned by the requester (masked).
    #[error("account not found")]
    Unauthorized,

    /// Amount exceeds the source balance.
    #[error("insufficient funds")]
    InsufficientFunds,

    /// Target account does not exist.
    #[error("account not found")]
    NotFound,

    /// Any execution-time fault. Balances are untouched; no detail is leaked.
    #[error("transfer failed")]
    Failure,
}

/// Cheap, pure amount checks, evaluated before any store access.
///
/// Ordering matters: positivity first, then the ceiling; both short-circuit
/// before ownership and balance resolution ever touch the store.
pub fn validate_amount(amount: i64, policy: &TransferPolicy) -> Result<(), TransferError> {
    if amount <= 0 {
        return Err(TransferError::InvalidAmount);
    }
    if amount > policy.ceiling {
        return Err(TransferError::InvalidAmount);
    }
    Ok(())
}

/// Pure pre-checks for a full request.
pub fn validate_request(request: &TransferRequest, policy: &TransferPolicy) -> Result<(), TransferError> {
    validate_amount(request.amount, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn request(amount: i64) -> TransferRequest {
        TransferRequest {
            source: "100".parse().unwrap(),
            target: "200".parse().unwrap(),
            amount,
        }
    }

    #[test]
    fn accepts_amount_within_limits() {
        let policy = TransferPolicy::default();
        assert!(validate_request(&request(1), &policy).is_ok());
        assert!(validate_request(&request(TRANSFER_CEILING), &policy).is_ok());
    }

    #[test]
    fn rejects_zero_and_negative_amounts() {
        let policy = TransferPolicy::default();
        assert_eq!(
            validate_request(&request(0), &policy),
            Err(TransferError::InvalidAmount)
        );
        assert_eq!(
            validate_request(&request(-50), &policy),
            Err(TransferError::InvalidAmount)
        );
    }

    #[test]
    fn rejects_amount_over_ceiling() {
        let policy = TransferPolicy::default();
        assert_eq!(
            validate_request(&request(TRANSFER_CEILING + 1), &policy),
            Err(TransferError::InvalidAmount)
        );
    }

    #[test]
    fn custom_ceiling_is_honored() {
        let policy = TransferPolicy { ceiling: 10 };
        assert!(validate_request(&request(10), &policy).is_ok());
        assert_eq!(
            validate_request(&request(11), &policy),
            Err(TransferError::InvalidAmount)
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: every non-positive amount is rejected as InvalidAmount.
        #[test]
        fn non_positive_amounts_always_rejected(amount in i64::MIN..=0i64) {
            let policy = TransferPolicy::default();
            prop_assert_eq!(
                validate_request(&request(amount), &policy),
                Err(TransferError::InvalidAmount)
            );
        }

        /// Property: amounts in (0, ceiling] pass the pure checks.
        #[test]
        fn in_range_amounts_accepted(amount in 1i64..=TRANSFER_CEILING) {
            let policy = TransferPolicy::default();
            prop_assert!(validate_request(&request(amount), &policy).is_ok());
        }

        /// Property: amounts above the ceiling are rejected as InvalidAmount.
        #[test]
        fn over_ceiling_amounts_rejected(amount in (TRANSFER_CEILING + 1)..i64::MAX) {
            let policy = TransferPolicy::default();
            prop_assert_eq!(
                validate_request(&request(amount), &policy),
                Err(TransferError::InvalidAmount)
            );
        }
    }
}
