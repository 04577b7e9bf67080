use async_trait::async_trait;
use thiserror::Error;

use ironbank_core::{AccountId, Email};
use ironbank_transfer::{TransferError, TransferRequest};

/// A persisted user row (credentials half of the store).
///
/// Users are provisioned by an out-of-scope process; this layer only reads
/// them. The password hash is a salted PBKDF2-SHA256 PHC string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub email: Email,
    pub display_name: String,
    pub password_hash: String,
}

/// A persisted account row.
///
/// Balance is a signed integer in the smallest currency unit. Mutated only
/// through [`BankStore::execute_transfer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub id: AccountId,
    pub owner: Email,
    pub balance: i64,
}

/// Store-level failure (read paths).
///
/// Kept free of driver detail at the boundary; the underlying cause is logged
/// where it occurs, never surfaced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached or a query failed.
    #[error("store unavailable")]
    Unavailable,

    /// A row was present but could not be mapped to a record.
    #[error("malformed record: {0}")]
    Malformed(String),
}

/// Persistent store of users and accounts.
///
/// ## Enumeration defense
///
/// `balance_for_owner` resolves existence and ownership as a single predicate:
/// an account that does not exist and an account owned by someone else are the
/// same `None`. Implementations must not expose which half failed.
///
/// ## Atomicity
///
/// `execute_transfer` is the single transactional boundary for balance
/// mutation. Either both the debit and the credit are durably visible, or
/// neither is; no concurrent reader may observe a partially-applied transfer.
/// Ownership, funds, and target-existence checks run *inside* that boundary,
/// in that order, so a concurrent peer transfer cannot invalidate them
/// between check and apply.
#[async_trait]
pub trait BankStore: Send + Sync {
    /// Point lookup of a user by unique email.
    async fn find_user(&self, email: &Email) -> Result<Option<UserRecord>, StoreError>;

    /// Balance of `account`, only if it exists and is owned by `owner`.
    async fn balance_for_owner(
        &self,
        account: &AccountId,
        owner: &Email,
    ) -> Result<Option<i64>, StoreError>;

    /// Atomically validate and apply a transfer on behalf of `requester`.
    ///
    /// Check order inside the transactional scope: source ownership
    /// (`Unauthorized`, masked as not-found), sufficient funds
    /// (`InsufficientFunds`), target existence (`NotFound`). Any
    /// execution-time fault rolls back and surfaces the generic `Failure`.
    async fn execute_transfer(
        &self,
        request: &TransferRequest,
        requester: &Email,
    ) -> Result<(), TransferError>;
}
