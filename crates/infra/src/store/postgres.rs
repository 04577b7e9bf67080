//! Postgres-backed bank store.
//!
//! Expected schema (point lookups by key plus two single-row updates per
//! transfer; migration tooling is out of scope):
//!
//! ```sql
//! CREATE TABLE users (
//!     email         TEXT PRIMARY KEY,
//!     display_name  TEXT NOT NULL,
//!     password_hash TEXT NOT NULL
//! );
//!
//! CREATE TABLE accounts (
//!     id      TEXT PRIMARY KEY,
//!     owner   TEXT NOT NULL REFERENCES users(email),
//!     balance BIGINT NOT NULL
//! );
//! ```
//!
//! ## Transfer isolation
//!
//! `execute_transfer` locks both account rows with `SELECT ... FOR UPDATE`
//! in sorted-id order inside a single transaction. Sorted lock order means
//! two opposite-direction transfers over the same pair cannot deadlock, a
//! concurrent transfer over the same pair serializes on the row locks, and
//! transfers over disjoint pairs do not block each other. All checks are
//! evaluated against the locked snapshot, so a peer transfer can never
//! invalidate a passed check before the updates commit.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::instrument;

use ironbank_core::{AccountId, Email};
use ironbank_transfer::{TransferError, TransferRequest};

use super::r#trait::{BankStore, StoreError, UserRecord};

/// Bank store over a PostgreSQL connection pool.
///
/// `Send + Sync`; all operations go through the SQLx pool, which handles
/// connection management and the store's default timeouts.
#[derive(Debug, Clone)]
pub struct PostgresBankStore {
    pool: Arc<PgPool>,
}

impl PostgresBankStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl BankStore for PostgresBankStore {
    #[instrument(skip(self), fields(email = %email), err)]
    async fn find_user(&self, email: &Email) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT email, display_name, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_user", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let email: String = row
            .try_get("email")
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        let display_name: String = row
            .try_get("display_name")
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        let password_hash: String = row
            .try_get("password_hash")
            .map_err(|e| StoreError::Malformed(e.to_string()))?;

        Ok(Some(UserRecord {
            email: email
                .parse()
                .map_err(|_| StoreError::Malformed("invalid stored email".to_string()))?,
            display_name,
            password_hash,
        }))
    }

    #[instrument(skip(self, owner), fields(account = %account), err)]
    async fn balance_for_owner(
        &self,
        account: &AccountId,
        owner: &Email,
    ) -> Result<Option<i64>, StoreError> {
        // Existence and ownership are one predicate: the caller cannot tell
        // which half failed.
        let row = sqlx::query(
            r#"
            SELECT balance
            FROM accounts
            WHERE id = $1 AND owner = $2
            "#,
        )
        .bind(account.as_str())
        .bind(owner.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("balance_for_owner", e))?;

        match row {
            Some(row) => {
                let balance: i64 = row
                    .try_get("balance")
                    .map_err(|e| StoreError::Malformed(e.to_string()))?;
                Ok(Some(balance))
            }
            None => Ok(None),
        }
    }

    #[instrument(
        skip(self, requester),
        fields(source = %request.source, target = %request.target, amount = request.amount),
        err
    )]
    async fn execute_transfer(
        &self,
        request: &TransferRequest,
        requester: &Email,
    ) -> Result<(), TransferError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_transfer_error("begin", e))?;

        // Lock both rows in sorted-id order (see module docs).
        let mut ids = vec![
            request.source.as_str().to_string(),
            request.target.as_str().to_string(),
        ];
        ids.sort_unstable();
        ids.dedup();

        let rows = sqlx::query(
            r#"
            SELECT id, owner, balance
            FROM accounts
            WHERE id = ANY($1)
            ORDER BY id
            FOR UPDATE
            "#,
        )
        .bind(&ids)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| map_transfer_error("lock_accounts", e))?;

        let mut source_row: Option<(String, i64)> = None;
        let mut target_exists = false;
        for row in &rows {
            let id: String = row
                .try_get("id")
                .map_err(|e| map_row_error("id", e))?;
            if id == request.source.as_str() {
                let owner: String = row
                    .try_get("owner")
                    .map_err(|e| map_row_error("owner", e))?;
                let balance: i64 = row
                    .try_get("balance")
                    .map_err(|e| map_row_error("balance", e))?;
                source_row = Some((owner, balance));
            }
            if id == request.target.as_str() {
                target_exists = true;
            }
        }

        // Source must exist and belong to the requester (one masked check).
        let balance = match source_row {
            Some((owner, balance)) if owner == requester.as_str() => balance,
            _ => {
                tx.rollback()
                    .await
                    .map_err(|e| map_transfer_error("rollback", e))?;
                return Err(TransferError::Unauthorized);
            }
        };

        if request.amount > balance {
            tx.rollback()
                .await
                .map_err(|e| map_transfer_error("rollback", e))?;
            return Err(TransferError::InsufficientFunds);
        }

        if !target_exists {
            tx.rollback()
                .await
                .map_err(|e| map_transfer_error("rollback", e))?;
            return Err(TransferError::NotFound);
        }

        sqlx::query("UPDATE accounts SET balance = balance - $1 WHERE id = $2")
            .bind(request.amount)
            .bind(request.source.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_transfer_error("debit_source", e))?;

        sqlx::query("UPDATE accounts SET balance = balance + $1 WHERE id = $2")
            .bind(request.amount)
            .bind(request.target.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_transfer_error("credit_target", e))?;

        tx.commit()
            .await
            .map_err(|e| map_transfer_error("commit", e))?;

        Ok(())
    }
}

/// Map SQLx errors on read paths. The cause is logged here and never
/// surfaced to callers.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    tracing::warn!(operation, error = %err, "bank store query failed");
    StoreError::Unavailable
}

/// Map SQLx errors inside the transfer transaction to the generic failure.
/// The transaction is rolled back by the caller (or by drop); balances are
/// untouched.
fn map_transfer_error(operation: &str, err: sqlx::Error) -> TransferError {
    tracing::warn!(operation, error = %err, "transfer transaction failed");
    TransferError::Failure
}

fn map_row_error(column: &str, err: sqlx::Error) -> TransferError {
    tracing::warn!(column, error = %err, "failed to read locked account row");
    TransferError::Failure
}
