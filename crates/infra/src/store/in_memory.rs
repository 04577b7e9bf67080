use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use ironbank_core::{AccountId, Email};
use ironbank_transfer::{TransferError, TransferRequest};

use super::r#trait::{AccountRecord, BankStore, StoreError, UserRecord};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Email, UserRecord>,
    accounts: HashMap<AccountId, AccountRecord>,
}

/// In-memory bank store.
///
/// Intended for tests/dev. A single mutex over both tables means every
/// transfer runs under the lock, which trivially satisfies the atomicity
/// contract (at the cost of serializing all mutations).
#[derive(Debug, Default)]
pub struct InMemoryBankStore {
    tables: Mutex<Tables>,
}

impl InMemoryBankStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user row (provisioning substitute for dev/tests).
    pub fn seed_user(&self, user: UserRecord) {
        let mut tables = self.tables.lock().expect("bank store lock poisoned");
        tables.users.insert(user.email.clone(), user);
    }

    /// Insert or replace an account row (provisioning substitute for dev/tests).
    pub fn seed_account(&self, account: AccountRecord) {
        let mut tables = self.tables.lock().expect("bank store lock poisoned");
        tables.accounts.insert(account.id.clone(), account);
    }
}

#[async_trait]
impl BankStore for InMemoryBankStore {
    async fn find_user(&self, email: &Email) -> Result<Option<UserRecord>, StoreError> {
        let tables = self.tables.lock().map_err(|_| StoreError::Unavailable)?;
        Ok(tables.users.get(email).cloned())
    }

    async fn balance_for_owner(
        &self,
        account: &AccountId,
        owner: &Email,
    ) -> Result<Option<i64>, StoreError> {
        let tables = self.tables.lock().map_err(|_| StoreError::Unavailable)?;
        Ok(tables
            .accounts
            .get(account)
            .filter(|a| a.owner == *owner)
            .map(|a| a.balance))
    }

    async fn execute_transfer(
        &self,
        request: &TransferRequest,
        requester: &Email,
    ) -> Result<(), TransferError> {
        let mut tables = self.tables.lock().map_err(|_| TransferError::Failure)?;

        // Ownership resolved exactly like `balance_for_owner`: absent and
        // not-yours collapse into the same rejection.
        let source_balance = tables
            .accounts
            .get(&request.source)
            .filter(|a| a.owner == *requester)
            .map(|a| a.balance)
            .ok_or(TransferError::Unauthorized)?;

        if request.amount > source_balance {
            return Err(TransferError::InsufficientFunds);
        }

        if !tables.accounts.contains_key(&request.target) {
            return Err(TransferError::NotFound);
        }

        // Both mutations happen under the same lock acquisition: no reader
        // can observe the debit without the credit.
        if let Some(source) = tables.accounts.get_mut(&request.source) {
            source.balance -= request.amount;
        }
        if let Some(target) = tables.accounts.get_mut(&request.target) {
            target.balance += request.amount;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(s: &str) -> Email {
        s.parse().unwrap()
    }

    fn account_id(s: &str) -> AccountId {
        s.parse().unwrap()
    }

    fn seeded_store() -> InMemoryBankStore {
        let store = InMemoryBankStore::new();
        store.seed_account(AccountRecord {
            id: account_id("100"),
            owner: email("alice@example.com"),
            balance: 500,
        });
        store.seed_account(AccountRecord {
            id: account_id("200"),
            owner: email("bob@example.com"),
            balance: 50,
        });
        store
    }

    fn transfer(source: &str, target: &str, amount: i64) -> TransferRequest {
        TransferRequest {
            source: account_id(source),
            target: account_id(target),
            amount,
        }
    }

    #[tokio::test]
    async fn balance_visible_to_owner_only() {
        let store = seeded_store();

        let own = store
            .balance_for_owner(&account_id("100"), &email("alice@example.com"))
            .await
            .unwrap();
        assert_eq!(own, Some(500));
    }

    #[tokio::test]
    async fn foreign_and_missing_accounts_are_indistinguishable() {
        let store = seeded_store();

        let not_yours = store
            .balance_for_owner(&account_id("200"), &email("alice@example.com"))
            .await
            .unwrap();
        let missing = store
            .balance_for_owner(&account_id("999"), &email("alice@example.com"))
            .await
            .unwrap();

        assert_eq!(not_yours, None);
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn transfer_debits_and_credits_exactly() {
        let store = seeded_store();

        store
            .execute_transfer(&transfer("100", "200", 120), &email("alice@example.com"))
            .await
            .unwrap();

        let source = store
            .balance_for_owner(&account_id("100"), &email("alice@example.com"))
            .await
            .unwrap();
        let target = store
            .balance_for_owner(&account_id("200"), &email("bob@example.com"))
            .await
            .unwrap();

        assert_eq!(source, Some(380));
        assert_eq!(target, Some(170));
    }

    #[tokio::test]
    async fn transfer_from_unowned_source_is_masked() {
        let store = seeded_store();

        let from_foreign = store
            .execute_transfer(&transfer("200", "100", 10), &email("alice@example.com"))
            .await;
        let from_missing = store
            .execute_transfer(&transfer("999", "100", 10), &email("alice@example.com"))
            .await;

        assert_eq!(from_foreign, Err(TransferError::Unauthorized));
        assert_eq!(from_missing, Err(TransferError::Unauthorized));
    }

    #[tokio::test]
    async fn insufficient_funds_leaves_balances_unchanged() {
        let store = seeded_store();

        let result = store
            .execute_transfer(&transfer("100", "200", 501), &email("alice@example.com"))
            .await;
        assert_eq!(result, Err(TransferError::InsufficientFunds));

        let source = store
            .balance_for_owner(&account_id("100"), &email("alice@example.com"))
            .await
            .unwrap();
        assert_eq!(source, Some(500));
    }

    #[tokio::test]
    async fn missing_target_rejected_without_debit() {
        let store = seeded_store();

        let result = store
            .execute_transfer(&transfer("100", "999", 10), &email("alice@example.com"))
            .await;
        assert_eq!(result, Err(TransferError::NotFound));

        let source = store
            .balance_for_owner(&account_id("100"), &email("alice@example.com"))
            .await
            .unwrap();
        assert_eq!(source, Some(500));
    }
}
