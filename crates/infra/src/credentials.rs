//! Credential verification over the bank store.

use std::sync::Arc;

use tracing::instrument;

use ironbank_auth::password;
use ironbank_core::Email;

use crate::store::{BankStore, StoreError, UserRecord};

/// Fixed input for the decoy verification on the unknown-email path.
const PHANTOM_CREDENTIAL: &str = "ironbank-phantom-credential";

/// Verifies login credentials against persisted user records.
///
/// ## Enumeration defense
///
/// "No such user" and "wrong password" both come back as `Ok(None)`, and the
/// unknown-email path burns a PBKDF2 verification against a decoy hash so the
/// two paths take comparable time. Callers must surface a single
/// `invalid_credentials` rejection for both.
pub struct CredentialService {
    store: Arc<dyn BankStore>,
    decoy_hash: String,
}

impl CredentialService {
    pub fn new(store: Arc<dyn BankStore>) -> Result<Self, password::HashError> {
        let decoy_hash = password::hash(PHANTOM_CREDENTIAL)?;
        Ok(Self { store, decoy_hash })
    }

    #[instrument(skip(self, password), fields(email = %email), err)]
    pub async fn verify_credentials(
        &self,
        email: &Email,
        password: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        match self.store.find_user(email).await? {
            Some(user) => {
                if password::verify(password, &user.password_hash) {
                    Ok(Some(user))
                } else {
                    Ok(None)
                }
            }
            None => {
                // Same work as the known-email path; result discarded.
                let _ = password::verify(password, &self.decoy_hash);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryBankStore;

    fn email(s: &str) -> Email {
        s.parse().unwrap()
    }

    fn service_with_user(password_plain: &str) -> CredentialService {
        let store = InMemoryBankStore::new();
        store.seed_user(UserRecord {
            email: email("alice@example.com"),
            display_name: "Alice".to_string(),
            password_hash: password::hash(password_plain).unwrap(),
        });
        CredentialService::new(Arc::new(store)).unwrap()
    }

    #[tokio::test]
    async fn valid_credentials_resolve_user() {
        let svc = service_with_user("correct horse");

        let user = svc
            .verify_credentials(&email("alice@example.com"), "correct horse")
            .await
            .unwrap();

        assert_eq!(user.unwrap().display_name, "Alice");
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_are_identical() {
        let svc = service_with_user("correct horse");

        let wrong_password = svc
            .verify_credentials(&email("alice@example.com"), "battery staple")
            .await
            .unwrap();
        let unknown_email = svc
            .verify_credentials(&email("mallory@example.com"), "battery staple")
            .await
            .unwrap();

        assert_eq!(wrong_password, None);
        assert_eq!(unknown_email, None);
    }
}
