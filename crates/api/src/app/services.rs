use std::sync::Arc;

use sqlx::PgPool;

use ironbank_auth::{TokenService, password};
use ironbank_infra::{
    AccountRecord, BankStore, CredentialService, InMemoryBankStore, PostgresBankStore,
    TransferEngine, UserRecord,
};
use ironbank_transfer::TransferPolicy;

/// Fully wired application services shared by all handlers.
pub struct AppServices {
    pub store: Arc<dyn BankStore>,
    pub credentials: CredentialService,
    pub engine: TransferEngine,
    pub policy: TransferPolicy,
    pub tokens: Arc<TokenService>,
}

/// Build services from the environment.
///
/// `USE_PERSISTENT_STORES=true` selects the Postgres store (requires
/// `DATABASE_URL`); otherwise an in-memory store seeded with demo data is
/// used (dev/test).
pub async fn build_services(tokens: Arc<TokenService>) -> AppServices {
    let use_persistent = std::env::var("USE_PERSISTENT_STORES")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    let store: Arc<dyn BankStore> = if use_persistent {
        let database_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set when USE_PERSISTENT_STORES=true");
        let pool = PgPool::connect(&database_url)
            .await
            .expect("failed to connect to Postgres");
        Arc::new(PostgresBankStore::new(pool))
    } else {
        let store = Arc::new(InMemoryBankStore::new());
        seed_demo_data(&store);
        store
    };

    with_store(store, tokens)
}

/// Wire services over an explicit store.
pub fn with_store(store: Arc<dyn BankStore>, tokens: Arc<TokenService>) -> AppServices {
    let credentials =
        CredentialService::new(store.clone()).expect("failed to initialize credential service");
    let policy = TransferPolicy::default();
    let engine = TransferEngine::new(store.clone(), policy);

    AppServices {
        store,
        credentials,
        engine,
        policy,
        tokens,
    }
}

/// Demo users/accounts for the in-memory store (provisioning is out of scope;
/// this stands in for it in dev and in the black-box tests).
fn seed_demo_data(store: &InMemoryBankStore) {
    let users = [
        ("alice@example.com", "Alice River", "alice-demo-password"),
        ("bob@example.com", "Bob Stone", "bob-demo-password"),
    ];
    for (email, name, password_plain) in users {
        store.seed_user(UserRecord {
            email: email.parse().expect("demo email is valid"),
            display_name: name.to_string(),
            password_hash: password::hash(password_plain).expect("demo password hashes"),
        });
    }

    let accounts = [
        ("100", "alice@example.com", 750),
        ("200", "alice@example.com", 50),
        ("300", "bob@example.com", 120),
    ];
    for (id, owner, balance) in accounts {
        store.seed_account(AccountRecord {
            id: id.parse().expect("demo account id is valid"),
            owner: owner.parse().expect("demo email is valid"),
            balance,
        });
    }

    tracing::info!("seeded demo users and accounts (in-memory store)");
}
