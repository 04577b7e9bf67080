//! Transfer execution pipeline.
//!
//! The engine owns the precondition ordering: cheap pure checks first
//! (amount positivity, ceiling), then the store's atomic unit, which
//! re-resolves ownership, funds, and target existence under its
//! transactional scope. No retry exists at any layer; a failed transfer
//! requires a new request.

use std::sync::Arc;

use tracing::instrument;

use ironbank_core::Email;
use ironbank_transfer::{TransferError, TransferPolicy, TransferRequest, validate_request};

use crate::store::BankStore;

/// Validates and atomically executes balance movement between two accounts.
pub struct TransferEngine {
    store: Arc<dyn BankStore>,
    policy: TransferPolicy,
}

impl TransferEngine {
    pub fn new(store: Arc<dyn BankStore>, policy: TransferPolicy) -> Self {
        Self { store, policy }
    }

    #[instrument(
        skip(self, requester),
        fields(source = %request.source, target = %request.target, amount = request.amount),
        err
    )]
    pub async fn transfer(
        &self,
        request: &TransferRequest,
        requester: &Email,
    ) -> Result<(), TransferError> {
        validate_request(request, &self.policy)?;

        self.store.execute_transfer(request, requester).await?;

        tracing::info!("transfer committed");
        Ok(())
    }
}
