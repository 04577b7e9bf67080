//! `ironbank-transfer` — pure fund-transfer domain rules.
//!
//! Validation ordering, the per-transfer ceiling, and the rejection taxonomy
//! live here. Execution against a store is infrastructure and lives in
//! `ironbank-infra`.

pub mod rules;

pub use rules::{
    TRANSFER_CEILING, TransferError, TransferPolicy, TransferRequest, validate_amount,
    validate_request,
};
