//! Bank store boundary.
//!
//! This module defines an infrastructure-facing abstraction over the
//! persisted user and account tables without making storage assumptions.
//! Point lookups are keyed by primary/unique key; the only mutation is the
//! atomic two-row transfer.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryBankStore;
pub use postgres::PostgresBankStore;
pub use r#trait::{AccountRecord, BankStore, StoreError, UserRecord};
