//! `ironbank-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod identity;

pub use error::{DomainError, DomainResult};
pub use id::AccountId;
pub use identity::Email;
