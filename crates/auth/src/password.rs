//! Password hashing and verification (salted PBKDF2-SHA256, high cost factor).

use pbkdf2::Pbkdf2;
use pbkdf2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand::rngs::OsRng;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("password hashing failed")]
pub struct HashError;

/// Hash a password with a fresh random salt, returning a PHC-format string.
///
/// Used by provisioning/seeding and tests; the serving path only verifies.
pub fn hash(password: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    Pbkdf2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|_| HashError)
}

/// Verify a password against a stored PHC-format hash.
///
/// An unparseable stored hash verifies as `false` rather than erroring: a
/// corrupt credential row must look exactly like a wrong password.
pub fn verify(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Pbkdf2.verify_password(password.as_bytes(), &parsed).is_ok()
}
