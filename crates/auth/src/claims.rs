use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ironbank_core::Email;

/// Session token claims model (transport-agnostic).
///
/// This is the minimal set of claims a session token carries once it has been
/// decoded/verified by the signing layer. Timestamps are unix seconds
/// (standard JWT numeric dates).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject identity bound into the token.
    pub sub: Email,

    /// Issued-at timestamp (unix seconds).
    pub iat: i64,

    /// Expiration timestamp (unix seconds).
    pub exp: i64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (iat is in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Deterministically validate the time window of token claims.
///
/// Note: this validates the *claims* only. Signature verification / decoding
/// is the job of [`crate::TokenService`], which collapses these variants into
/// an opaque failure before anything reaches a caller.
pub fn validate_claims(claims: &TokenClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    let now = now.timestamp();
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.iat {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn claims_at(iat: i64, exp: i64) -> TokenClaims {
        TokenClaims {
            sub: "user@example.com".parse().unwrap(),
            iat,
            exp,
        }
    }

    fn at(ts: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(ts, 0).unwrap()
    }

    #[test]
    fn valid_inside_window() {
        // 60-minute window, checked at +59 minutes.
        let claims = claims_at(1_000_000, 1_000_000 + 3_600);
        assert!(validate_claims(&claims, at(1_000_000 + 59 * 60)).is_ok());
    }

    #[test]
    fn expired_after_window() {
        // 60-minute window, checked at +61 minutes.
        let claims = claims_at(1_000_000, 1_000_000 + 3_600);
        assert_eq!(
            validate_claims(&claims, at(1_000_000 + 61 * 60)),
            Err(TokenValidationError::Expired)
        );
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let claims = claims_at(1_000_000, 1_000_000 + 3_600);
        assert_eq!(
            validate_claims(&claims, at(1_000_000 + 3_600)),
            Err(TokenValidationError::Expired)
        );
    }

    #[test]
    fn not_yet_valid_before_iat() {
        let claims = claims_at(1_000_000, 1_000_000 + 3_600);
        assert_eq!(
            validate_claims(&claims, at(999_999)),
            Err(TokenValidationError::NotYetValid)
        );
    }

    #[test]
    fn inverted_window_is_rejected() {
        let claims = claims_at(1_000_000, 1_000_000);
        assert_eq!(
            validate_claims(&claims, at(1_000_000)),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }
}
