//! Stateless session token issuance and verification (HS256).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use ironbank_core::Email;

use crate::claims::{TokenClaims, validate_claims};

/// Token validity window, in minutes.
pub const TOKEN_VALIDITY_MINUTES: i64 = 60;

/// Opaque token failure.
///
/// Structural corruption, signature mismatch, expiry, and not-yet-valid all
/// collapse into this single variant so a caller (or an attacker) cannot
/// learn *why* a token was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is not valid")]
    Invalid,
}

/// Issues and verifies signed, time-bounded session tokens.
///
/// The signing secret is injected at construction and held for the service's
/// lifetime; there is no ambient/global secret. Tokens are not persisted
/// server-side and there is no revocation list: a token stays valid until its
/// window closes.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    validity: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], validity: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // The time window is enforced by `validate_claims` with zero leeway.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            validity,
        }
    }

    /// Construct with the standard validity window.
    pub fn with_default_validity(secret: &[u8]) -> Self {
        Self::new(secret, Duration::minutes(TOKEN_VALIDITY_MINUTES))
    }

    /// Issue a signed token binding `subject`, valid from now until
    /// now + validity window.
    pub fn issue(&self, subject: &Email) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    /// Verify signature and time window, returning the bound subject.
    pub fn verify(&self, token: &str) -> Result<Email, TokenError> {
        self.verify_at(token, Utc::now())
    }

    fn issue_at(&self, subject: &Email, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = TokenClaims {
            sub: subject.clone(),
            iat: now.timestamp(),
            exp: (now + self.validity).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| TokenError::Invalid)
    }

    /// Verification against an explicit clock. Exposed for callers that need
    /// a deterministic `now` (tests); production paths use [`Self::verify`].
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Email, TokenError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map_err(|_| TokenError::Invalid)?;

        validate_claims(&data.claims, now).map_err(|_| TokenError::Invalid)?;

        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> Email {
        "alice@example.com".parse().unwrap()
    }

    #[test]
    fn issue_then_verify_roundtrip() {
        let svc = TokenService::with_default_validity(b"test-secret");
        let token = svc.issue(&subject()).unwrap();
        let resolved = svc.verify(&token).unwrap();
        assert_eq!(resolved, subject());
    }

    #[test]
    fn verifies_at_fifty_nine_minutes_rejects_at_sixty_one() {
        let svc = TokenService::with_default_validity(b"test-secret");
        let now = Utc::now();
        let token = svc.issue_at(&subject(), now).unwrap();

        assert!(svc.verify_at(&token, now + Duration::minutes(59)).is_ok());
        assert_eq!(
            svc.verify_at(&token, now + Duration::minutes(61)),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn tampered_token_is_invalid() {
        let svc = TokenService::with_default_validity(b"test-secret");
        let token = svc.issue(&subject()).unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        assert_eq!(svc.verify(&tampered), Err(TokenError::Invalid));
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let ours = TokenService::with_default_validity(b"test-secret");
        let theirs = TokenService::with_default_validity(b"other-secret");

        let forged = theirs.issue(&subject()).unwrap();
        assert_eq!(ours.verify(&forged), Err(TokenError::Invalid));
    }

    #[test]
    fn garbage_is_invalid() {
        let svc = TokenService::with_default_validity(b"test-secret");
        assert_eq!(svc.verify("not-a-token"), Err(TokenError::Invalid));
        assert_eq!(svc.verify(""), Err(TokenError::Invalid));
    }
}
