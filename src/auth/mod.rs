pub mod jwt;
pub mod password;

use chrono::Duration;
use thiserror::Error;

use crate::config::SecurityConfig;
pub use jwt::Claims;

/// Failures issuing credentials. These are server-side problems.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("JWT secret is not configured")]
    MissingSecret,

    #[error("JWT signing error: {0}")]
    Signing(String),

    #[error("Password hashing error: {0}")]
    Hashing(String),
}

/// Reasons an access token is refused. All are client errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Refresh tokens cannot be used to access resources.")]
    RefreshToken,

    #[error("Token has expired.")]
    Expired,

    #[error("{0}")]
    Invalid(String),
}

impl TokenError {
    pub fn status_code(&self) -> u16 {
        400
    }
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Verified access token contents.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessClaims {
    pub subject: String,
    pub expires_at: i64,
}

/// Password hashing and token issuance/verification around the shared secret.
#[derive(Clone)]
pub struct Credentials {
    secret: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl Credentials {
    pub fn new(secret: impl Into<String>, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            access_ttl: Duration::seconds(access_ttl_secs),
            refresh_ttl: Duration::seconds(refresh_ttl_secs),
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(
            security.jwt_secret.clone(),
            security.access_token_ttl_secs,
            security.refresh_token_ttl_secs,
        )
    }

    pub fn hash_password(&self, plaintext: &str) -> Result<String, CredentialError> {
        password::hash_password(plaintext)
    }

    /// `(false, reason)` on mismatch or a malformed hash; never fails.
    pub fn verify_password(&self, plaintext: &str, hash: &str) -> (bool, String) {
        password::verify_password(plaintext, hash)
    }

    pub fn issue_token_pair(&self, subject_id: &str) -> Result<TokenPair, CredentialError> {
        let access = Claims::new(Some(subject_id.to_string()), jwt::ACCESS_ISSUER, self.access_ttl);
        let refresh = Claims::new(None, jwt::REFRESH_ISSUER, self.refresh_ttl);

        Ok(TokenPair {
            access_token: jwt::sign(&access, &self.secret)?,
            refresh_token: jwt::sign(&refresh, &self.secret)?,
        })
    }

    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let claims = jwt::verify_access(token, &self.secret)?;
        let subject = claims
            .sub
            .filter(|s| !s.is_empty())
            .ok_or_else(|| TokenError::Invalid("Token has no subject.".to_string()))?;

        Ok(AccessClaims {
            subject,
            expires_at: claims.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("unit-secret", 3600, 7 * 24 * 3600)
    }

    #[test]
    fn issued_access_token_yields_subject() {
        let creds = credentials();
        let pair = creds.issue_token_pair("64b7f0c2a1b2c3d4e5f60718").unwrap();
        let claims = creds.verify_access_token(&pair.access_token).unwrap();
        assert_eq!(claims.subject, "64b7f0c2a1b2c3d4e5f60718");
        assert_ne!(pair.access_token, pair.refresh_token);
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let creds = credentials();
        let pair = creds.issue_token_pair("abc").unwrap();
        let err = creds.verify_access_token(&pair.refresh_token).unwrap_err();
        assert_eq!(err, TokenError::RefreshToken);
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn empty_secret_fails_issue_without_panicking() {
        let creds = Credentials::new("", 3600, 3600);
        assert!(matches!(creds.issue_token_pair("abc"), Err(CredentialError::MissingSecret)));
    }
}
