use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::{CredentialError, TokenError};

pub const ACCESS_ISSUER: &str = "local";
pub const REFRESH_ISSUER: &str = "cookie";

/// Claims carried by both token kinds. Refresh tokens have no subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(sub: Option<String>, iss: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub,
            iss: iss.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }
}

/// Only the issuer, read before the signature is checked.
#[derive(Deserialize)]
struct IssuerPeek {
    #[serde(default)]
    iss: Option<String>,
}

pub fn sign(claims: &Claims, secret: &str) -> Result<String, CredentialError> {
    if secret.is_empty() {
        return Err(CredentialError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::new(Algorithm::HS256), claims, &encoding_key)
        .map_err(|e| CredentialError::Signing(e.to_string()))
}

/// Decode an access token: refresh-class tokens are refused before the
/// signature is looked at, then signature, expiry and issuer are enforced.
pub fn verify_access(token: &str, secret: &str) -> Result<Claims, TokenError> {
    if peek_issuer(token)?.as_deref() == Some(REFRESH_ISSUER) {
        return Err(TokenError::RefreshToken);
    }

    if secret.is_empty() {
        return Err(TokenError::Invalid("Token verification is not configured.".to_string()));
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[ACCESS_ISSUER]);

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(e.to_string()),
        })
}

fn peek_issuer(token: &str) -> Result<Option<String>, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<IssuerPeek>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims.iss)
        .map_err(|e| TokenError::Invalid(e.to_string()))
}
