use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config;

/// Identity token claims. The caller's identity is established by a separate
/// authentication step; this service only verifies the signed result.
#[derive(Debug, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Caller uid
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl IdentityClaims {
    pub fn new(uid: impl Into<String>) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.identity_token_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: uid.into(),
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    TokenValidation(String),
    InvalidSecret,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::TokenValidation(msg) => write!(f, "JWT validation error: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
        }
    }
}

impl std::error::Error for JwtError {}

/// Sign an identity token for a uid. Used by the demo CLI and tests; a real
/// deployment receives these from the external identity authority that
/// shares the signing secret.
pub fn generate_identity_token(uid: &str) -> Result<String, JwtError> {
    sign(&IdentityClaims::new(uid))
}

/// Validate an identity token and extract its claims.
pub fn validate_identity_token(token: &str) -> Result<IdentityClaims, JwtError> {
    verify(token)
}

pub(crate) fn sign<C: Serialize>(claims: &C) -> Result<String, JwtError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

pub(crate) fn verify<C: for<'de> Deserialize<'de>>(token: &str) -> Result<C, JwtError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<C>(token, &decoding_key, &validation)
        .map_err(|e| JwtError::TokenValidation(e.to_string()))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_token_round_trip() {
        let token = generate_identity_token("user-42").expect("sign");
        let claims = validate_identity_token(&token).expect("verify");
        assert_eq!(claims.sub, "user-42");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tampered_token_rejected() {
        let token = generate_identity_token("user-42").expect("sign");
        let mut tampered = token.clone();
        tampered.push('x');
        assert!(validate_identity_token(&tampered).is_err());
    }

    #[test]
    fn garbage_token_rejected() {
        assert!(validate_identity_token("not-a-jwt").is_err());
    }
}
