//! HS256 bearer tokens.
//!
//! Claims: `sub` is the numeric user id, `role` the caller role and `exp` the
//! expiry as a unix timestamp.

use crate::models;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JwtClaims {
    pub sub: String,
    pub role: String,
    pub exp: i64,
}

/// Issues a signed token.
pub fn sign(claims: &JwtClaims, secret: &[u8]) -> Result<String, String> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|err| format!("Failed to sign JWT: {}", err))
}

/// Checks structure, algorithm, signature and expiration.
pub fn verify(token: &str, secret: &[u8]) -> Result<JwtClaims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<JwtClaims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => "JWT token expired".to_string(),
            ErrorKind::InvalidSignature => "JWT signature mismatch".to_string(),
            ErrorKind::InvalidAlgorithm => "Unsupported JWT algorithm".to_string(),
            _ => format!("Invalid JWT: {}", err),
        })
}

pub fn user_from_claims(claims: &JwtClaims) -> Result<models::User, String> {
    let id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| format!("JWT subject is not a user id: {}", claims.sub))?;

    Ok(models::User {
        id,
        role: claims.role.clone(),
    })
}

/// Extract Bearer token from Authorization header
pub fn extract_bearer_token(authorization: &str) -> Result<&str, String> {
    let parts: Vec<&str> = authorization.split_whitespace().collect();
    if parts.len() != 2 {
        return Err("Invalid Authorization header format".to_string());
    }
    if parts[0] != "Bearer" {
        return Err("Expected Bearer scheme in Authorization header".to_string());
    }
    Ok(parts[1])
}
