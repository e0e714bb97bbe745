use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config;

/// JWT claims carried by catalog admin tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Principal (store owner) id
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Issue a token for the given principal using the configured secret
pub fn issue_token(principal_id: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
    let security = &config::config().security;
    let now = Utc::now();
    let claims = Claims {
        sub: principal_id,
        iat: now.timestamp(),
        exp: (now + chrono::Duration::hours(security.jwt_expiry_hours as i64)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(security.jwt_secret.as_bytes()),
    )
}

/// Validate a token and extract its claims
pub fn verify_token(token: &str) -> Result<Claims, String> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err("JWT secret not configured".to_string());
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| format!("invalid token: {}", e))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_round_trip() {
        let principal = Uuid::new_v4();
        let token = issue_token(principal).expect("issue");
        let claims = verify_token(&token).expect("verify");
        assert_eq!(claims.sub, principal);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        assert!(verify_token("not-a-jwt").is_err());
    }
}
