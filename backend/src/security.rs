//! Supabase access token validation and minting

use std::str::FromStr;

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Audience Supabase puts on user access tokens
pub const SUPABASE_AUDIENCE: &str = "authenticated";

/// Issuer claim written by [`generate_access_token`]
pub const SUPABASE_ISSUER: &str = "supabase";

/// Claims carried by a Supabase access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub aud: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

fn parse_algorithm(name: &str) -> AppResult<Algorithm> {
    Algorithm::from_str(name)
        .map_err(|_| AppError::Configuration(format!("Unsupported token algorithm: {}", name)))
}

/// Verify signature, expiry, not-before and audience; `sub`, `exp`, `iat`
/// and `aud` must all be present.
pub fn validate_access_token(token: &str, secret: &str, algorithm: &str) -> AppResult<Claims> {
    let mut validation = Validation::new(parse_algorithm(algorithm)?);
    validation.set_audience(&[SUPABASE_AUDIENCE]);
    validation.set_required_spec_claims(&["sub", "exp", "aud"]);
    validation.validate_nbf = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "Access token rejected");
        match e.kind() {
            ErrorKind::ExpiredSignature => AppError::Unauthorized("Token has expired".to_string()),
            _ => AppError::Unauthorized("Invalid authentication credentials".to_string()),
        }
    })
}

/// Mint a Supabase-shaped token, used by local tooling and tests
pub fn generate_access_token(
    secret: &str,
    algorithm: &str,
    user_id: &str,
    email: Option<&str>,
    role: &str,
    ttl: Duration,
) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.map(str::to_string),
        role: Some(role.to_string()),
        session_id: None,
        aud: SUPABASE_AUDIENCE.to_string(),
        iss: Some(SUPABASE_ISSUER.to_string()),
        exp: (now + ttl).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::new(parse_algorithm(algorithm)?),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_generated_token_validates() {
        let token = generate_access_token(
            SECRET,
            "HS256",
            "user-123",
            Some("taster@example.com"),
            "authenticated",
            Duration::hours(1),
        )
        .unwrap();

        let claims = validate_access_token(&token, SECRET, "HS256").unwrap();
        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.email.as_deref(), Some("taster@example.com"));
        assert_eq!(claims.role.as_deref(), Some("authenticated"));
        assert_eq!(claims.aud, SUPABASE_AUDIENCE);
    }

    #[test]
    fn test_unknown_algorithm_is_configuration_error() {
        assert!(matches!(
            validate_access_token("token", SECRET, "HS999"),
            Err(AppError::Configuration(_))
        ));
    }
}
