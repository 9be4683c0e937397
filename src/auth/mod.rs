use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config;

/// Decoded bearer-token payload. `id` is the acting user's identifier and is
/// what ownership checks key on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub name: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(id: i64, name: String) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            id,
            name,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("JWT secret not configured")]
    MissingSecret,
}

pub fn generate_jwt(claims: &Claims) -> Result<String, AuthError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Capability of turning an opaque bearer string into claims. The questions
/// service depends on this trait rather than on jsonwebtoken directly.
pub trait TokenReader: Send + Sync {
    fn decode(&self, raw: &str) -> Result<Claims, AuthError>;
}

/// Production `TokenReader` backed by the configured JWT secret. Accepts the
/// raw token or the full `Authorization` header value with a `Bearer` prefix.
#[derive(Debug, Clone, Default)]
pub struct JwtTokenReader;

impl TokenReader for JwtTokenReader {
    fn decode(&self, raw: &str) -> Result<Claims, AuthError> {
        let secret = &config::config().security.jwt_secret;

        if secret.is_empty() {
            return Err(AuthError::MissingSecret);
        }

        let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
        if token.is_empty() {
            return Err(AuthError::InvalidToken("empty token".to_string()));
        }

        let decoding_key = DecodingKey::from_secret(secret.as_bytes());
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_claims() {
        let claims = Claims::new(7, "alice".to_string());
        let token = generate_jwt(&claims).unwrap();

        let decoded = JwtTokenReader.decode(&token).unwrap();
        assert_eq!(decoded.id, 7);
        assert_eq!(decoded.name, "alice");
    }

    #[test]
    fn tolerates_bearer_prefix() {
        let token = generate_jwt(&Claims::new(3, "bob".to_string())).unwrap();

        let decoded = JwtTokenReader.decode(&format!("Bearer {}", token)).unwrap();
        assert_eq!(decoded.id, 3);
    }

    #[test]
    fn rejects_garbage_token() {
        assert!(matches!(
            JwtTokenReader.decode("Bearer not.a.jwt"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn rejects_empty_token() {
        assert!(matches!(
            JwtTokenReader.decode("Bearer   "),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn rejects_expired_token() {
        let claims = Claims {
            id: 1,
            name: "old".to_string(),
            exp: (Utc::now() - Duration::hours(2)).timestamp(),
            iat: (Utc::now() - Duration::hours(3)).timestamp(),
        };
        let token = generate_jwt(&claims).unwrap();

        assert!(matches!(
            JwtTokenReader.decode(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
