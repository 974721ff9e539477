use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::credentials::CredentialStore;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Subject (username)
    pub exp: i64,    // Expiration time (UTC timestamp, seconds)
    pub iat: i64,    // Issued at
}

/// Signed, time-limited access token
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub subject: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("invalid token format")]
    InvalidFormat,

    #[error("token signing failed: {0}")]
    Internal(String),
}

/// Issues and validates stateless bearer tokens.
///
/// Nothing is stored per token: validity is the HS256 signature plus `exp`,
/// checked with zero leeway. There is no revocation list.
pub struct AuthService {
    credentials: CredentialStore,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(credentials: CredentialStore, jwt_secret: &str, token_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            credentials,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            validation,
            token_ttl,
        }
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Check `username`/`password` and issue a token.
    ///
    /// argon2 verification is CPU-bound; call from `spawn_blocking`.
    pub fn issue(&self, username: &str, password: &str) -> Result<AccessToken, AuthError> {
        let user = self
            .credentials
            .verify(username, password)
            .ok_or(AuthError::InvalidCredentials)?;
        self.issue_for(&user.username, Utc::now())
    }

    /// Sign a token for `subject` as if issued at `issued_at`.
    pub fn issue_for(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<AccessToken, AuthError> {
        let expires_at = issued_at + self.token_ttl;
        let claims = Claims {
            sub: subject.to_string(),
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(AccessToken {
            token,
            subject: claims.sub,
            issued_at,
            expires_at,
        })
    }

    /// Verify JWT token
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                AuthError::InvalidToken
            })?;

        // jsonwebtoken still accepts `exp == now`; a token is only valid while `now < exp`
        if claims.exp <= Utc::now().timestamp() {
            tracing::debug!("Token rejected: expired at {}", claims.exp);
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }

    /// Extract and validate the token from an `Authorization` header value.
    pub fn validate_header(&self, header_value: &str) -> Result<Claims, AuthError> {
        let (scheme, token) = header_value
            .split_once(' ')
            .ok_or(AuthError::InvalidFormat)?;
        if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
            return Err(AuthError::InvalidFormat);
        }
        self.validate(token.trim())
    }
}
