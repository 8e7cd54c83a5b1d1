use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};

/// JWT claims issued after a successful authentication
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (login)
    pub sub: String,
    /// Issued at, seconds since the epoch
    pub iat: i64,
    /// Expiration, seconds since the epoch
    pub exp: i64,
}

/// Signs and verifies HS256 bearer tokens.
///
/// Built once from [`JwtConfig`] at startup and shared through the
/// application state; the key never changes while the process runs.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lifetime: SignedDuration,
}

impl TokenIssuer {
    /// # Arguments
    /// * `secret` - HMAC secret
    /// * `lifetime_hours` - Validity of each issued token
    pub fn new(secret: &str, lifetime_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            lifetime: SignedDuration::from_secs(lifetime_hours.saturating_mul(3600)),
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(&config.secret, config.token_expiration)
    }

    pub fn lifetime(&self) -> SignedDuration {
        self.lifetime
    }

    /// Issues a token for `login`, valid from now for the configured lifetime.
    ///
    /// # Returns
    /// The encoded JWT, or `AppError::Internal` if signing fails
    ///
    /// # Example
    /// ```ignore
    /// let token = issuer.issue("alice")?;
    /// ```
    pub fn issue(&self, login: &str) -> AppResult<String> {
        let claims = self.claims_at(login, Timestamp::now())?;
        self.sign(&claims)
    }

    /// Verifies signature and expiry and returns the claims.
    ///
    /// Every failure maps to `AppError::Unauthorized`.
    pub fn validate(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::unauthorized("Token has expired"),
                ErrorKind::InvalidSignature => AppError::unauthorized("Invalid token signature"),
                _ => AppError::unauthorized("Invalid token"),
            })
    }

    fn claims_at(&self, login: &str, issued_at: Timestamp) -> AppResult<Claims> {
        let expires_at = issued_at
            .checked_add(self.lifetime)
            .map_err(|e| AppError::Internal {
                source: anyhow::anyhow!("Token expiration out of range: {}", e),
            })?;

        Ok(Claims {
            sub: login.to_string(),
            iat: issued_at.as_second(),
            exp: expires_at.as_second(),
        })
    }

    fn sign(&self, claims: &Claims) -> AppResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(|e| {
            AppError::Internal {
                source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
            }
        })
    }
}
