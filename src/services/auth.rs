use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Role, User};

/// Errors from token handling and password hashing
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token is not valid")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
}

/// JWT payload identifying the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies session tokens, and hashes passwords
pub struct AuthService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    token_ttl: Duration,
    bcrypt_cost: u32,
    cookie_name: String,
}

impl AuthService {
    pub fn new(secret: &str, token_ttl_hours: i64, bcrypt_cost: u32, cookie_name: impl Into<String>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl: Duration::hours(token_ttl_hours),
            bcrypt_cost,
            cookie_name: cookie_name.into(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Sign a token for `user`
    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            user_id: user.id,
            role: user.role,
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Check signature and expiry, returning the embedded claims
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }

    /// Hash a password; CPU-bound, run it off the async executor
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        Ok(bcrypt::hash(password, self.bcrypt_cost)?)
    }

    /// Compare a password against a stored hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(bcrypt::verify(password, hash)?)
    }
}
