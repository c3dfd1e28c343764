//! Bearer access tokens and refresh-token helpers.
//!
//! Access tokens are HS256-signed JWTs carrying [`Claims`]. Refresh tokens
//! are opaque random strings; only their SHA-256 hash is stored server-side.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use salon_core::types::DbId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::{parse_or, ConfigError};

/// Claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The account's database id.
    pub sub: DbId,
    /// Role name (`"admin"` or `"user"`).
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    /// Unique token id (UUID v4).
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in minutes (default: 15).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 7).
    pub refresh_token_expiry_days: i64,
}

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

impl JwtConfig {
    /// Read `JWT_SECRET` (required, non-empty), `JWT_ACCESS_EXPIRY_MINS` and
    /// `JWT_REFRESH_EXPIRY_DAYS`.
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        Ok(Self {
            secret,
            access_token_expiry_mins: parse_or(
                lookup,
                "JWT_ACCESS_EXPIRY_MINS",
                DEFAULT_ACCESS_EXPIRY_MINS,
            )?,
            refresh_token_expiry_days: parse_or(
                lookup,
                "JWT_REFRESH_EXPIRY_DAYS",
                DEFAULT_REFRESH_EXPIRY_DAYS,
            )?,
        })
    }
}

/// Issue an HS256 access token for the given account.
pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: now + config.access_token_expiry_mins * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature and expiry, returning the embedded [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Returns `(plaintext, sha256_hex)`. Send the plaintext, persist the hash.
pub fn generate_refresh_token() -> (String, String) {
    let plaintext = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    let hash = hash_refresh_token(&plaintext);
    (plaintext, hash)
}

pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
