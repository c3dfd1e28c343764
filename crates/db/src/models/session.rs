//! Refresh-token sessions.
//!
//! Each row backs exactly one refresh token. Refreshing redeems the row and
//! issues a new one, so a token can be exchanged at most once.

use salon_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `user_sessions` table.
///
/// Only the SHA-256 hash of the refresh token is persisted; the plaintext
/// leaves the server once, in the login or refresh response.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    /// Set on redemption, logout, deactivation and password reset.
    pub is_revoked: bool,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request metadata recorded alongside a session for auditing.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub user_agent: Option<String>,
    /// First hop of `X-Forwarded-For`, when present.
    pub ip_address: Option<String>,
}

/// DTO for opening a session.
#[derive(Debug, Clone)]
pub struct NewRefreshSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub client: ClientInfo,
}
