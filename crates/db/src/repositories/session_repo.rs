//! Repository for the `user_sessions` table.

use salon_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{NewRefreshSession, RefreshSession};

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, is_revoked, \
                        user_agent, ip_address, created_at, updated_at";

/// Refresh-session lifecycle: open, redeem once, revoke, purge.
pub struct SessionRepo;

impl SessionRepo {
    /// Open a session for a freshly issued refresh token.
    pub async fn create(
        pool: &PgPool,
        input: &NewRefreshSession,
    ) -> Result<RefreshSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions \
                (user_id, refresh_token_hash, expires_at, user_agent, ip_address) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RefreshSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .bind(&input.client.user_agent)
            .bind(&input.client.ip_address)
            .fetch_one(pool)
            .await
    }

    /// Redeem the live session behind `hash`, revoking it in the same
    /// statement.
    ///
    /// Returns `None` when the token is unknown, expired or already redeemed.
    /// Concurrent redemptions of one token serialize on the row lock, and the
    /// losers re-check `is_revoked` and get `None`, so at most one caller ever
    /// receives the session.
    pub async fn redeem(pool: &PgPool, hash: &str) -> Result<Option<RefreshSession>, sqlx::Error> {
        let query = format!(
            "UPDATE user_sessions SET is_revoked = true \
             WHERE refresh_token_hash = $1 \
               AND is_revoked = false \
               AND expires_at > NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RefreshSession>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke every live session of a user, returning how many were revoked.
    ///
    /// Used by logout, account deactivation and password resets.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true \
             WHERE user_id = $1 AND is_revoked = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete sessions that can no longer be redeemed.
    pub async fn purge_stale(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM user_sessions WHERE is_revoked = true OR expires_at <= NOW()")
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }
}
