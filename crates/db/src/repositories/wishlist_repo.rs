//! Repository for the `wishlists` table.

use salon_core::types::DbId;
use sqlx::PgPool;

use crate::models::wishlist::{CreateWishlist, UpdateWishlist, Wishlist};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str =
    "id, user_id, name, status, privacy, preferences, items_version, created_at, updated_at";

/// Provides CRUD operations for wishlists.
///
/// List queries take an optional owner filter: `None` means every wishlist
/// (admin view), `Some(user_id)` restricts to that user's lists.
pub struct WishlistRepo;

impl WishlistRepo {
    /// Insert a new wishlist, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateWishlist) -> Result<Wishlist, sqlx::Error> {
        let query = format!(
            "INSERT INTO wishlists (user_id, name, status, privacy, preferences) \
             VALUES ($1, $2, COALESCE($3, 'active'), COALESCE($4, 'public'), \
                     COALESCE($5, '{{}}'::jsonb)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Wishlist>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.status)
            .bind(&input.privacy)
            .bind(&input.preferences)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Wishlist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM wishlists WHERE id = $1");
        sqlx::query_as::<_, Wishlist>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All wishlists visible under the owner filter, newest first.
    pub async fn list(pool: &PgPool, owner: Option<DbId>) -> Result<Vec<Wishlist>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM wishlists \
             WHERE ($1::BIGINT IS NULL OR user_id = $1) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Wishlist>(&query)
            .bind(owner)
            .fetch_all(pool)
            .await
    }

    /// One page of wishlists under the owner filter, newest first.
    pub async fn list_paged(
        pool: &PgPool,
        owner: Option<DbId>,
        skip: i64,
        top: i64,
    ) -> Result<Vec<Wishlist>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM wishlists \
             WHERE ($1::BIGINT IS NULL OR user_id = $1) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Wishlist>(&query)
            .bind(owner)
            .bind(top)
            .bind(skip)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, owner: Option<DbId>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM wishlists WHERE ($1::BIGINT IS NULL OR user_id = $1)")
            .bind(owner)
            .fetch_one(pool)
            .await
    }

    /// Update a wishlist. Only non-`None` fields are applied; `preferences`
    /// replaces the whole document.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWishlist,
    ) -> Result<Option<Wishlist>, sqlx::Error> {
        let query = format!(
            "UPDATE wishlists SET \
                name = COALESCE($2, name), \
                status = COALESCE($3, status), \
                privacy = COALESCE($4, privacy), \
                preferences = COALESCE($5, preferences) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Wishlist>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.status)
            .bind(&input.privacy)
            .bind(&input.preferences)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a wishlist; its items go with it via `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM wishlists WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
