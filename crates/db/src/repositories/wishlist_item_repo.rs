//! Repository for the `wishlist_items` table.
//!
//! Every operation that changes the positions of a wishlist's items (append,
//! delete, re-sequence) runs in one transaction that first takes a row lock
//! on the owning wishlist. Concurrent reorders of the same wishlist are
//! therefore applied one after another and the dense `sort_order` sequence
//! survives them; different wishlists never contend.

use salon_core::ordering;
use salon_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::ResequenceError;
use crate::models::wishlist_item::{
    CreateWishlistItem, SortOutcome, UpdateWishlistItem, WishlistItem,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, wishlist_id, name, description, url, quantity, sort_order, \
                        created_at, updated_at";

/// Provides CRUD and ordering operations for wishlist items.
pub struct WishlistItemRepo;

impl WishlistItemRepo {
    /// All items of a wishlist in ascending `sort_order`.
    pub async fn list_for_wishlist(
        pool: &PgPool,
        wishlist_id: DbId,
    ) -> Result<Vec<WishlistItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM wishlist_items \
             WHERE wishlist_id = $1 \
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, WishlistItem>(&query)
            .bind(wishlist_id)
            .fetch_all(pool)
            .await
    }

    /// One page of a wishlist's items in ascending `sort_order`.
    pub async fn list_paged(
        pool: &PgPool,
        wishlist_id: DbId,
        skip: i64,
        top: i64,
    ) -> Result<Vec<WishlistItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM wishlist_items \
             WHERE wishlist_id = $1 \
             ORDER BY sort_order, id \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, WishlistItem>(&query)
            .bind(wishlist_id)
            .bind(top)
            .bind(skip)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, wishlist_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM wishlist_items WHERE wishlist_id = $1")
            .bind(wishlist_id)
            .fetch_one(pool)
            .await
    }

    /// Find an item by id, scoped to its wishlist.
    pub async fn find_by_id(
        pool: &PgPool,
        wishlist_id: DbId,
        id: DbId,
    ) -> Result<Option<WishlistItem>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM wishlist_items WHERE id = $1 AND wishlist_id = $2");
        sqlx::query_as::<_, WishlistItem>(&query)
            .bind(id)
            .bind(wishlist_id)
            .fetch_optional(pool)
            .await
    }

    /// Append a new item at position `count`.
    ///
    /// Returns `None` if the wishlist does not exist.
    pub async fn create(
        pool: &PgPool,
        wishlist_id: DbId,
        input: &CreateWishlistItem,
    ) -> Result<Option<WishlistItem>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if lock_wishlist(&mut tx, wishlist_id).await?.is_none() {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO wishlist_items (wishlist_id, name, description, url, quantity, sort_order) \
             VALUES ($1, $2, $3, $4, COALESCE($5, 1), \
                     (SELECT COUNT(*)::INT FROM wishlist_items WHERE wishlist_id = $1)) \
             RETURNING {COLUMNS}"
        );
        let item = sqlx::query_as::<_, WishlistItem>(&query)
            .bind(wishlist_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.url)
            .bind(input.quantity)
            .fetch_one(&mut *tx)
            .await?;

        bump_version(&mut tx, wishlist_id).await?;
        tx.commit().await?;

        tracing::debug!(
            wishlist_id,
            item_id = item.id,
            sort_order = item.sort_order,
            "Appended wishlist item"
        );
        Ok(Some(item))
    }

    /// Update an item's descriptive fields. Only non-`None` fields are applied.
    ///
    /// Returns `None` if the item does not exist in the given wishlist.
    pub async fn update(
        pool: &PgPool,
        wishlist_id: DbId,
        id: DbId,
        input: &UpdateWishlistItem,
    ) -> Result<Option<WishlistItem>, sqlx::Error> {
        let query = format!(
            "UPDATE wishlist_items SET \
                name = COALESCE($3, name), \
                description = COALESCE($4, description), \
                url = COALESCE($5, url), \
                quantity = COALESCE($6, quantity) \
             WHERE id = $1 AND wishlist_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WishlistItem>(&query)
            .bind(id)
            .bind(wishlist_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.url)
            .bind(input.quantity)
            .fetch_optional(pool)
            .await
    }

    /// Delete an item and pull every later sibling forward by one.
    ///
    /// Returns `false` if the item does not exist in the given wishlist.
    pub async fn delete(pool: &PgPool, wishlist_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if lock_wishlist(&mut tx, wishlist_id).await?.is_none() {
            return Ok(false);
        }

        let removed: Option<i32> = sqlx::query_scalar(
            "DELETE FROM wishlist_items WHERE id = $1 AND wishlist_id = $2 RETURNING sort_order",
        )
        .bind(id)
        .bind(wishlist_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(removed) = removed else {
            return Ok(false);
        };

        let shifted = sqlx::query(
            "UPDATE wishlist_items SET sort_order = sort_order - 1 \
             WHERE wishlist_id = $1 AND sort_order > $2",
        )
        .bind(wishlist_id)
        .bind(removed)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        bump_version(&mut tx, wishlist_id).await?;
        tx.commit().await?;

        tracing::debug!(wishlist_id, item_id = id, removed, shifted, "Deleted wishlist item");
        Ok(true)
    }

    /// Move the item currently at `old_index` to `new_index`.
    ///
    /// Runs under the wishlist row lock. When `expected_version` is given it
    /// must equal the wishlist's current `items_version`. Only the mover and
    /// the shifted band are written, in a single statement; if that statement
    /// touches fewer rows than planned the transaction is rolled back and
    /// [`ResequenceError::PartialWrite`] is returned.
    pub async fn resequence(
        pool: &PgPool,
        wishlist_id: DbId,
        old_index: i32,
        new_index: i32,
        expected_version: Option<i64>,
    ) -> Result<SortOutcome, ResequenceError> {
        let mut tx = pool.begin().await?;

        let version = lock_wishlist(&mut tx, wishlist_id)
            .await?
            .ok_or(ResequenceError::NotFound {
                entity: "Wishlist",
                id: wishlist_id,
            })?;

        if let Some(expected) = expected_version {
            if expected != version {
                return Err(ResequenceError::VersionMismatch {
                    wishlist_id,
                    expected,
                    actual: version,
                });
            }
        }

        let query = format!("SELECT {COLUMNS} FROM wishlist_items WHERE wishlist_id = $1");
        let items = sqlx::query_as::<_, WishlistItem>(&query)
            .bind(wishlist_id)
            .fetch_all(&mut *tx)
            .await?;

        if !ordering::is_dense(&items) {
            tracing::warn!(wishlist_id, count = items.len(), "Wishlist item order has gaps");
        }

        let (mut items, plan) = ordering::resequence(items, old_index, new_index)?;

        if plan.is_empty() {
            tx.commit().await?;
            return Ok(SortOutcome {
                items,
                items_version: version,
            });
        }

        let ids: Vec<DbId> = plan.iter().map(|r| r.id).collect();
        let orders: Vec<i32> = plan.iter().map(|r| r.to).collect();

        let query = format!(
            "UPDATE wishlist_items AS wi SET sort_order = v.new_order \
             FROM UNNEST($2::BIGINT[], $3::INT[]) AS v(item_id, new_order) \
             WHERE wi.id = v.item_id AND wi.wishlist_id = $1 \
             RETURNING {COLUMNS}"
        );
        let written = sqlx::query_as::<_, WishlistItem>(&query)
            .bind(wishlist_id)
            .bind(&ids)
            .bind(&orders)
            .fetch_all(&mut *tx)
            .await?;

        if written.len() != plan.len() {
            tracing::error!(
                wishlist_id,
                expected = plan.len(),
                written = written.len(),
                "Re-sequencing wrote fewer rows than planned, rolling back"
            );
            return Err(ResequenceError::PartialWrite {
                expected: plan.len(),
                written: written.len() as u64,
            });
        }

        // Same positions, fresh `updated_at` values.
        for row in written {
            if let Some(slot) = items.iter_mut().find(|i| i.id == row.id) {
                *slot = row;
            }
        }

        let items_version = bump_version(&mut tx, wishlist_id).await?;
        tx.commit().await?;

        tracing::debug!(
            wishlist_id,
            old_index,
            new_index,
            moved = plan.len(),
            items_version,
            "Re-sequenced wishlist items"
        );

        Ok(SortOutcome {
            items,
            items_version,
        })
    }
}

/// Lock the wishlist row for the rest of the transaction, returning its
/// `items_version`, or `None` if the wishlist does not exist.
async fn lock_wishlist(
    tx: &mut Transaction<'_, Postgres>,
    wishlist_id: DbId,
) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar("SELECT items_version FROM wishlists WHERE id = $1 FOR UPDATE")
        .bind(wishlist_id)
        .fetch_optional(&mut **tx)
        .await
}

async fn bump_version(
    tx: &mut Transaction<'_, Postgres>,
    wishlist_id: DbId,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "UPDATE wishlists SET items_version = items_version + 1 WHERE id = $1 \
         RETURNING items_version",
    )
    .bind(wishlist_id)
    .fetch_one(&mut **tx)
    .await
}
