//! Wishlist item model and DTOs.

use salon_core::ordering::Ordered;
use salon_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `wishlist_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WishlistItem {
    pub id: DbId,
    pub wishlist_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub quantity: i32,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Ordered for WishlistItem {
    fn id(&self) -> DbId {
        self.id
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }

    fn set_sort_order(&mut self, sort_order: i32) {
        self.sort_order = sort_order;
    }
}

/// DTO for creating an item. The position is always assigned by the repository.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWishlistItem {
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub quantity: Option<i32>,
}

/// DTO for updating an item. Positions change only through
/// [`WishlistItemRepo::resequence`](crate::repositories::WishlistItemRepo::resequence).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWishlistItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub quantity: Option<i32>,
}

/// Result of a successful re-sequencing: every item of the wishlist in
/// ascending `sort_order`, plus the wishlist's new `items_version`.
#[derive(Debug, Clone, Serialize)]
pub struct SortOutcome {
    pub items: Vec<WishlistItem>,
    pub items_version: i64,
}
