//! Wishlist entity model and DTOs.

use salon_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// A row from the `wishlists` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Wishlist {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub status: String,
    pub privacy: String,
    /// JSON object of client-defined preferences; `{}` when unset.
    pub preferences: Value,
    /// Incremented whenever the ordering of this wishlist's items changes.
    pub items_version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new wishlist. `status`, `privacy` and `preferences`
/// fall back to the column defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWishlist {
    pub user_id: DbId,
    pub name: String,
    pub status: Option<String>,
    pub privacy: Option<String>,
    pub preferences: Option<Value>,
}

/// DTO for updating an existing wishlist. Ownership is immutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWishlist {
    pub name: Option<String>,
    pub status: Option<String>,
    pub privacy: Option<String>,
    pub preferences: Option<Value>,
}
