//! Role entity model.

use salon_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A role row from the `roles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
