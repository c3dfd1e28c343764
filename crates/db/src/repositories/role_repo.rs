//! Repository for the seeded `roles` lookup table.

use salon_core::types::DbId;
use sqlx::PgPool;

use crate::models::role::Role;

const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Read-only access to roles; rows are created by migrations only.
pub struct RoleRepo;

impl RoleRepo {
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE name = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles ORDER BY id");
        sqlx::query_as::<_, Role>(&query).fetch_all(pool).await
    }

    /// Name of the role with the given id, or `"unknown"` for a dangling id.
    pub async fn name_of(pool: &PgPool, role_id: DbId) -> Result<String, sqlx::Error> {
        let name: Option<String> = sqlx::query_scalar("SELECT name FROM roles WHERE id = $1")
            .bind(role_id)
            .fetch_optional(pool)
            .await?;
        Ok(name.unwrap_or_else(|| "unknown".to_string()))
    }
}
