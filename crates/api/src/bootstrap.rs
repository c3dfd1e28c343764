//! First-start provisioning of an admin account.

use salon_core::roles::ROLE_ADMIN;
use salon_db::models::user::CreateUser;
use salon_db::repositories::{RoleRepo, UserRepo};
use salon_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::config::AdminBootstrap;
use crate::error::{AppError, AppResult};

/// Create the configured admin account unless its username is already taken.
///
/// Returns `true` when a new account was created.
pub async fn ensure_admin(pool: &DbPool, admin: &AdminBootstrap) -> AppResult<bool> {
    if UserRepo::find_by_username(pool, &admin.username)
        .await?
        .is_some()
    {
        return Ok(false);
    }

    validate_password_strength(&admin.password).map_err(AppError::validation)?;

    let role = RoleRepo::find_by_name(pool, ROLE_ADMIN)
        .await?
        .ok_or_else(|| AppError::InternalError("admin role is not seeded".into()))?;

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: admin.username.clone(),
            email: admin.email.clone(),
            password_hash,
            first_name: None,
            last_name: None,
            role_id: role.id,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Bootstrap admin created");
    Ok(true)
}
