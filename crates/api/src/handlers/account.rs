//! Handlers for the `/account` resource (user management).
//!
//! Listing, creation, deactivation and password resets are admin-only.
//! Reading and updating an account is also allowed for its owner, who may
//! not change their own role or active flag.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use salon_core::pagination;
use salon_core::roles::{is_valid_role, ROLE_USER};
use salon_core::types::DbId;
use salon_db::models::role::Role;
use salon_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use salon_db::repositories::{RoleRepo, SessionRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /account`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    /// Role name; defaults to `"user"`.
    pub role: Option<String>,
}

/// Request body for `PUT /account/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    #[validate(length(min = 3, max = 64))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Request body for `POST /account/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/account
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    let roles = RoleRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: with_roles(&users, &roles),
    }))
}

/// GET /api/v1/account/page/{skip}/{top}
pub async fn list_paged(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((skip, top)): Path<(String, String)>,
) -> AppResult<Json<PagedResponse<UserResponse>>> {
    let (skip, top) = pagination::resolve(&skip, &top);

    let users = UserRepo::list_paged(&state.pool, skip, top).await?;
    let total = UserRepo::count(&state.pool).await?;
    let roles = RoleRepo::list(&state.pool).await?;

    Ok(Json(PagedResponse {
        data: with_roles(&users, &roles),
        total,
        skip,
        top,
    }))
}

/// GET /api/v1/account/{id}
pub async fn get(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if !caller.can_act_for(id) {
        return Err(AppError::forbidden("Cannot view another account"));
    }

    let user = find_user(&state, id).await?;
    let role = RoleRepo::name_of(&state.pool, user.role_id).await?;
    Ok(Json(DataResponse {
        data: user.to_response(role),
    }))
}

/// POST /api/v1/account
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateAccountRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    input.validate()?;
    validate_password_strength(&input.password).map_err(AppError::validation)?;

    let role_name = input.role.as_deref().unwrap_or(ROLE_USER);
    let role = resolve_role(&state, role_name).await?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
            role_id: role.id,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, created_by = admin.user_id, role = %role.name, "Account created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: user.to_response(role.name),
        }),
    ))
}

/// PUT /api/v1/account/{id}
pub async fn update(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAccountRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if !caller.can_act_for(id) {
        return Err(AppError::forbidden("Cannot update another account"));
    }
    if !caller.is_admin() && (input.role.is_some() || input.is_active.is_some()) {
        return Err(AppError::forbidden(
            "Only admins may change role or active status",
        ));
    }
    input.validate()?;

    let role_id = match input.role.as_deref() {
        Some(name) => Some(resolve_role(&state, name).await?.id),
        None => None,
    };

    let user = UserRepo::update(
        &state.pool,
        id,
        &UpdateUser {
            username: input.username,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            role_id,
            is_active: input.is_active,
        },
    )
    .await?
    .ok_or(AppError::not_found("User", id))?;

    if input.is_active == Some(false) {
        SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    }

    let role = RoleRepo::name_of(&state.pool, user.role_id).await?;
    Ok(Json(DataResponse {
        data: user.to_response(role),
    }))
}

/// DELETE /api/v1/account/{id}
///
/// Soft-deactivates the account and revokes its sessions. Returns 204.
pub async fn deactivate(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if admin.user_id == id {
        return Err(AppError::BadRequest(
            "Cannot deactivate your own account".into(),
        ));
    }

    find_user(&state, id).await?;
    UserRepo::deactivate(&state.pool, id).await?;
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    tracing::info!(user_id = id, deactivated_by = admin.user_id, "Account deactivated");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/account/{id}/reset-password
///
/// Sets a new password and revokes every session of the account. Returns 204.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password).map_err(AppError::validation)?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    if !UserRepo::update_password(&state.pool, id, &password_hash).await? {
        return Err(AppError::not_found("User", id));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_user(state: &AppState, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("User", id))
}

async fn resolve_role(state: &AppState, name: &str) -> AppResult<Role> {
    if !is_valid_role(name) {
        return Err(AppError::validation(format!("Unknown role '{name}'")));
    }
    RoleRepo::find_by_name(&state.pool, name)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("Role '{name}' is not seeded")))
}

fn with_roles(users: &[User], roles: &[Role]) -> Vec<UserResponse> {
    users
        .iter()
        .map(|u| {
            let role = roles
                .iter()
                .find(|r| r.id == u.role_id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| "unknown".to_string());
            u.to_response(role)
        })
        .collect()
}
