//! Handlers for the `/wishlists` resource.
//!
//! Admins see every wishlist; other callers see and manage only their own.
//! Public wishlists may additionally be read by anyone.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use salon_core::pagination;
use salon_core::status::{validate_privacy, validate_status, PRIVACY_PUBLIC};
use salon_core::types::DbId;
use salon_db::models::wishlist::{CreateWishlist, UpdateWishlist, Wishlist};
use salon_db::repositories::WishlistRepo;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

/// Request body for `POST /wishlists`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWishlistRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub status: Option<String>,
    pub privacy: Option<String>,
    pub preferences: Option<Value>,
    /// Admins may create a wishlist on behalf of another user.
    pub user_id: Option<DbId>,
}

/// Request body for `PUT /wishlists/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateWishlistRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub status: Option<String>,
    pub privacy: Option<String>,
    /// Replaces the stored preferences document when present.
    pub preferences: Option<Value>,
}

/// GET /api/v1/wishlists
pub async fn list(
    State(state): State<AppState>,
    caller: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Wishlist>>>> {
    let wishlists = WishlistRepo::list(&state.pool, owner_filter(&caller)).await?;
    Ok(Json(DataResponse { data: wishlists }))
}

/// GET /api/v1/wishlists/page/{skip}/{top}
pub async fn list_paged(
    State(state): State<AppState>,
    caller: AuthUser,
    Path((skip, top)): Path<(String, String)>,
) -> AppResult<Json<PagedResponse<Wishlist>>> {
    let (skip, top) = pagination::resolve(&skip, &top);
    let owner = owner_filter(&caller);

    let data = WishlistRepo::list_paged(&state.pool, owner, skip, top).await?;
    let total = WishlistRepo::count(&state.pool, owner).await?;

    Ok(Json(PagedResponse {
        data,
        total,
        skip,
        top,
    }))
}

/// GET /api/v1/wishlists/{id}
pub async fn get(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Wishlist>>> {
    let wishlist = find_readable(&state, caller.as_ref(), id).await?;
    Ok(Json(DataResponse { data: wishlist }))
}

/// POST /api/v1/wishlists
pub async fn create(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(input): Json<CreateWishlistRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Wishlist>>)> {
    input.validate()?;
    validate_status(input.status.as_deref()).map_err(AppError::validation)?;
    validate_privacy(input.privacy.as_deref()).map_err(AppError::validation)?;
    validate_preferences(input.preferences.as_ref())?;

    let user_id = match input.user_id {
        Some(other) if other != caller.user_id && !caller.is_admin() => {
            return Err(AppError::forbidden(
                "Cannot create a wishlist for another user",
            ));
        }
        Some(other) => other,
        None => caller.user_id,
    };

    let wishlist = WishlistRepo::create(
        &state.pool,
        &CreateWishlist {
            user_id,
            name: input.name,
            status: input.status,
            privacy: input.privacy,
            preferences: input.preferences,
        },
    )
    .await?;

    tracing::info!(wishlist_id = wishlist.id, user_id, "Wishlist created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: wishlist })))
}

/// PUT /api/v1/wishlists/{id}
pub async fn update(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWishlistRequest>,
) -> AppResult<Json<DataResponse<Wishlist>>> {
    input.validate()?;
    validate_status(input.status.as_deref()).map_err(AppError::validation)?;
    validate_privacy(input.privacy.as_deref()).map_err(AppError::validation)?;
    validate_preferences(input.preferences.as_ref())?;

    find_owned(&state, &caller, id).await?;

    let wishlist = WishlistRepo::update(
        &state.pool,
        id,
        &UpdateWishlist {
            name: input.name,
            status: input.status,
            privacy: input.privacy,
            preferences: input.preferences,
        },
    )
    .await?
    .ok_or(AppError::not_found("Wishlist", id))?;

    Ok(Json(DataResponse { data: wishlist }))
}

/// DELETE /api/v1/wishlists/{id}
///
/// Removes the wishlist and all of its items. Returns 204.
pub async fn delete(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_owned(&state, &caller, id).await?;

    if !WishlistRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Wishlist", id));
    }

    tracing::info!(wishlist_id = id, user_id = caller.user_id, "Wishlist deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Access helpers (shared with the item handlers)
// ---------------------------------------------------------------------------

fn validate_preferences(preferences: Option<&Value>) -> AppResult<()> {
    match preferences {
        Some(value) if !value.is_object() => {
            Err(AppError::validation("preferences must be a JSON object"))
        }
        _ => Ok(()),
    }
}

fn owner_filter(caller: &AuthUser) -> Option<DbId> {
    (!caller.is_admin()).then_some(caller.user_id)
}

/// Load a wishlist the caller may modify: its owner or an admin.
pub(crate) async fn find_owned(
    state: &AppState,
    caller: &AuthUser,
    id: DbId,
) -> AppResult<Wishlist> {
    let wishlist = WishlistRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Wishlist", id))?;

    if !caller.can_act_for(wishlist.user_id) {
        return Err(AppError::forbidden("Not the owner of this wishlist"));
    }
    Ok(wishlist)
}

/// Load a wishlist the caller may read: public ones for anybody, private
/// ones for the owner or an admin.
pub(crate) async fn find_readable(
    state: &AppState,
    caller: Option<&AuthUser>,
    id: DbId,
) -> AppResult<Wishlist> {
    let wishlist = WishlistRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Wishlist", id))?;

    if wishlist.privacy == PRIVACY_PUBLIC {
        return Ok(wishlist);
    }
    match caller {
        Some(user) if user.can_act_for(wishlist.user_id) => Ok(wishlist),
        Some(_) => Err(AppError::forbidden("This wishlist is private")),
        None => Err(AppError::unauthorized("This wishlist is private")),
    }
}
