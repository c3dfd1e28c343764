//! Handlers for `/wishlists/{id}/items`, including the sort endpoint.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use salon_core::pagination;
use salon_core::types::DbId;
use salon_db::models::wishlist_item::{CreateWishlistItem, UpdateWishlistItem, WishlistItem};
use salon_db::repositories::WishlistItemRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::wishlist::{find_owned, find_readable};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
    #[validate(range(min = 1))]
    pub quantity: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
    #[validate(range(min = 1))]
    pub quantity: Option<i32>,
}

/// Request body for `POST /wishlists/{id}/items/{item_id}/sort`.
///
/// `old_index` names the moving item by its current position.
#[derive(Debug, Deserialize)]
pub struct SortRequest {
    #[serde(alias = "oldIndex")]
    pub old_index: i32,
    #[serde(alias = "newIndex")]
    pub new_index: i32,
    /// When set, the move is refused unless the wishlist is still at this
    /// `items_version`.
    #[serde(default, alias = "expectedVersion")]
    pub expected_version: Option<i64>,
}

/// All items in their new order plus the wishlist's new `items_version`.
#[derive(Debug, Serialize)]
pub struct SortResponse {
    pub data: Vec<WishlistItem>,
    pub items_version: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/wishlists/{id}/items
pub async fn list(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    Path(wishlist_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<WishlistItem>>>> {
    find_readable(&state, caller.as_ref(), wishlist_id).await?;
    let items = WishlistItemRepo::list_for_wishlist(&state.pool, wishlist_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/wishlists/{id}/items/page/{skip}/{top}
pub async fn list_paged(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    Path((wishlist_id, skip, top)): Path<(DbId, String, String)>,
) -> AppResult<Json<PagedResponse<WishlistItem>>> {
    find_readable(&state, caller.as_ref(), wishlist_id).await?;
    let (skip, top) = pagination::resolve(&skip, &top);

    let data = WishlistItemRepo::list_paged(&state.pool, wishlist_id, skip, top).await?;
    let total = WishlistItemRepo::count(&state.pool, wishlist_id).await?;

    Ok(Json(PagedResponse {
        data,
        total,
        skip,
        top,
    }))
}

/// GET /api/v1/wishlists/{id}/items/{item_id}
pub async fn get(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    Path((wishlist_id, item_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<WishlistItem>>> {
    find_readable(&state, caller.as_ref(), wishlist_id).await?;
    let item = WishlistItemRepo::find_by_id(&state.pool, wishlist_id, item_id)
        .await?
        .ok_or(AppError::not_found("WishlistItem", item_id))?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/wishlists/{id}/items
///
/// Appends the item at the end of the wishlist.
pub async fn create(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(wishlist_id): Path<DbId>,
    Json(input): Json<CreateItemRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<WishlistItem>>)> {
    input.validate()?;
    find_owned(&state, &caller, wishlist_id).await?;

    let item = WishlistItemRepo::create(
        &state.pool,
        wishlist_id,
        &CreateWishlistItem {
            name: input.name,
            description: input.description,
            url: input.url,
            quantity: input.quantity,
        },
    )
    .await?
    .ok_or(AppError::not_found("Wishlist", wishlist_id))?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/wishlists/{id}/items/{item_id}
pub async fn update(
    State(state): State<AppState>,
    caller: AuthUser,
    Path((wishlist_id, item_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateItemRequest>,
) -> AppResult<Json<DataResponse<WishlistItem>>> {
    input.validate()?;
    find_owned(&state, &caller, wishlist_id).await?;

    let item = WishlistItemRepo::update(
        &state.pool,
        wishlist_id,
        item_id,
        &UpdateWishlistItem {
            name: input.name,
            description: input.description,
            url: input.url,
            quantity: input.quantity,
        },
    )
    .await?
    .ok_or(AppError::not_found("WishlistItem", item_id))?;

    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/wishlists/{id}/items/{item_id}
///
/// Later siblings move up one position. Returns 204.
pub async fn delete(
    State(state): State<AppState>,
    caller: AuthUser,
    Path((wishlist_id, item_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    find_owned(&state, &caller, wishlist_id).await?;

    if !WishlistItemRepo::delete(&state.pool, wishlist_id, item_id).await? {
        return Err(AppError::not_found("WishlistItem", item_id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/wishlists/{id}/items/{item_id}/sort
///
/// Moves the item at `old_index` to `new_index` and returns every item of
/// the wishlist in its new order.
pub async fn sort(
    State(state): State<AppState>,
    caller: AuthUser,
    Path((wishlist_id, item_id)): Path<(DbId, DbId)>,
    Json(input): Json<SortRequest>,
) -> AppResult<Json<SortResponse>> {
    find_owned(&state, &caller, wishlist_id).await?;

    let item = WishlistItemRepo::find_by_id(&state.pool, wishlist_id, item_id)
        .await?
        .ok_or(AppError::not_found("WishlistItem", item_id))?;

    if item.sort_order != input.old_index {
        tracing::warn!(
            wishlist_id,
            item_id,
            item_sort_order = item.sort_order,
            old_index = input.old_index,
            "Sort request names an item that is not at old_index; moving by index"
        );
    }

    let outcome = WishlistItemRepo::resequence(
        &state.pool,
        wishlist_id,
        input.old_index,
        input.new_index,
        input.expected_version,
    )
    .await?;

    tracing::info!(
        wishlist_id,
        old_index = input.old_index,
        new_index = input.new_index,
        items_version = outcome.items_version,
        user_id = caller.user_id,
        "Wishlist items sorted"
    );

    Ok(Json(SortResponse {
        data: outcome.items,
        items_version: outcome.items_version,
    }))
}
