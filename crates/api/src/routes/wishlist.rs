//! Route definitions for wishlists and their items.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{wishlist, wishlist_item};
use crate::state::AppState;

/// Routes mounted at `/wishlists`.
///
/// ```text
/// GET    /                                   -> list
/// POST   /                                   -> create
/// GET    /page/{skip}/{top}                  -> list_paged
/// GET    /{id}                               -> get
/// PUT    /{id}                               -> update
/// DELETE /{id}                               -> delete
///
/// GET    /{id}/items                         -> wishlist_item::list
/// POST   /{id}/items                         -> wishlist_item::create
/// GET    /{id}/items/page/{skip}/{top}       -> wishlist_item::list_paged
/// GET    /{id}/items/{item_id}               -> wishlist_item::get
/// PUT    /{id}/items/{item_id}               -> wishlist_item::update
/// DELETE /{id}/items/{item_id}               -> wishlist_item::delete
/// POST   /{id}/items/{item_id}/sort          -> wishlist_item::sort
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::list).post(wishlist::create))
        .route("/page/{skip}/{top}", get(wishlist::list_paged))
        .route(
            "/{id}",
            get(wishlist::get)
                .put(wishlist::update)
                .delete(wishlist::delete),
        )
        .route(
            "/{id}/items",
            get(wishlist_item::list).post(wishlist_item::create),
        )
        .route(
            "/{id}/items/page/{skip}/{top}",
            get(wishlist_item::list_paged),
        )
        .route(
            "/{id}/items/{item_id}",
            get(wishlist_item::get)
                .put(wishlist_item::update)
                .delete(wishlist_item::delete),
        )
        .route("/{id}/items/{item_id}/sort", post(wishlist_item::sort))
}
