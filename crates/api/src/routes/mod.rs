pub mod account;
pub mod auth;
pub mod health;
pub mod wishlist;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login | /auth/refresh | /auth/logout
/// /account[...]
/// /wishlists[...]
/// /wishlists/{id}/items[...]
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/account", account::router())
        .nest("/wishlists", wishlist::router())
}
