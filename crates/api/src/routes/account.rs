//! Route definitions for the `/account` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// Routes mounted at `/account`.
///
/// ```text
/// GET    /                     -> list (admin)
/// POST   /                     -> create (admin)
/// GET    /page/{skip}/{top}    -> list_paged (admin)
/// GET    /{id}                 -> get (admin or self)
/// PUT    /{id}                 -> update (admin or self)
/// DELETE /{id}                 -> deactivate (admin)
/// POST   /{id}/reset-password  -> reset_password (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(account::list).post(account::create))
        .route("/page/{skip}/{top}", get(account::list_paged))
        .route(
            "/{id}",
            get(account::get)
                .put(account::update)
                .delete(account::deactivate),
        )
        .route("/{id}/reset-password", post(account::reset_password))
}
