use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and the config sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: salon_db::DbPool,
    pub config: Arc<ServerConfig>,
}
