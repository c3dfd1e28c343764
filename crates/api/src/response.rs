//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [...], "total": n, "skip": s, "top": t }` envelope for the
/// `/page/{skip}/{top}` routes.
#[derive(Debug, Serialize)]
pub struct PagedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub total: i64,
    pub skip: i64,
    pub top: i64,
}
