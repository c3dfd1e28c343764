use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use salon_core::error::CoreError;
use salon_db::error::ResequenceError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{ "error": ..., "code": ... }` bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A failed wishlist item re-sequencing.
    #[error(transparent)]
    Resequence(#[from] ResequenceError),

    /// Request body failed `validator` rules.
    #[error(transparent)]
    Invalid(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found(entity: &'static str, id: salon_core::types::DbId) -> Self {
        AppError::Core(CoreError::NotFound { entity, id })
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Core(CoreError::Forbidden(msg.into()))
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Core(CoreError::Unauthorized(msg.into()))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Core(CoreError::Validation(msg.into()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::Resequence(err) => classify_resequence_error(err),
            AppError::Invalid(errors) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                errors.to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

/// Map re-sequencing failures. Storage failures surface as 503 so clients
/// can tell "retry later" apart from a bad request.
fn classify_resequence_error(err: &ResequenceError) -> (StatusCode, &'static str, String) {
    match err {
        ResequenceError::InvalidRange { .. } => {
            (StatusCode::BAD_REQUEST, "INVALID_RANGE", err.to_string())
        }
        ResequenceError::NotFound { .. } | ResequenceError::NoItemAtIndex(_) => {
            (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
        }
        ResequenceError::VersionMismatch { .. } => {
            (StatusCode::CONFLICT, "CONFLICT", err.to_string())
        }
        ResequenceError::PartialWrite { .. } => {
            tracing::error!(error = %err, "Re-sequencing rolled back");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PARTIAL_WRITE",
                err.to_string(),
            )
        }
        ResequenceError::StoreUnavailable(db_err) => {
            tracing::error!(error = %db_err, "Store unavailable during re-sequencing");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "STORE_UNAVAILABLE",
                "The item store is unavailable".to_string(),
            )
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations on `uq_*` constraints map to 409.
/// - Foreign key violations on `fk_*` constraints map to 400.
/// - Check violations on `ck_*` constraints map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some("23505") if constraint.starts_with("uq_") => {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
                Some("23503") if constraint.starts_with("fk_") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "BAD_REQUEST",
                        format!("Referenced row does not exist: {constraint}"),
                    );
                }
                Some("23514") if constraint.starts_with("ck_") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        format!("Value violates check constraint: {constraint}"),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
