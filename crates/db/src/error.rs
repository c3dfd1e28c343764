//! Errors raised by multi-step repository operations.

use salon_core::ordering::OrderingError;
use salon_core::types::DbId;

/// Failure modes of [`WishlistItemRepo::resequence`](crate::repositories::WishlistItemRepo::resequence).
///
/// Every variant is raised before the transaction commits, so a failed
/// re-sequencing never leaves a partially reordered wishlist behind.
#[derive(Debug, thiserror::Error)]
pub enum ResequenceError {
    #[error("Index {index} is out of range for a wishlist of {len} items")]
    InvalidRange { index: i32, len: usize },

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("No wishlist item at sort order {0}")]
    NoItemAtIndex(i32),

    #[error("Wishlist {wishlist_id} is at version {actual}, expected {expected}")]
    VersionMismatch {
        wishlist_id: DbId,
        expected: i64,
        actual: i64,
    },

    #[error("Only {written} of {expected} reordered items were written")]
    PartialWrite { expected: usize, written: u64 },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),
}

impl From<OrderingError> for ResequenceError {
    fn from(err: OrderingError) -> Self {
        match err {
            OrderingError::InvalidRange { index, len } => Self::InvalidRange { index, len },
            OrderingError::MissingItem(index) => Self::NoItemAtIndex(index),
        }
    }
}
