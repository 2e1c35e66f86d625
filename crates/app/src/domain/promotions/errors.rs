//! Promotions service errors.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors raised by the promotion store.
#[derive(Debug, Error)]
pub enum PromotionsServiceError {
    /// The storage medium failed.
    #[error("storage error")]
    Storage(#[from] StorageError),

    /// The stored value is not a valid promotion collection.
    #[error("stored promotions could not be decoded")]
    Decode(#[source] serde_json::Error),

    /// The collection could not be serialized.
    #[error("promotions could not be encoded")]
    Encode(#[source] serde_json::Error),
}
