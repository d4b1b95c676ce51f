//! Unified error handling for the store core.
//!
//! Each module keeps its own error enum at its boundary; `StoreError`
//! aggregates them for embedders that want a single failure type. No error
//! here is fatal to the process - every failure has a defined fallback that
//! keeps the store usable (defaults for a failed import, an empty cart for
//! corrupt state, a surfaced message for an empty-cart checkout).

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the store core.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Remote catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart persistence failed or produced corrupt data.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A cart operation was rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::from(CartError::EmptyCart);
        assert_eq!(err.to_string(), "Cart error: cart is empty");

        let err = StoreError::from(CatalogError::Status(500));
        assert_eq!(
            err.to_string(),
            "Catalog error: catalog endpoint returned HTTP 500"
        );
    }

    #[test]
    fn test_storage_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StoreError::from(StorageError::from(io));
        assert!(err.to_string().starts_with("Storage error:"));
    }
}
