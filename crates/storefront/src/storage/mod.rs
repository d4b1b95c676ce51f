//! Durable key-value persistence for cart state.
//!
//! The cart survives restarts through a string-keyed store, the same shape
//! as the browser-local storage the widget targets. [`FileStore`] is the
//! production implementation; [`MemoryStore`] backs tests and embedders that
//! manage durability themselves.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

use crate::cart::CartItem;

/// Store key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "carritoMATech";

/// Errors from the persistence boundary.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing store failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cart state could not be encoded for storage.
    #[error("failed to encode cart state: {0}")]
    Encode(#[source] serde_json::Error),

    /// Stored data exists but does not parse as a cart.
    #[error("stored cart data is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
}

/// A durable string-keyed store.
///
/// Keys are simple names (no path separators); values are opaque strings.
/// A `set` call is durable when it returns.
pub trait KeyValueStore: Send {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the write does not complete.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing a missing key is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the removal fails.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Persistence adapter for the cart.
///
/// Serializes the cart's item sequence as a JSON array under
/// [`CART_STORAGE_KEY`]. This boundary is the only point of I/O fallibility
/// in the core besides network fetches.
pub struct CartStore {
    store: Box<dyn KeyValueStore>,
}

impl CartStore {
    /// Create an adapter over any durable store.
    #[must_use]
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persist the current item sequence.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Encode`] if the items cannot be serialized,
    /// or [`StorageError::Io`] if the write fails.
    pub fn save(&mut self, items: &[CartItem]) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(items).map_err(StorageError::Encode)?;
        self.store.set(CART_STORAGE_KEY, &encoded)
    }

    /// Load the persisted item sequence.
    ///
    /// A missing key is an empty cart. Data that exists but does not parse
    /// fails with [`StorageError::Corrupt`]; callers decide between the
    /// empty-cart fallback (recommended) and propagation.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the store cannot be read, or
    /// [`StorageError::Corrupt`] on unparseable data.
    pub fn load(&self) -> Result<Vec<CartItem>, StorageError> {
        match self.store.get(CART_STORAGE_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(StorageError::Corrupt),
            None => Ok(Vec::new()),
        }
    }
}
