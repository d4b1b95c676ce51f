//! The shopping cart engine.
//!
//! Holds the authoritative in-memory cart as an ordered item sequence,
//! exposed only through mutation methods. Every mutation that changes cart
//! contents completes its persistence write before returning; observers are
//! notified afterwards with the event and a derived snapshot. Item count and
//! total are always recomputed from the items, never stored separately.

mod events;

pub use events::{CartEvent, CartObserver, CartSnapshot};

use matech_core::{Price, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::catalog::Product;
use crate::storage::{CartStore, StorageError};

/// Errors from cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Checkout attempted with no items.
    #[error("cart is empty")]
    EmptyCart,

    /// The persistence write for a mutation failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A line in the cart.
///
/// Title, price, and image are snapshots taken when the product was added;
/// later catalog changes do not touch existing lines. At most one line
/// exists per product id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product this line refers to.
    pub id: ProductId,
    /// Product title at add time.
    pub title: String,
    /// Unit price at add time.
    pub price: Price,
    /// Product image at add time.
    pub image: String,
    /// Units of this product, always >= 1. Wire name kept from the persisted
    /// cart schema.
    #[serde(rename = "cantidad")]
    pub quantity: i64,
}

impl CartItem {
    fn snapshot_of(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }
}

/// Result of a successful checkout, captured before the cart was cleared.
///
/// The total feeds whatever finalizes the order downstream (the store hands
/// it to a messaging link composer); this crate only guarantees it reflects
/// the cart as purchased.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutReceipt {
    /// Total of the purchased cart.
    pub total: Price,
    /// Number of units purchased.
    pub item_count: i64,
}

/// The cart state machine.
///
/// Single logical actor: mutations take `&mut self` and run to completion,
/// including their persistence write, before control returns.
pub struct CartEngine {
    items: Vec<CartItem>,
    store: CartStore,
    observers: Vec<Box<dyn CartObserver>>,
}

impl CartEngine {
    /// Create an engine with an empty cart.
    #[must_use]
    pub fn new(store: CartStore) -> Self {
        Self {
            items: Vec::new(),
            store,
            observers: Vec::new(),
        }
    }

    /// Create an engine from the persisted cart.
    ///
    /// # Errors
    ///
    /// Propagates [`StorageError::Corrupt`] (or an I/O error) from the
    /// adapter; use [`CartEngine::restore_or_empty`] for the silent
    /// fallback.
    pub fn restore(store: CartStore) -> Result<Self, StorageError> {
        let items = store.load()?;
        Ok(Self {
            items,
            store,
            observers: Vec::new(),
        })
    }

    /// Create an engine from the persisted cart, falling back to an empty
    /// cart if the stored state is missing or unreadable.
    #[must_use]
    pub fn restore_or_empty(store: CartStore) -> Self {
        let items = match store.load() {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "discarding unreadable cart state");
                Vec::new()
            }
        };
        Self {
            items,
            store,
            observers: Vec::new(),
        }
    }

    /// Subscribe to cart change notifications.
    pub fn subscribe(&mut self, observer: Box<dyn CartObserver>) {
        self.observers.push(observer);
    }

    /// Current items, in insertion (= display) order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of price x quantity over the items.
    #[must_use]
    pub fn total(&self) -> Price {
        Price::new(
            self.items
                .iter()
                .map(|item| item.price.times(item.quantity).amount())
                .sum(),
        )
    }

    /// Sum of quantities over the items.
    #[must_use]
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Add one unit of `product`.
    ///
    /// An existing line for the same id is incremented; otherwise a new line
    /// is appended with a snapshot of the product's title, price, and image.
    /// Never rejects: there is no bound on distinct items or quantity.
    ///
    /// # Errors
    ///
    /// Only if the persistence write fails.
    pub fn add_item(&mut self, product: &Product) -> Result<(), CartError> {
        match self.items.iter_mut().find(|item| item.id == product.id) {
            Some(item) => item.quantity += 1,
            None => self.items.push(CartItem::snapshot_of(product)),
        }
        self.commit(CartEvent::ItemAdded { id: product.id })
    }

    /// Remove the line with `id`, if present.
    ///
    /// Returns whether a removal occurred; nothing is persisted or notified
    /// for an absent id.
    ///
    /// # Errors
    ///
    /// Only if the persistence write fails.
    pub fn remove_item(&mut self, id: ProductId) -> Result<bool, CartError> {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return Ok(false);
        };
        self.items.remove(index);
        self.commit(CartEvent::ItemRemoved { id })?;
        Ok(true)
    }

    /// Set the quantity of the line with `id`.
    ///
    /// A no-op (returning `false`) when the line does not exist or when
    /// `quantity` is not positive — dropping a line goes through
    /// [`CartEngine::remove_item`], never through a zero quantity.
    ///
    /// # Errors
    ///
    /// Only if the persistence write fails.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> Result<bool, CartError> {
        if quantity <= 0 {
            return Ok(false);
        }
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return Ok(false);
        };
        item.quantity = quantity;
        self.commit(CartEvent::QuantityChanged { id, quantity })?;
        Ok(true)
    }

    /// Empty the cart unconditionally.
    ///
    /// # Errors
    ///
    /// Only if the persistence write fails.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.items.clear();
        self.commit(CartEvent::Cleared)
    }

    /// Finalize the purchase: capture the total, clear the cart, and persist
    /// the empty state.
    ///
    /// The receipt is captured before the clear so it reflects the cart as
    /// purchased.
    ///
    /// # Errors
    ///
    /// [`CartError::EmptyCart`] when there is nothing to check out (no state
    /// is changed or persisted), or a storage error from the write.
    pub fn checkout(&mut self) -> Result<CheckoutReceipt, CartError> {
        if self.items.is_empty() {
            return Err(CartError::EmptyCart);
        }
        let receipt = CheckoutReceipt {
            total: self.total(),
            item_count: self.item_count(),
        };
        self.items.clear();
        self.commit(CartEvent::CheckedOut {
            total: receipt.total,
        })?;
        Ok(receipt)
    }

    /// Persist the items, then notify observers.
    fn commit(&mut self, event: CartEvent) -> Result<(), CartError> {
        self.store.save(&self.items)?;
        self.notify(&event);
        Ok(())
    }

    fn notify(&self, event: &CartEvent) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = CartSnapshot {
            items: &self.items,
            total: self.total(),
            item_count: self.item_count(),
        };
        for observer in &self.observers {
            observer.cart_changed(event, &snapshot);
        }
    }
}

/// Normalize raw quantity input from a form field or attribute string.
///
/// Leading whitespace and an optional sign are accepted; a fractional part
/// is truncated (`"3.9"` means 3 units), trailing garbage after the integer
/// part is ignored, and input with no leading integer yields `None`. The
/// result still goes through [`CartEngine::set_quantity`]'s positivity
/// check.
#[must_use]
pub fn parse_quantity_input(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let magnitude: i64 = digits.get(..end)?.parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use matech_core::{Price, ProductId};

    use super::*;
    use crate::storage::{CART_STORAGE_KEY, KeyValueStore, MemoryStore};

    /// A store handle that can outlive the engine, with a write counter.
    #[derive(Clone, Default)]
    struct SharedStore {
        inner: Arc<Mutex<MemoryStore>>,
        writes: Arc<AtomicUsize>,
    }

    impl SharedStore {
        fn write_count(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        fn stored(&self) -> Option<String> {
            self.inner.lock().unwrap().get(CART_STORAGE_KEY).unwrap()
        }

        fn seed(&self, value: &str) {
            self.inner.lock().unwrap().insert_raw(CART_STORAGE_KEY, value);
        }
    }

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.lock().unwrap().get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.lock().unwrap().set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            self.inner.lock().unwrap().remove(key)
        }
    }

    struct RecordingObserver {
        seen: Arc<Mutex<Vec<(CartEvent, i64, i64)>>>,
    }

    impl CartObserver for RecordingObserver {
        fn cart_changed(&self, event: &CartEvent, cart: &CartSnapshot<'_>) {
            self.seen
                .lock()
                .unwrap()
                .push((*event, cart.total.amount(), cart.item_count));
        }
    }

    fn product(id: i64, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::new(price),
            image: "./images/datalogger.png".to_string(),
            category: "dataloggers".to_string(),
            description: "Test product".to_string(),
        }
    }

    fn engine_with(store: &SharedStore) -> CartEngine {
        CartEngine::new(CartStore::new(Box::new(store.clone())))
    }

    #[test]
    fn test_repeated_add_keeps_one_line_per_id() {
        let store = SharedStore::default();
        let mut engine = engine_with(&store);
        let p = product(1, 300_000);

        for _ in 0..4 {
            engine.add_item(&p).unwrap();
        }

        assert_eq!(engine.items().len(), 1);
        assert_eq!(engine.items()[0].quantity, 4);
        assert_eq!(engine.item_count(), 4);
        assert_eq!(engine.total(), Price::new(1_200_000));
    }

    #[test]
    fn test_add_snapshots_product_fields() {
        let store = SharedStore::default();
        let mut engine = engine_with(&store);
        engine.add_item(&product(3, 50_000)).unwrap();

        let line = &engine.items()[0];
        assert_eq!(line.title, "Product 3");
        assert_eq!(line.price, Price::new(50_000));
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_every_content_mutation_is_persisted_before_returning() {
        let store = SharedStore::default();
        let mut engine = engine_with(&store);

        engine.add_item(&product(1, 300_000)).unwrap();
        assert_eq!(store.write_count(), 1);
        engine.set_quantity(ProductId::new(1), 3).unwrap();
        assert_eq!(store.write_count(), 2);
        engine.remove_item(ProductId::new(1)).unwrap();
        assert_eq!(store.write_count(), 3);
        assert_eq!(store.stored().as_deref(), Some("[]"));
    }

    #[test]
    fn test_remove_absent_id_is_a_silent_no_op() {
        let store = SharedStore::default();
        let mut engine = engine_with(&store);
        engine.add_item(&product(1, 300_000)).unwrap();
        let writes_before = store.write_count();

        assert!(!engine.remove_item(ProductId::new(99)).unwrap());
        assert_eq!(engine.items().len(), 1);
        assert_eq!(store.write_count(), writes_before);
    }

    #[test]
    fn test_set_quantity_scenario() {
        // cart = [{id:1, cantidad:2, price:300000}]
        let store = SharedStore::default();
        let mut engine = engine_with(&store);
        let p = product(1, 300_000);
        engine.add_item(&p).unwrap();
        engine.add_item(&p).unwrap();

        // Non-positive input leaves the line untouched.
        assert!(!engine.set_quantity(ProductId::new(1), 0).unwrap());
        assert_eq!(engine.items()[0].quantity, 2);
        assert_eq!(engine.total(), Price::new(600_000));

        assert!(engine.set_quantity(ProductId::new(1), 5).unwrap());
        assert_eq!(engine.items()[0].quantity, 5);
        assert_eq!(engine.total(), Price::new(1_500_000));
    }

    #[test]
    fn test_set_quantity_rejections_do_not_persist() {
        let store = SharedStore::default();
        let mut engine = engine_with(&store);
        engine.add_item(&product(1, 300_000)).unwrap();
        let writes_before = store.write_count();

        assert!(!engine.set_quantity(ProductId::new(1), 0).unwrap());
        assert!(!engine.set_quantity(ProductId::new(1), -2).unwrap());
        assert!(!engine.set_quantity(ProductId::new(42), 5).unwrap());
        assert_eq!(store.write_count(), writes_before);
    }

    #[test]
    fn test_clear_empties_and_persists() {
        let store = SharedStore::default();
        let mut engine = engine_with(&store);
        engine.add_item(&product(1, 300_000)).unwrap();
        engine.add_item(&product(2, 300_000)).unwrap();

        engine.clear().unwrap();

        assert!(engine.is_empty());
        assert_eq!(engine.total(), Price::ZERO);
        assert_eq!(store.stored().as_deref(), Some("[]"));
    }

    #[test]
    fn test_checkout_on_empty_cart_fails_without_side_effects() {
        let store = SharedStore::default();
        let mut engine = engine_with(&store);

        assert!(matches!(engine.checkout(), Err(CartError::EmptyCart)));
        assert!(engine.is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_checkout_captures_total_then_clears() {
        let store = SharedStore::default();
        let mut engine = engine_with(&store);
        let p = product(1, 300_000);
        engine.add_item(&p).unwrap();
        engine.add_item(&p).unwrap();
        engine.add_item(&product(3, 50_000)).unwrap();
        let expected_total = engine.total();

        let receipt = engine.checkout().unwrap();

        assert_eq!(receipt.total, expected_total);
        assert_eq!(receipt.item_count, 3);
        assert!(engine.is_empty());
        assert_eq!(store.stored().as_deref(), Some("[]"));
    }

    #[test]
    fn test_restore_round_trips_the_cart() {
        let store = SharedStore::default();
        let mut engine = engine_with(&store);
        engine.add_item(&product(1, 300_000)).unwrap();
        engine.add_item(&product(1001, 93_458)).unwrap();
        engine.set_quantity(ProductId::new(1), 2).unwrap();
        let items = engine.items().to_vec();
        drop(engine);

        let reloaded = CartEngine::restore(CartStore::new(Box::new(store.clone()))).unwrap();
        assert_eq!(reloaded.items(), items.as_slice());
        assert_eq!(reloaded.total(), Price::new(693_458));
    }

    #[test]
    fn test_restore_or_empty_discards_corrupt_state() {
        let store = SharedStore::default();
        store.seed("definitely not json");

        assert!(matches!(
            CartEngine::restore(CartStore::new(Box::new(store.clone()))),
            Err(StorageError::Corrupt(_))
        ));

        let engine = CartEngine::restore_or_empty(CartStore::new(Box::new(store.clone())));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_observers_see_events_after_persistence() {
        let store = SharedStore::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut engine = engine_with(&store);
        engine.subscribe(Box::new(RecordingObserver { seen: seen.clone() }));

        let p = product(1, 300_000);
        engine.add_item(&p).unwrap();
        engine.set_quantity(p.id, 2).unwrap();
        engine.checkout().unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                (CartEvent::ItemAdded { id: p.id }, 300_000, 1),
                (
                    CartEvent::QuantityChanged {
                        id: p.id,
                        quantity: 2
                    },
                    600_000,
                    2
                ),
                (
                    CartEvent::CheckedOut {
                        total: Price::new(600_000)
                    },
                    0,
                    0
                ),
            ]
        );
    }

    #[test]
    fn test_parse_quantity_input() {
        assert_eq!(parse_quantity_input("3"), Some(3));
        assert_eq!(parse_quantity_input(" 7 "), Some(7));
        assert_eq!(parse_quantity_input("3.9"), Some(3));
        assert_eq!(parse_quantity_input("12abc"), Some(12));
        assert_eq!(parse_quantity_input("-2"), Some(-2));
        assert_eq!(parse_quantity_input("+4"), Some(4));
        assert_eq!(parse_quantity_input(""), None);
        assert_eq!(parse_quantity_input("abc"), None);
        assert_eq!(parse_quantity_input("."), None);
    }
}
