//! Cart change notifications.
//!
//! The engine emits an event after every committed mutation; presentation
//! layers subscribe here instead of reaching into cart state or hanging
//! callbacks off individual widgets.

use matech_core::{Price, ProductId};

use super::CartItem;

/// A committed cart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEvent {
    /// A product was added (new line or incremented quantity).
    ItemAdded { id: ProductId },
    /// A line was removed.
    ItemRemoved { id: ProductId },
    /// A line's quantity was set to a new positive value.
    QuantityChanged { id: ProductId, quantity: i64 },
    /// The cart was emptied explicitly.
    Cleared,
    /// Checkout completed; the cart is now empty.
    CheckedOut { total: Price },
}

/// Cart state passed alongside each event.
#[derive(Debug, Clone, Copy)]
pub struct CartSnapshot<'a> {
    /// Current items, in display order.
    pub items: &'a [CartItem],
    /// Sum of price x quantity over the items.
    pub total: Price,
    /// Sum of quantities over the items.
    pub item_count: i64,
}

/// Observer of cart changes.
///
/// Invoked after the mutation's persistence write has completed, so the
/// snapshot always reflects durable state.
pub trait CartObserver {
    /// React to a committed cart change.
    fn cart_changed(&self, event: &CartEvent, cart: &CartSnapshot<'_>);
}
