//! The cart store: owns a [`CartState`] and notifies subscribers.

use core::fmt;

use tracing::debug;

use super::action::{CartAction, reduce};
use super::item::{CartLineItem, LineKey};
use super::state::CartState;
use crate::types::ProductId;

type Listener = Box<dyn Fn(&CartState) + Send + Sync>;

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Explicit cart container.
///
/// All mutation goes through [`CartStore::dispatch`] or one of the named
/// operations that wrap it. After every dispatch, subscribers are called
/// synchronously, in subscription order, with the new state.
#[derive(Default)]
pub struct CartStore {
    state: CartState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl CartStore {
    /// Create an empty, closed cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a cart from a previously captured state.
    #[must_use]
    pub fn from_state(state: CartState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Lines in display order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.state.items
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.is_open
    }

    /// Consume the store, dropping subscribers.
    #[must_use]
    pub fn into_state(self) -> CartState {
        self.state
    }

    /// Register a listener called after every dispatch.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&CartState) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Apply an action, then notify subscribers.
    pub fn dispatch(&mut self, action: CartAction) {
        let name = action.name();
        reduce(&mut self.state, action);
        debug!(
            action = name,
            lines = self.state.items.len(),
            is_open = self.state.is_open,
            "cart action applied"
        );
        for (_, listener) in &self.listeners {
            listener(&self.state);
        }
    }

    /// Merge-add a line. Existing lines keep their snapshot fields.
    pub fn add_item(&mut self, item: CartLineItem) {
        self.dispatch(CartAction::AddItem(item));
    }

    /// Remove the line identified by product and variants. No-op if absent.
    pub fn remove_item(
        &mut self,
        product_id: impl Into<ProductId>,
        selected_size: Option<&str>,
        selected_color: Option<&str>,
    ) {
        self.dispatch(CartAction::RemoveItem(LineKey::new(
            product_id,
            selected_size,
            selected_color,
        )));
    }

    /// Set a line's quantity verbatim. No-op if absent.
    pub fn update_quantity(
        &mut self,
        product_id: impl Into<ProductId>,
        quantity: u32,
        selected_size: Option<&str>,
        selected_color: Option<&str>,
    ) {
        self.dispatch(CartAction::UpdateQuantity {
            key: LineKey::new(product_id, selected_size, selected_color),
            quantity,
        });
    }

    /// Remove every line. Panel visibility is kept.
    pub fn clear_cart(&mut self) {
        self.dispatch(CartAction::ClearCart);
    }

    /// Show the cart panel.
    pub fn open_cart(&mut self) {
        self.dispatch(CartAction::OpenCart);
    }

    /// Hide the cart panel.
    pub fn close_cart(&mut self) {
        self.dispatch(CartAction::CloseCart);
    }

    /// Flip the cart panel.
    pub fn toggle_cart(&mut self) {
        self.dispatch(CartAction::ToggleCart);
    }

    /// See [`CartState::item_count`].
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.state.item_count()
    }

    /// See [`CartState::subtotal`].
    #[must_use]
    pub fn subtotal(&self) -> rust_decimal::Decimal {
        self.state.subtotal()
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
