//! Cart actions and the pure reducer that applies them.

use serde::{Deserialize, Serialize};

use super::item::{CartLineItem, LineKey};
use super::state::CartState;

/// Every mutation the cart supports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartAction {
    /// Merge-add a line.
    AddItem(CartLineItem),
    /// Delete the line with this key, if any.
    RemoveItem(LineKey),
    /// Overwrite the quantity of the line with this key, if any.
    UpdateQuantity { key: LineKey, quantity: u32 },
    ClearCart,
    OpenCart,
    CloseCart,
    ToggleCart,
}

impl CartAction {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddItem(_) => "add_item",
            Self::RemoveItem(_) => "remove_item",
            Self::UpdateQuantity { .. } => "update_quantity",
            Self::ClearCart => "clear_cart",
            Self::OpenCart => "open_cart",
            Self::CloseCart => "close_cart",
            Self::ToggleCart => "toggle_cart",
        }
    }
}

/// Apply `action` to `state`.
///
/// Never fails. Removing or updating a line that does not exist leaves the
/// state untouched. Quantities are stored verbatim; validation belongs to
/// the caller.
pub fn reduce(state: &mut CartState, action: CartAction) {
    match action {
        CartAction::AddItem(item) => {
            let key = item.key();
            if let Some(existing) = state.items.iter_mut().find(|line| line.matches(&key)) {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            } else {
                state.items.push(item);
            }
        }
        CartAction::RemoveItem(key) => {
            state.items.retain(|line| !line.matches(&key));
        }
        CartAction::UpdateQuantity { key, quantity } => {
            if let Some(line) = state.items.iter_mut().find(|line| line.matches(&key)) {
                line.quantity = quantity;
            }
        }
        CartAction::ClearCart => state.items.clear(),
        CartAction::OpenCart => state.is_open = true,
        CartAction::CloseCart => state.is_open = false,
        CartAction::ToggleCart => state.is_open = !state.is_open,
    }
}
