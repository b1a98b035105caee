//! Shopping cart state manager.
//!
//! A cart is an ordered list of [`CartLineItem`]s plus a panel visibility
//! flag. Lines are identified by [`LineKey`] (product, size, color); adding a
//! line whose key already exists bumps its quantity instead of appending.
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use taharluxe_core::cart::{CartLineItem, CartStore};
//!
//! let mut cart = CartStore::new();
//! cart.add_item(CartLineItem::new("P1", "Shirt", Decimal::from(20), "/shirt.jpg", 1).with_size("M"));
//! cart.add_item(CartLineItem::new("P1", "Shirt", Decimal::from(20), "/shirt.jpg", 2).with_size("M"));
//!
//! assert_eq!(cart.items().len(), 1);
//! assert_eq!(cart.item_count(), 3);
//! assert_eq!(cart.subtotal(), Decimal::from(60));
//! ```

mod action;
mod error;
mod item;
mod state;
mod store;

pub use action::{CartAction, reduce};
pub use error::{CartError, MIN_QUANTITY, validate_quantity};
pub use item::{CartLineItem, LineKey};
pub use state::CartState;
pub use store::{CartStore, SubscriptionId};
