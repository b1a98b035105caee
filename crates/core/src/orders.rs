//! Orders and the in-memory order book shown on the dashboard.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::{CartLineItem, CartState};
use crate::types::{OrderId, OrderStatus, UserId};

/// Postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<CartLineItem>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub shipping_address: Address,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Snapshot a cart into a pending order. `total` is the cart subtotal.
    #[must_use]
    pub fn from_cart(
        id: OrderId,
        user_id: UserId,
        cart: &CartState,
        shipping_address: Address,
        payment_method: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            items: cart.items.clone(),
            total: cart.subtotal(),
            status: OrderStatus::Pending,
            shipping_address,
            payment_method: payment_method.into(),
            created_at,
        }
    }
}

/// Ordered collection of orders.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    orders: Vec<Order>,
}

impl OrderBook {
    #[must_use]
    pub const fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    /// Parse a JSON array of orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self::new)
    }

    pub fn add_order(&mut self, order: Order) {
        self.orders.push(order);
    }

    /// Set an order's status. Returns `false` when no order has `id`.
    pub fn update_order_status(&mut self, id: &OrderId, status: OrderStatus) -> bool {
        match self.orders.iter_mut().find(|o| &o.id == id) {
            Some(order) => {
                order.status = status;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    /// Orders placed by `user_id`, oldest first.
    pub fn orders_for_user<'a>(&'a self, user_id: &'a UserId) -> impl Iterator<Item = &'a Order> {
        self.orders.iter().filter(move |o| &o.user_id == user_id)
    }
}
