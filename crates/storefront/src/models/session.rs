//! Session-related types.
//!
//! Each visitor's cart lives in their session as a serialized
//! [`CartState`](taharluxe_core::cart::CartState).

/// Session keys.
pub mod keys {
    /// Key for storing the visitor's cart state.
    pub const CART: &str = "cart";
}
