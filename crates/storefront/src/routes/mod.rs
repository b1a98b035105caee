//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                       - Health check
//!
//! # Products
//! GET  /products                     - Product listing (?category=&search=&sort=)
//! GET  /products/featured            - Featured products
//! GET  /products/categories          - Category list
//! GET  /products/{id}                - Product detail
//!
//! # Cart (session-scoped, mutations send HX-Trigger: cart-updated)
//! GET  /cart                         - Cart contents and totals
//! GET  /cart/count                   - Cart count badge
//! POST /cart/add                     - Add a product (merge by product + variant)
//! POST /cart/update                  - Set a line's quantity
//! POST /cart/remove                  - Remove a line
//! POST /cart/clear                   - Remove every line
//! POST /cart/open                    - Open the cart panel
//! POST /cart/close                   - Close the cart panel
//! POST /cart/toggle                  - Toggle the cart panel
//!
//! # Dashboard
//! GET  /dashboard/orders             - Order list (?user_id=)
//! POST /dashboard/orders/{id}/status - Change an order's status
//! ```

pub mod cart;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/featured", get(products::featured))
        .route("/categories", get(products::categories))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/open", post(cart::open))
        .route("/close", post(cart::close))
        .route("/toggle", post(cart::toggle))
}

/// Create the dashboard routes router.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(orders::index))
        .route("/orders/{id}/status", post(orders::update_status))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/dashboard", dashboard_routes())
}
