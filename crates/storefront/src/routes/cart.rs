//! Cart route handlers.
//!
//! Each visitor's cart is a [`CartState`] stored in their session. A request
//! restores it into a [`CartStore`], dispatches one action, and writes the
//! result back. Mutations respond with `HX-Trigger: cart-updated` so other
//! widgets (such as the count badge) can refresh.

use axum::{
    Form, Json,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use taharluxe_core::cart::{
    CartAction, CartLineItem, CartState, CartStore, LineKey, validate_quantity,
};
use taharluxe_core::{CurrencyCode, Price, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::state::AppState;

/// Cart item display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    pub unit_price: Decimal,
    pub price: String,
    pub line_price: String,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u64,
    pub subtotal: String,
    pub is_open: bool,
}

/// Cart count badge data.
#[derive(Debug, Clone, Serialize)]
pub struct CartCountView {
    pub count: u64,
}

// =============================================================================
// Type Conversions
// =============================================================================

impl CartItemView {
    fn new(line: &CartLineItem, currency: CurrencyCode) -> Self {
        Self {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            image: line.image.clone(),
            quantity: line.quantity,
            selected_size: line.selected_size.clone(),
            selected_color: line.selected_color.clone(),
            unit_price: line.unit_price,
            price: Price::new(line.unit_price, currency).display(),
            line_price: Price::new(line.line_total(), currency).display(),
        }
    }
}

impl CartView {
    /// Build the view of a cart, formatting prices in `currency`.
    #[must_use]
    pub fn new(state: &CartState, currency: CurrencyCode) -> Self {
        Self {
            items: state
                .items
                .iter()
                .map(|line| CartItemView::new(line, currency))
                .collect(),
            item_count: state.item_count(),
            subtotal: Price::new(state.subtotal(), currency).display(),
            is_open: state.is_open,
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart state from the session, or an empty cart.
async fn load_cart(session: &Session) -> Result<CartState> {
    Ok(session
        .get::<CartState>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Store the cart state in the session.
async fn save_cart(session: &Session, cart: &CartState) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Apply one action to the session's cart and persist the result.
async fn apply(session: &Session, action: CartAction) -> Result<CartState> {
    let mut store = CartStore::from_state(load_cart(session).await?);
    store.dispatch(action);

    let cart = store.into_state();
    save_cart(session, &cart).await?;
    Ok(cart)
}

/// Respond to a mutation with the new cart and an HTMX trigger.
fn updated(state: &AppState, cart: &CartState) -> Response {
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        Json(CartView::new(cart, state.config().currency)),
    )
        .into_response()
}

/// Treat empty form values as "no selection".
fn selection(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: Option<i64>,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: i64,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl RemoveFromCartForm {
    fn into_key(self) -> LineKey {
        LineKey {
            product_id: ProductId::from(self.product_id),
            selected_size: selection(self.size),
            selected_color: selection(self.color),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Show the cart.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartView::new(&cart, state.config().currency)))
}

/// Get cart count badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<CartCountView>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartCountView {
        count: cart.item_count(),
    }))
}

/// Add a catalog product to the cart.
///
/// Name, price, and image are copied from the catalog. If the same product
/// and variant is already in the cart, only its quantity grows.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let quantity = validate_quantity(form.quantity.unwrap_or(1))?;
    let product_id = ProductId::from(form.product_id);
    let product = state
        .catalog()
        .get(&product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let line = CartLineItem::from_product(
        product,
        quantity,
        selection(form.size),
        selection(form.color),
    );
    let cart = apply(&session, CartAction::AddItem(line)).await?;

    tracing::info!(product_id = %product_id, quantity, "Added to cart");
    Ok(updated(&state, &cart))
}

/// Set the quantity of a cart line. Unknown lines are left alone.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let quantity = validate_quantity(form.quantity)?;
    let key = LineKey {
        product_id: ProductId::from(form.product_id),
        selected_size: selection(form.size),
        selected_color: selection(form.color),
    };
    let cart = apply(&session, CartAction::UpdateQuantity { key, quantity }).await?;
    Ok(updated(&state, &cart))
}

/// Remove a cart line. Unknown lines are left alone.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let cart = apply(&session, CartAction::RemoveItem(form.into_key())).await?;
    Ok(updated(&state, &cart))
}

/// Empty the cart, keeping the panel state.
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cart = apply(&session, CartAction::ClearCart).await?;
    Ok(updated(&state, &cart))
}

/// Open the cart panel.
#[instrument(skip(state, session))]
pub async fn open(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cart = apply(&session, CartAction::OpenCart).await?;
    Ok(updated(&state, &cart))
}

/// Close the cart panel.
#[instrument(skip(state, session))]
pub async fn close(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cart = apply(&session, CartAction::CloseCart).await?;
    Ok(updated(&state, &cart))
}

/// Flip the cart panel.
#[instrument(skip(state, session))]
pub async fn toggle(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cart = apply(&session, CartAction::ToggleCart).await?;
    Ok(updated(&state, &cart))
}
