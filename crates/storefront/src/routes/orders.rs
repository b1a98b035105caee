//! Dashboard order handlers.

use axum::{
    Form, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use taharluxe_core::orders::Order;
use taharluxe_core::{OrderId, OrderStatus, UserId};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Order listing filter.
#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub user_id: Option<String>,
}

/// Status change form data.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusForm {
    pub status: String,
}

/// List orders, optionally only those of one user.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Json<Vec<Order>> {
    let book = state.orders().read().await;
    let orders = match query.user_id.filter(|u| !u.is_empty()) {
        Some(user_id) => {
            let user_id = UserId::from(user_id);
            book.orders_for_user(&user_id).cloned().collect()
        }
        None => book.orders().to_vec(),
    };
    Json(orders)
}

/// Change an order's status.
#[instrument(skip(state))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<UpdateStatusForm>,
) -> Result<Json<Order>> {
    let status = form
        .status
        .parse::<OrderStatus>()
        .map_err(AppError::BadRequest)?;
    let id = OrderId::from(id);

    let mut book = state.orders().write().await;
    if !book.update_order_status(&id, status) {
        return Err(AppError::NotFound(format!("order {id}")));
    }
    tracing::info!(order_id = %id, %status, "Order status updated");

    book.get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::Internal(format!("order {id} vanished after update")))
}
