//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use taharluxe_core::catalog::{Product, ProductQuery, ProductSort};
use taharluxe_core::{CurrencyCode, Price, ProductId};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product display data: the catalog entry plus its formatted price.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub display_price: String,
}

impl ProductView {
    fn new(product: &Product, currency: CurrencyCode) -> Self {
        Self {
            product: product.clone(),
            display_price: Price::new(product.price, currency).display(),
        }
    }
}

/// Listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl ListingQuery {
    fn into_product_query(self) -> Result<ProductQuery> {
        let sort = self
            .sort
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<ProductSort>())
            .transpose()
            .map_err(AppError::BadRequest)?;

        Ok(ProductQuery {
            category: self.category,
            search: self.search,
            sort,
        })
    }
}

/// List products, optionally filtered, searched, and sorted.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<Vec<ProductView>>> {
    let query = query.into_product_query()?;
    let currency = state.config().currency;
    let products = state
        .catalog()
        .query(&query)
        .into_iter()
        .map(|p| ProductView::new(p, currency))
        .collect();
    Ok(Json(products))
}

/// List featured products.
#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Json<Vec<ProductView>> {
    let currency = state.config().currency;
    Json(
        state
            .catalog()
            .featured()
            .map(|p| ProductView::new(p, currency))
            .collect(),
    )
}

/// List product categories.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(
        state
            .catalog()
            .categories()
            .into_iter()
            .map(String::from)
            .collect(),
    )
}

/// Show one product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductView>> {
    let id = ProductId::from(id);
    state
        .catalog()
        .get(&id)
        .map(|p| Json(ProductView::new(p, state.config().currency)))
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}
