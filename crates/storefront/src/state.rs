//! Application state shared across handlers.

use std::path::Path;
use std::sync::Arc;

use taharluxe_core::catalog::{Catalog, CatalogError};
use taharluxe_core::orders::OrderBook;
use tokio::sync::RwLock;

use crate::config::StorefrontConfig;

/// Catalog bundled with the binary.
const BUNDLED_CATALOG: &str = include_str!("../data/products.json");

/// Orders bundled with the binary.
const BUNDLED_ORDERS: &str = include_str!("../data/orders.json");

/// Error loading the seed data for the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("invalid orders: {0}")]
    Orders(#[from] serde_json::Error),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Carts are not stored here;
/// each one lives in its visitor's session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    orders: RwLock<OrderBook>,
}

impl AppState {
    /// Create a new application state, loading the catalog and order seed.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured file cannot be read or parsed.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let catalog_json = read_or_bundled(config.catalog_path.as_deref(), BUNDLED_CATALOG)?;
        let catalog = Catalog::from_json(&catalog_json)?;

        let orders_json = read_or_bundled(config.orders_path.as_deref(), BUNDLED_ORDERS)?;
        let orders = OrderBook::from_json(&orders_json)?;

        tracing::info!(
            products = catalog.len(),
            orders = orders.orders().len(),
            "Seed data loaded"
        );

        Ok(Self::with_data(config, catalog, orders))
    }

    /// Create a state from already-built data.
    #[must_use]
    pub fn with_data(config: StorefrontConfig, catalog: Catalog, orders: OrderBook) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                orders: RwLock::new(orders),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the order book lock.
    #[must_use]
    pub fn orders(&self) -> &RwLock<OrderBook> {
        &self.inner.orders
    }
}

fn read_or_bundled(path: Option<&Path>, bundled: &str) -> Result<String, StateError> {
    path.map_or_else(
        || Ok(bundled.to_string()),
        |path| {
            std::fs::read_to_string(path).map_err(|source| StateError::Io {
                path: path.display().to_string(),
                source,
            })
        },
    )
}
