//! Product catalog: lookup, filtering, search, and sorting.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartLineItem;
use crate::types::ProductId;

/// Category value that disables the category filter.
pub const ALL_CATEGORIES: &str = "all";

/// Errors raised while loading a catalog.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    /// The catalog document could not be parsed.
    #[error("invalid catalog json: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two products share an ID.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
}

/// A product as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub rating: f64,
    pub reviews: u32,
    pub category: String,
    /// Primary image.
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(default)]
    pub featured: bool,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }
}

impl CartLineItem {
    /// Snapshot a product's display data into a new line.
    #[must_use]
    pub fn from_product(
        product: &Product,
        quantity: u32,
        selected_size: Option<String>,
        selected_color: Option<String>,
    ) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            image: product.image.clone(),
            quantity,
            selected_size,
            selected_color,
        }
    }
}

/// Sort orders offered on the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductSort {
    #[serde(rename = "price-asc")]
    PriceAsc,
    #[serde(rename = "price-desc")]
    PriceDesc,
    /// Highest rating first.
    #[serde(rename = "rating")]
    Rating,
    /// Most recently created first.
    #[serde(rename = "newest")]
    Newest,
}

impl std::str::FromStr for ProductSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "rating" => Ok(Self::Rating),
            "newest" => Ok(Self::Newest),
            _ => Err(format!("invalid sort: {s}")),
        }
    }
}

/// Listing query. Every field is optional; the default returns the whole
/// catalog in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: Option<ProductSort>,
}

/// In-memory product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two products share an ID.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// Parse a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or contains duplicate IDs.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products flagged as featured, in catalog order.
    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.featured)
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Filter, search, and sort the catalog.
    ///
    /// Category matching is exact; `"all"` or an absent category keeps every
    /// product. Search is a case-insensitive substring match over name,
    /// description, and category; a blank term keeps every product. Sorting
    /// is stable.
    #[must_use]
    pub fn query(&self, query: &ProductQuery) -> Vec<&Product> {
        let category = query
            .category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES);
        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut results: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .filter(|p| needle.as_deref().is_none_or(|n| p.matches_search(n)))
            .collect();

        match query.sort {
            Some(ProductSort::PriceAsc) => results.sort_by(|a, b| a.price.cmp(&b.price)),
            Some(ProductSort::PriceDesc) => results.sort_by(|a, b| b.price.cmp(&a.price)),
            Some(ProductSort::Rating) => results.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            Some(ProductSort::Newest) => results.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            None => {}
        }

        results
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn product(id: &str, name: &str, category: &str, cents: i64, rating: f64, day: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: format!("The {name}"),
            price: Decimal::new(cents, 2),
            rating,
            reviews: 10,
            category: category.to_string(),
            image: format!("/img/{id}.jpg"),
            images: Vec::new(),
            colors: vec!["black".to_string()],
            sizes: None,
            featured: day % 2 == 0,
            in_stock: true,
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            product("P1", "Linen Shirt", "clothing", 4999, 4.5, 3),
            product("P2", "Leather Bag", "accessories", 12000, 4.8, 1),
            product("P3", "Wool Coat", "clothing", 19900, 4.2, 5),
            product("P4", "Silk Scarf", "accessories", 2500, 4.8, 2),
        ])
        .unwrap()
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_default_query_returns_catalog_order() {
        let c = catalog();
        assert_eq!(ids(&c.query(&ProductQuery::default())), ["P1", "P2", "P3", "P4"]);
    }

    #[test]
    fn test_category_filter_and_all() {
        let c = catalog();
        let q = ProductQuery {
            category: Some("clothing".into()),
            ..Default::default()
        };
        assert_eq!(ids(&c.query(&q)), ["P1", "P3"]);

        let q = ProductQuery {
            category: Some("all".into()),
            ..Default::default()
        };
        assert_eq!(c.query(&q).len(), 4);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let c = catalog();
        let q = ProductQuery {
            search: Some("  SILK ".into()),
            ..Default::default()
        };
        assert_eq!(ids(&c.query(&q)), ["P4"]);

        let q = ProductQuery {
            search: Some("Accessories".into()),
            ..Default::default()
        };
        assert_eq!(ids(&c.query(&q)), ["P2", "P4"]);
    }

    #[test]
    fn test_sorts() {
        let c = catalog();
        let sorted = |sort| {
            ids(&c.query(&ProductQuery {
                sort: Some(sort),
                ..Default::default()
            }))
        };
        assert_eq!(sorted(ProductSort::PriceAsc), ["P4", "P1", "P2", "P3"]);
        assert_eq!(sorted(ProductSort::PriceDesc), ["P3", "P2", "P1", "P4"]);
        // Ties keep catalog order.
        assert_eq!(sorted(ProductSort::Rating), ["P2", "P4", "P1", "P3"]);
        assert_eq!(sorted(ProductSort::Newest), ["P3", "P1", "P4", "P2"]);
    }

    #[test]
    fn test_categories_first_seen_order() {
        assert_eq!(catalog().categories(), ["clothing", "accessories"]);
    }

    #[test]
    fn test_featured() {
        let c = catalog();
        let featured: Vec<_> = c.featured().map(|p| p.id.as_str()).collect();
        assert_eq!(featured, ["P4"]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let p = product("P1", "Shirt", "clothing", 100, 4.0, 1);
        let err = Catalog::new(vec![p.clone(), p]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id.as_str() == "P1"));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[{
            "id": "P1", "name": "Shirt", "description": "Cotton",
            "price": "19.99", "rating": 4.1, "reviews": 3,
            "category": "clothing", "image": "/shirt.jpg",
            "sizes": ["S", "M"], "in_stock": true,
            "created_at": "2024-03-01T00:00:00Z"
        }]"#;
        let c = Catalog::from_json(json).unwrap();
        let p = c.get(&ProductId::new("P1")).unwrap();
        assert_eq!(p.price, Decimal::new(1999, 2));
        assert_eq!(p.sizes.as_deref(), Some(&["S".to_string(), "M".to_string()][..]));
        assert!(!p.featured);
    }

    #[test]
    fn test_line_item_snapshot_from_product() {
        let c = catalog();
        let p = c.get(&ProductId::new("P2")).unwrap();
        let line = CartLineItem::from_product(p, 2, None, Some("black".into()));
        assert_eq!(line.name, "Leather Bag");
        assert_eq!(line.unit_price, Decimal::new(12000, 2));
        assert_eq!(line.image, "/img/P2.jpg");
        assert_eq!(line.selected_color.as_deref(), Some("black"));
    }
}
