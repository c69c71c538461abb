//! # Product Catalog
//!
//! Lookup table over the products fetched from `GET /productos/`. The sale
//! flow resolves user selections through it, so a line item can only ever
//! reference a product the user was actually offered.

use crate::error::ValidationError;
use crate::types::{Product, ProductId};
use crate::validation::{parse_reference, ValidationResult};

/// Name shown for a detail line whose product is no longer in the catalog.
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown product";

/// Products available for selection, in backend order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Creates a catalog from fetched products.
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// Resolves a product reference typed or selected by the user.
    ///
    /// ## Errors
    /// - `Required` when the reference is blank
    /// - `InvalidFormat` when it is not an identifier
    /// - `UnknownReference` when no fetched product has that id
    pub fn resolve(&self, reference: &str) -> ValidationResult<&Product> {
        let id = parse_reference("product", reference)?;
        self.get(id).ok_or_else(|| ValidationError::UnknownReference {
            field: "product".to_string(),
            value: id.to_string(),
        })
    }

    /// Gets a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Product name for display, with a fallback for unknown ids.
    pub fn name_of(&self, id: ProductId) -> &str {
        self.get(id).map_or(UNKNOWN_PRODUCT_NAME, |p| p.name.as_str())
    }

    /// All products, in backend order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl From<Vec<Product>> for Catalog {
    fn from(products: Vec<Product>) -> Self {
        Catalog::new(products)
    }
}
