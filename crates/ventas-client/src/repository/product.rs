//! # Product Repository
//!
//! Read access to the product catalog (`/productos/`).

use tracing::{debug, info};
use ventas_core::{Catalog, Product, ProductId};

use super::not_found_on_404;
use crate::client::ApiClient;
use crate::error::ClientResult;

/// Repository for product endpoints.
///
/// ## Usage
/// ```rust,ignore
/// let repo = client.products();
///
/// let catalog = repo.catalog().await?;
/// let product = repo.get_by_id(5).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    client: ApiClient,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(client: ApiClient) -> Self {
        ProductRepository { client }
    }

    /// Lists every product, in backend order.
    pub async fn list(&self) -> ClientResult<Vec<Product>> {
        let products: Vec<Product> = self.client.get("productos/").await?;
        info!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// Fetches the full list as a [`Catalog`] for line item building.
    pub async fn catalog(&self) -> ClientResult<Catalog> {
        self.list().await.map(Catalog::new)
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: ProductId) -> ClientResult<Product> {
        debug!(id, "Fetching product");
        not_found_on_404(self.client.get(&format!("productos/{}/", id)).await, "Product", id)
    }
}
