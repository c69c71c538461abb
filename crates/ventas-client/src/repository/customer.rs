//! # Customer Repository
//!
//! Read access to customers (`/clientes/`).

use tracing::{debug, info};
use ventas_core::{Customer, CustomerId};

use super::not_found_on_404;
use crate::client::ApiClient;
use crate::error::ClientResult;

/// Repository for customer endpoints.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    client: ApiClient,
}

impl CustomerRepository {
    pub fn new(client: ApiClient) -> Self {
        CustomerRepository { client }
    }

    /// Lists every customer, in backend order.
    pub async fn list(&self) -> ClientResult<Vec<Customer>> {
        let customers: Vec<Customer> = self.client.get("clientes/").await?;
        info!(count = customers.len(), "Fetched customers");
        Ok(customers)
    }

    /// Gets a customer by its ID.
    pub async fn get_by_id(&self, id: CustomerId) -> ClientResult<Customer> {
        debug!(id, "Fetching customer");
        not_found_on_404(self.client.get(&format!("clientes/{}/", id)).await, "Customer", id)
    }
}
