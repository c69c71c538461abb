//! # Sale Repository
//!
//! Stored sales (`/ventas/`): history listing, detail lookup and creation.
//!
//! ## Key Operations
//! - `list` + `list_between` for the history view
//! - `summaries` pairs each sale with its customer's name using one
//!   `GET /clientes/` call
//! - `create` is the raw `POST /ventas/`; callers composing a sale go
//!   through [`SaleSubmitter`](crate::submit::SaleSubmitter) instead

use tracing::{debug, info};
use ventas_core::history::{filter_by_date, with_customer_names};
use ventas_core::{DateRange, NewSale, SaleId, SaleRecord, SaleSummary};

use super::not_found_on_404;
use crate::client::ApiClient;
use crate::error::ClientResult;

/// Repository for sale endpoints.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    client: ApiClient,
}

impl SaleRepository {
    pub fn new(client: ApiClient) -> Self {
        SaleRepository { client }
    }

    /// Lists every stored sale, in backend order.
    pub async fn list(&self) -> ClientResult<Vec<SaleRecord>> {
        let sales: Vec<SaleRecord> = self.client.get("ventas/").await?;
        info!(count = sales.len(), "Fetched sales");
        Ok(sales)
    }

    /// Lists stored sales within `range`.
    ///
    /// The backend has no date filter, so the range is applied locally.
    pub async fn list_between(&self, range: &DateRange) -> ClientResult<Vec<SaleRecord>> {
        let sales = filter_by_date(self.list().await?, range);
        debug!(from = ?range.from(), to = ?range.to(), kept = sales.len(), "Filtered sales by date");
        Ok(sales)
    }

    /// History rows for `range`, each with its customer's name.
    pub async fn summaries(&self, range: &DateRange) -> ClientResult<Vec<SaleSummary>> {
        let sales = self.list_between(range).await?;
        if sales.is_empty() {
            return Ok(Vec::new());
        }
        let customers = self.client.customers().list().await?;
        Ok(with_customer_names(&sales, &customers))
    }

    /// Gets a stored sale by its ID.
    pub async fn get_by_id(&self, id: SaleId) -> ClientResult<SaleRecord> {
        debug!(id, "Fetching sale");
        not_found_on_404(self.client.get(&format!("ventas/{}/", id)).await, "Sale", id)
    }

    /// Creates a sale. Returns the backend's stored record.
    pub async fn create(&self, sale: &NewSale) -> ClientResult<SaleRecord> {
        debug!(
            customer_id = sale.customer_id,
            lines = sale.details.len(),
            total = %sale.total,
            "Creating sale"
        );
        let record: SaleRecord = self.client.post("ventas/", sale).await?;
        info!(sale_id = record.id, total = %record.total, "Sale created");
        Ok(record)
    }
}
