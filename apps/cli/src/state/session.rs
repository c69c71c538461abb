//! # Sale Session
//!
//! The one in-progress sale of a CLI session, together with the reference
//! data it was composed against.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Operations                                   │
//! │                                                                         │
//! │  User Action           Session Method          Sale Change              │
//! │  ───────────           ──────────────          ───────────              │
//! │                                                                         │
//! │  customer 3 ─────────► select_customer() ────► customer = 3             │
//! │                                                                         │
//! │  add 5 3 ────────────► add_line() ───────────► append(line)             │
//! │                                                                         │
//! │  cancel ─────────────► cancel() ─────────────► reset()                  │
//! │                                                                         │
//! │  save ───────────────► submit() ─────────────► reset() on success       │
//! │                                                 unchanged on failure    │
//! │                                                                         │
//! │  NOTE: every failing operation leaves the sale exactly as it was.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;
use ventas_client::{SaleSink, SaleSubmitter, SubmitError};
use ventas_core::validation::parse_reference;
use ventas_core::{
    Catalog, CoreResult, Customer, LineItem, LineItemBuilder, Sale, SaleRecord, ValidationError,
};

/// State of one interactive or one-shot sale composition.
#[derive(Debug, Default)]
pub struct SaleSession {
    catalog: Catalog,
    customers: Vec<Customer>,
    sale: Sale,
}

impl SaleSession {
    /// Starts a session over freshly fetched reference data.
    pub fn new(catalog: Catalog, customers: Vec<Customer>) -> Self {
        SaleSession {
            catalog,
            customers,
            sale: Sale::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn sale(&self) -> &Sale {
        &self.sale
    }

    /// The selected customer's record, if one is selected.
    pub fn customer(&self) -> Option<&Customer> {
        let id = self.sale.customer()?;
        self.customers.iter().find(|c| c.id == id)
    }

    /// Selects a customer by the id the user typed.
    pub fn select_customer(&mut self, reference: &str) -> CoreResult<&Customer> {
        let id = parse_reference("customer", reference)?;
        let customer = self
            .customers
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| ValidationError::UnknownReference {
                field: "customer".to_string(),
                value: id.to_string(),
            })?;

        self.sale.select_customer(id)?;
        debug!(customer_id = id, "Customer selected");
        Ok(customer)
    }

    /// Builds a line from user input and appends it.
    ///
    /// On error the sale is left as it was.
    pub fn add_line(&mut self, product_ref: &str, quantity: &str) -> Result<LineItem, ValidationError> {
        let line = LineItemBuilder::new(&self.catalog).build(product_ref, quantity)?;

        match std::mem::take(&mut self.sale).append(line.clone()) {
            Ok(sale) => self.sale = sale,
            Err((sale, err)) => {
                self.sale = sale;
                return Err(err);
            }
        }

        debug!(
            product_id = line.product_id(),
            quantity = line.quantity(),
            line_total = %line.line_total(),
            "Line added"
        );
        Ok(line)
    }

    /// Discards the in-progress sale.
    pub fn cancel(&mut self) {
        self.sale = std::mem::take(&mut self.sale).reset();
        debug!("Sale cancelled");
    }

    /// Submits the sale; resets it only when the backend stored it.
    pub async fn submit<S: SaleSink>(
        &mut self,
        submitter: &SaleSubmitter<S>,
    ) -> Result<SaleRecord, SubmitError> {
        let record = submitter.submit(&self.sale).await?;
        self.sale = std::mem::take(&mut self.sale).reset();
        Ok(record)
    }
}
