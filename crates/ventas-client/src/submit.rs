//! # Sale Submitter
//!
//! Sends a composed [`Sale`] to the backend.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Submission Flow                                   │
//! │                                                                         │
//! │  sale.to_submission()                                                  │
//! │  ├── no customer   → SubmitError::Validation   (no request made)       │
//! │  └── no lines      → SubmitError::Validation   (no request made)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  POST /ventas/ { cliente, total, detalles[] }                          │
//! │  ├── 2xx + record  → Ok(SaleRecord)                                    │
//! │  ├── 2xx + garbage → SubmitError::InvalidResponse                      │
//! │  ├── non-2xx       → SubmitError::Rejected { status, message }         │
//! │  └── no answer     → SubmitError::Unreachable                          │
//! │                                                                         │
//! │  One attempt only. The caller decides whether to reset the sale.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use tracing::{info, warn};
use ventas_core::{NewSale, Sale, SaleRecord};

use crate::error::{ClientResult, SubmitError};
use crate::repository::SaleRepository;

/// Anything that can store a new sale.
///
/// [`SaleRepository`] is the production implementation.
#[async_trait]
pub trait SaleSink: Send + Sync {
    async fn create_sale(&self, sale: &NewSale) -> ClientResult<SaleRecord>;
}

#[async_trait]
impl SaleSink for SaleRepository {
    async fn create_sale(&self, sale: &NewSale) -> ClientResult<SaleRecord> {
        self.create(sale).await
    }
}

/// Validates and submits composed sales.
#[derive(Debug, Clone)]
pub struct SaleSubmitter<S = SaleRepository> {
    sink: S,
}

impl<S: SaleSink> SaleSubmitter<S> {
    pub fn new(sink: S) -> Self {
        SaleSubmitter { sink }
    }

    /// Submits `sale`.
    ///
    /// The sale is borrowed, never consumed: on failure the caller still
    /// holds it unchanged.
    pub async fn submit(&self, sale: &Sale) -> Result<SaleRecord, SubmitError> {
        let body = sale.to_submission()?;

        match self.sink.create_sale(&body).await {
            Ok(record) => {
                info!(sale_id = record.id, customer_id = body.customer_id, "Sale submitted");
                Ok(record)
            }
            Err(err) => {
                warn!(error = %err, customer_id = body.customer_id, "Sale submission failed");
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use std::sync::Mutex;
    use ventas_core::{LineItem, Money, Product, TaxRate, ValidationError};

    /// Records what it was asked to store and answers with a canned result.
    struct FakeSink {
        calls: Mutex<Vec<NewSale>>,
        fail_with: Option<u16>,
    }

    impl FakeSink {
        fn ok() -> Self {
            FakeSink {
                calls: Mutex::new(Vec::new()),
                fail_with: None,
            }
        }

        fn rejecting(status: u16) -> Self {
            FakeSink {
                calls: Mutex::new(Vec::new()),
                fail_with: Some(status),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SaleSink for FakeSink {
        async fn create_sale(&self, sale: &NewSale) -> ClientResult<SaleRecord> {
            self.calls.lock().unwrap().push(sale.clone());
            if let Some(status) = self.fail_with {
                return Err(ClientError::Rejected {
                    status,
                    message: "rechazada".to_string(),
                });
            }
            Ok(SaleRecord {
                id: 41,
                customer_id: sale.customer_id,
                created_at: chrono::Utc::now(),
                total: sale.total,
                details: Vec::new(),
            })
        }
    }

    fn composed_sale() -> Sale {
        let product = Product {
            id: 5,
            code: "ACET-500".to_string(),
            name: "Acetaminofen".to_string(),
            price: Money::from_pesos(1000),
            taxed: true,
            tax_rate: TaxRate::from_bps(1900),
        };
        let mut sale = Sale::new();
        sale.select_customer(3).unwrap();
        sale.append(LineItem::build(&product, 3).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_submit_success() {
        let submitter = SaleSubmitter::new(FakeSink::ok());
        let record = submitter.submit(&composed_sale()).await.unwrap();
        assert_eq!(record.id, 41);
        assert_eq!(record.total, Money::from_pesos(3570));
        assert_eq!(submitter.sink.call_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_customer_makes_no_request() {
        let submitter = SaleSubmitter::new(FakeSink::ok());
        let err = submitter.submit(&Sale::new()).await.unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Validation(ValidationError::Required { .. })
        ));
        assert_eq!(submitter.sink.call_count(), 0);
    }

    #[tokio::test]
    async fn test_rejection_leaves_sale_intact() {
        let submitter = SaleSubmitter::new(FakeSink::rejecting(400));
        let sale = composed_sale();
        let before = sale.clone();

        let err = submitter.submit(&sale).await.unwrap_err();
        assert!(matches!(err, SubmitError::Rejected { status: 400, .. }));
        assert_eq!(sale, before);
    }
}
