//! # ventas-core: Pure Sale Composition Logic
//!
//! Everything the back-office needs to compose a sale, with zero I/O.
//! Fetching products and posting sales live in `ventas-client`; this crate
//! only turns already-fetched data and user input into line items,
//! totals and request bodies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ventas Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    ventas CLI (apps/cli)                        │   │
//! │  │    login ──► products ──► sales compose ──► sales list          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ventas-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   sale    │  │  history  │  │   │
//! │  │   │  Product  │  │   Money   │  │ LineItem  │  │ DateRange │  │   │
//! │  │   │  NewSale  │  │  TaxRate  │  │   Sale    │  │  Summary  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ventas-client (REST backend access)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Products, customers, stored sales and the submission body
//! - [`money`] - Integer centavo amounts and IVA math
//! - [`catalog`] - Product lookup for user selections
//! - [`sale`] - Line items and the in-progress sale
//! - [`history`] - Date filtering and listings of stored sales
//! - [`validation`] - User input parsing
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use ventas_core::{Catalog, LineItemBuilder, Money, Product, Sale, TaxRate};
//!
//! let catalog = Catalog::new(vec![Product {
//!     id: 5,
//!     code: "ACET-500".into(),
//!     name: "Acetaminofen".into(),
//!     price: Money::from_pesos(1000),
//!     taxed: true,
//!     tax_rate: TaxRate::from_bps(1900),
//! }]);
//!
//! let line = LineItemBuilder::new(&catalog).build("5", "3").unwrap();
//! let mut sale = Sale::new();
//! sale.select_customer(3).unwrap();
//! let sale = sale.append(line).unwrap();
//!
//! assert_eq!(sale.total(), Money::from_pesos(3570));
//! assert_eq!(sale.total().to_string(), "$3.570");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod history;
pub mod money;
pub mod sale;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use history::{DateRange, SaleSummary};
pub use money::Money;
pub use sale::{AppendResult, LineItem, LineItemBuilder, Sale, SaleStatus};
pub use types::*;
