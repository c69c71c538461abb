//! # ventas-client: REST Backend Access
//!
//! Typed access to the back-office REST API: configuration, an HTTP
//! client, one repository per resource, and the [`SaleSubmitter`] that
//! posts composed sales.
//!
//! ## Modules
//!
//! - [`config`] - `ClientConfig` (TOML file + `VENTAS_*` environment)
//! - [`client`] - `ApiClient`, JSON requests and error body parsing
//! - [`repository`] - Products, customers, sales, auth
//! - [`submit`] - Validate-then-POST for composed sales
//! - [`error`] - `ClientError`, `SubmitError`, `ConfigError`
//!
//! ## Example
//! ```rust,ignore
//! use ventas_client::{ApiClient, ClientConfig, SaleSubmitter};
//!
//! let config = ClientConfig::load(None)?;
//! let client = ApiClient::new(&config)?;
//!
//! let catalog = client.products().catalog().await?;
//! let record = SaleSubmitter::new(client.sales()).submit(&sale).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod repository;
pub mod submit;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ConfigError, SubmitError};
pub use repository::{AccessToken, AuthRepository, CustomerRepository, ProductRepository, SaleRepository};
pub use submit::{SaleSink, SaleSubmitter};
