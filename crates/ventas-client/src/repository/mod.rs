//! # Repository Module
//!
//! Backend resources behind a typed API.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CLI command                                                           │
//! │       │                                                                 │
//! │       │  client.products().list()                                      │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list(&self)              GET /productos/                          │
//! │  └── get_by_id(&self, id)     GET /productos/{id}/                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiClient (JSON over HTTP)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`] - Product listing and lookup
//! - [`CustomerRepository`] - Customer listing and lookup
//! - [`SaleRepository`] - Sale history and creation
//! - [`AuthRepository`] - Login and registration

pub mod auth;
pub mod customer;
pub mod product;
pub mod sale;

pub use auth::{AccessToken, AuthRepository};
pub use customer::CustomerRepository;
pub use product::ProductRepository;
pub use sale::SaleRepository;

use crate::error::{ClientError, ClientResult};

/// Turns a 404 from a by-id lookup into [`ClientError::NotFound`].
pub(crate) fn not_found_on_404<T>(result: ClientResult<T>, entity: &str, id: i64) -> ClientResult<T> {
    match result {
        Err(ClientError::Rejected { status: 404, .. }) => Err(ClientError::not_found(entity, id)),
        other => other,
    }
}
