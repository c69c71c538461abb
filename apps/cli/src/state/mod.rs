//! # Session State
//!
//! State owned by a running `ventas` command.
//!
//! - [`SaleSession`] - the in-progress sale and its reference data

pub mod session;

pub use session::SaleSession;
