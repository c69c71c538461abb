//! # Commands
//!
//! One module per command group. Each handler takes the [`ApiClient`]
//! and its parsed arguments, prints to stdout and returns `anyhow::Result`.
//!
//! - [`auth`] - `login`, `register`
//! - [`catalog`] - `products`, `customers`
//! - [`sale`] - `sales list | show | create`
//! - [`compose`] - `sales compose` interactive session
//! - [`config`] - `config show`
//!
//! [`ApiClient`]: ventas_client::ApiClient

pub mod auth;
pub mod catalog;
pub mod compose;
pub mod config;
pub mod sale;
