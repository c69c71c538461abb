//! # Reference Data Commands
//!
//! `ventas products ...` and `ventas customers ...`.

use anyhow::Context;
use clap::{Args, Subcommand};
use tracing::debug;
use ventas_client::ApiClient;
use ventas_core::CustomerId;

use crate::output;

#[derive(Debug, Args)]
pub struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List every product
    List,
}

#[derive(Debug, Args)]
pub struct CustomersCommand {
    #[command(subcommand)]
    command: CustomersSubcommand,
}

#[derive(Debug, Subcommand)]
enum CustomersSubcommand {
    /// List every customer
    List,
    /// Show one customer
    Show { id: CustomerId },
}

pub async fn run_products(client: &ApiClient, command: ProductsCommand) -> anyhow::Result<()> {
    match command.command {
        ProductsSubcommand::List => {
            debug!("products list command");
            let products = client
                .products()
                .list()
                .await
                .context("failed to fetch products")?;

            if products.is_empty() {
                println!("no products found");
            } else {
                println!("{}", output::products_table(&products));
            }
            Ok(())
        }
    }
}

pub async fn run_customers(client: &ApiClient, command: CustomersCommand) -> anyhow::Result<()> {
    match command.command {
        CustomersSubcommand::List => {
            debug!("customers list command");
            let customers = client
                .customers()
                .list()
                .await
                .context("failed to fetch customers")?;

            if customers.is_empty() {
                println!("no customers found");
            } else {
                println!("{}", output::customers_table(&customers));
            }
            Ok(())
        }
        CustomersSubcommand::Show { id } => {
            debug!(id, "customers show command");
            let customer = client
                .customers()
                .get_by_id(id)
                .await
                .with_context(|| format!("failed to fetch customer {}", id))?;

            println!("{}", output::customer_detail(&customer));
            Ok(())
        }
    }
}
