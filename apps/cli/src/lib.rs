//! # ventas-cli: Back-Office Command Line
//!
//! Command line surface over `ventas-client`.
//!
//! ```text
//! ventas login | register
//! ventas products list
//! ventas customers list | show <id>
//! ventas sales list | show <id> | create | compose
//! ventas config show
//! ```
//!
//! Commands print results to stdout; logs go to stderr.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use ventas_client::{ApiClient, ClientConfig};

pub mod commands;
pub mod output;
pub mod state;

use commands::{auth, catalog, config, sale};

#[derive(Debug, Parser)]
#[command(name = "ventas", about = "Back-office sales, products and customers", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "VENTAS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Log in and print an access token
    Login(auth::LoginArgs),
    /// Create a back-office account
    Register(auth::RegisterArgs),
    /// Product catalog
    Products(catalog::ProductsCommand),
    /// Customers
    Customers(catalog::CustomersCommand),
    /// Sale history and sale composition
    Sales(sale::SalesCommand),
    /// Effective configuration
    Config(config::ConfigCommand),
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = ClientConfig::load(self.config.clone())?;
        let client = || ApiClient::new(&settings);

        match self.command {
            Commands::Login(args) => auth::login(&client()?, args).await,
            Commands::Register(args) => auth::register(&client()?, args).await,
            Commands::Products(command) => catalog::run_products(&client()?, command).await,
            Commands::Customers(command) => catalog::run_customers(&client()?, command).await,
            Commands::Sales(command) => sale::run(&client()?, command).await,
            Commands::Config(command) => config::run(command, &settings, self.config.as_deref()),
        }
    }
}

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "info,ventas=debug";

/// Initializes logging to stderr, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let filter = log_filter(std::env::var("RUST_LOG").ok().as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}
