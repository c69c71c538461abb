//! `ventas` binary entry point.

use std::process;

use clap::Parser;
use ventas_cli::{init_tracing, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(error) = cli.run().await {
        eprintln!("error: {error:#}");
        process::exit(1);
    }
}
