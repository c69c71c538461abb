//! # Config Commands

use std::path::Path;

use anyhow::Context;
use clap::{Args, Subcommand};
use ventas_client::ClientConfig;

#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
enum ConfigSubcommand {
    /// Print the effective configuration (token masked)
    Show,
}

pub fn run(command: ConfigCommand, config: &ClientConfig, explicit_path: Option<&Path>) -> anyhow::Result<()> {
    match command.command {
        ConfigSubcommand::Show => {
            let path = explicit_path
                .map(Path::to_path_buf)
                .or_else(ClientConfig::default_config_path);

            match path {
                Some(path) if path.exists() => println!("# file: {}", path.display()),
                Some(path) => println!("# file: {} (not found, using defaults)", path.display()),
                None => println!("# file: none"),
            }

            let rendered = toml::to_string_pretty(&config.redacted()).context("failed to render config")?;
            print!("{}", rendered);
            Ok(())
        }
    }
}
