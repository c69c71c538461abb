//! # Interactive Sale Composition
//!
//! `ventas sales compose` reads one command per line from stdin.
//!
//! ## Session Commands
//! ```text
//! customer <id>          select the customer (locked after the first line)
//! add <product> <qty>    add a line
//! show                   print the lines and totals
//! products | customers   print reference data
//! cancel                 discard the sale
//! save                   submit; the sale is kept if the backend refuses it
//! help                   list commands
//! quit                   leave (an unsaved sale is discarded)
//! ```
//!
//! Errors are printed and the session continues.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use ventas_client::{ApiClient, SaleSink, SaleSubmitter};

use crate::output;
use crate::state::SaleSession;

const HELP: &str = "\
commands:
  customer <id>          select the customer
  add <product> <qty>    add a line
  show                   print the lines and totals
  products | customers   print reference data
  cancel                 discard the sale
  save                   submit the sale
  quit                   leave";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeCommand {
    Customer(String),
    Add { product: String, quantity: String },
    Show,
    Products,
    Customers,
    Cancel,
    Save,
    Help,
    Quit,
}

impl ComposeCommand {
    /// Parses an input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Result<ComposeCommand, String>> {
        let mut words = line.split_whitespace();
        let verb = words.next()?;
        let args: Vec<&str> = words.collect();

        let command = match (verb.to_lowercase().as_str(), args.as_slice()) {
            ("customer" | "c", [id]) => Ok(ComposeCommand::Customer(id.to_string())),
            ("customer" | "c", _) => Err("usage: customer <id>".to_string()),
            ("add" | "a", [product, quantity]) => Ok(ComposeCommand::Add {
                product: product.to_string(),
                quantity: quantity.to_string(),
            }),
            ("add" | "a", _) => Err("usage: add <product> <qty>".to_string()),
            ("show" | "s", []) => Ok(ComposeCommand::Show),
            ("products", []) => Ok(ComposeCommand::Products),
            ("customers", []) => Ok(ComposeCommand::Customers),
            ("cancel", []) => Ok(ComposeCommand::Cancel),
            ("save", []) => Ok(ComposeCommand::Save),
            ("help" | "?", _) => Ok(ComposeCommand::Help),
            ("quit" | "exit" | "q", []) => Ok(ComposeCommand::Quit),
            (other, _) => Err(format!("unknown command '{}'; type help", other)),
        };
        Some(command)
    }
}

/// What the loop does after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue(String),
    Quit(String),
}

/// Applies one command to the session.
pub async fn handle<S: SaleSink>(
    session: &mut SaleSession,
    submitter: &SaleSubmitter<S>,
    command: ComposeCommand,
) -> Step {
    debug!(?command, "compose command");

    let message = match command {
        ComposeCommand::Customer(reference) => match session.select_customer(&reference) {
            Ok(customer) => format!("customer: {} ({})", customer.name, customer.id),
            Err(err) => format!("error: {}", err),
        },
        ComposeCommand::Add { product, quantity } => match session.add_line(&product, &quantity) {
            Ok(line) => format!(
                "added {} x {} = {}; sale total {}",
                line.quantity(),
                line.product_name(),
                line.line_total(),
                session.sale().total()
            ),
            Err(err) => format!("error: {}", err),
        },
        ComposeCommand::Show => {
            output::sale_lines(session.sale(), session.customer().map(|c| c.name.as_str()))
        }
        ComposeCommand::Products => output::products_table(session.catalog().products()),
        ComposeCommand::Customers => output::customers_table(session.customers()),
        ComposeCommand::Cancel => {
            session.cancel();
            "sale cancelled".to_string()
        }
        ComposeCommand::Save => match session.submit(submitter).await {
            Ok(record) => format!("sale #{} stored, total {}", record.id, record.total),
            Err(err) if err.is_retryable() => format!("error: {}; the sale was kept, try save again", err),
            Err(err) => format!("error: {}; the sale was kept", err),
        },
        ComposeCommand::Help => HELP.to_string(),
        ComposeCommand::Quit => return Step::Quit(quit_message(session)),
    };

    Step::Continue(message)
}

fn quit_message(session: &SaleSession) -> String {
    if session.sale().is_empty() {
        "bye".to_string()
    } else {
        format!(
            "discarding unsaved sale ({} lines, {})",
            session.sale().item_count(),
            session.sale().total()
        )
    }
}

/// Runs the stdin loop until `quit` or end of input.
pub async fn run(client: &ApiClient, mut session: SaleSession) -> anyhow::Result<()> {
    let submitter = SaleSubmitter::new(client.sales());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!(
        "{} products, {} customers loaded. Type help for commands.",
        session.catalog().len(),
        session.customers().len()
    );

    while let Some(line) = lines.next_line().await? {
        let command = match ComposeCommand::parse(&line) {
            None => continue,
            Some(Ok(command)) => command,
            Some(Err(usage)) => {
                println!("{}", usage);
                continue;
            }
        };

        match handle(&mut session, &submitter, command).await {
            Step::Continue(message) => println!("{}", message),
            Step::Quit(message) => {
                println!("{}", message);
                return Ok(());
            }
        }
    }

    println!("{}", quit_message(&session));
    Ok(())
}
