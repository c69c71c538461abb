//! # Sale Commands
//!
//! `ventas sales list | show | create | compose`.

use std::str::FromStr;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use tracing::{debug, info};
use ventas_client::{ApiClient, SaleSubmitter};
use ventas_core::history::UNKNOWN_CUSTOMER_NAME;
use ventas_core::{DateRange, SaleId};

use super::compose;
use crate::output;
use crate::state::SaleSession;

#[derive(Debug, Args)]
pub struct SalesCommand {
    #[command(subcommand)]
    command: SalesSubcommand,
}

#[derive(Debug, Subcommand)]
enum SalesSubcommand {
    /// List stored sales, optionally within a date range (inclusive, UTC)
    List {
        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Show one stored sale with its lines
    Show { id: SaleId },
    /// Compose and submit a sale in one go
    Create(CreateArgs),
    /// Compose a sale interactively
    Compose,
}

#[derive(Debug, Args)]
struct CreateArgs {
    /// Customer id
    #[arg(long)]
    customer: String,

    /// Line as <product>:<quantity>; repeat for more lines
    #[arg(long = "item", required = true)]
    items: Vec<ItemSpec>,

    /// Print the request body instead of submitting it
    #[arg(long)]
    dry_run: bool,
}

/// A `<product>:<quantity>` pair from the command line.
///
/// Only the shape is checked here; the parts go through the same
/// validation as interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub product: String,
    pub quantity: String,
}

impl FromStr for ItemSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((product, quantity)) => Ok(ItemSpec {
                product: product.to_string(),
                quantity: quantity.to_string(),
            }),
            None => Err(format!("'{}' is not <product>:<quantity>", s)),
        }
    }
}

pub async fn run(client: &ApiClient, command: SalesCommand) -> anyhow::Result<()> {
    match command.command {
        SalesSubcommand::List { from, to } => list(client, from, to).await,
        SalesSubcommand::Show { id } => show(client, id).await,
        SalesSubcommand::Create(args) => create(client, args).await,
        SalesSubcommand::Compose => {
            let session = start_session(client).await?;
            compose::run(client, session).await
        }
    }
}

async fn list(client: &ApiClient, from: Option<NaiveDate>, to: Option<NaiveDate>) -> anyhow::Result<()> {
    debug!(?from, ?to, "sales list command");
    let range = DateRange::new(from, to)?;

    let rows = client
        .sales()
        .summaries(&range)
        .await
        .context("failed to fetch sales")?;

    if rows.is_empty() {
        println!("no sales found");
    } else {
        println!("{}", output::sales_table(&rows));
    }
    Ok(())
}

async fn show(client: &ApiClient, id: SaleId) -> anyhow::Result<()> {
    debug!(id, "sales show command");

    let record = client
        .sales()
        .get_by_id(id)
        .await
        .with_context(|| format!("failed to fetch sale {}", id))?;

    let customer_name = match client.customers().get_by_id(record.customer_id).await {
        Ok(customer) => customer.name,
        Err(err) => {
            debug!(error = %err, customer_id = record.customer_id, "Customer lookup failed");
            UNKNOWN_CUSTOMER_NAME.to_string()
        }
    };
    let catalog = client
        .products()
        .catalog()
        .await
        .context("failed to fetch products")?;

    println!("{}", output::sale_detail(&record, &customer_name, &catalog));
    Ok(())
}

async fn create(client: &ApiClient, args: CreateArgs) -> anyhow::Result<()> {
    debug!(customer = %args.customer, lines = args.items.len(), "sales create command");

    let mut session = start_session(client).await?;
    session.select_customer(&args.customer)?;

    for (idx, item) in args.items.iter().enumerate() {
        session
            .add_line(&item.product, &item.quantity)
            .with_context(|| format!("item {} ({}:{})", idx + 1, item.product, item.quantity))?;
    }

    let customer_name = session.customer().map(|c| c.name.as_str());
    println!("{}", output::sale_lines(session.sale(), customer_name));

    if args.dry_run {
        let body = session.sale().to_submission()?;
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let submitter = SaleSubmitter::new(client.sales());
    match session.submit(&submitter).await {
        Ok(record) => {
            info!(sale_id = record.id, "Sale stored");
            println!("sale #{} stored, total {}", record.id, record.total);
            Ok(())
        }
        Err(err) => bail!("sale not stored: {}", err),
    }
}

/// Fetches products and customers for a new session.
async fn start_session(client: &ApiClient) -> anyhow::Result<SaleSession> {
    let catalog = client
        .products()
        .catalog()
        .await
        .context("failed to fetch products")?;
    let customers = client
        .customers()
        .list()
        .await
        .context("failed to fetch customers")?;

    Ok(SaleSession::new(catalog, customers))
}
