//! # Auth Commands

use anyhow::Context;
use clap::Args;
use tracing::debug;
use ventas_client::ApiClient;

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    email: String,

    #[arg(long, env = "VENTAS_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    email: String,

    #[arg(long, env = "VENTAS_PASSWORD", hide_env_values = true)]
    password: String,

    /// Must match --password
    #[arg(long)]
    confirm_password: String,
}

pub async fn login(client: &ApiClient, args: LoginArgs) -> anyhow::Result<()> {
    debug!(email = %args.email, "login command");

    let token = client
        .auth()
        .login(&args.email, &args.password)
        .await
        .context("login failed")?;

    println!("access_token: {}", token.access);
    println!("export VENTAS_API_TOKEN to use it; it is not stored");
    Ok(())
}

pub async fn register(client: &ApiClient, args: RegisterArgs) -> anyhow::Result<()> {
    debug!(email = %args.email, "register command");

    client
        .auth()
        .register(&args.email, &args.password, &args.confirm_password)
        .await
        .context("registration failed")?;

    println!("account created for {}; run `ventas login` next", args.email.trim());
    Ok(())
}
