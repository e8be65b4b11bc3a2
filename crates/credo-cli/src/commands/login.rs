//! Password login command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use crate::commands::{auth_api, controller};
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: LoginArgs) -> Result<()> {
    let config = Config::from_env()?;
    let api = auth_api(&config);

    eprintln!("{}", "Logging in...".dimmed());

    let token = api
        .login_password(&args.email, &args.password)
        .await
        .context("Login failed")?;

    let (session, _store) = controller(api)?;
    if !session.login(token).await {
        let snapshot = session.snapshot().await;
        bail!(
            "{}",
            snapshot.last_error().unwrap_or("Failed to establish session")
        );
    }

    output::success("Logged in successfully");
    println!();

    let snapshot = session.snapshot().await;
    if let Some(identity) = snapshot.identity() {
        output::field("Email", &identity.email);
        output::field("Role", identity.role());
        output::field("Permissions", &identity.permissions.join(", "));
    }

    Ok(())
}
