//! API-key login command implementation.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;

use credo_core::ApiKey;

use crate::commands::{auth_api, controller};
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginKeyArgs {
    /// The API key
    #[arg(long)]
    pub key: String,

    /// Probe a protected endpoint before accepting the key
    #[arg(long)]
    pub probe: bool,
}

pub async fn run(args: LoginKeyArgs) -> Result<()> {
    if args.key.is_empty() {
        bail!("API key must not be empty");
    }

    let config = Config::from_env()?;
    let api = auth_api(&config);
    let key = ApiKey::new(&args.key);

    // API-key sessions are granted full access without server
    // confirmation; the probe is the caller-side check for those who
    // want one.
    if args.probe {
        eprintln!("{}", "Probing API key...".dimmed());
        if !api.probe_api_key(&key).await {
            bail!("The backend did not accept this API key");
        }
    }

    let (session, _store) = controller(api)?;
    session.login_with_api_key(key).await;

    output::success("Logged in with API key (full access)");
    println!();

    let snapshot = session.snapshot().await;
    if let Some(identity) = snapshot.identity() {
        output::field("Role", identity.role());
        output::field("Permissions", &identity.permissions.join(", "));
    }

    Ok(())
}
