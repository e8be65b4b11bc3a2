//! Provider code-exchange command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use url::Url;

use credo_core::provider::extract_code;

use crate::commands::{auth_api, controller};
use crate::config::{self, Config};
use crate::output;

#[derive(Args, Debug)]
pub struct ExchangeArgs {
    /// Full redirect URL pasted from the browser (code may be in the
    /// query string or the fragment)
    #[arg(long, conflicts_with = "code")]
    pub redirect_url: Option<String>,

    /// Authorization code on its own
    #[arg(long)]
    pub code: Option<String>,
}

pub async fn run(args: ExchangeArgs) -> Result<()> {
    let code = match (args.redirect_url, args.code) {
        (Some(raw), _) => {
            let redirect = Url::parse(&raw).context("Invalid redirect URL")?;
            extract_code(&redirect).context("No usable authorization code in the redirect")?
        }
        (None, Some(code)) => code,
        (None, None) => bail!("Provide --redirect-url or --code"),
    };

    let config = Config::from_env()?;
    let redirect_uri = config::redirect_uri_from_env()?;
    let api = auth_api(&config);
    let (session, _store) = controller(api)?;

    eprintln!("{}", "Exchanging authorization code...".dimmed());

    if !session.exchange_provider_code(&code, &redirect_uri).await {
        let snapshot = session.snapshot().await;
        bail!(
            "{}",
            snapshot.last_error().unwrap_or("Code exchange failed")
        );
    }

    output::success("Logged in via identity provider");
    println!();

    let snapshot = session.snapshot().await;
    if let Some(identity) = snapshot.identity() {
        output::field("Email", &identity.email);
        output::field("Role", identity.role());
    }

    Ok(())
}
