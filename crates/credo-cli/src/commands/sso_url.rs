//! Authorization-URL command implementation.

use anyhow::Result;
use clap::Args;
use uuid::Uuid;

use credo_core::provider::authorization_url;

use crate::config;
use crate::output;

#[derive(Args, Debug)]
pub struct SsoUrlArgs {}

pub async fn run(_args: SsoUrlArgs) -> Result<()> {
    let provider = config::provider_from_env()?;

    // Random state for CSRF protection, carried on the outbound URL.
    // Note the returned state is not verified on the way back.
    let state = Uuid::new_v4().to_string();
    let url = authorization_url(&provider, &state);

    output::field("State", &state);
    println!("{}", url);

    Ok(())
}
