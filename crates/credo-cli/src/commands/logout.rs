//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use crate::commands::{auth_api, controller};
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs) -> Result<()> {
    let config = Config::from_env()?;
    let api = auth_api(&config);
    let (session, _store) = controller(api)?;

    session.logout().await;

    output::success("Logged out");
    Ok(())
}
