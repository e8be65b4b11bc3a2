//! Whoami command implementation.

use anyhow::{Result, bail};
use clap::Args;
use serde_json::json;

use credo_core::{CredentialKind, CredentialStore, clock};

use crate::commands::{auth_api, controller};
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: WhoamiArgs) -> Result<()> {
    let config = Config::from_env()?;
    let api = auth_api(&config);
    let (session, store) = controller(api)?;

    session.bootstrap().await;
    let snapshot = session.snapshot().await;

    if !snapshot.is_authenticated() {
        bail!("No active session. Run 'credo login' first.");
    }

    let expires = store.bearer().and_then(|token| clock::decode_expiry(&token));

    if args.json {
        return output::json_pretty(&json!({
            "authenticated": true,
            "method": snapshot.credential_kind().to_string(),
            "email": snapshot.identity().map(|i| i.email.clone()),
            "permissions": snapshot.identity().map(|i| i.permissions.clone()),
            "expires": expires.map(|at| at.to_rfc3339()),
        }));
    }

    output::field("Method", &snapshot.credential_kind().to_string());
    if let Some(identity) = snapshot.identity() {
        output::field("Email", &identity.email);
        output::field("Role", identity.role());
        output::field("Permissions", &identity.permissions.join(", "));
    }
    if snapshot.credential_kind() == CredentialKind::Bearer {
        match expires {
            Some(at) => output::field("Expires", &at.to_rfc3339()),
            None => output::field("Expires", "never (no expiry claim)"),
        }
    }

    Ok(())
}
