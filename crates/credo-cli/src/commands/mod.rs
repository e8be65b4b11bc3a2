//! Subcommand implementations.

pub mod exchange;
pub mod login;
pub mod login_key;
pub mod logout;
pub mod sso_url;
pub mod whoami;

use std::sync::Arc;

use anyhow::Result;

use credo_http::AuthApi;
use credo_session::SessionController;

use crate::cli::Commands;
use crate::config::Config;
use crate::store::FileStore;

pub async fn handle(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Login(args) => login::run(args).await,
        Commands::LoginKey(args) => login_key::run(args).await,
        Commands::SsoUrl(args) => sso_url::run(args).await,
        Commands::Exchange(args) => exchange::run(args).await,
        Commands::Whoami(args) => whoami::run(args).await,
        Commands::Logout(args) => logout::run(args).await,
    }
}

/// Build the backend API client from configuration.
pub(crate) fn auth_api(config: &Config) -> Arc<AuthApi> {
    let api = AuthApi::new(config.api_url.clone());
    let api = match &config.project_id {
        Some(project_id) => api.with_project_id(project_id),
        None => api,
    };
    Arc::new(api)
}

/// Build a controller over the file store and the backend API.
pub(crate) fn controller(api: Arc<AuthApi>) -> Result<(SessionController, Arc<FileStore>)> {
    let store = Arc::new(FileStore::open_default()?);
    let controller = SessionController::new(store.clone(), api.clone(), api);
    Ok((controller, store))
}
