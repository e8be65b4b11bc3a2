//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{exchange, login, login_key, logout, sso_url, whoami};

/// Session manager CLI: password, API-key, and identity-provider login.
#[derive(Parser, Debug)]
#[command(name = "credo")]
#[command(author, version = env!("CREDO_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in with email and password
    Login(login::LoginArgs),

    /// Log in with a static API key
    LoginKey(login_key::LoginKeyArgs),

    /// Print the identity-provider authorization URL
    SsoUrl(sso_url::SsoUrlArgs),

    /// Exchange an identity-provider redirect for a session
    Exchange(exchange::ExchangeArgs),

    /// Display the active session
    Whoami(whoami::WhoamiArgs),

    /// Clear the stored session
    Logout(logout::LogoutArgs),
}
