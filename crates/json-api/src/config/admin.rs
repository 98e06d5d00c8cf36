//! Admin Config

use clap::Args;

/// Admin credential settings.
#[derive(Debug, Args)]
pub struct AdminConfig {
    /// Shared secret for admin endpoints, sent as a bearer token or `admin_token` cookie
    #[arg(long, env = "ADMIN_TOKEN", hide_env_values = true)]
    pub admin_token: String,
}
