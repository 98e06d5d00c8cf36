//! Gate Config

use std::path::PathBuf;

use clap::Args;
use guestgate::tokens::{DEFAULT_MAX_ATTEMPTS, TokenFormat, TokenGenerator};

/// Roster source and token issuance settings.
#[derive(Debug, Args)]
pub struct GateConfig {
    /// Roster file mapping phone numbers to guests (YAML or JSON)
    #[arg(long, env = "ROSTER_FILE")]
    pub roster_file: PathBuf,

    /// Secondary token format (pin4, alnum6, hex32)
    #[arg(long, env = "TOKEN_FORMAT", default_value_t = TokenFormat::Alnum6)]
    pub token_format: TokenFormat,

    /// Random draws per token before falling back to a time-derived value
    #[arg(long, env = "TOKEN_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub token_max_attempts: u32,
}

impl GateConfig {
    /// Token generator for these settings.
    #[must_use]
    pub fn token_generator(&self) -> TokenGenerator {
        TokenGenerator::new(self.token_format).with_max_attempts(self.token_max_attempts)
    }
}
