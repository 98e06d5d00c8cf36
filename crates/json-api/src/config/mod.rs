//! Server configuration module

use clap::Parser;
use guestgate::tokens::TokenGenerator;

use crate::config::{
    admin::AdminConfig, gate::GateConfig, observability::LoggingConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod admin;
pub(crate) mod gate;
pub(crate) mod observability;
pub(crate) mod server;

pub(crate) use observability::LogFormat;

/// Guestgate JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "guestgate-json", about = "Guestgate JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Roster and token settings.
    #[command(flatten)]
    pub gate: GateConfig,

    /// Admin credential settings.
    #[command(flatten)]
    pub admin: AdminConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Token generator for the configured format
    #[must_use]
    pub fn token_generator(&self) -> TokenGenerator {
        self.gate.token_generator()
    }
}
