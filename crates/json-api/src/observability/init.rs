//! Observability lifecycle.

use tracing::info;

use crate::config::ServerConfig;

use super::{ObservabilityError, logging, settings};

/// Runtime observability state.
#[derive(Debug)]
pub(crate) struct Observability {
    log_format: &'static str,
}

impl Observability {
    /// Initialize structured logging and request settings.
    pub(crate) fn init(config: &ServerConfig) -> Result<Self, ObservabilityError> {
        settings::apply_runtime_config(config);

        logging::init_subscriber(config)?;

        Ok(Self {
            log_format: logging::format_name(config.logging.log_format),
        })
    }

    /// Log shutdown once the server has drained.
    pub(crate) fn shutdown(self) {
        info!(log_format = self.log_format, "observability shut down");
    }
}
