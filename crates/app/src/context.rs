//! App Context

use std::{path::Path, sync::Arc};

use guestgate::{gate::Gate, roster::Roster, tokens::TokenGenerator};
use thiserror::Error;

use crate::{
    admissions::{AdmissionsService, InMemoryAdmissionsService},
    gate::SharedGate,
    guests::{GuestsService, InMemoryGuestsService},
    messages::{InMemoryMessagesService, MessagesService},
    roster::{self, RosterLoadError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to load roster")]
    Roster(#[from] RosterLoadError),
}

#[derive(Clone)]
pub struct AppContext {
    pub admissions: Arc<dyn AdmissionsService>,
    pub guests: Arc<dyn GuestsService>,
    pub messages: Arc<dyn MessagesService>,
}

impl AppContext {
    /// Build application context around a single gate for `roster`.
    #[must_use]
    pub fn from_roster(roster: Roster, generator: TokenGenerator) -> Self {
        let gate = SharedGate::new(Gate::new(roster, generator));

        Self {
            admissions: Arc::new(InMemoryAdmissionsService::new(gate.clone())),
            guests: Arc::new(InMemoryGuestsService::new(gate.clone())),
            messages: Arc::new(InMemoryMessagesService::new(gate)),
        }
    }

    /// Build application context from a roster file.
    ///
    /// # Errors
    ///
    /// Returns an error when the roster file cannot be loaded.
    pub async fn from_roster_file(
        path: &Path,
        generator: TokenGenerator,
    ) -> Result<Self, AppInitError> {
        let roster = roster::load(path).await?;

        Ok(Self::from_roster(roster, generator))
    }
}
