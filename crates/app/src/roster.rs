//! Roster loading

use std::{
    io,
    path::{Path, PathBuf},
};

use guestgate::roster::{Roster, RosterError};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum RosterLoadError {
    #[error("failed to read roster file {}", path.display())]
    Read {
        path: PathBuf,

        #[source]
        source: io::Error,
    },

    #[error("invalid roster file {}", path.display())]
    Parse {
        path: PathBuf,

        #[source]
        source: RosterError,
    },
}

/// Read and parse a roster file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid roster.
pub async fn load(path: &Path) -> Result<Roster, RosterLoadError> {
    let source = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| RosterLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let roster = Roster::from_yaml_str(&source).map_err(|source| RosterLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        guests = roster.len(),
        tickets = roster.total_tickets(),
        "roster loaded"
    );

    Ok(roster)
}
