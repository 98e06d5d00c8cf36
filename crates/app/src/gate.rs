//! Shared gate state

use std::sync::Arc;

use guestgate::gate::Gate;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Process-wide handle on the single [`Gate`].
///
/// Every check-then-write sequence must run under one [`Self::write`] guard so
/// that concurrent requests for the same phone or token observe each other.
#[derive(Debug, Clone, Default)]
pub struct SharedGate {
    gate: Arc<RwLock<Gate>>,
}

impl SharedGate {
    #[must_use]
    pub fn new(gate: Gate) -> Self {
        Self {
            gate: Arc::new(RwLock::new(gate)),
        }
    }

    /// Acquire shared read access.
    pub async fn read(&self) -> RwLockReadGuard<'_, Gate> {
        self.gate.read().await
    }

    /// Acquire exclusive write access.
    pub async fn write(&self) -> RwLockWriteGuard<'_, Gate> {
        self.gate.write().await
    }
}
