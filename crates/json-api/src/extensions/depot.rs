//! Depot helper extensions.

use std::{any::Any, sync::Arc};

use salvo::prelude::{Depot, StatusError};

use crate::state::State;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Shared server state injected at the router root.
    fn state_or_500(&self) -> Result<&Arc<State>, StatusError> {
        self.obtain_or_500::<Arc<State>>()
    }
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_missing| StatusError::internal_server_error())
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use crate::test_helpers::strict_state;

    use super::*;

    #[test]
    fn missing_state_is_500() {
        let depot = Depot::new();

        let result = depot.state_or_500();

        assert_eq!(
            result.err().map(|error| error.code),
            Some(StatusCode::INTERNAL_SERVER_ERROR)
        );
    }

    #[test]
    fn injected_state_is_found() {
        let mut depot = Depot::new();

        depot.inject(strict_state());

        assert!(depot.state_or_500().is_ok());
    }
}
