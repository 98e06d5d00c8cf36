//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

/// Map any error to a logged internal server error.
pub(crate) trait ResultExt<T> {
    fn or_500(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!(context, "unexpected handler failure: {error}");

            StatusError::internal_server_error()
        })
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn ok_passes_through() {
        let result: Result<u8, String> = Ok(7);

        assert_eq!(result.or_500("unused").ok(), Some(7));
    }

    #[test]
    fn err_becomes_500() {
        let result: Result<u8, String> = Err("boom".to_string());

        assert_eq!(
            result.or_500("rendering page").err().map(|error| error.code),
            Some(StatusCode::INTERNAL_SERVER_ERROR)
        );
    }
}
