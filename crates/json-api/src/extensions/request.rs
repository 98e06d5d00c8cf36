//! Request helper extensions.

use salvo::Request;

const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Helpers for reading caller details off a request.
pub(crate) trait RequestExt {
    /// Network origin of the caller, for audit records.
    ///
    /// Assumes exactly one trusted reverse proxy: the last `x-forwarded-for`
    /// hop is the one that proxy appended, so earlier client-supplied hops are
    /// ignored. Without the header, the peer address.
    fn client_origin(&self) -> String;
}

impl RequestExt for Request {
    fn client_origin(&self) -> String {
        self.headers()
            .get(FORWARDED_FOR_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.rsplit(',').next())
            .map(str::trim)
            .filter(|hop| !hop.is_empty())
            .map_or_else(|| self.remote_addr().to_string(), str::to_owned)
    }
}
