//! Route labels for logs and metrics.

const TOKEN_SEGMENT: &str = "{token}";

/// Path with token segments replaced, so tokens never reach logs or metric labels.
pub(super) fn route_label(path: &str) -> String {
    let mut segments = path.trim_matches('/').split('/');

    match (segments.next(), segments.next()) {
        (Some("validate-link"), Some(_token)) => format!("/validate-link/{TOKEN_SEGMENT}"),
        _ if path.is_empty() => "/".to_owned(),
        _ => path.to_owned(),
    }
}
