//! Admin access

mod credential;
pub(crate) mod middleware;

pub(crate) use credential::AdminCredential;
