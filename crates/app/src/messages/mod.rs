//! Guest messages

pub mod errors;
pub mod records;
mod service;

pub use errors::MessagesServiceError;
pub use service::*;
