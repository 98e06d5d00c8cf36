//! Admission Handlers

pub(crate) mod confirm_entry;
pub(crate) mod validate;
pub(crate) mod validate_link;
