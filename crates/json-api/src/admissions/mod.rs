//! Admissions

mod errors;
mod handlers;
mod pages;

pub(crate) use handlers::*;
