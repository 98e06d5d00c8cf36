//! Guest list application services.

pub mod admissions;
pub mod context;
pub mod gate;
pub mod guests;
pub mod messages;
pub mod roster;

#[cfg(test)]
mod test;
