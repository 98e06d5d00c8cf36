//! Test helpers


pub(crate) use context::{DANA, NOA, ROSTER_YAML, TestContext, ZERO};
