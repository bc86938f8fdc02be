//! Unit-test bootstrap utilities.

pub mod logging;
