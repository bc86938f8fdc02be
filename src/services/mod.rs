//! Service layer: the round flow controller.

pub mod round_flow;

pub use round_flow::{ResumePlan, RoundFlow};
