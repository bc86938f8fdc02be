//! Typed configuration for the round engine.
//!
//! Defaults carry the product constants; selected knobs can be overridden
//! through `LASTCALL_*` environment variables. Invalid override values are
//! a configuration error, never a silent fallback.

pub mod retry;
pub mod round;

pub use retry::RetryConfig;
pub use round::RoundConfig;

use std::env;
use std::str::FromStr;

use crate::error::FlowError;

/// Read an optional environment override, parsed as `T`.
///
/// Unset means "keep the default"; a present-but-unparsable value is a
/// config error so typos fail loudly at startup.
pub(crate) fn env_override<T: FromStr>(name: &str) -> Result<Option<T>, FlowError> {
    match env::var(name) {
        Ok(raw) => raw.parse::<T>().map(Some).map_err(|_| {
            FlowError::config(format!(
                "Environment variable '{name}' has invalid value '{raw}'"
            ))
        }),
        Err(_) => Ok(None),
    }
}
