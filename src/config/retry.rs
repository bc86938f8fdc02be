use std::time::Duration;

use crate::config::env_override;
use crate::error::FlowError;

/// Retry and progress-staging policy for verification calls.
///
/// The backoff ladder is applied independently to "submit selection" and
/// "resolve answer": the wait before retry `k` (1-based) is
/// `min(backoff_cap, backoff_base * 2^(k-1))`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total attempts per operation, first try included.
    pub max_attempts: u32,
    /// First rung of the backoff ladder.
    pub backoff_base: Duration,
    /// Ceiling for ladder delays.
    pub backoff_cap: Duration,
    /// Client-side deadline per network attempt, independent of the
    /// ladder delays so a hung request cannot stall the sequence.
    pub request_timeout: Duration,
    /// In-flight duration after which the slow-connection notice shows.
    pub slow_after: Duration,
    /// In-flight duration after which the still-working notice shows.
    pub stalled_after: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: Duration::from_millis(1000),
            backoff_cap: Duration::from_millis(5000),
            request_timeout: Duration::from_secs(20),
            slow_after: Duration::from_millis(2500),
            stalled_after: Duration::from_millis(6000),
        }
    }
}

impl RetryConfig {
    /// Defaults with `LASTCALL_VERIFY_ATTEMPTS` / `LASTCALL_VERIFY_TIMEOUT_MS`
    /// applied when set.
    pub fn from_env() -> Result<Self, FlowError> {
        let mut cfg = Self::default();
        if let Some(attempts) = env_override::<u32>("LASTCALL_VERIFY_ATTEMPTS")? {
            if attempts == 0 {
                return Err(FlowError::config(
                    "LASTCALL_VERIFY_ATTEMPTS must be greater than zero",
                ));
            }
            cfg.max_attempts = attempts;
        }
        if let Some(ms) = env_override::<u64>("LASTCALL_VERIFY_TIMEOUT_MS")? {
            cfg.request_timeout = Duration::from_millis(ms);
        }
        Ok(cfg)
    }

    /// Ladder delay before retry `k` (1-based).
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        let exp = retry.saturating_sub(1).min(16);
        let rung = self.backoff_base.saturating_mul(1u32 << exp);
        rung.min(self.backoff_cap)
    }
}
