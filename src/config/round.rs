use std::time::Duration;

use crate::config::env_override;
use crate::error::FlowError;

/// Timing knobs for the reveal sequence and the countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundConfig {
    /// Seconds on the clock once all five candidates are revealed.
    pub countdown_secs: u32,
    /// Gap between consecutive candidate flips.
    pub reveal_interval: Duration,
    /// Settle delay between the fifth flip and arming the countdown.
    pub settle_delay: Duration,
    /// Countdown tick cadence.
    pub tick_interval: Duration,
    /// Delay before a completed round asks its host to transition out.
    pub close_delay: Duration,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            countdown_secs: 10,
            reveal_interval: Duration::from_millis(500),
            settle_delay: Duration::from_millis(500),
            tick_interval: Duration::from_secs(1),
            close_delay: Duration::from_millis(600),
        }
    }
}

impl RoundConfig {
    /// Defaults with `LASTCALL_COUNTDOWN_SECS` applied when set.
    pub fn from_env() -> Result<Self, FlowError> {
        let mut cfg = Self::default();
        if let Some(secs) = env_override::<u32>("LASTCALL_COUNTDOWN_SECS")? {
            if secs == 0 {
                return Err(FlowError::config(
                    "LASTCALL_COUNTDOWN_SECS must be greater than zero",
                ));
            }
            cfg.countdown_secs = secs;
        }
        Ok(cfg)
    }
}
