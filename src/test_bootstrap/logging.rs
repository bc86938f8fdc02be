//! Unified test logging initialization
//!
//! Single source of truth for test logging. A one-time guard prevents
//! double initialization and the subscriber integrates with cargo/nextest
//! output capture.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize structured logging for tests.
///
/// Idempotent and race-safe. The level is controlled in this order of
/// precedence:
///
/// 1. `TEST_LOG` environment variable (preferred)
/// 2. `RUST_LOG` environment variable (fallback)
/// 3. `"warn"` (default, quiet)
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "warn".to_string());

        let _ = fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_test_writer()
            .without_time()
            .try_init();
    });
}
