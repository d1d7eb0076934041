//! Tracing initialization for tests.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize a tracing subscriber for test output.
///
/// Honors `RUST_LOG`; defaults to `warn` so test output stays quiet unless
/// asked. Safe to call from every test — only the first call installs the
/// subscriber.
pub fn init_test_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
