//! Tracing setup for tests

use once_cell::sync::OnceCell;

static INIT: OnceCell<()> = OnceCell::new();

/// Installs a test-friendly tracing subscriber once per process
///
/// Honors `RUST_LOG`; defaults to warnings only so test output stays quiet.
pub fn init_test_tracing() {
    INIT.get_or_init(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
