//! Shared helpers for integration tests.

/// Routes `tracing` output through the test harness. Safe to call from every test.
pub fn setup_test_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let _ = fmt()
        .with_test_writer()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "timed_cache=debug".into()),
        )
        .try_init();
}
