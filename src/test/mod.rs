pub(crate) mod quick;

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TEST_LOGGING: Once = Once::new();

/// Installs a global `tracing` subscriber writing to stderr, filtered by `RUST_LOG` (default
/// `debug`). Safe to call from every test.
pub(crate) fn init_test_logging() {
    TEST_LOGGING.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_filter(env_filter),
        );

        if tracing::dispatcher::has_been_set() {
            return;
        }
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    });
}
