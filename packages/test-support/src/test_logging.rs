//! Logging for tests in every workspace crate.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

/// Used when neither `TEST_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_TEST_FILTER: &str = "warn,app_config=warn,db_infra=warn,server=warn";

static INITIALIZED: OnceCell<()> = OnceCell::new();

fn test_filter() -> EnvFilter {
    ["TEST_LOG", "RUST_LOG"]
        .into_iter()
        .find_map(|var| std::env::var(var).ok())
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_TEST_FILTER))
}

/// Install the test subscriber once per test binary; later calls are no-ops.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        // Another subscriber may already be installed; keep it
        let _ = fmt()
            .with_env_filter(test_filter())
            .with_test_writer()
            .with_target(true)
            .without_time()
            .try_init();
    });
}
