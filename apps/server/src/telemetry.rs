use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Startup and connection lines from this workspace; driver chatter only when it warns.
const DEFAULT_FILTER: &str = "warn,server=info,app_config=info,db_infra=info";

pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // One JSON object per line on stdout, tagged with the emitting crate
    let fmt_layer = fmt::layer()
        .json()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_ansi(false)
        .with_current_span(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
