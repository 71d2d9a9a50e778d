//! YAML configuration loading with `APP_*` environment overrides.
//! Used by the connection factory and the server entry point.

pub mod error;
pub mod loader;
pub mod model;

pub use error::ConfigError;
pub use loader::{
    default_config_path, env_snapshot, env_var_name, load_config, load_config_from, CONFIG_DIR,
    CONFIG_FILE, CONFIG_KEYS, ENV_PREFIX,
};
pub use model::{Config, DatabaseConfig, ServerConfig};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_support::test_logging::init();
}
