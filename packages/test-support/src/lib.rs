//! Shared test support for the workspace
//!
//! Quiet, idempotent logging setup, on-disk configuration fixtures and a
//! connector fake that records every connection attempt.

pub mod fixtures;
pub mod recording;
pub mod test_logging;

pub use fixtures::{write_config_dir, MYSQL_CONFIG_YAML, POSTGRES_CONFIG_YAML};
pub use recording::{RecordedHandle, RecordingConnector};
