use app_config::ConfigError;
use db_infra::DbInfraError;
use thiserror::Error;

/// Any failure that halts startup.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Database error: {0}")]
    Db(#[from] DbInfraError),
}
