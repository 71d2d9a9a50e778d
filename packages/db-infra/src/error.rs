use thiserror::Error;

use crate::config::db::DbKind;

#[derive(Debug, Error)]
pub enum DbInfraError {
    #[error("unsupported database driver: {driver:?}")]
    UnsupportedDriver { driver: String },
    /// `dsn` is the redacted connection string.
    #[error("failed to connect to {driver} database at {dsn}: {source}")]
    Connection {
        driver: DbKind,
        dsn: String,
        #[source]
        source: sqlx::Error,
    },
}
