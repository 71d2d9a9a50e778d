//! Driver-selected database connection factory.
//! Used by the server bootstrap.

pub mod config;
pub mod error;
pub mod infra;

pub use config::db::{ConnSpec, DbKind, Endpoint};
pub use error::DbInfraError;
pub use infra::db::core::{open_connection, open_connection_with, Connector, SqlxConnector};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_support::test_logging::init();
}
