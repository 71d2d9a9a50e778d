pub mod core;

pub use core::{open_connection, open_connection_with, Connector, SqlxConnector};
