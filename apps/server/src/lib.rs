pub mod bootstrap;
pub mod error;

pub use bootstrap::{bootstrap, bootstrap_with};
pub use error::AppError;
