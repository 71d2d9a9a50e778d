use std::path::Path;

use app_config::{default_config_path, env_snapshot, load_config_from, Config};
use db_infra::{open_connection_with, Connector, SqlxConnector};
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::error::AppError;

/// Load `./config/config.yaml` with process-environment overrides and open
/// the configured database.
pub async fn bootstrap() -> Result<(Config, DatabaseConnection), AppError> {
    bootstrap_with(&default_config_path(), env_snapshot(), &SqlxConnector).await
}

/// Load the configuration at `path` over `env`, then connect with `connector`.
///
/// Stops at the first error; the connector is not invoked when loading fails.
pub async fn bootstrap_with<I, C>(
    path: &Path,
    env: I,
    connector: &C,
) -> Result<(Config, C::Handle), AppError>
where
    I: IntoIterator<Item = (String, String)>,
    C: Connector,
{
    info!("bootstrap=start config={}", path.display());
    let config = load_config_from(path, env)?;
    let handle = open_connection_with(&config, connector).await?;
    info!(
        "bootstrap=done driver={} address={}",
        config.database.driver, config.server.address
    );
    Ok((config, handle))
}
