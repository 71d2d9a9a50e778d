use app_config::Config;
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, SqlxMySqlConnector, SqlxPostgresConnector};
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use tracing::{info, warn};

use crate::config::db::{ConnSpec, Endpoint};
use crate::error::DbInfraError;

/// Opens a connection for a [`ConnSpec`].
#[async_trait]
pub trait Connector: Send + Sync {
    type Handle: Send;

    async fn connect(&self, spec: &ConnSpec) -> Result<Self::Handle, sqlx::Error>;
}

/// Real backend: sqlx pool with driver defaults, exposed as a SeaORM connection.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlxConnector;

#[async_trait]
impl Connector for SqlxConnector {
    type Handle = DatabaseConnection;

    async fn connect(&self, spec: &ConnSpec) -> Result<DatabaseConnection, sqlx::Error> {
        match spec {
            ConnSpec::MySql {
                endpoint,
                time_zone,
            } => {
                let pool = MySqlPoolOptions::new()
                    .connect_with(mysql_options(endpoint, time_zone))
                    .await?;
                Ok(SqlxMySqlConnector::from_sqlx_mysql_pool(pool))
            }
            ConnSpec::Postgres { endpoint, ssl_mode } => {
                let options = pg_options(endpoint, ssl_mode)?;
                let pool = PgPoolOptions::new().connect_with(options).await?;
                Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(pool))
            }
        }
    }
}

fn mysql_options(endpoint: &Endpoint, time_zone: &str) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&endpoint.host)
        .port(endpoint.port)
        .username(&endpoint.user)
        .password(&endpoint.password)
        .database(&endpoint.db_name)
        .charset("utf8mb4")
        .timezone(mysql_session_time_zone(time_zone))
}

/// Session `time_zone` for a DSN `loc` value. `None` keeps the server default.
///
/// Only `UTC` and numeric offsets (`+08:00`) are sent. A named zone such as
/// `Asia/Shanghai` would need the server's time zone tables, so it keeps the
/// server default like `Local` and only shows up in the DSN.
fn mysql_session_time_zone(loc: &str) -> Option<String> {
    match loc {
        "" | "UTC" => Some("+00:00".to_string()),
        offset if is_utc_offset(offset) => Some(offset.to_string()),
        _ => None,
    }
}

/// `+HH:MM` or `-HH:MM`.
fn is_utc_offset(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 6
        && matches!(bytes[0], b'+' | b'-')
        && bytes[3] == b':'
        && [1, 2, 4, 5].iter().all(|&i| bytes[i].is_ascii_digit())
}

fn pg_options(endpoint: &Endpoint, ssl_mode: &str) -> Result<PgConnectOptions, sqlx::Error> {
    let mut options = PgConnectOptions::new()
        .host(&endpoint.host)
        .port(endpoint.port)
        .username(&endpoint.user)
        .password(&endpoint.password)
        .database(&endpoint.db_name);

    // Empty keeps the driver default (prefer)
    if !ssl_mode.is_empty() {
        options = options.ssl_mode(ssl_mode.parse::<PgSslMode>()?);
    }
    Ok(options)
}

/// Open a connection for `cfg.database` using `connector`.
///
/// An unsupported driver fails before the connector is invoked. Connector
/// failures are wrapped with the driver and the redacted DSN; nothing is retried.
pub async fn open_connection_with<C: Connector>(
    cfg: &Config,
    connector: &C,
) -> Result<C::Handle, DbInfraError> {
    let spec = ConnSpec::try_from(&cfg.database).inspect_err(|e| {
        warn!("db_connect=rejected err={}", e);
    })?;
    let driver = spec.kind();
    let dsn = spec.redacted_dsn();

    info!("db_connect=start driver={} dsn={}", driver, dsn);

    match connector.connect(&spec).await {
        Ok(handle) => {
            info!("db_connect=done driver={}", driver);
            Ok(handle)
        }
        Err(source) => {
            warn!("db_connect=failed driver={} err={}", driver, source);
            Err(DbInfraError::Connection {
                driver,
                dsn,
                source,
            })
        }
    }
}

/// Open a connection for `cfg.database` with [`SqlxConnector`].
pub async fn open_connection(cfg: &Config) -> Result<DatabaseConnection, DbInfraError> {
    open_connection_with(cfg, &SqlxConnector).await
}
