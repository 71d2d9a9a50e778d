use std::env;

use app_config::ConfigError;
use db_infra::{DbInfraError, DbKind};
use serial_test::serial;
use server::{bootstrap, bootstrap_with, AppError};
use tempfile::TempDir;
use test_support::{write_config_dir, RecordingConnector, MYSQL_CONFIG_YAML, POSTGRES_CONFIG_YAML};

#[ctor::ctor]
fn _auto_init_for_integration_tests() {
    test_support::test_logging::init();
}

fn no_env() -> Vec<(String, String)> {
    Vec::new()
}

#[tokio::test]
async fn loads_config_then_connects() {
    let tmp = TempDir::new().expect("tmp");
    let path = write_config_dir(tmp.path(), POSTGRES_CONFIG_YAML);
    let connector = RecordingConnector::new();

    let (config, handle) = bootstrap_with(&path, no_env(), &connector)
        .await
        .expect("bootstrap");

    assert_eq!(config.server.address, "0.0.0.0:8080");
    assert_eq!(handle.kind, DbKind::Postgres);
    assert_eq!(connector.call_count(), 1);
}

#[tokio::test]
async fn env_override_reaches_the_connection_string() {
    let tmp = TempDir::new().expect("tmp");
    let path = write_config_dir(tmp.path(), MYSQL_CONFIG_YAML);
    let connector = RecordingConnector::new();
    let env = vec![(
        "APP_DATABASE_HOST".to_string(),
        "override.example.com".to_string(),
    )];

    let (config, handle) = bootstrap_with(&path, env, &connector)
        .await
        .expect("bootstrap");

    assert_eq!(config.database.host, "override.example.com");
    assert!(handle.dsn.contains("@tcp(override.example.com:3306)/"));
}

#[tokio::test]
async fn missing_config_halts_before_connecting() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("config").join("config.yaml");
    let connector = RecordingConnector::new();

    let err = bootstrap_with(&path, no_env(), &connector)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Config(ConfigError::NotFound { .. })));
    assert_eq!(connector.call_count(), 0);
}

#[tokio::test]
async fn unsupported_driver_halts_before_connecting() {
    let tmp = TempDir::new().expect("tmp");
    let path = write_config_dir(tmp.path(), MYSQL_CONFIG_YAML);
    let connector = RecordingConnector::new();
    let env = vec![("APP_DATABASE_DRIVER".to_string(), "sqlite".to_string())];

    let err = bootstrap_with(&path, env, &connector).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::Db(DbInfraError::UnsupportedDriver { .. })
    ));
    assert!(err.to_string().contains("sqlite"));
    assert_eq!(connector.call_count(), 0);
}

#[tokio::test]
async fn connection_failure_is_reported() {
    let tmp = TempDir::new().expect("tmp");
    let path = write_config_dir(tmp.path(), MYSQL_CONFIG_YAML);
    let connector = RecordingConnector::failing();

    let err = bootstrap_with(&path, no_env(), &connector)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Db(DbInfraError::Connection {
            driver: DbKind::MySql,
            ..
        })
    ));
}

#[tokio::test]
#[serial]
async fn default_bootstrap_reads_working_directory() {
    let tmp = TempDir::new().expect("tmp");
    let previous = env::current_dir().expect("current dir");
    env::set_current_dir(tmp.path()).expect("set current dir");

    let result = bootstrap().await;
    env::set_current_dir(previous).expect("restore current dir");

    match result {
        Err(AppError::Config(ConfigError::NotFound { path })) => {
            assert!(path.ends_with("config/config.yaml"))
        }
        Err(other) => panic!("expected NotFound, got {other:?}"),
        Ok(_) => panic!("expected NotFound, got a connection"),
    }
}
