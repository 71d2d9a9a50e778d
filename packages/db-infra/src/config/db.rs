use std::fmt;
use std::str::FromStr;

use app_config::DatabaseConfig;

use crate::error::DbInfraError;

const REDACTED: &str = "***";

/// Supported database backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbKind {
    MySql,
    Postgres,
}

impl DbKind {
    pub const ALL: [DbKind; 2] = [DbKind::MySql, DbKind::Postgres];

    /// Driver identifier as written in the configuration file.
    pub fn as_str(self) -> &'static str {
        match self {
            DbKind::MySql => "mysql",
            DbKind::Postgres => "postgres",
        }
    }
}

impl fmt::Display for DbKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DbKind {
    type Err = DbInfraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DbKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DbInfraError::UnsupportedDriver {
                driver: s.to_string(),
            })
    }
}

/// Where and as whom to connect. Shared by every backend.
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub db_name: String,
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &REDACTED)
            .field("db_name", &self.db_name)
            .finish()
    }
}

/// Backend-specific connection parameters.
///
/// Each variant carries only the options its backend understands, so a
/// postgres spec has no time zone and a mysql spec has no SSL mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnSpec {
    MySql {
        endpoint: Endpoint,
        /// Location used to interpret `DATETIME` values (`loc=` in the DSN).
        time_zone: String,
    },
    Postgres {
        endpoint: Endpoint,
        ssl_mode: String,
    },
}

impl ConnSpec {
    pub fn kind(&self) -> DbKind {
        match self {
            ConnSpec::MySql { .. } => DbKind::MySql,
            ConnSpec::Postgres { .. } => DbKind::Postgres,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        match self {
            ConnSpec::MySql { endpoint, .. } | ConnSpec::Postgres { endpoint, .. } => endpoint,
        }
    }

    /// Connection string in the backend's native DSN format.
    pub fn dsn(&self) -> String {
        self.render(&self.endpoint().password)
    }

    /// [`ConnSpec::dsn`] with the password masked, safe for logs and errors.
    pub fn redacted_dsn(&self) -> String {
        self.render(REDACTED)
    }

    fn render(&self, password: &str) -> String {
        match self {
            ConnSpec::MySql {
                endpoint,
                time_zone,
            } => format!(
                "{}:{}@tcp({}:{})/{}?charset=utf8mb4&parseTime=True&loc={}",
                endpoint.user, password, endpoint.host, endpoint.port, endpoint.db_name, time_zone
            ),
            ConnSpec::Postgres { endpoint, ssl_mode } => format!(
                "host={} user={} password={} dbname={} port={} sslmode={}",
                endpoint.host, endpoint.user, password, endpoint.db_name, endpoint.port, ssl_mode
            ),
        }
    }
}

impl TryFrom<&DatabaseConfig> for ConnSpec {
    type Error = DbInfraError;

    fn try_from(cfg: &DatabaseConfig) -> Result<Self, Self::Error> {
        let kind: DbKind = cfg.driver.parse()?;
        let endpoint = Endpoint {
            host: cfg.host.clone(),
            port: cfg.port,
            user: cfg.user.clone(),
            password: cfg.password.clone(),
            db_name: cfg.dbname.clone(),
        };

        Ok(match kind {
            DbKind::MySql => ConnSpec::MySql {
                endpoint,
                time_zone: cfg.timezone.clone(),
            },
            DbKind::Postgres => ConnSpec::Postgres {
                endpoint,
                ssl_mode: cfg.sslmode.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database(driver: &str) -> DatabaseConfig {
        DatabaseConfig {
            driver: driver.to_string(),
            host: "127.0.0.1".to_string(),
            port: 3306,
            user: "u".to_string(),
            password: "p".to_string(),
            dbname: "d".to_string(),
            timezone: "UTC".to_string(),
            sslmode: String::new(),
        }
    }

    #[test]
    fn test_mysql_dsn() {
        let spec = ConnSpec::try_from(&database("mysql")).unwrap();
        assert_eq!(spec.kind(), DbKind::MySql);
        assert_eq!(
            spec.dsn(),
            "u:p@tcp(127.0.0.1:3306)/d?charset=utf8mb4&parseTime=True&loc=UTC"
        );
    }

    #[test]
    fn test_postgres_dsn() {
        let mut cfg = database("postgres");
        cfg.port = 5432;
        cfg.timezone = String::new();
        cfg.sslmode = "disable".to_string();

        let spec = ConnSpec::try_from(&cfg).unwrap();
        assert_eq!(spec.kind(), DbKind::Postgres);
        assert_eq!(
            spec.dsn(),
            "host=127.0.0.1 user=u password=p dbname=d port=5432 sslmode=disable"
        );
    }

    #[test]
    fn test_unused_variant_field_does_not_leak() {
        let mut cfg = database("postgres");
        cfg.timezone = "Asia/Tokyo".to_string();
        cfg.sslmode = "require".to_string();
        let pg = ConnSpec::try_from(&cfg).unwrap();
        assert!(!pg.dsn().contains("Asia/Tokyo"));

        cfg.driver = "mysql".to_string();
        let mysql = ConnSpec::try_from(&cfg).unwrap();
        assert!(!mysql.dsn().contains("require"));
    }

    #[test]
    fn test_unsupported_driver() {
        for driver in ["sqlite", "", "MySQL", "postgresql"] {
            let err = ConnSpec::try_from(&database(driver)).unwrap_err();
            match err {
                DbInfraError::UnsupportedDriver { driver: got } => assert_eq!(got, driver),
                other => panic!("expected UnsupportedDriver, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_redacted_dsn_masks_password() {
        let mut cfg = database("mysql");
        cfg.password = "s3cr3t-pass".to_string();
        let spec = ConnSpec::try_from(&cfg).unwrap();

        assert!(spec.dsn().contains("s3cr3t-pass"));
        assert!(!spec.redacted_dsn().contains("s3cr3t-pass"));
        assert!(spec.redacted_dsn().starts_with("u:***@tcp("));
        assert!(!format!("{spec:?}").contains("s3cr3t-pass"));
    }

    #[test]
    fn test_db_kind_round_trips_identifier() {
        for kind in DbKind::ALL {
            assert_eq!(kind.to_string().parse::<DbKind>().unwrap(), kind);
        }
    }
}
