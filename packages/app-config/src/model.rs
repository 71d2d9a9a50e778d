use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use serde_with::{serde_as, DeserializeAs, DisplayFromStr, PickFirst};

/// Decoded service configuration.
///
/// Sections or fields missing from the document take their zero value; keys the
/// structure does not know are rejected at decode time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Listen address, `host:port`.
    pub address: String,
}

/// Database section. `driver` selects the backend; `timezone` only matters for
/// `mysql` and `sslmode` only for `postgres`.
#[serde_as]
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub driver: String,
    #[serde_as(as = "LenientString")]
    pub host: String,
    // Environment overrides arrive as strings
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub port: u16,
    #[serde_as(as = "LenientString")]
    pub user: String,
    #[serde_as(as = "LenientString")]
    pub password: String,
    #[serde_as(as = "LenientString")]
    pub dbname: String,
    #[serde_as(as = "LenientString")]
    pub timezone: String,
    #[serde_as(as = "LenientString")]
    pub sslmode: String,
}

/// Accepts a YAML string or a bare number, so `password: 123456` decodes to `"123456"`.
pub struct LenientString;

impl<'de> DeserializeAs<'de, String> for LenientString {
    fn deserialize_as<D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LenientStringVisitor;

        impl Visitor<'_> for LenientStringVisitor {
            type Value = String;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or a number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
                Ok(v.to_string())
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
                Ok(v)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
                Ok(v.to_string())
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
                Ok(v.to_string())
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
                Ok(v.to_string())
            }
        }

        deserializer.deserialize_any(LenientStringVisitor)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("driver", &self.driver)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("dbname", &self.dbname)
            .field("timezone", &self.timezone)
            .field("sslmode", &self.sslmode)
            .finish()
    }
}
