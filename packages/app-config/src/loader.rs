//! Config file loading and environment overlay

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::model::Config;

/// Directory searched for the configuration file, relative to the working directory.
pub const CONFIG_DIR: &str = "./config";

pub const CONFIG_FILE: &str = "config.yaml";

/// Prefix of every environment override variable.
pub const ENV_PREFIX: &str = "APP";

/// Every dotted key the configuration structure knows. Each one can be
/// overridden through the variable named by [`env_var_name`].
pub const CONFIG_KEYS: &[&str] = &[
    "server.address",
    "database.driver",
    "database.host",
    "database.port",
    "database.user",
    "database.password",
    "database.dbname",
    "database.timezone",
    "database.sslmode",
];

/// Load `./config/config.yaml` and overlay the process environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&default_config_path(), env_snapshot())
}

/// Current process environment. Entries whose name or value is not valid
/// UTF-8 are skipped; none of them can be an override variable.
pub fn env_snapshot() -> Vec<(String, String)> {
    std::env::vars_os()
        .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

/// Load the configuration at `path`, overlaying values from the `env` snapshot.
///
/// Environment values win over file values for the same key.
pub fn load_config_from<I>(path: &Path, env: I) -> Result<Config, ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let mut document: Value =
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let env: HashMap<String, String> = env.into_iter().collect();
    apply_env_overrides(&mut document, &env);

    if document.is_null() {
        document = Value::Mapping(Mapping::new());
    }

    let config: Config =
        serde_yaml::from_value(document).map_err(|source| ConfigError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    info!("config=loaded path={}", path.display());
    Ok(config)
}

/// Expected location of the configuration file for the current working directory.
pub fn default_config_path() -> PathBuf {
    Path::new(CONFIG_DIR).join(CONFIG_FILE)
}

/// Environment variable name for a dotted configuration key.
///
/// `database.host` becomes `APP_DATABASE_HOST`.
pub fn env_var_name(key: &str) -> String {
    let normalized = key.replace(['.', '-'], "_").to_uppercase();
    format!("{ENV_PREFIX}_{normalized}")
}

fn apply_env_overrides(document: &mut Value, env: &HashMap<String, String>) {
    for key in CONFIG_KEYS {
        let var = env_var_name(key);
        if let Some(value) = env.get(&var) {
            debug!("config_override key={} var={}", key, var);
            set_path(document, key, Value::String(value.clone()));
        }
    }
}

/// Write `value` at a dotted path, creating missing sections.
///
/// A section that exists but is not a mapping is left alone so that decode
/// reports the type mismatch.
fn set_path(root: &mut Value, key: &str, value: Value) {
    let mut current = root;
    for segment in key.split('.') {
        if current.is_null() {
            *current = Value::Mapping(Mapping::new());
        }
        current = match current {
            Value::Mapping(map) => map
                .entry(Value::String(segment.to_string()))
                .or_insert(Value::Null),
            _ => return,
        };
    }
    *current = value;
}
