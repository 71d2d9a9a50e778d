//! Configuration fixtures laid out the way the loader expects them on disk.

use std::fs;
use std::path::{Path, PathBuf};

use app_config::CONFIG_FILE;

pub const MYSQL_CONFIG_YAML: &str = "\
server:
  address: \"0.0.0.0:8080\"
database:
  driver: mysql
  host: 127.0.0.1
  port: 3306
  user: u
  password: p
  dbname: d
  timezone: UTC
";

pub const POSTGRES_CONFIG_YAML: &str = "\
server:
  address: \"0.0.0.0:8080\"
database:
  driver: postgres
  host: 127.0.0.1
  port: 5432
  user: u
  password: p
  dbname: d
  sslmode: disable
";

/// Write `content` to `<root>/config/config.yaml` and return the file path.
pub fn write_config_dir(root: &Path, content: &str) -> PathBuf {
    let dir = root.join("config");
    fs::create_dir_all(&dir).expect("create config dir");
    let path = dir.join(CONFIG_FILE);
    fs::write(&path, content).expect("write config file");
    path
}
