//! Server configuration.
//!
//! Values come from an optional TOML file and are then overridden from the
//! environment:
//!
//! | Variable | Field |
//! |---|---|
//! | `PAPER_CATALOG_CONFIG` | path of the TOML file (default `paper-catalog.toml`) |
//! | `PAPER_CATALOG_HOST` | `host` |
//! | `PAPER_CATALOG_PORT` | `port` |
//! | `PAPER_CATALOG_UPLOAD_DIR` | `upload_dir` |
//! | `PAPER_CATALOG_MAX_UPLOAD_BYTES` | `max_upload_bytes` |
//! | `PAPER_CATALOG_ADMIN_TOKEN` | adds an administrator with this token |
//!
//! A variable that does not parse is ignored with a warning.

use crate::model::AdminId;
use serde::Deserialize;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, fs};
use tracing::{info, warn};

const CONFIG_VAR: &str = "PAPER_CATALOG_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "paper-catalog.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// An administrator allowed to use the write endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdminConfig {
    /// Stable identity recorded as paper uploader. Generated when omitted.
    #[serde(default)]
    pub id: Option<AdminId>,
    pub name: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: u64,
    /// Channel capacity of each actor.
    pub actor_buffer: usize,
    pub admins: Vec<AdminConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: 10_000_000,
            actor_buffer: 32,
            admins: Vec::new(),
        }
    }
}

impl Config {
    /// Loads the file named by `PAPER_CATALOG_CONFIG` (or `paper-catalog.toml` if it
    /// exists) and applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var(CONFIG_VAR) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            Err(_) => {
                info!("{CONFIG_VAR} not set and no {DEFAULT_CONFIG_PATH}, using defaults");
                Self::default()
            }
        };
        config.apply_overrides(|key| env::var(key).ok());

        if config.admins.is_empty() {
            warn!("No administrators configured; write endpoints will reject every request");
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Applies `PAPER_CATALOG_*` overrides read through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("PAPER_CATALOG_HOST") {
            self.host = host.trim().to_string();
        }
        self.port = try_load(&lookup, "PAPER_CATALOG_PORT", self.port);
        if let Some(dir) = lookup("PAPER_CATALOG_UPLOAD_DIR") {
            self.upload_dir = PathBuf::from(dir.trim());
        }
        self.max_upload_bytes =
            try_load(&lookup, "PAPER_CATALOG_MAX_UPLOAD_BYTES", self.max_upload_bytes);

        if let Some(token) = lookup("PAPER_CATALOG_ADMIN_TOKEN") {
            let token = token.trim().to_string();
            if token.is_empty() {
                warn!("PAPER_CATALOG_ADMIN_TOKEN is empty, ignoring");
            } else {
                self.admins.push(AdminConfig {
                    id: None,
                    name: "Administrator".to_string(),
                    token,
                });
            }
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, current: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        return current;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(e) => {
            warn!("Invalid {key} value: {e}, keeping {current}");
            current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_to_missing_keys() {
        let config = Config::from_toml("port = 8080").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_upload_bytes, 10_000_000);
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.actor_buffer, 32);
    }

    #[test]
    fn admins_are_read_from_tables() {
        let config = Config::from_toml(
            r#"
            [[admins]]
            name = "Registrar"
            token = "s3cret"

            [[admins]]
            id = "0b5e7f8a-3a51-4c59-9c6e-8d4a1f1d2b3c"
            name = "Dean"
            token = "other"
            "#,
        )
        .unwrap();
        assert_eq!(config.admins.len(), 2);
        assert!(config.admins[0].id.is_none());
        assert_eq!(
            config.admins[1].id.map(|id| id.to_string()).as_deref(),
            Some("0b5e7f8a-3a51-4c59-9c6e-8d4a1f1d2b3c")
        );
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = Config::from_toml("port = 8080\nhost = \"127.0.0.1\"").unwrap();
        config.apply_overrides(env(&[
            ("PAPER_CATALOG_PORT", "9000"),
            ("PAPER_CATALOG_UPLOAD_DIR", "/srv/papers"),
            ("PAPER_CATALOG_ADMIN_TOKEN", "token-1"),
        ]));
        assert_eq!(config.address(), "127.0.0.1:9000");
        assert_eq!(config.upload_dir, PathBuf::from("/srv/papers"));
        assert_eq!(config.admins[0].token, "token-1");
    }

    #[test]
    fn invalid_overrides_keep_the_previous_value() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("PAPER_CATALOG_PORT", "not-a-port"),
            ("PAPER_CATALOG_MAX_UPLOAD_BYTES", "-5"),
            ("PAPER_CATALOG_ADMIN_TOKEN", "  "),
        ]));
        assert_eq!(config.port, 5000);
        assert_eq!(config.max_upload_bytes, 10_000_000);
        assert!(config.admins.is_empty());
    }

    #[test]
    fn malformed_files_are_errors() {
        assert!(Config::from_toml("port = \"many\"").is_err());
    }
}
