//! Server configuration file support.
//!
//! Settings are read from a TOML file and can be overridden by environment
//! variables:
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 5000
//! body_limit_bytes = 1048576
//!
//! [catalog]
//! seed = true
//! ```
//!
//! - `SPACE_WEATHER_CONFIG`: explicit path of the configuration file
//! - `HOST`, `PORT`: override `server.host` and `server.port`

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::db::repository::RepositoryError;

/// Name of the configuration file searched in the standard locations.
pub const CONFIG_FILE_NAME: &str = "space-weather.toml";

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "SPACE_WEATHER_CONFIG";

/// Complete server configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
}

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Largest accepted request body
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

/// Catalog start-up settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Start with Mars, Jupiter and Saturn instead of an empty catalog
    #[serde(default = "default_seed")]
    pub seed: bool,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            seed: default_seed(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_body_limit() -> usize {
    1024 * 1024
}

fn default_seed() -> bool {
    true
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(ServerConfig)` if successful
    /// * `Err(RepositoryError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RepositoryError> {
        toml::from_str(content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load configuration from the first standard location that exists.
    ///
    /// Searches for `space-weather.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(Some(ServerConfig))` if found and parsed successfully
    /// * `Ok(None)` if no file exists
    /// * `Err(RepositoryError)` on a parse error
    pub fn from_default_location() -> Result<Option<Self>, RepositoryError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path).map(Some);
            }
        }

        Ok(None)
    }

    /// Resolve the configuration the server should run with.
    ///
    /// An explicit `SPACE_WEATHER_CONFIG` file must exist; otherwise the
    /// standard locations are searched and defaults are used when nothing is
    /// found. Environment overrides are applied last.
    pub fn load() -> Result<Self, RepositoryError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::from_default_location()?.unwrap_or_default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `HOST` / `PORT` overrides looked up through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), RepositoryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.parse().map_err(|_| {
                RepositoryError::configuration(format!("Invalid PORT value: {}", port))
            })?;
        }
        Ok(())
    }

    /// Socket address to bind.
    pub fn bind_address(&self) -> Result<SocketAddr, RepositoryError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| {
                RepositoryError::configuration(format!(
                    "Invalid bind address {}:{}: {}",
                    self.server.host, self.server.port, e
                ))
            })
    }
}
