//! Configuration management for ficha-epi.
//!
//! Settings live in `config.json` inside the platform data directory (see
//! [`DataStorage`]). A missing file means defaults: SQLite storage in the data
//! directory and an HTTP listener on `0.0.0.0:8080`.
//!
//! ## Precedence
//!
//! 1. Command-line flags of `serve`
//! 2. Environment: `PORT`, `FICHA_EPI_STORAGE`, `FICHA_EPI_DATA_DIR`
//!    (a `.env` file in the working directory is loaded first)
//! 3. `config.json`
//! 4. Built-in defaults
//!
//! ## File Location
//!
//! - **Windows**: `%LOCALAPPDATA%\bom-samaritano\ficha-epi\config.json`
//! - **macOS**: `~/Library/Application Support/bom-samaritano/ficha-epi/config.json`
//! - **Linux**: `~/.local/share/bom-samaritano/ficha-epi/config.json`
//!
//! ```rust,no_run
//! use ficha_epi::libs::config::Config;
//!
//! let config = Config::read()?.with_env_overrides()?;
//! println!("{} on {}", config.storage.backend, config.server.bind);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use crate::store::StorageBackend;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

pub const ENV_PORT: &str = "PORT";
pub const ENV_STORAGE: &str = "FICHA_EPI_STORAGE";
pub const ENV_DATA_DIR: &str = "FICHA_EPI_DATA_DIR";

/// Where and how records are persisted.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the database or the snapshot files.
    ///
    /// Defaults to the platform data directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// The effective data directory, created if needed.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                Ok(dir.clone())
            }
            None => DataStorage::new().base_path(),
        }
    }
}

/// HTTP listener settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind
            .parse()
            .map_err(|_| msg_error_anyhow!(Message::InvalidBindAddress(self.bind.clone())))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Reads `config.json`, or returns defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = Self::path()?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON and returns its path.
    pub fn save(&self) -> Result<PathBuf> {
        let config_file_path = Self::path()?;

        let config_file = File::create(&config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(config_file_path)
    }

    /// Removes the configuration file; `None` when there was nothing to remove.
    pub fn delete() -> Result<Option<PathBuf>> {
        let config_file_path = Self::path()?;

        if !config_file_path.exists() {
            return Ok(None);
        }
        fs::remove_file(&config_file_path)?;
        Ok(Some(config_file_path))
    }

    pub fn path() -> Result<PathBuf> {
        DataStorage::new().get_path(CONFIG_FILE_NAME)
    }

    /// Applies `PORT`, `FICHA_EPI_STORAGE` and `FICHA_EPI_DATA_DIR`.
    pub fn with_env_overrides(mut self) -> Result<Config> {
        if let Ok(port) = env::var(ENV_PORT) {
            let port: u16 = port.trim().parse().map_err(|_| msg_error_anyhow!(Message::InvalidPort(port.clone())))?;
            let mut addr = self.server.socket_addr()?;
            addr.set_port(port);
            self.server.bind = addr.to_string();
        }

        if let Ok(backend) = env::var(ENV_STORAGE) {
            self.storage.backend = backend
                .parse()
                .map_err(|name| msg_error_anyhow!(Message::UnknownStorageBackend(name)))?;
        }

        if let Ok(dir) = env::var(ENV_DATA_DIR) {
            if !dir.trim().is_empty() {
                self.storage.data_dir = Some(PathBuf::from(dir));
            }
        }

        Ok(self)
    }
}
