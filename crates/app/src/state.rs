//! Configuration directory management
//!
//! A folio directory (`~/.folio` unless overridden) holds everything the
//! service persists: the config file, the flat document namespace, the
//! public images and the credential file.

use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::daemon::ServiceConfig;

pub const APP_NAME: &str = "folio";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DATA_DIR_NAME: &str = "data";
pub const PUBLIC_DIR_NAME: &str = "public";
pub const CREDENTIALS_FILE_NAME: &str = "users.yml";

/// Configuration stored in config.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Listen address for the HTTP server
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Directory for rolling log files (stdout only if not set)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_listen_addr() -> String {
    "0.0.0.0:4567".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            log_dir: None,
        }
    }
}

/// Application state representing a folio config directory
#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the folio directory (~/.folio or custom)
    pub folio_dir: PathBuf,
    /// Path to the document namespace
    pub data_path: PathBuf,
    /// Path to the static image directory
    pub public_path: PathBuf,
    /// Path to the credential file
    pub credentials_path: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the folio directory path (custom or default ~/.folio)
    pub fn folio_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new folio directory
    pub fn init(custom_path: Option<PathBuf>, config: Option<AppConfig>) -> Result<Self, StateError> {
        let folio_dir = Self::folio_dir(custom_path)?;

        if folio_dir.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&folio_dir)?;

        let data_path = folio_dir.join(DATA_DIR_NAME);
        fs::create_dir_all(&data_path)?;

        let public_path = folio_dir.join(PUBLIC_DIR_NAME);
        fs::create_dir_all(&public_path)?;

        // Empty mapping, users get appended by sign-up or `folio user add`
        let credentials_path = folio_dir.join(CREDENTIALS_FILE_NAME);
        fs::write(&credentials_path, "")?;

        let config = config.unwrap_or_default();
        let config_path = folio_dir.join(CONFIG_FILE_NAME);
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        Ok(Self {
            folio_dir,
            data_path,
            public_path,
            credentials_path,
            config_path,
            config,
        })
    }

    /// Load existing state from a folio directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let folio_dir = Self::folio_dir(custom_path)?;

        if !folio_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let data_path = folio_dir.join(DATA_DIR_NAME);
        let public_path = folio_dir.join(PUBLIC_DIR_NAME);
        let credentials_path = folio_dir.join(CREDENTIALS_FILE_NAME);
        let config_path = folio_dir.join(CONFIG_FILE_NAME);

        if !data_path.is_dir() {
            return Err(StateError::MissingFile(format!("{}/", DATA_DIR_NAME)));
        }
        if !public_path.is_dir() {
            return Err(StateError::MissingFile(format!("{}/", PUBLIC_DIR_NAME)));
        }
        if !credentials_path.exists() {
            return Err(StateError::MissingFile(CREDENTIALS_FILE_NAME.to_string()));
        }
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            folio_dir,
            data_path,
            public_path,
            credentials_path,
            config_path,
            config,
        })
    }

    /// Convert to ServiceConfig for the daemon
    pub fn to_service_config(&self, log_level: tracing::Level) -> Result<ServiceConfig, StateError> {
        let listen_addr = self
            .config
            .listen_addr
            .parse()
            .map_err(|_| StateError::InvalidListenAddr(self.config.listen_addr.clone()))?;

        Ok(ServiceConfig {
            listen_addr,
            data_path: self.data_path.clone(),
            public_path: self.public_path.clone(),
            credentials_path: self.credentials_path.clone(),
            log_level,
            log_dir: self.config.log_dir.clone(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("folio directory not initialized. Run 'folio init' first or use --config-path")]
    NotInitialized,

    #[error("folio directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("invalid listen address: {0}")]
    InvalidListenAddr(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
