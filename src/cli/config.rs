//! Configuration file
//!
//! Every field is optional; a missing `--config` means all defaults.
//!
//! ```json
//! {
//!   "host": "0.0.0.0",
//!   "port": 8080,
//!   "database_path": "database.json",
//!   "banned_words": ["kerfuffle", "sharbert", "fornax"],
//!   "cors_origins": []
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::config::{default_host, default_port};
use crate::http_server::HttpServerConfig;
use crate::policy::{ProfanityFilter, DEFAULT_BANNED_WORDS};

/// chirpy configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Backing file of the chirp store
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Words masked by the profanity filter, matched case-insensitively
    #[serde(default = "default_banned_words")]
    pub banned_words: Vec<String>,

    /// CORS allowed origins (empty = any)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_database_path() -> String {
    "database.json".to_string()
}

fn default_banned_words() -> Vec<String> {
    DEFAULT_BANNED_WORDS.iter().map(|w| w.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_path: default_database_path(),
            banned_words: default_banned_words(),
            cors_origins: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Resolve the effective configuration from CLI flags.
    pub fn resolve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(port) = port {
            config.port = port;
            config.validate()?;
        }

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        if self.database_path.trim().is_empty() {
            return Err(CliError::config_error("database_path must not be empty"));
        }

        // Tokens never contain spaces, so such a word could never match
        for word in &self.banned_words {
            if word.is_empty() || word.contains(' ') {
                return Err(CliError::config_error(format!(
                    "Invalid banned word: '{}'. Words must be non-empty and contain no spaces.",
                    word
                )));
            }
        }

        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.database_path)
    }

    pub fn profanity_filter(&self) -> ProfanityFilter {
        ProfanityFilter::new(&self.banned_words)
    }

    pub fn http_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
        }
    }
}
