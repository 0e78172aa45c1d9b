//! Configuration for the dbz command-line client
//!
//! Settings are layered: built-in defaults, then `<config_dir>/dbz-cli/config.toml`,
//! then `DBZ_*` environment variables (a `.env` file is honoured), and finally
//! any command-line flags the caller applies.

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::ReqwestHttpClient;
use crate::api::constants::{OQL_EXECUTE_PATH, RECORDS_PATH};

pub const ENV_ORIGIN: &str = "DBZ_API_ORIGIN";
pub const ENV_ACCESS_TOKEN: &str = "DBZ_ACCESS_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "DBZ_TIMEOUT_SECS";

const CONFIG_DIR_NAME: &str = "dbz-cli";
const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

/// Where the dbz API lives and how to reach it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme and host the endpoint paths are resolved against,
    /// e.g. `https://workspace.example.com`
    pub origin: Option<String>,
    pub records_path: String,
    pub oql_path: String,
    pub timeout_secs: u64,
    /// Bearer token. Never read from or written to the config file.
    #[serde(skip)]
    pub access_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            origin: None,
            records_path: RECORDS_PATH.to_string(),
            oql_path: OQL_EXECUTE_PATH.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            access_token: None,
        }
    }
}

impl Config {
    /// Default config file location, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load defaults, the config file (when present) and environment overrides
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `DBZ_*` overrides using `lookup` to read variables
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(origin) = lookup(ENV_ORIGIN).filter(|v| !v.trim().is_empty()) {
            self.api.origin = Some(origin);
        }
        if let Some(token) = lookup(ENV_ACCESS_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.api.access_token = Some(token);
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            self.api.timeout_secs = timeout
                .trim()
                .parse::<u64>()
                .with_context(|| {
                    format!("{} must be a whole number of seconds", ENV_TIMEOUT_SECS)
                })?;
        }
        Ok(())
    }

    /// Apply command-line overrides on top of everything else
    pub fn with_overrides(mut self, origin: Option<String>, token: Option<String>) -> Self {
        if origin.is_some() {
            self.api.origin = origin;
        }
        if token.is_some() {
            self.api.access_token = token;
        }
        self
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn require_token(&self) -> Result<&str> {
        self.access_token.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "No access token available. Set {} or pass --token.",
                ENV_ACCESS_TOKEN
            )
        })
    }

    /// Build the reqwest transport for this configuration
    pub fn http_client(&self) -> Result<ReqwestHttpClient> {
        if self.origin.is_none() {
            anyhow::bail!(
                "No API origin configured. Set {}, add `origin` under [api] in {}, or pass --origin.",
                ENV_ORIGIN,
                Config::default_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| CONFIG_FILE_NAME.to_string())
            );
        }
        ReqwestHttpClient::with_timeout(self.origin.clone(), self.timeout())
    }
}
