//! Server configuration loaded from TOML.
//!
//! ```toml
//! result_limit = 8
//! request_timeout_secs = 30
//! prefetch = false
//!
//! [sites]
//! dpy = "https://discordpy.readthedocs.io/en/latest/"
//! ```

use crate::fetch::{DEFAULT_TIMEOUT, InventoryClient};
use crate::registry::SiteRegistry;
use crate::search::DEFAULT_LIMIT;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "RTFM_CONFIG";

const CONFIG_DIR: &str = "sphinx-rtfm";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Maximum number of matches returned per lookup, at most 8
    pub result_limit: usize,
    /// Timeout for a single inventory download
    pub request_timeout_secs: u64,
    /// User agent sent with inventory requests
    pub user_agent: String,
    /// Build every configured site's table at startup
    pub prefetch: bool,
    /// Alias to base URL; replaces the built-in sites when non-empty
    pub sites: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            result_limit: DEFAULT_LIMIT,
            request_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            prefetch: false,
            sites: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from `RTFM_CONFIG`, the user config directory, or defaults.
    ///
    /// An explicitly named file must exist; the default location is optional.
    pub fn load() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }

        match default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                tracing::debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        if !(1..=DEFAULT_LIMIT).contains(&config.result_limit) {
            anyhow::bail!("result_limit must be between 1 and {}", DEFAULT_LIMIT);
        }
        Ok(config)
    }

    /// Build the site registry, falling back to the built-in sites.
    pub fn registry(&self) -> Result<SiteRegistry> {
        if self.sites.is_empty() {
            return Ok(SiteRegistry::default());
        }
        SiteRegistry::from_pairs(&self.sites).context("Invalid [sites] table")
    }

    /// Build the HTTP client used for inventory downloads.
    pub fn client(&self) -> Result<InventoryClient> {
        InventoryClient::with_settings(self.request_timeout(), &self.user_agent)
            .context("Failed to build HTTP client")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// `<config_dir>/sphinx-rtfm/config.toml`, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}
