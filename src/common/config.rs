//! Optional user configuration.
//!
//! Every field has a default, so a missing file or a partial file is valid.
//! Command-line flags are layered on top by the front end.
//!
//! ```toml
//! mandatory_domain = "raw.githubusercontent.com"
//! custom_domain = "mirror.example.org"
//! manual_all = false
//! prefer_legacy = false
//! clear_screen = true
//! network_timeout_secs = 10
//! ```

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::paths;

pub const DEFAULT_MANDATORY_DOMAIN: &str = "raw.githubusercontent.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdateConfig {
    /// Host that must always be reachable before updating
    pub mandatory_domain: String,
    /// Additional host to check alongside the mandatory one
    pub custom_domain: Option<String>,
    /// Never pass the non-interactive confirmation token
    pub manual_all: bool,
    /// Prefer yum over dnf on Red Hat systems
    pub prefer_legacy: bool,
    /// Clear the terminal before running
    pub clear_screen: bool,
    /// Upper bound for each reachability request; unbounded when unset
    pub network_timeout_secs: Option<u64>,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            mandatory_domain: DEFAULT_MANDATORY_DOMAIN.to_string(),
            custom_domain: None,
            manual_all: false,
            prefer_legacy: false,
            clear_screen: true,
            network_timeout_secs: None,
        }
    }
}

impl UpdateConfig {
    /// Load the config from an explicit path (which must exist) or from the
    /// default location (which may be absent).
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                Self::load_from_path(path)
            }
            None => match paths::default_config_path() {
                Some(path) if path.exists() => Self::load_from_path(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        if config.mandatory_domain.trim().is_empty() {
            bail!("mandatory_domain must not be empty");
        }
        if config
            .custom_domain
            .as_deref()
            .is_some_and(|domain| domain.trim().is_empty())
        {
            bail!("custom_domain must not be empty; remove the key to check only mandatory_domain");
        }
        Ok(config)
    }

    /// Where the config would be read from when no path is given
    pub fn default_path() -> Option<PathBuf> {
        paths::default_config_path()
    }
}
