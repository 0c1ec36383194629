use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::step::StepDef;

/// Environment variable disabling the administrator check when set to
/// `False`.
pub const ADMIN_CHECK_ENV: &str = "INSTALLER_ADMIN_CHECK";

const CONFIG_DIR: &str = ".devbox-installer";
const CONFIG_FILE: &str = "config.json";

fn default_admin_check() -> bool {
  true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallerConfig {
  /// Refuse to run privileged steps without administrator rights.
  #[serde(default = "default_admin_check")]
  pub admin_check: bool,

  /// Steps to run, in order. Empty means the built-in default workflow.
  #[serde(default)]
  pub steps: Vec<StepDef>,
}

impl Default for InstallerConfig {
  fn default() -> Self {
    Self {
      admin_check: default_admin_check(),
      steps: Vec::new(),
    }
  }
}

impl InstallerConfig {
  /// Parse a JSON config file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    info!(path = %path.display(), "config_loaded");
    Ok(config)
  }

  /// Load `explicit` if given, else the per-user config file if it exists,
  /// else the defaults. The environment override is applied in every case.
  pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
    let mut config = match explicit {
      Some(path) => Self::load(path)?,
      None => match Self::default_path().filter(|p| p.is_file()) {
        Some(path) => Self::load(path)?,
        None => {
          debug!("config_defaults");
          Self::default()
        }
      },
    };
    config.apply_env();
    Ok(config)
  }

  /// `~/.devbox-installer/config.json`, when a home directory is known.
  pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
  }

  /// Apply overrides from the process environment.
  pub fn apply_env(&mut self) {
    self.apply_env_with(|key| std::env::var(key).ok());
  }

  /// Apply overrides read through `lookup`.
  pub fn apply_env_with<F>(&mut self, lookup: F)
  where
    F: Fn(&str) -> Option<String>,
  {
    if lookup(ADMIN_CHECK_ENV).as_deref() == Some("False") {
      debug!(env = ADMIN_CHECK_ENV, "admin_check_disabled");
      self.admin_check = false;
    }
  }
}
