//! Git installation and global configuration.

use devbox_host_command::{CommandError, map_stderr};
use devbox_host_terminal::TerminalError;
use devbox_package_manager::PackageManagerError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use stepbystep::{Step, StepContext, StepError, StepRunContext};
use thiserror::Error;
use tracing::{debug, info};

use crate::capabilities::Capabilities;
use crate::config::step_config;

pub const GIT_STEP: &str = "git_install_and_configure";

const PREFIX: &str = "[Git Install and Configure]";
const IS_INSTALLED: &str = "is_installed";
const USER_NAME: &str = "user.name";
const USER_EMAIL: &str = "user.email";

const QUESTIONS: [(&str, &str); 2] = [
  (USER_NAME, "What GIT user.name you want to set?"),
  (USER_EMAIL, "What GIT user.email you want to set?"),
];

#[derive(Debug, Error)]
pub enum GitError {
  /// git wrote to stderr.
  #[error("git failed: {stderr}")]
  Git { stderr: String },

  #[error(transparent)]
  Command(#[from] CommandError),

  #[error(transparent)]
  PackageManager(#[from] PackageManagerError),

  #[error(transparent)]
  Terminal(#[from] TerminalError),

  #[error("invalid git step config: {0}")]
  Config(#[from] serde_json::Error),
}

/// A `git config --global` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitSetting {
  pub key: String,
  pub value: String,
}

impl GitSetting {
  pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      key: key.into(),
      value: value.into(),
    }
  }
}

fn default_settings() -> Vec<GitSetting> {
  vec![
    GitSetting::new("core.autocrlf", "false"),
    GitSetting::new("core.filemode", "false"),
    GitSetting::new("core.eol", "lf"),
  ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitStepConfig {
  /// Settings written after user.name and user.email.
  #[serde(default = "default_settings")]
  pub settings: Vec<GitSetting>,
  /// Used when git has no user.name yet.
  #[serde(default)]
  pub user_name: Option<String>,
  /// Used when git has no user.email yet.
  #[serde(default)]
  pub user_email: Option<String>,
}

impl Default for GitStepConfig {
  fn default() -> Self {
    Self {
      settings: default_settings(),
      user_name: None,
      user_email: None,
    }
  }
}

/// Installs git if missing, then sets the user identity and the configured
/// global settings.
///
/// Step context keys: `is_installed` (bool), `user.name` and `user.email`
/// (string, or null when git was absent during prepare).
pub struct GitInstallAndConfigureStep {
  caps: Capabilities,
}

impl GitInstallAndConfigureStep {
  pub fn new(caps: Capabilities) -> Self {
    Self { caps }
  }

  fn say(&self, message: &str) {
    self.caps.terminal.say(&format!("{PREFIX} {message}"));
  }

  /// Current global value of `key`, trimmed.
  fn read_config(&self, key: &str) -> Result<String, GitError> {
    let command = ["git", "config", "--global", key].map(String::from);
    let output = map_stderr(self.caps.commands.run(&command), |stderr| GitError::Git {
      stderr,
    })?;
    Ok(output.trim().to_string())
  }

  fn update_config(&self, key: &str, value: &str) -> Result<(), GitError> {
    self.say(&format!("Setting {key} to {value}"));
    if !self.caps.commands.is_available("git") {
      debug!(key, "git_missing_config_skipped");
      return Ok(());
    }

    let command = ["git", "config", "--global", key, value].map(String::from);
    map_stderr(self.caps.commands.run(&command), |stderr| GitError::Git {
      stderr,
    })?;
    Ok(())
  }

  fn prepare_inner(&self, cx: &mut StepContext<'_>) -> Result<(), GitError> {
    let config: GitStepConfig = step_config(cx.model())?;
    let installed = self.caps.commands.is_available("git");

    let (name, email) = if installed {
      (
        Some(self.read_config(USER_NAME)?),
        Some(self.read_config(USER_EMAIL)?),
      )
    } else {
      (None, None)
    };

    let name = non_empty_or(name, config.user_name);
    let email = non_empty_or(email, config.user_email);
    debug!(installed, "git_prepared");

    let context = cx.context_mut();
    context.set(IS_INSTALLED, installed);
    context.set(USER_NAME, name);
    context.set(USER_EMAIL, email);
    Ok(())
  }

  fn prompt_inner(&self, cx: &mut StepContext<'_>) -> Result<(), GitError> {
    for (key, question) in QUESTIONS {
      while text(cx.context(), key).is_none() {
        let answer = self.caps.terminal.ask(question)?;
        cx.context_mut().set(key, answer);
      }
    }
    Ok(())
  }

  fn run_inner(&self, cx: &mut StepContext<'_>) -> Result<(), GitError> {
    let config: GitStepConfig = step_config(cx.model())?;
    let context = cx.context();

    let installed = context
      .get_or(IS_INSTALLED, &Value::Bool(false))
      .as_bool()
      .unwrap_or(false);

    if installed {
      self.say("Installed by user, nothing to do here");
    } else {
      self.say("Installation");
      let manager = self.caps.packages.select()?;
      manager.install("git")?;
      info!(manager = manager.name(), "git_installed");
      self.say("Installed");
    }

    self.say("Configuration");
    for key in [USER_NAME, USER_EMAIL] {
      if let Some(value) = text(context, key) {
        self.update_config(key, value)?;
      }
    }
    for setting in &config.settings {
      self.update_config(&setting.key, &setting.value)?;
    }
    self.say("Configured");
    Ok(())
  }
}

fn non_empty_or(value: Option<String>, fallback: Option<String>) -> Option<String> {
  value.filter(|v| !v.is_empty()).or(fallback)
}

/// Non-empty string value of `key`.
fn text<'a>(context: &'a StepRunContext, key: &str) -> Option<&'a str> {
  context
    .get(key)
    .ok()
    .and_then(Value::as_str)
    .filter(|v| !v.is_empty())
}

impl Step for GitInstallAndConfigureStep {
  fn prepare(&mut self, cx: &mut StepContext<'_>) -> Result<(), StepError> {
    Ok(self.prepare_inner(cx)?)
  }

  fn prompt(&mut self, cx: &mut StepContext<'_>) -> Result<(), StepError> {
    Ok(self.prompt_inner(cx)?)
  }

  fn run(&mut self, cx: &mut StepContext<'_>) -> Result<(), StepError> {
    Ok(self.run_inner(cx)?)
  }
}
