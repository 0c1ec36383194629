//! Chocolatey bootstrap on Windows.

use devbox_host_admin::AdminError;
use devbox_host_command::{CommandError, map_stderr};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use stepbystep::{Step, StepContext, StepError};
use thiserror::Error;
use tracing::{info, warn};

use crate::capabilities::Capabilities;
use crate::config::step_config;

pub const PACKAGE_MANAGER_STEP: &str = "package_manager";

const PREFIX: &str = "[CHOCOLATEY]";
const IS_INSTALLED: &str = "is_installed";

const INSTALL_SCRIPT: [&str; 5] = [
  r"$InstallDir='C:\ProgramData\chocoportable'",
  r#"$env:ChocolateyInstall="$InstallDir""#,
  "Set-ExecutionPolicy Bypass -Scope Process -Force",
  "[System.Net.ServicePointManager]::SecurityProtocol = [System.Net.ServicePointManager]::SecurityProtocol -bor 3072",
  "iex ((New-Object System.Net.WebClient).DownloadString('https://chocolatey.org/install.ps1'))",
];

#[derive(Debug, Error)]
pub enum PackageManagerStepError {
  #[error("You need to run this software as administrator")]
  NotAdmin,

  /// PowerShell wrote to stderr.
  #[error("powershell failed: {stderr}")]
  Powershell { stderr: String },

  #[error(transparent)]
  Command(#[from] CommandError),

  #[error(transparent)]
  Admin(#[from] AdminError),

  #[error("invalid package manager step config: {0}")]
  Config(#[from] serde_json::Error),
}

fn default_admin_check() -> bool {
  true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageManagerStepConfig {
  #[serde(default = "default_admin_check")]
  pub admin_check: bool,
}

/// Installs Chocolatey unless it is already on the PATH.
pub struct PackageManagerWindowsStep {
  caps: Capabilities,
}

impl PackageManagerWindowsStep {
  pub fn new(caps: Capabilities) -> Self {
    Self { caps }
  }

  fn say(&self, message: &str) {
    self.caps.terminal.say(&format!("{PREFIX} {message}"));
  }

  fn execute_powershell(&self, script: &str) -> Result<String, PackageManagerStepError> {
    let command = ["powershell.exe", script].map(String::from);
    map_stderr(self.caps.commands.run(&command), |stderr| {
      PackageManagerStepError::Powershell { stderr }
    })
  }

  fn prepare_inner(&self, cx: &mut StepContext<'_>) -> Result<(), PackageManagerStepError> {
    let config: PackageManagerStepConfig = step_config(cx.model())?;
    let installed =
      self.caps.commands.is_available("choco") || self.caps.commands.is_available("chocolatey");
    cx.context_mut().set(IS_INSTALLED, installed);

    if config.admin_check && !self.caps.admin.is_admin()? {
      warn!("not_admin");
      return Err(PackageManagerStepError::NotAdmin);
    }
    Ok(())
  }

  fn run_inner(&self, cx: &mut StepContext<'_>) -> Result<(), PackageManagerStepError> {
    let installed = cx
      .context()
      .get_or(IS_INSTALLED, &Value::Bool(false))
      .as_bool()
      .unwrap_or(false);

    if installed {
      self.say("Installed by user, nothing to do here");
      return Ok(());
    }

    self.say("Installation");
    self.execute_powershell(&INSTALL_SCRIPT.join("; "))?;
    info!("chocolatey_installed");
    self.say("Installed");
    Ok(())
  }
}

impl Step for PackageManagerWindowsStep {
  fn prepare(&mut self, cx: &mut StepContext<'_>) -> Result<(), StepError> {
    Ok(self.prepare_inner(cx)?)
  }

  fn run(&mut self, cx: &mut StepContext<'_>) -> Result<(), StepError> {
    Ok(self.run_inner(cx)?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_install_script() {
    let script = INSTALL_SCRIPT.join("; ");
    assert!(script.starts_with(r"$InstallDir='C:\ProgramData\chocoportable'; $env:ChocolateyInstall="));
    assert!(script.ends_with("DownloadString('https://chocolatey.org/install.ps1'))"));
  }

  #[test]
  fn test_admin_check_defaults_to_true() {
    let config: PackageManagerStepConfig = serde_json::from_str("{}").unwrap();
    assert!(config.admin_check);
  }
}
