//! Package managers backed by OS command-line tools.

use std::sync::Arc;

use devbox_host_command::{CommandRunner, map_stderr};
use tracing::info;

use crate::error::PackageManagerError;
use crate::os::WINDOWS_NT;

/// Installs and removes named packages.
pub trait PackageManager {
  fn name(&self) -> &'static str;

  /// Operating system ids this manager serves.
  fn supported_os(&self) -> &'static [&'static str];

  fn supports_os(&self, os_id: &str) -> bool {
    self.supported_os().contains(&os_id)
  }

  /// Install `package`, returning the tool output.
  fn install(&self, package: &str) -> Result<String, PackageManagerError>;

  /// Remove `package`, returning the tool output.
  fn uninstall(&self, package: &str) -> Result<String, PackageManagerError>;
}

fn install_with(
  commands: &dyn CommandRunner,
  manager: &str,
  command: &[&str],
  package: &str,
) -> Result<String, PackageManagerError> {
  info!(manager, package, "package_install");
  let command: Vec<String> = command.iter().map(|s| s.to_string()).collect();
  map_stderr(commands.run(&command), |stderr| {
    PackageManagerError::Installation {
      package: package.to_string(),
      stderr,
    }
  })
}

fn uninstall_with(
  commands: &dyn CommandRunner,
  manager: &str,
  command: &[&str],
  package: &str,
) -> Result<String, PackageManagerError> {
  info!(manager, package, "package_uninstall");
  let command: Vec<String> = command.iter().map(|s| s.to_string()).collect();
  map_stderr(commands.run(&command), |stderr| {
    PackageManagerError::Uninstallation {
      package: package.to_string(),
      stderr,
    }
  })
}

/// Chocolatey, on Windows.
pub struct ChocoPackageManager {
  commands: Arc<dyn CommandRunner>,
}

impl ChocoPackageManager {
  pub const SUPPORTED_OS: &'static [&'static str] = &[WINDOWS_NT];

  pub fn new(commands: Arc<dyn CommandRunner>) -> Self {
    Self { commands }
  }
}

impl PackageManager for ChocoPackageManager {
  fn name(&self) -> &'static str {
    "choco"
  }

  fn supported_os(&self) -> &'static [&'static str] {
    Self::SUPPORTED_OS
  }

  fn install(&self, package: &str) -> Result<String, PackageManagerError> {
    install_with(
      self.commands.as_ref(),
      self.name(),
      &["choco", "install", "--confirm", package],
      package,
    )
  }

  fn uninstall(&self, package: &str) -> Result<String, PackageManagerError> {
    uninstall_with(
      self.commands.as_ref(),
      self.name(),
      &["choco", "uninstall", package],
      package,
    )
  }
}

/// APT, on Debian and Ubuntu.
pub struct AptPackageManager {
  commands: Arc<dyn CommandRunner>,
}

impl AptPackageManager {
  pub const SUPPORTED_OS: &'static [&'static str] = &["debian", "ubuntu"];

  pub fn new(commands: Arc<dyn CommandRunner>) -> Self {
    Self { commands }
  }
}

impl PackageManager for AptPackageManager {
  fn name(&self) -> &'static str {
    "apt-get"
  }

  fn supported_os(&self) -> &'static [&'static str] {
    Self::SUPPORTED_OS
  }

  fn install(&self, package: &str) -> Result<String, PackageManagerError> {
    install_with(
      self.commands.as_ref(),
      self.name(),
      &["apt-get", "install", "--no-install-recommends", "-y", package],
      package,
    )
  }

  fn uninstall(&self, package: &str) -> Result<String, PackageManagerError> {
    uninstall_with(
      self.commands.as_ref(),
      self.name(),
      &["apt-get", "remove", "-y", "--purge", package],
      package,
    )
  }
}
