use devbox_host_command::CommandError;
use thiserror::Error;

/// Errors raised while selecting or driving a package manager.
#[derive(Debug, Error)]
pub enum PackageManagerError {
  /// No package manager supports this operating system.
  #[error("operating system {os_id} not yet handled")]
  OperatingSystemNotHandled { os_id: String },

  /// The package manager reported an error while installing.
  #[error("failed to install {package}: {stderr}")]
  Installation { package: String, stderr: String },

  /// The package manager reported an error while uninstalling.
  #[error("failed to uninstall {package}: {stderr}")]
  Uninstallation { package: String, stderr: String },

  #[error(transparent)]
  Command(#[from] CommandError),
}
