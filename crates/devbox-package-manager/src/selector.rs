use std::sync::Arc;

use devbox_host_command::CommandRunner;
use tracing::debug;

use crate::error::PackageManagerError;
use crate::managers::{AptPackageManager, ChocoPackageManager, PackageManager};
use crate::os::os_id;

/// Pick the package manager serving `os_id`.
pub fn package_manager_for(
  os_id: &str,
  commands: Arc<dyn CommandRunner>,
) -> Result<Box<dyn PackageManager>, PackageManagerError> {
  let managers: [Box<dyn PackageManager>; 2] = [
    Box::new(ChocoPackageManager::new(Arc::clone(&commands))),
    Box::new(AptPackageManager::new(commands)),
  ];

  let manager = managers
    .into_iter()
    .find(|m| m.supports_os(os_id))
    .ok_or_else(|| PackageManagerError::OperatingSystemNotHandled {
      os_id: os_id.to_string(),
    })?;

  debug!(os_id, manager = manager.name(), "package_manager_selected");
  Ok(manager)
}

/// Package manager selection as seen by steps.
pub trait PackageManagerSelector: Send + Sync {
  fn select(&self) -> Result<Box<dyn PackageManager>, PackageManagerError>;
}

/// Selects by the running operating system.
pub struct SystemPackageManagerSelector {
  commands: Arc<dyn CommandRunner>,
}

impl SystemPackageManagerSelector {
  pub fn new(commands: Arc<dyn CommandRunner>) -> Self {
    Self { commands }
  }
}

impl PackageManagerSelector for SystemPackageManagerSelector {
  fn select(&self) -> Result<Box<dyn PackageManager>, PackageManagerError> {
    package_manager_for(&os_id(), Arc::clone(&self.commands))
  }
}
