use std::sync::Arc;

use devbox_host_admin::{AdminCheck, SystemAdminCheck};
use devbox_host_command::{CommandRunner, SystemCommandRunner};
use devbox_host_terminal::{StdTerminal, Terminal};
use devbox_package_manager::{PackageManagerSelector, SystemPackageManagerSelector};

/// Host services available to installer steps.
///
/// Cloning shares the underlying services.
#[derive(Clone)]
pub struct Capabilities {
  pub commands: Arc<dyn CommandRunner>,
  pub terminal: Arc<dyn Terminal>,
  pub packages: Arc<dyn PackageManagerSelector>,
  pub admin: Arc<dyn AdminCheck>,
}

impl Capabilities {
  /// Services backed by the real machine.
  pub fn system() -> Self {
    let commands: Arc<dyn CommandRunner> = Arc::new(SystemCommandRunner);
    Self {
      packages: Arc::new(SystemPackageManagerSelector::new(Arc::clone(&commands))),
      commands,
      terminal: Arc::new(StdTerminal),
      admin: Arc::new(SystemAdminCheck),
    }
  }
}
