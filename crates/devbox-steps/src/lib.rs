//! Installer steps for developer machines.
//!
//! - [`GitInstallAndConfigureStep`] (`git_install_and_configure`) installs
//!   git and sets the global identity and settings.
//! - [`PackageManagerWindowsStep`] (`package_manager`) bootstraps
//!   Chocolatey on Windows.
//!
//! [`InstallerStepFactory`] builds them from step models, and
//! [`workflow_model`] turns an installer configuration into a workflow.

mod capabilities;
mod config;
mod error;
mod factory;
mod git;
mod package_manager;

pub use capabilities::Capabilities;
pub use error::SelectionError;
pub use factory::{InstallerStepFactory, default_step_names, select_steps, workflow_model};
pub use git::{GIT_STEP, GitError, GitInstallAndConfigureStep, GitSetting, GitStepConfig};
pub use package_manager::{
  PACKAGE_MANAGER_STEP, PackageManagerStepConfig, PackageManagerStepError,
  PackageManagerWindowsStep,
};
