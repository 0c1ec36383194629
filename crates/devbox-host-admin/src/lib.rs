//! Administrator detection and elevation.
//!
//! On Unix a process is admin when its effective uid is 0. On Windows the
//! check probes `net session`, which only succeeds in an elevated shell.

use std::process::Command;

use devbox_host_command::CommandError;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum AdminError {
  /// The current platform has no admin check or elevation support.
  #[error("unsupported operating system for this operation: {0}")]
  UnsupportedPlatform(String),

  #[error("admin check failed: {0}")]
  Command(#[from] CommandError),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  /// The elevated process ended unsuccessfully.
  #[error("elevated process exited with {status}")]
  Relaunch { status: String },
}

/// Admin detection as seen by steps.
pub trait AdminCheck: Send + Sync {
  fn is_admin(&self) -> Result<bool, AdminError>;
}

/// Checks the privileges of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAdminCheck;

impl AdminCheck for SystemAdminCheck {
  fn is_admin(&self) -> Result<bool, AdminError> {
    is_admin()
  }
}

/// Always answers the same; for tests and for disabling the check.
#[derive(Debug, Clone, Copy)]
pub struct StaticAdminCheck(pub bool);

impl AdminCheck for StaticAdminCheck {
  fn is_admin(&self) -> Result<bool, AdminError> {
    Ok(self.0)
  }
}

/// Whether the current process runs with administrator privileges.
pub fn is_admin() -> Result<bool, AdminError> {
  let admin = platform_is_admin()?;
  debug!(admin, "admin_checked");
  Ok(admin)
}

#[cfg(unix)]
fn platform_is_admin() -> Result<bool, AdminError> {
  let uid = devbox_host_command::execute(&["id", "-u"])?;
  Ok(uid.trim() == "0")
}

#[cfg(windows)]
fn platform_is_admin() -> Result<bool, AdminError> {
  let output = Command::new("net").arg("session").output()?;
  Ok(output.status.success())
}

#[cfg(not(any(unix, windows)))]
fn platform_is_admin() -> Result<bool, AdminError> {
  Err(AdminError::UnsupportedPlatform(
    std::env::consts::OS.to_string(),
  ))
}

/// Start the current executable again with `args`, elevated through the
/// Windows UAC prompt, and wait for it to finish.
pub fn relaunch_as_admin(args: &[String]) -> Result<(), AdminError> {
  if !cfg!(windows) {
    return Err(AdminError::UnsupportedPlatform(
      std::env::consts::OS.to_string(),
    ));
  }

  let exe = std::env::current_exe()?;
  let script = elevation_script(&exe.to_string_lossy(), args);
  info!(exe = %exe.display(), "relaunching_as_admin");

  let status = Command::new("powershell.exe")
    .args(["-NoProfile", "-Command", &script])
    .status()?;
  if !status.success() {
    return Err(AdminError::Relaunch {
      status: status.to_string(),
    });
  }
  Ok(())
}

fn elevation_script(exe: &str, args: &[String]) -> String {
  let mut script = format!(
    "Start-Process -FilePath {} -Verb RunAs -Wait",
    powershell_quote(exe)
  );
  if !args.is_empty() {
    let list: Vec<String> = args.iter().map(|a| powershell_quote(a)).collect();
    script.push_str(" -ArgumentList ");
    script.push_str(&list.join(","));
  }
  script
}

fn powershell_quote(value: &str) -> String {
  format!("'{}'", value.replace('\'', "''"))
}
