//! Operating system identification.

use std::fs;

/// Identifier of the Windows family.
pub const WINDOWS_NT: &str = "windows_nt";

/// Identify the running operating system.
///
/// Windows is reported as `windows_nt`. Linux distributions are reported by
/// the `ID` of `/etc/os-release` (e.g. `debian`, `ubuntu`). Anything else
/// falls back to the target OS name.
pub fn os_id() -> String {
  if cfg!(windows) {
    return WINDOWS_NT.to_string();
  }

  if cfg!(target_os = "linux")
    && let Ok(content) = fs::read_to_string("/etc/os-release")
    && let Some(id) = parse_os_release_id(&content)
  {
    return id;
  }

  std::env::consts::OS.to_string()
}

/// Extract the `ID` field of an os-release file.
pub fn parse_os_release_id(content: &str) -> Option<String> {
  content
    .lines()
    .map(str::trim)
    .find_map(|line| line.strip_prefix("ID="))
    .map(|value| value.trim_matches(|c| c == '"' || c == '\'').to_lowercase())
    .filter(|id| !id.is_empty())
}
