//! PATH lookup for executables.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Resolve `program` to an executable path.
///
/// Names containing a path separator are checked as given; bare names are
/// searched for in every `PATH` entry (with `PATHEXT` suffixes on Windows).
pub fn which(program: impl AsRef<OsStr>) -> Option<PathBuf> {
  let program = Path::new(program.as_ref());
  if program.as_os_str().is_empty() {
    return None;
  }

  if program.components().count() > 1 {
    return candidates(program).into_iter().find(|c| is_executable(c));
  }

  let paths = env::var_os("PATH")?;
  env::split_paths(&paths)
    .flat_map(|dir| candidates(&dir.join(program)))
    .find(|candidate| is_executable(candidate))
}

#[cfg(windows)]
fn candidates(base: &Path) -> Vec<PathBuf> {
  let mut candidates = Vec::new();
  if base.extension().is_some() {
    candidates.push(base.to_path_buf());
  }

  let pathext = env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
  for ext in pathext.split(';').filter(|e| !e.is_empty()) {
    let mut name = base.as_os_str().to_owned();
    name.push(ext);
    candidates.push(PathBuf::from(name));
  }
  candidates
}

#[cfg(not(windows))]
fn candidates(base: &Path) -> Vec<PathBuf> {
  vec![base.to_path_buf()]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
  use std::os::unix::fs::PermissionsExt;

  path
    .metadata()
    .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
    .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
  path.is_file()
}
