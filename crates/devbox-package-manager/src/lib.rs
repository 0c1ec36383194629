//! OS package managers.
//!
//! Chocolatey serves Windows and APT serves Debian and Ubuntu. Selection
//! goes by the id returned by [`os_id`]; other systems are reported as not
//! handled.

mod error;
mod managers;
mod os;
mod selector;

pub use error::PackageManagerError;
pub use managers::{AptPackageManager, ChocoPackageManager, PackageManager};
pub use os::{WINDOWS_NT, os_id, parse_os_release_id};
pub use selector::{PackageManagerSelector, SystemPackageManagerSelector, package_manager_for};
