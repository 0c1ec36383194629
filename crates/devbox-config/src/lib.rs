//! Devbox Config
//!
//! Serializable configuration of the installer: which steps to run, the
//! per-step settings handed to them, and global switches.
//!
//! ```json
//! {
//!   "admin_check": false,
//!   "steps": [
//!     { "name": "git_install_and_configure",
//!       "config": { "user_name": "Jane Doe" } }
//!   ]
//! }
//! ```

mod error;
mod installer;
mod step;

pub use error::ConfigError;
pub use installer::{ADMIN_CHECK_ENV, InstallerConfig};
pub use step::StepDef;
