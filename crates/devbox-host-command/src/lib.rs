//! Command execution host capability.
//!
//! Runs external programs synchronously and captures their output. A
//! program counts as failed as soon as it writes anything to stderr.

mod error;
mod execute;
mod runner;
mod which;

pub use error::{CommandError, map_stderr};
pub use execute::{execute, execute_with};
pub use runner::{CommandRunner, SystemCommandRunner};
pub use which::which;
