use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use devbox_config::InstallerConfig;
use devbox_host_admin::relaunch_as_admin;
use devbox_steps::{Capabilities, InstallerStepFactory, select_steps, workflow_model};
use stepbystep::Workflow;

/// devbox-installer - bootstrap a developer machine step by step
#[derive(Parser)]
#[command(name = "devbox-installer")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to the installer config (default: ~/.devbox-installer/config.json)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Log debug events
  #[arg(long, short, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Run the installer workflow (default)
  Run {
    /// Only run the named steps; repeatable
    #[arg(long = "step")]
    steps: Vec<String>,
  },

  /// List the available steps
  Steps,

  /// Start the installer again with administrator rights (Windows)
  Elevate {
    /// Arguments for the elevated installer
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match cli.command.unwrap_or(Commands::Run { steps: Vec::new() }) {
    Commands::Run { steps } => run(cli.config.as_deref(), &steps),
    Commands::Steps => {
      let factory = InstallerStepFactory::new(Capabilities::system());
      for name in factory.names() {
        println!("{name}");
      }
      Ok(())
    }
    Commands::Elevate { args } => {
      let args = elevated_args(cli.config.as_deref(), cli.verbose, args);
      relaunch_as_admin(&args).context("failed to relaunch as administrator")
    }
  }
}

/// Arguments for the elevated installer. Global flags of this invocation
/// are carried over; no command means `run`.
fn elevated_args(config: Option<&Path>, verbose: bool, args: Vec<String>) -> Vec<String> {
  let mut elevated = Vec::new();
  if let Some(path) = config {
    elevated.push("--config".to_string());
    elevated.push(path.to_string_lossy().into_owned());
  }
  if verbose {
    elevated.push("--verbose".to_string());
  }
  if args.is_empty() {
    elevated.push("run".to_string());
  } else {
    elevated.extend(args);
  }
  elevated
}

fn init_tracing(verbose: bool) {
  let default = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();
}

fn run(config_path: Option<&Path>, steps: &[String]) -> Result<()> {
  let config = InstallerConfig::discover(config_path).context("failed to load installer config")?;

  let factory = InstallerStepFactory::new(Capabilities::system());
  if let Some(unknown) = steps.iter().find(|name| !factory.contains(name)) {
    bail!("unknown step: {unknown}");
  }

  let model =
    select_steps(workflow_model(&config), steps).context("invalid step selection")?;
  info!(steps = model.len(), "installer_started");

  let workflow = Workflow::new(model, factory);
  match workflow.run() {
    Ok(_) => {
      info!("installer_completed");
      Ok(())
    }
    Err(e) => {
      error!(error = %e, "installer_failed");
      Err(e).context("installation failed")
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_elevated_args_forward_global_flags() {
    let args = elevated_args(
      Some(Path::new("custom.json")),
      true,
      vec!["run".to_string(), "--step".to_string(), "git_install_and_configure".to_string()],
    );
    assert_eq!(
      args,
      vec![
        "--config",
        "custom.json",
        "--verbose",
        "run",
        "--step",
        "git_install_and_configure"
      ]
    );
  }

  #[test]
  fn test_elevated_args_default_to_run() {
    assert_eq!(elevated_args(None, false, Vec::new()), vec!["run"]);
  }

  #[test]
  fn test_elevated_args_parse_back() {
    let args = elevated_args(Some(Path::new("custom.json")), false, Vec::new());
    let cli = Cli::try_parse_from(std::iter::once("devbox-installer".to_string()).chain(args))
      .unwrap();
    assert_eq!(cli.config.as_deref(), Some(Path::new("custom.json")));
    assert!(matches!(cli.command, Some(Commands::Run { ref steps }) if steps.is_empty()));
  }
}
