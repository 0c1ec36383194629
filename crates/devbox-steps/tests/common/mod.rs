//! Fakes shared by the step tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use devbox_host_admin::StaticAdminCheck;
use devbox_host_command::{CommandError, CommandRunner};
use devbox_host_terminal::ScriptedTerminal;
use devbox_package_manager::{PackageManager, PackageManagerError, PackageManagerSelector};
use devbox_steps::Capabilities;
use stepbystep::{StepContext, StepModel, StepRegistry, Workflow, WorkflowModel, WorkflowRunContext};

/// Command runner answering from canned outputs, keyed by the joined
/// command line.
#[derive(Default)]
pub struct FakeCommands {
  available: HashSet<String>,
  outputs: HashMap<String, String>,
  failures: HashMap<String, String>,
  calls: Mutex<Vec<String>>,
}

impl FakeCommands {
  pub fn with_programs(programs: &[&str]) -> Self {
    Self {
      available: programs.iter().map(|p| p.to_string()).collect(),
      ..Default::default()
    }
  }

  pub fn output(mut self, command: &str, stdout: &str) -> Self {
    self.outputs.insert(command.to_string(), stdout.to_string());
    self
  }

  pub fn failure(mut self, command: &str, stderr: &str) -> Self {
    self.failures.insert(command.to_string(), stderr.to_string());
    self
  }

  pub fn calls(&self) -> Vec<String> {
    self.calls.lock().unwrap().clone()
  }
}

impl CommandRunner for FakeCommands {
  fn which(&self, program: &str) -> Option<PathBuf> {
    self
      .available
      .contains(program)
      .then(|| PathBuf::from("/usr/bin").join(program))
  }

  fn run(&self, command: &[String]) -> Result<String, CommandError> {
    let line = command.join(" ");
    self.calls.lock().unwrap().push(line.clone());
    if let Some(stderr) = self.failures.get(&line) {
      return Err(CommandError::Stderr {
        program: command[0].clone(),
        stderr: stderr.clone(),
      });
    }
    Ok(self.outputs.get(&line).cloned().unwrap_or_default())
  }
}

/// Package manager recording what it installs.
pub struct RecordingPackageManager {
  installed: Arc<Mutex<Vec<String>>>,
}

impl PackageManager for RecordingPackageManager {
  fn name(&self) -> &'static str {
    "recording"
  }

  fn supported_os(&self) -> &'static [&'static str] {
    &["test"]
  }

  fn install(&self, package: &str) -> Result<String, PackageManagerError> {
    self.installed.lock().unwrap().push(package.to_string());
    Ok(String::new())
  }

  fn uninstall(&self, _package: &str) -> Result<String, PackageManagerError> {
    Ok(String::new())
  }
}

#[derive(Default)]
pub struct RecordingSelector {
  pub installed: Arc<Mutex<Vec<String>>>,
}

impl RecordingSelector {
  pub fn installed(&self) -> Vec<String> {
    self.installed.lock().unwrap().clone()
  }
}

impl PackageManagerSelector for RecordingSelector {
  fn select(&self) -> Result<Box<dyn PackageManager>, PackageManagerError> {
    Ok(Box::new(RecordingPackageManager {
      installed: Arc::clone(&self.installed),
    }))
  }
}

/// Handles on the fakes behind a [`Capabilities`].
pub struct Fakes {
  pub commands: Arc<FakeCommands>,
  pub terminal: Arc<ScriptedTerminal>,
  pub packages: Arc<RecordingSelector>,
}

impl Fakes {
  pub fn new(commands: FakeCommands, answers: &[&str], admin: bool) -> (Self, Capabilities) {
    let fakes = Self {
      commands: Arc::new(commands),
      terminal: Arc::new(ScriptedTerminal::new(answers.iter().copied())),
      packages: Arc::new(RecordingSelector::default()),
    };
    let caps = Capabilities {
      commands: fakes.commands.clone(),
      terminal: fakes.terminal.clone(),
      packages: fakes.packages.clone(),
      admin: Arc::new(StaticAdminCheck(admin)),
    };
    (fakes, caps)
  }
}

/// Run `f` against a step context for `model`, registered alone in a fresh
/// run context.
pub fn with_step_context<R>(model: StepModel, f: impl FnOnce(&mut StepContext<'_>) -> R) -> R {
  let mut workflow_model = WorkflowModel::new();
  let model = workflow_model.push(model);
  let workflow = Workflow::new(workflow_model, StepRegistry::new());

  let mut run_context = WorkflowRunContext::new();
  let id = run_context.register_step(&model);
  let mut cx = StepContext::new(&workflow, &mut run_context, id).unwrap();
  f(&mut cx)
}
