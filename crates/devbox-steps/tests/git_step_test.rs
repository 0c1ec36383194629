mod common;

use common::{FakeCommands, Fakes, with_step_context};
use devbox_steps::{GIT_STEP, GitError, GitInstallAndConfigureStep};
use serde_json::{Value, json};
use stepbystep::{Step, StepConfig, StepModel};

fn git_model() -> StepModel {
  StepModel::new(GIT_STEP)
}

fn git_with_identity() -> FakeCommands {
  FakeCommands::with_programs(&["git"])
    .output("git config --global user.name", "Dummy User\n")
    .output("git config --global user.email", "dummy@user.mail\n")
}

#[test]
fn test_prepare_reads_identity() {
  let (_fakes, caps) = Fakes::new(git_with_identity(), &[], true);
  let mut step = GitInstallAndConfigureStep::new(caps);

  with_step_context(git_model(), |cx| {
    step.prepare(cx).unwrap();
    let context = cx.context();
    assert_eq!(context.get("is_installed").unwrap(), &json!(true));
    assert_eq!(context.get("user.name").unwrap(), &json!("Dummy User"));
    assert_eq!(context.get("user.email").unwrap(), &json!("dummy@user.mail"));
  });
}

#[test]
fn test_prepare_without_git() {
  let (fakes, caps) = Fakes::new(FakeCommands::default(), &[], true);
  let mut step = GitInstallAndConfigureStep::new(caps);

  with_step_context(git_model(), |cx| {
    step.prepare(cx).unwrap();
    let context = cx.context();
    assert_eq!(context.get("is_installed").unwrap(), &json!(false));
    assert_eq!(context.get("user.name").unwrap(), &Value::Null);
    assert_eq!(context.get("user.email").unwrap(), &Value::Null);
  });
  assert!(fakes.commands.calls().is_empty());
}

#[test]
fn test_prepare_seeds_identity_from_config() {
  let (_fakes, caps) = Fakes::new(FakeCommands::with_programs(&["git"]), &[], true);
  let mut step = GitInstallAndConfigureStep::new(caps);

  let mut config = StepConfig::new();
  config.insert("user_name".into(), json!("Seed User"));
  let model = StepModel::with_config(GIT_STEP, config);

  with_step_context(model, |cx| {
    step.prepare(cx).unwrap();
    assert_eq!(cx.context().get("user.name").unwrap(), &json!("Seed User"));
    assert_eq!(cx.context().get("user.email").unwrap(), &Value::Null);
  });
}

#[test]
fn test_prompt_already_complete() {
  let (fakes, caps) = Fakes::new(FakeCommands::default(), &[], true);
  let mut step = GitInstallAndConfigureStep::new(caps);

  with_step_context(git_model(), |cx| {
    cx.context_mut().set("user.name", "Dummy User");
    cx.context_mut().set("user.email", "dummy@user.mail");
    step.prompt(cx).unwrap();
  });
  assert!(fakes.terminal.questions().is_empty());
  assert!(fakes.terminal.lines().is_empty());
}

#[test]
fn test_prompt_repeats_until_answered() {
  let (fakes, caps) = Fakes::new(
    FakeCommands::default(),
    &["", "Dummy User", "dummy@user.mail"],
    true,
  );
  let mut step = GitInstallAndConfigureStep::new(caps);

  with_step_context(git_model(), |cx| {
    step.prompt(cx).unwrap();
    assert_eq!(cx.context().get("user.name").unwrap(), &json!("Dummy User"));
    assert_eq!(cx.context().get("user.email").unwrap(), &json!("dummy@user.mail"));
  });
  assert_eq!(
    fakes.terminal.questions(),
    vec![
      "What GIT user.name you want to set?",
      "What GIT user.name you want to set?",
      "What GIT user.email you want to set?",
    ]
  );
}

#[test]
fn test_prompt_fails_when_input_closes() {
  let (_fakes, caps) = Fakes::new(FakeCommands::default(), &["Dummy User"], true);
  let mut step = GitInstallAndConfigureStep::new(caps);

  let err = with_step_context(git_model(), |cx| step.prompt(cx).unwrap_err());
  assert!(matches!(
    err.downcast_ref::<GitError>(),
    Some(GitError::Terminal(_))
  ));
}

#[test]
fn test_run_already_installed() {
  let (fakes, caps) = Fakes::new(FakeCommands::with_programs(&["git"]), &[], true);
  let mut step = GitInstallAndConfigureStep::new(caps);

  with_step_context(git_model(), |cx| {
    cx.context_mut().set("is_installed", true);
    step.run(cx).unwrap();
  });

  assert_eq!(
    fakes.terminal.lines(),
    vec![
      "[Git Install and Configure] Installed by user, nothing to do here",
      "[Git Install and Configure] Configuration",
      "[Git Install and Configure] Setting core.autocrlf to false",
      "[Git Install and Configure] Setting core.filemode to false",
      "[Git Install and Configure] Setting core.eol to lf",
      "[Git Install and Configure] Configured",
    ]
  );
  assert_eq!(
    fakes.commands.calls(),
    vec![
      "git config --global core.autocrlf false",
      "git config --global core.filemode false",
      "git config --global core.eol lf",
    ]
  );
  assert!(fakes.packages.installed().is_empty());
}

#[test]
fn test_run_installs_and_sets_identity() {
  let (fakes, caps) = Fakes::new(FakeCommands::with_programs(&["git"]), &[], true);
  let mut step = GitInstallAndConfigureStep::new(caps);

  with_step_context(git_model(), |cx| {
    cx.context_mut().set("is_installed", false);
    cx.context_mut().set("user.name", "Dummy User");
    cx.context_mut().set("user.email", "dummy@user.mail");
    step.run(cx).unwrap();
  });

  assert_eq!(fakes.packages.installed(), vec!["git"]);
  assert_eq!(
    fakes.terminal.lines(),
    vec![
      "[Git Install and Configure] Installation",
      "[Git Install and Configure] Installed",
      "[Git Install and Configure] Configuration",
      "[Git Install and Configure] Setting user.name to Dummy User",
      "[Git Install and Configure] Setting user.email to dummy@user.mail",
      "[Git Install and Configure] Setting core.autocrlf to false",
      "[Git Install and Configure] Setting core.filemode to false",
      "[Git Install and Configure] Setting core.eol to lf",
      "[Git Install and Configure] Configured",
    ]
  );
  assert_eq!(
    fakes.commands.calls()[..2],
    [
      "git config --global user.name Dummy User",
      "git config --global user.email dummy@user.mail",
    ]
  );
}

#[test]
fn test_run_custom_settings() {
  let (fakes, caps) = Fakes::new(FakeCommands::with_programs(&["git"]), &[], true);
  let mut step = GitInstallAndConfigureStep::new(caps);

  let mut config = StepConfig::new();
  config.insert(
    "settings".into(),
    json!([{ "key": "pull.rebase", "value": "true" }]),
  );
  let model = StepModel::with_config(GIT_STEP, config);

  with_step_context(model, |cx| {
    cx.context_mut().set("is_installed", true);
    step.run(cx).unwrap();
  });
  assert_eq!(
    fakes.commands.calls(),
    vec!["git config --global pull.rebase true"]
  );
}

#[test]
fn test_run_git_stderr_fails() {
  let commands = FakeCommands::with_programs(&["git"])
    .failure("git config --global core.autocrlf false", "error: could not lock config file");
  let (fakes, caps) = Fakes::new(commands, &[], true);
  let mut step = GitInstallAndConfigureStep::new(caps);

  let err = with_step_context(git_model(), |cx| {
    cx.context_mut().set("is_installed", true);
    step.run(cx).unwrap_err()
  });

  match err.downcast_ref::<GitError>() {
    Some(GitError::Git { stderr }) => assert_eq!(stderr, "error: could not lock config file"),
    other => panic!("unexpected error: {other:?}"),
  }
  assert!(
    !fakes
      .terminal
      .lines()
      .contains(&"[Git Install and Configure] Configured".to_string())
  );
}

#[test]
fn test_invalid_config() {
  let (_fakes, caps) = Fakes::new(FakeCommands::default(), &[], true);
  let mut step = GitInstallAndConfigureStep::new(caps);

  let mut config = StepConfig::new();
  config.insert("settings".into(), json!("core.eol=lf"));
  let model = StepModel::with_config(GIT_STEP, config);

  let err = with_step_context(model, |cx| step.prepare(cx).unwrap_err());
  assert!(matches!(
    err.downcast_ref::<GitError>(),
    Some(GitError::Config(_))
  ));
}
