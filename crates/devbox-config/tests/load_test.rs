use std::io::Write;

use devbox_config::{ConfigError, InstallerConfig, StepDef};
use serde_json::json;

fn write_config(content: &str) -> tempfile::NamedTempFile {
  let mut file = tempfile::NamedTempFile::new().unwrap();
  file.write_all(content.as_bytes()).unwrap();
  file
}

#[test]
fn test_load_steps_with_config() {
  let file = write_config(
    r#"{
      "admin_check": false,
      "steps": [
        { "name": "package_manager" },
        { "name": "git_install_and_configure",
          "config": { "user_name": "Jane Doe", "settings": [{ "key": "core.eol", "value": "lf" }] } }
      ]
    }"#,
  );

  let config = InstallerConfig::load(file.path()).unwrap();
  assert!(!config.admin_check);
  assert_eq!(config.steps.len(), 2);
  assert_eq!(config.steps[0], StepDef::new("package_manager"));
  assert_eq!(config.steps[1].name, "git_install_and_configure");
  assert_eq!(config.steps[1].config["user_name"], json!("Jane Doe"));
  assert_eq!(config.steps[1].config["settings"][0]["key"], json!("core.eol"));
}

#[test]
fn test_discover_explicit_path() {
  let file = write_config(r#"{ "steps": [{ "name": "git_install_and_configure" }] }"#);
  let config = InstallerConfig::discover(Some(file.path())).unwrap();
  assert_eq!(config.steps, vec![StepDef::new("git_install_and_configure")]);
}

#[test]
fn test_load_missing_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("missing.json");

  let err = InstallerConfig::load(&path).unwrap_err();
  assert!(matches!(err, ConfigError::Io { path: p, .. } if p == path));
}

#[test]
fn test_load_invalid_json() {
  let file = write_config(r#"{ "steps": "nope" }"#);
  let err = InstallerConfig::load(file.path()).unwrap_err();
  assert!(matches!(err, ConfigError::Parse { .. }));
  assert!(err.to_string().starts_with("invalid config"));
}
