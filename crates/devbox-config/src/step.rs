use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A step entry of the installer configuration.
///
/// `name` selects the step implementation; `config` is handed to it as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDef {
  pub name: String,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub config: BTreeMap<String, Value>,
}

impl StepDef {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      config: BTreeMap::new(),
    }
  }
}
