//! Scoped key-value storage shared by step and workflow run contexts.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ContextError;

/// A key-value store holding run state.
///
/// Backed by a `HashMap`, so iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextStore {
  data: HashMap<String, Value>,
}

impl ContextStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Set a value, replacing any previous value for the key.
  pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
    self.data.insert(key.into(), value.into());
  }

  /// Get a value by key.
  pub fn get(&self, key: &str) -> Result<&Value, ContextError> {
    self
      .data
      .get(key)
      .ok_or_else(|| ContextError::KeyNotFound(key.to_string()))
  }

  /// Get a value by key, or `default` when the key is absent.
  pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
    self.data.get(key).unwrap_or(default)
  }

  /// Get a value and deserialize it into `T`.
  pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, ContextError> {
    let value = self.get(key)?;
    serde_json::from_value(value.clone()).map_err(|source| ContextError::InvalidValue {
      key: key.to_string(),
      source,
    })
  }

  /// Remove a key, returning its value.
  pub fn delete(&mut self, key: &str) -> Result<Value, ContextError> {
    self
      .data
      .remove(key)
      .ok_or_else(|| ContextError::KeyNotFound(key.to_string()))
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.data.contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  /// Iterate over keys in unspecified order.
  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.data.keys().map(String::as_str)
  }

  /// Iterate over key/value pairs in unspecified order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
    self.data.iter().map(|(k, v)| (k.as_str(), v))
  }
}

/// Context scoped to a single step instance.
pub type StepRunContext = ContextStore;

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_set_then_get() {
    let mut store = ContextStore::new();
    store.set("x", 1);
    assert_eq!(store.get("x").unwrap(), &json!(1));

    store.set("x", "updated");
    assert_eq!(store.get("x").unwrap(), &json!("updated"));
    assert_eq!(store.len(), 1);
  }

  #[test]
  fn test_get_missing_key() {
    let store = ContextStore::new();
    assert!(matches!(store.get("missing"), Err(ContextError::KeyNotFound(k)) if k == "missing"));
  }

  #[test]
  fn test_delete_then_get_or_default() {
    let mut store = ContextStore::new();
    store.set("k", "v");
    assert_eq!(store.delete("k").unwrap(), json!("v"));

    let default = json!("fallback");
    assert_eq!(store.get_or("k", &default), &default);
    assert!(store.is_empty());
  }

  #[test]
  fn test_delete_missing_key() {
    let mut store = ContextStore::new();
    assert!(matches!(store.delete("nope"), Err(ContextError::KeyNotFound(_))));
  }

  #[test]
  fn test_len_tracks_net_insertions() {
    let mut store = ContextStore::new();
    store.set("a", 1);
    store.set("b", 2);
    store.set("c", 3);
    store.set("a", 4);
    store.delete("b").unwrap();
    assert_eq!(store.len(), 2);

    let mut keys: Vec<&str> = store.keys().collect();
    keys.sort();
    assert_eq!(keys, vec!["a", "c"]);
  }

  #[test]
  fn test_get_as_typed() {
    let mut store = ContextStore::new();
    store.set("is_installed", true);
    store.set("name", "Dummy User");

    assert!(store.get_as::<bool>("is_installed").unwrap());
    assert_eq!(store.get_as::<Option<String>>("name").unwrap().as_deref(), Some("Dummy User"));
    assert!(matches!(
      store.get_as::<u32>("name"),
      Err(ContextError::InvalidValue { .. })
    ));
  }
}
