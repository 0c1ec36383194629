use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use stepbystep::StepModel;

/// Deserialize the config of `model` into a typed step config.
pub(crate) fn step_config<T: DeserializeOwned>(model: &StepModel) -> Result<T, serde_json::Error> {
  let map: Map<String, Value> = model
    .config()
    .iter()
    .map(|(k, v)| (k.clone(), v.clone()))
    .collect();
  serde_json::from_value(Value::Object(map))
}
