//! Literal bindings loaded from YAML or JSON documents.

use crate::container::Container;
use crate::error::{Error, Result};
use crate::instance::Instance;
use serde::Deserialize;
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// A flat map of identifiers to constant values.
///
/// ```yaml
/// app.name: skein
/// app.debug: true
/// db.pool_size: 8
/// db.hosts: [primary, replica]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Constants {
  values: BTreeMap<String, Value>,
}

impl Constants {
  pub fn from_yaml_str(source: &str) -> Result<Self> {
    serde_yaml::from_str(source).map_err(|e| Error::Constants(Box::new(e)))
  }

  pub fn from_json_str(source: &str) -> Result<Self> {
    serde_json::from_str(source).map_err(|e| Error::Constants(Box::new(e)))
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
    self.values.iter().map(|(key, value)| (key.as_str(), value))
  }
}

/// Strings, booleans, numbers and null become their Rust counterparts;
/// sequences and maps stay as `serde_json::Value`.
fn to_instance(value: &Value) -> Instance {
  match value {
    Value::Null => Instance::null(),
    Value::Bool(flag) => Instance::new(*flag),
    Value::String(text) => Instance::new(text.clone()),
    Value::Number(number) => number_instance(number),
    Value::Array(_) | Value::Object(_) => Instance::new(value.clone()),
  }
}

fn number_instance(number: &Number) -> Instance {
  if let Some(int) = number.as_i64() {
    Instance::new(int)
  } else if let Some(uint) = number.as_u64() {
    Instance::new(uint)
  } else {
    Instance::new(number.as_f64().unwrap_or(f64::NAN))
  }
}

impl Container {
  /// Binds every constant as a literal, non-shared binding.
  pub fn bind_constants(&self, constants: &Constants) {
    debug!(count = constants.len(), "binding constants");
    for (id, value) in constants.iter() {
      self.bind(id, to_instance(value));
    }
  }
}
