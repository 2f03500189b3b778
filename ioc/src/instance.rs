//! Type-erased values handed out by the container, and the per-call parameter bag.

use crate::error::ContainerError;
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The value stored behind [`Instance::null`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Null;

/// A shared, type-erased value produced by the container.
///
/// Cloning an `Instance` clones the handle, not the value: two clones are
/// [`ptr_eq`](Instance::ptr_eq). Shared bindings hand out clones of one cached
/// handle, which is how callers observe singleton identity.
#[derive(Clone)]
pub struct Instance {
  value: Arc<dyn Any + Send + Sync>,
  type_name: &'static str,
}

impl Instance {
  pub fn new<T: Any + Send + Sync>(value: T) -> Self {
    Self::from_arc(Arc::new(value))
  }

  pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
    Self {
      value,
      type_name: type_name::<T>(),
    }
  }

  /// Wraps a trait object. Read it back with [`downcast_trait`](Instance::downcast_trait).
  pub fn from_trait<I: ?Sized + Any + Send + Sync>(value: Arc<I>) -> Self {
    Self {
      value: Arc::new(value),
      type_name: type_name::<I>(),
    }
  }

  pub fn null() -> Self {
    Self::new(Null)
  }

  pub fn is_null(&self) -> bool {
    self.is::<Null>()
  }

  pub fn is<T: Any>(&self) -> bool {
    (*self.value).is::<T>()
  }

  /// The name of the type this handle was created from.
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
    self.value.clone().downcast::<T>().ok()
  }

  pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
    (*self.value).downcast_ref::<T>()
  }

  pub fn downcast_trait<I: ?Sized + Any + Send + Sync>(&self) -> Option<Arc<I>> {
    (*self.value).downcast_ref::<Arc<I>>().cloned()
  }

  /// Like [`downcast`](Instance::downcast), but reports what was found instead.
  pub fn expect_type<T: Any + Send + Sync>(&self, target: &str) -> Result<Arc<T>, ContainerError> {
    self.downcast::<T>().ok_or_else(|| self.mismatch::<T>(target))
  }

  pub fn expect_trait<I: ?Sized + Any + Send + Sync>(
    &self,
    target: &str,
  ) -> Result<Arc<I>, ContainerError> {
    self.downcast_trait::<I>().ok_or_else(|| self.mismatch::<I>(target))
  }

  fn mismatch<T: ?Sized>(&self, target: &str) -> ContainerError {
    ContainerError::TypeMismatch {
      target: target.to_owned(),
      expected: type_name::<T>(),
      found: self.type_name,
    }
  }

  /// Returns `true` if both handles point at the same value.
  pub fn ptr_eq(a: &Instance, b: &Instance) -> bool {
    Arc::ptr_eq(&a.value, &b.value)
  }
}

impl fmt::Debug for Instance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Instance").field(&self.type_name).finish()
  }
}

/// Explicit values for a single resolution, keyed by parameter name or by
/// parameter type name. Nothing in the bag outlives the `get` call it is passed to.
#[derive(Clone, Default, Debug)]
pub struct Parameters {
  values: HashMap<String, Instance>,
}

impl Parameters {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with<T: Any + Send + Sync>(self, key: impl Into<String>, value: T) -> Self {
    self.with_instance(key, Instance::new(value))
  }

  pub fn with_instance(mut self, key: impl Into<String>, value: Instance) -> Self {
    self.insert(key, value);
    self
  }

  pub fn insert(&mut self, key: impl Into<String>, value: Instance) -> Option<Instance> {
    self.values.insert(key.into(), value)
  }

  pub fn get(&self, key: &str) -> Option<&Instance> {
    self.values.get(key)
  }

  pub fn contains(&self, key: &str) -> bool {
    self.values.contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.values.keys().map(String::as_str)
  }

  pub fn getter(&self) -> Getter<'_> {
    Getter { parameters: self }
  }
}

impl<K: Into<String>> FromIterator<(K, Instance)> for Parameters {
  fn from_iter<I: IntoIterator<Item = (K, Instance)>>(iter: I) -> Self {
    let mut parameters = Parameters::new();
    for (key, value) in iter {
      parameters.insert(key, value);
    }
    parameters
  }
}

/// Read-only accessor over a [`Parameters`] bag, handed to getter-style factories.
#[derive(Clone, Copy, Debug)]
pub struct Getter<'a> {
  parameters: &'a Parameters,
}

impl<'a> Getter<'a> {
  pub fn get(&self, key: &str) -> Option<Instance> {
    self.parameters.get(key).cloned()
  }

  /// Returns `default` when `key` is missing or holds null.
  pub fn get_or(&self, key: &str, default: Instance) -> Instance {
    match self.parameters.get(key) {
      Some(value) if !value.is_null() => value.clone(),
      _ => default,
    }
  }

  pub fn value<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
    self.parameters.get(key).and_then(Instance::downcast::<T>)
  }

  pub fn parameters(&self) -> &'a Parameters {
    self.parameters
  }
}
