//! Resolution: turning a bound identifier into a value.

use crate::container::Container;
use crate::core::{name_of, Binding, BuildGuard, Concrete};
use crate::descriptor::{Arguments, Param, Shape, TypeDescriptor};
use crate::error::{ContainerError, NotFoundError, Result};
use crate::instance::{Instance, Parameters};
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, trace};

impl Container {
  /// Resolves `id` with no explicit parameters.
  pub fn get(&self, id: &str) -> Result<Instance> {
    self.get_with(id, &Parameters::new())
  }

  /// Resolves `id`, consulting `parameters` before any binding when a
  /// constructor parameter has to be filled.
  ///
  /// A shared binding that already holds a value returns it and ignores
  /// `parameters`. Concurrent first calls build once; the others wait for
  /// that value. A shared binding that resolves itself is not cached until
  /// the outermost build returns, so an unbounded self-dependency overflows
  /// the stack just like a non-shared one.
  pub fn get_with(&self, id: &str, parameters: &Parameters) -> Result<Instance> {
    // Clone the binding out so no map lock is held while building.
    let binding: Binding = self
      .bindings
      .get(id)
      .map(|entry| entry.value().clone())
      .ok_or_else(|| NotFoundError::Identifier(id.to_owned()))?;

    if !binding.shared {
      return self.build(id, &binding.concrete, parameters);
    }

    if let Some(instance) = binding.cached() {
      trace!(id, "returning cached instance");
      return Ok(instance.clone());
    }

    // Re-entered from its own build: recurse like a non-shared binding.
    let Some(_guard) = BuildGuard::enter(&binding.slot) else {
      trace!(id, "shared binding re-entered while building");
      return self.build(id, &binding.concrete, parameters);
    };

    binding
      .slot
      .get_or_try_init(|| self.build(id, &binding.concrete, parameters))
      .cloned()
  }

  pub fn get_as<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>> {
    self.get_as_with(id, &Parameters::new())
  }

  pub fn get_as_with<T: Any + Send + Sync>(&self, id: &str, parameters: &Parameters) -> Result<Arc<T>> {
    Ok(self.get_with(id, parameters)?.expect_type::<T>(id)?)
  }

  pub fn get_trait<I: ?Sized + Any + Send + Sync>(&self, id: &str) -> Result<Arc<I>> {
    Ok(self.get(id)?.expect_trait::<I>(id)?)
  }

  /// Resolves the binding registered under the type name of `T`.
  pub fn resolve<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
    self.get_as::<T>(name_of::<T>())
  }

  pub fn resolve_with<T: Any + Send + Sync>(&self, parameters: &Parameters) -> Result<Arc<T>> {
    self.get_as_with::<T>(name_of::<T>(), parameters)
  }

  pub fn resolve_trait<I: ?Sized + Any + Send + Sync>(&self) -> Result<Arc<I>> {
    self.get_trait::<I>(name_of::<I>())
  }

  fn build(&self, id: &str, concrete: &Concrete, parameters: &Parameters) -> Result<Instance> {
    let class = match concrete {
      Concrete::Factory(factory) => {
        trace!(id, "invoking factory");
        return factory.call(self, parameters);
      }
      Concrete::Literal(value) => return Ok(value.clone()),
      Concrete::SameAsAbstract => id,
      Concrete::Class(name) => name.as_str(),
    };

    match self.descriptor(class) {
      Some(descriptor) => self.instantiate(&descriptor, parameters).map_err(|err| {
        debug!(id, class, error = %err, "failed to build");
        err
      }),
      // Not a known type: the name is the value.
      None => Ok(Instance::new(class.to_owned())),
    }
  }

  fn instantiate(&self, descriptor: &TypeDescriptor, parameters: &Parameters) -> Result<Instance> {
    let owner = descriptor.name();
    match &descriptor.shape {
      Shape::Abstract => Err(ContainerError::NotInstantiable(owner.to_owned()).into()),
      Shape::NoConstructor(construct) => {
        trace!(class = owner, "constructing without arguments");
        Ok(construct())
      }
      Shape::Constructor { params, construct } => {
        let values = params
          .iter()
          .map(|param| self.resolve_argument(owner, param, parameters))
          .collect::<Result<Vec<_>>>()?;
        trace!(class = owner, arguments = values.len(), "constructing");
        construct(&Arguments::new(owner, params, values))
      }
    }
  }

  /// Fills one constructor parameter. The first rule that applies wins:
  ///
  /// 1. an explicit parameter with the parameter's name,
  /// 2. an explicit parameter keyed by the parameter's type name,
  /// 3. the declared default,
  /// 4. a binding for the type name,
  /// 5. a binding for the parameter name.
  fn resolve_argument(&self, owner: &str, param: &Param, parameters: &Parameters) -> Result<Instance> {
    if let Some(value) = parameters.get(param.name()) {
      return Ok(value.clone());
    }

    let type_name = param.type_name();
    if let Some(value) = type_name.and_then(|type_name| parameters.get(type_name)) {
      return Ok(value.clone());
    }

    if let Some(default) = param.default() {
      return Ok(default.clone());
    }

    if let Some(type_name) = type_name.filter(|type_name| self.has(type_name)) {
      trace!(class = owner, param = param.name(), type_name, "resolving by type");
      return self.get(type_name);
    }

    if self.has(param.name()) {
      trace!(class = owner, param = param.name(), "resolving by name");
      return self.get(param.name());
    }

    Err(
      NotFoundError::Parameter {
        owner: owner.to_owned(),
        name: param.name().to_owned(),
        type_name: type_name.map(str::to_owned),
      }
      .into(),
    )
  }
}
