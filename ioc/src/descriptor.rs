//! Constructor metadata for types the container can build.
//!
//! Rust has no runtime reflection, so every constructible type is described
//! once with a [`TypeDescriptor`]: its name, whether it can be instantiated,
//! and, if it has a constructor, the ordered parameter list and a function
//! that builds the value from resolved arguments.

use crate::core::name_of;
use crate::error::{ContainerError, Result};
use crate::instance::Instance;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Implemented by types that declare their constructor to the container.
///
/// ```
/// use skein_ioc::{Arguments, Injectable, Param, Result};
///
/// struct Greeting {
///   text: String,
/// }
///
/// impl Injectable for Greeting {
///   fn parameters() -> Vec<Param> {
///     vec![Param::typed::<String>("text").with_default(String::from("hi"))]
///   }
///
///   fn construct(args: &Arguments) -> Result<Self> {
///     Ok(Greeting { text: args.cloned::<String>(0)? })
///   }
/// }
/// ```
pub trait Injectable: Any + Send + Sync + Sized {
  fn parameters() -> Vec<Param>;

  fn construct(args: &Arguments) -> Result<Self>;
}

/// A formal constructor parameter.
#[derive(Debug, Clone)]
pub struct Param {
  name: String,
  type_name: Option<String>,
  default: Option<Instance>,
}

impl Param {
  /// An untyped parameter with no default.
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      type_name: None,
      default: None,
    }
  }

  /// A parameter whose declared type is `T`.
  pub fn typed<T: ?Sized + Any>(name: impl Into<String>) -> Self {
    Self::new(name).with_type_name(name_of::<T>())
  }

  pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
    self.type_name = Some(type_name.into());
    self
  }

  pub fn with_default<T: Any + Send + Sync>(self, value: T) -> Self {
    self.with_default_instance(Instance::new(value))
  }

  pub fn with_default_instance(mut self, value: Instance) -> Self {
    self.default = Some(value);
    self
  }

  /// Defaults to null.
  pub fn nullable(self) -> Self {
    self.with_default_instance(Instance::null())
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn type_name(&self) -> Option<&str> {
    self.type_name.as_deref()
  }

  pub fn default(&self) -> Option<&Instance> {
    self.default.as_ref()
  }
}

/// Resolved constructor arguments, in declaration order.
#[derive(Debug)]
pub struct Arguments<'a> {
  owner: &'a str,
  params: &'a [Param],
  values: Vec<Instance>,
}

impl<'a> Arguments<'a> {
  pub(crate) fn new(owner: &'a str, params: &'a [Param], values: Vec<Instance>) -> Self {
    Self {
      owner,
      params,
      values,
    }
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn instance(&self, index: usize) -> Result<&Instance> {
    self.values.get(index).ok_or_else(|| {
      ContainerError::MissingArgument {
        owner: self.owner.to_owned(),
        index,
      }
      .into()
    })
  }

  pub fn value<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>> {
    Ok(self.instance(index)?.expect_type::<T>(&self.target(index))?)
  }

  /// Null becomes `None`.
  pub fn optional<T: Any + Send + Sync>(&self, index: usize) -> Result<Option<Arc<T>>> {
    let instance = self.instance(index)?;
    if instance.is_null() {
      return Ok(None);
    }
    Ok(Some(instance.expect_type::<T>(&self.target(index))?))
  }

  pub fn cloned<T: Any + Send + Sync + Clone>(&self, index: usize) -> Result<T> {
    self.value::<T>(index).map(|value| (*value).clone())
  }

  pub fn trait_object<I: ?Sized + Any + Send + Sync>(&self, index: usize) -> Result<Arc<I>> {
    Ok(self.instance(index)?.expect_trait::<I>(&self.target(index))?)
  }

  fn target(&self, index: usize) -> String {
    match self.params.get(index) {
      Some(param) => format!("{}::${}", self.owner, param.name()),
      None => self.owner.to_owned(),
    }
  }
}

type ConstructFn = dyn Fn(&Arguments) -> Result<Instance> + Send + Sync;

fn erase<F>(construct: F) -> Arc<ConstructFn>
where
  F: Fn(&Arguments) -> Result<Instance> + Send + Sync + 'static,
{
  Arc::new(construct)
}

#[derive(Clone)]
pub(crate) enum Shape {
  Abstract,
  NoConstructor(Arc<dyn Fn() -> Instance + Send + Sync>),
  Constructor {
    params: Vec<Param>,
    construct: Arc<ConstructFn>,
  },
}

/// Registration record for one constructible (or deliberately abstract) type.
#[derive(Clone)]
pub struct TypeDescriptor {
  name: String,
  pub(crate) shape: Shape,
}

impl TypeDescriptor {
  /// Registers a trait or other type that must never be instantiated.
  pub fn interface<T: ?Sized + Any>() -> Self {
    Self::named_interface(name_of::<T>())
  }

  pub fn named_interface(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      shape: Shape::Abstract,
    }
  }

  /// A type without a constructor, built from `Default`.
  pub fn without_constructor<T: Default + Any + Send + Sync>() -> Self {
    Self {
      name: name_of::<T>().to_owned(),
      shape: Shape::NoConstructor(Arc::new(|| Instance::new(T::default()))),
    }
  }

  pub fn with_constructor<T, F>(params: Vec<Param>, construct: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Arguments) -> Result<T> + Send + Sync + 'static,
  {
    Self {
      name: name_of::<T>().to_owned(),
      shape: Shape::Constructor {
        params,
        construct: erase(move |args| construct(args).map(Instance::new)),
      },
    }
  }

  pub fn of<T: Injectable>() -> Self {
    Self::with_constructor(T::parameters(), T::construct)
  }

  /// Registers the type under `name` instead of its Rust type name.
  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = name.into();
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn is_instantiable(&self) -> bool {
    !matches!(self.shape, Shape::Abstract)
  }

  /// Declared constructor parameters; empty when there is no constructor.
  pub fn parameters(&self) -> &[Param] {
    match &self.shape {
      Shape::Constructor { params, .. } => params,
      _ => &[],
    }
  }
}

impl fmt::Debug for TypeDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let shape = match &self.shape {
      Shape::Abstract => "abstract",
      Shape::NoConstructor(_) => "no-constructor",
      Shape::Constructor { .. } => "constructor",
    };
    f.debug_struct("TypeDescriptor")
      .field("name", &self.name)
      .field("shape", &shape)
      .field("parameters", &self.parameters())
      .finish()
  }
}
