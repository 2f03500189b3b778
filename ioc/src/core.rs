//! Binding data: identifiers, construction strategies and the shared-instance slot.

use crate::container::Container;
use crate::error::Result;
use crate::instance::{Getter, Instance, Parameters};
use once_cell::sync::OnceCell;
use std::any::{type_name, Any};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

thread_local! {
  // Addresses of the shared slots whose first build is running on this thread.
  static BUILDING: RefCell<HashSet<usize>> = RefCell::new(HashSet::new());
}

/// Returns the identifier under which type `T` is known to the container.
pub fn name_of<T: ?Sized + Any>() -> &'static str {
  type_name::<T>()
}

/// One identifier, or an ordered set of aliases that all receive the same binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aliases {
  One(String),
  Many(Vec<String>),
}

impl Aliases {
  /// The identifier of type `T`.
  pub fn of<T: ?Sized + Any>() -> Self {
    Aliases::One(name_of::<T>().to_owned())
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    let items: &[String] = match self {
      Aliases::One(one) => std::slice::from_ref(one),
      Aliases::Many(many) => many,
    };
    items.iter().map(String::as_str)
  }

  /// `true` when this is exactly one identifier equal to `id`.
  pub(crate) fn is_single(&self, id: &str) -> bool {
    matches!(self, Aliases::One(one) if one == id)
  }
}

impl From<&str> for Aliases {
  fn from(id: &str) -> Self {
    Aliases::One(id.to_owned())
  }
}

impl From<String> for Aliases {
  fn from(id: String) -> Self {
    Aliases::One(id)
  }
}

impl From<&String> for Aliases {
  fn from(id: &String) -> Self {
    Aliases::One(id.clone())
  }
}

impl From<Vec<String>> for Aliases {
  fn from(ids: Vec<String>) -> Self {
    Aliases::Many(ids)
  }
}

impl From<Vec<&str>> for Aliases {
  fn from(ids: Vec<&str>) -> Self {
    Aliases::Many(ids.into_iter().map(str::to_owned).collect())
  }
}

impl From<&[&str]> for Aliases {
  fn from(ids: &[&str]) -> Self {
    Aliases::Many(ids.iter().map(|id| (*id).to_owned()).collect())
  }
}

impl<const N: usize> From<[&str; N]> for Aliases {
  fn from(ids: [&str; N]) -> Self {
    Aliases::Many(ids.iter().map(|id| (*id).to_owned()).collect())
  }
}

type FactoryFn = dyn Fn(&Container, &Parameters) -> Result<Instance> + Send + Sync;

/// User code that produces the value for a binding.
///
/// The factory owns its construction logic entirely: whatever it returns,
/// including a null instance, is what `get` hands back. It may resolve other
/// identifiers from the container it is given.
#[derive(Clone)]
pub struct Factory(Arc<FactoryFn>);

impl Factory {
  pub fn new<F>(factory: F) -> Self
  where
    F: Fn(&Container, &Parameters) -> Result<Instance> + Send + Sync + 'static,
  {
    Self(Arc::new(factory))
  }

  /// A factory that only reads the parameter bag.
  pub fn getter<F>(factory: F) -> Self
  where
    F: Fn(Getter<'_>) -> Result<Instance> + Send + Sync + 'static,
  {
    Self::new(move |_, parameters| factory(parameters.getter()))
  }

  pub(crate) fn call(&self, container: &Container, parameters: &Parameters) -> Result<Instance> {
    (self.0)(container, parameters)
  }
}

impl fmt::Debug for Factory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Factory(..)")
  }
}

/// How a binding produces its value.
#[derive(Debug, Clone)]
pub enum Concrete {
  /// Construct the bound identifier itself as a type.
  SameAsAbstract,
  /// Construct the named type. If no type is registered under the name,
  /// the name itself is returned as a `String`.
  Class(String),
  Factory(Factory),
  /// Hand out the value as is.
  Literal(Instance),
}

impl Concrete {
  pub fn class<T: ?Sized + Any>() -> Self {
    Concrete::Class(name_of::<T>().to_owned())
  }

  pub fn factory<F>(factory: F) -> Self
  where
    F: Fn(&Container, &Parameters) -> Result<Instance> + Send + Sync + 'static,
  {
    Concrete::Factory(Factory::new(factory))
  }

  pub fn getter<F>(factory: F) -> Self
  where
    F: Fn(Getter<'_>) -> Result<Instance> + Send + Sync + 'static,
  {
    Concrete::Factory(Factory::getter(factory))
  }

  pub fn literal<T: Any + Send + Sync>(value: T) -> Self {
    Concrete::Literal(Instance::new(value))
  }

  pub fn null() -> Self {
    Concrete::Literal(Instance::null())
  }

  pub(crate) fn class_name(&self) -> Option<&str> {
    match self {
      Concrete::Class(name) => Some(name),
      _ => None,
    }
  }
}

impl From<&str> for Concrete {
  fn from(name: &str) -> Self {
    Concrete::Class(name.to_owned())
  }
}

impl From<String> for Concrete {
  fn from(name: String) -> Self {
    Concrete::Class(name)
  }
}

impl From<Factory> for Concrete {
  fn from(factory: Factory) -> Self {
    Concrete::Factory(factory)
  }
}

impl From<Instance> for Concrete {
  fn from(value: Instance) -> Self {
    Concrete::Literal(value)
  }
}

pub(crate) type InstanceSlot = Arc<OnceCell<Instance>>;

#[derive(Debug, Clone)]
pub(crate) struct Binding {
  pub(crate) concrete: Concrete,
  pub(crate) shared: bool,
  // Aliases registered by one `bind` call point at the same slot.
  pub(crate) slot: InstanceSlot,
}

impl Binding {
  pub(crate) fn new(concrete: Concrete, shared: bool, slot: InstanceSlot) -> Self {
    Self {
      concrete,
      shared,
      slot,
    }
  }

  pub(crate) fn cached(&self) -> Option<&Instance> {
    self.slot.get()
  }
}

/// Marks a shared slot as being built by the current thread until dropped.
///
/// A shared binding that resolves itself re-enters its own slot. Waiting on
/// the slot from the thread that is filling it would never return, so the
/// resolver asks for a guard first and builds outside the slot when this
/// thread already holds one.
pub(crate) struct BuildGuard {
  slot: usize,
}

impl BuildGuard {
  /// `None` if this thread is already building `slot`.
  pub(crate) fn enter(slot: &InstanceSlot) -> Option<Self> {
    let slot = Arc::as_ptr(slot) as usize;
    let entered = BUILDING.with(|building| building.borrow_mut().insert(slot));
    entered.then_some(Self { slot })
  }
}

impl Drop for BuildGuard {
  fn drop(&mut self) {
    BUILDING.with(|building| {
      building.borrow_mut().remove(&self.slot);
    });
  }
}
