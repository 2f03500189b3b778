//! The main `Container` struct and its registration methods.

use crate::core::{name_of, Aliases, Binding, Concrete, InstanceSlot};
use crate::descriptor::{Injectable, TypeDescriptor};
use crate::instance::Instance;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, trace};

/// The dependency injection container.
///
/// Holds the binding registry (identifier to construction strategy), the
/// cached values of shared bindings, and the table of types it knows how to
/// construct. It is thread-safe: bindings and types can be added at any point,
/// from any thread, while other threads resolve.
#[derive(Default)]
pub struct Container {
  pub(crate) bindings: DashMap<String, Binding>,
  pub(crate) types: DashMap<String, Arc<TypeDescriptor>>,
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- Type Registration ---

  /// Makes a type constructible under `descriptor.name()`. Re-registering replaces it.
  ///
  /// If an alias was already bound to this type by name and the type name
  /// itself is still unbound, the type name receives that alias's binding,
  /// the same as if the type had been registered before the `bind`.
  pub fn register(&self, descriptor: TypeDescriptor) {
    let name = descriptor.name().to_owned();
    debug!(
      name = name.as_str(),
      instantiable = descriptor.is_instantiable(),
      parameters = descriptor.parameters().len(),
      "registering type"
    );
    self.types.insert(name.clone(), Arc::new(descriptor));

    if self.has(&name) {
      return;
    }
    // Collected first: inserting while iterating would lock the same shard.
    let aliased = self
      .bindings
      .iter()
      .find(|entry| entry.value().concrete.class_name() == Some(name.as_str()))
      .map(|entry| entry.value().clone());
    if let Some(binding) = aliased {
      self.insert_binding(&name, binding);
    }
  }

  pub fn register_type<T: Injectable>(&self) {
    self.register(TypeDescriptor::of::<T>());
  }

  pub fn is_registered(&self, name: &str) -> bool {
    self.types.contains_key(name)
  }

  pub(crate) fn descriptor(&self, name: &str) -> Option<Arc<TypeDescriptor>> {
    self.types.get(name).map(|entry| Arc::clone(entry.value()))
  }

  // --- Binding Registration ---

  /// Binds `aliases` to `concrete` as a non-shared binding.
  pub fn bind(&self, aliases: impl Into<Aliases>, concrete: impl Into<Concrete>) {
    self.bind_shared(aliases, concrete, false);
  }

  /// Binds each identifier to itself, so it is constructed as a registered type.
  pub fn bind_self(&self, aliases: impl Into<Aliases>) {
    self.bind_shared(aliases, Concrete::SameAsAbstract, false);
  }

  /// Binds `aliases` to `concrete` as a shared binding: the first `get`
  /// builds the value, every later `get` returns that same instance.
  pub fn singleton(&self, aliases: impl Into<Aliases>, concrete: impl Into<Concrete>) {
    self.bind_shared(aliases, concrete, true);
  }

  /// Binds every identifier in `aliases` to `concrete`.
  ///
  /// The last binding for an identifier wins. A value already cached for an
  /// identifier outlives rebinding it, and is returned whenever the binding
  /// in place is shared.
  ///
  /// When `concrete` is a [`Concrete::Class`] naming a *registered* type
  /// that is not the single identifier being bound, the type name is bound
  /// to the same concrete as well, so it can be resolved directly. For
  /// example, `bind("mailer", Concrete::class::<SmtpMailer>())` makes both
  /// `"mailer"` and the type name of `SmtpMailer` resolvable. If the type is
  /// registered later, [`register`](Container::register) adds the type name
  /// binding then.
  ///
  /// All identifiers written by one call share a single cache slot, so a
  /// shared binding yields one instance no matter which alias resolves it.
  /// [`Concrete::SameAsAbstract`] is the exception: each identifier names a
  /// different type and gets its own slot.
  pub fn bind_shared(&self, aliases: impl Into<Aliases>, concrete: impl Into<Concrete>, shared: bool) {
    let aliases = aliases.into();
    let concrete = concrete.into();

    if let Concrete::SameAsAbstract = concrete {
      for alias in aliases.iter() {
        self.insert_binding(alias, Binding::new(Concrete::SameAsAbstract, shared, fresh_slot()));
      }
      return;
    }

    let slot = fresh_slot();
    if let Some(class) = concrete.class_name() {
      if !aliases.is_single(class) && self.is_registered(class) {
        self.insert_binding(class, Binding::new(concrete.clone(), shared, Arc::clone(&slot)));
      }
    }

    for alias in aliases.iter() {
      self.insert_binding(alias, Binding::new(concrete.clone(), shared, Arc::clone(&slot)));
    }
  }

  fn insert_binding(&self, id: &str, mut binding: Binding) {
    debug!(id, concrete = ?binding.concrete, shared = binding.shared, "binding");
    match self.bindings.entry(id.to_owned()) {
      Entry::Occupied(mut entry) => {
        if entry.get().cached().is_some() {
          trace!(id, "keeping cached instance across rebind");
          binding.slot = Arc::clone(&entry.get().slot);
        }
        entry.insert(binding);
      }
      Entry::Vacant(entry) => {
        entry.insert(binding);
      }
    }
  }

  // --- Inspection ---

  /// Returns `true` if `id` has a binding or a cached instance.
  pub fn has(&self, id: &str) -> bool {
    self.bindings.contains_key(id)
  }

  pub fn has_type<T: ?Sized + Any>(&self) -> bool {
    self.has(name_of::<T>())
  }

  /// `Some(shared)` for a bound identifier.
  pub fn is_shared(&self, id: &str) -> Option<bool> {
    self.bindings.get(id).map(|binding| binding.shared)
  }

  /// The value cached for `id`, without building it. It may have been cached
  /// under an earlier binding.
  pub fn cached(&self, id: &str) -> Option<Instance> {
    self
      .bindings
      .get(id)
      .and_then(|binding| binding.cached().cloned())
  }
}

fn fresh_slot() -> InstanceSlot {
  Arc::new(OnceCell::new())
}
