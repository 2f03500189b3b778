//! Public macros for ergonomic resolution and parameter bags.

/// Resolves a value from the global container, returning `Option<Arc<_>>`.
///
/// Accepts the same forms as [`resolve!`]; any error becomes `None`.
#[macro_export]
macro_rules! maybe_resolve {
  ($($args:tt)+) => {
    $crate::maybe_resolve_from!($crate::global(), $($args)+)
  };
}

/// Resolves a value from the global container.
///
/// `resolve!(Type)` looks up the type name of `Type`, `resolve!(Type, "id")`
/// looks up `"id"`, and the `trait` forms do the same for trait objects.
///
/// # Panics
///
/// Panics if the value cannot be resolved. For a fallible version, use
/// `global().get_as(...)` or [`maybe_resolve!`].
///
/// # Examples
///
/// ```
/// use skein_ioc::{global, resolve, Concrete};
///
/// global().singleton("greeting", Concrete::literal(String::from("hello")));
///
/// let message = resolve!(String, "greeting");
/// assert_eq!(*message, "hello");
/// ```
#[macro_export]
macro_rules! resolve {
  ($($args:tt)+) => {
    $crate::resolve_from!($crate::global(), $($args)+)
  };
}

/// Like [`maybe_resolve!`], against an explicit container.
#[macro_export]
macro_rules! maybe_resolve_from {
  ($container:expr, trait $trait_ident:ident) => {
    $container.resolve_trait::<dyn $trait_ident>().ok()
  };

  ($container:expr, trait $trait_ident:ident, $id:expr) => {
    $container.get_trait::<dyn $trait_ident>($id).ok()
  };

  ($container:expr, $type:ty) => {
    $container.resolve::<$type>().ok()
  };

  ($container:expr, $type:ty, $id:expr) => {
    $container.get_as::<$type>($id).ok()
  };
}

/// Like [`resolve!`], against an explicit container.
#[macro_export]
macro_rules! resolve_from {
  ($container:expr, trait $trait_ident:ident) => {
    $container
      .resolve_trait::<dyn $trait_ident>()
      .unwrap_or_else(|err| {
        panic!(
          "Failed to resolve required trait service: {}: {}",
          std::any::type_name::<dyn $trait_ident>(),
          err
        )
      })
  };

  ($container:expr, trait $trait_ident:ident, $id:expr) => {
    $container
      .get_trait::<dyn $trait_ident>($id)
      .unwrap_or_else(|err| {
        panic!(
          "Failed to resolve required trait service with id '{}': {}",
          $id, err
        )
      })
  };

  ($container:expr, $type:ty) => {
    $container.resolve::<$type>().unwrap_or_else(|err| {
      panic!(
        "Failed to resolve required service: {}: {}",
        std::any::type_name::<$type>(),
        err
      )
    })
  };

  ($container:expr, $type:ty, $id:expr) => {
    $container.get_as::<$type>($id).unwrap_or_else(|err| {
      panic!(
        "Failed to resolve required service with id '{}': {}",
        $id, err
      )
    })
  };
}

/// Builds a [`Parameters`](crate::Parameters) bag.
///
/// ```
/// use skein_ioc::parameters;
///
/// let params = parameters! { "value" => String::from("bar"), "retries" => 3_u32 };
/// assert_eq!(params.len(), 2);
/// ```
#[macro_export]
macro_rules! parameters {
  () => {
    $crate::Parameters::new()
  };

  ($($key:expr => $value:expr),+ $(,)?) => {
    $crate::Parameters::new()$(.with($key, $value))+
  };
}
