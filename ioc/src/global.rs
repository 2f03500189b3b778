//! The process-wide container instance and access functions.

use crate::container::Container;
use once_cell::sync::Lazy;
use std::ops::Deref;

// Created on first access, in a thread-safe manner.
static SHARED_CONTAINER: Lazy<SingletonContainer> = Lazy::new(|| SingletonContainer {
  inner: Container::new(),
});

/// A [`Container`] that exists exactly once per process.
///
/// The only way to reach it is [`SingletonContainer::instance`] (or
/// [`global`]). It has no public constructor and does not implement `Clone`:
///
/// ```compile_fail
/// let copy: skein_ioc::SingletonContainer = skein_ioc::global().clone();
/// ```
///
/// ```compile_fail
/// let other = skein_ioc::SingletonContainer { inner: skein_ioc::Container::new() };
/// ```
///
/// With the `serde` feature it implements `Deserialize` only to refuse it
/// with [`ContainerError::SingletonViolation`](crate::ContainerError::SingletonViolation).
pub struct SingletonContainer {
  inner: Container,
}

impl SingletonContainer {
  pub fn instance() -> &'static SingletonContainer {
    &SHARED_CONTAINER
  }

  pub fn container(&self) -> &Container {
    &self.inner
  }
}

impl Deref for SingletonContainer {
  type Target = Container;

  fn deref(&self) -> &Container {
    &self.inner
  }
}

/// Provides a reference to the process-wide container.
///
/// # Examples
///
/// ```
/// use skein_ioc::global;
///
/// global().singleton("app.name", skein_ioc::Concrete::literal("skein"));
/// let name = global().get_as::<&str>("app.name").unwrap();
/// assert_eq!(*name, "skein");
/// ```
pub fn global() -> &'static SingletonContainer {
  SingletonContainer::instance()
}

#[cfg(feature = "serde")]
mod guard {
  use super::SingletonContainer;
  use crate::error::{ContainerError, SingletonOperation};
  use serde::de::{Deserialize, Deserializer, Error as _};

  impl<'de> Deserialize<'de> for SingletonContainer {
    fn deserialize<D: Deserializer<'de>>(_deserializer: D) -> Result<Self, D::Error> {
      Err(D::Error::custom(ContainerError::SingletonViolation(
        SingletonOperation::Deserialize,
      )))
    }
  }
}
