//! # Skein IoC
//!
//! A thread-safe dependency injection container keyed by strings.
//!
//! Identifiers are type names, interface names or arbitrary aliases. Each one
//! is bound to a construction strategy: a registered type to build, a factory
//! closure, or a literal value. Resolving an identifier builds the whole
//! object graph behind it, filling each constructor parameter from explicit
//! call-site parameters, defaults or other bindings.
//!
//! ## Core Concepts
//!
//! - **Container**: the binding registry, the shared-instance cache, and the
//!   table of constructible types.
//! - **Type descriptors**: Rust has no runtime reflection, so constructible
//!   types declare their constructor parameters through [`TypeDescriptor`] or
//!   the [`Injectable`] trait.
//! - **Shared bindings**: [`Container::singleton`] builds once and hands out the
//!   same [`Instance`] afterwards.
//! - **Global container**: a process-wide container, reachable through [`global()`].
//!
//! ## Quick Start
//!
//! ```
//! use skein_ioc::{name_of, Arguments, Concrete, Container, Injectable, Param, Result};
//! use std::sync::Arc;
//!
//! struct Database {
//!   url: String,
//! }
//!
//! impl Injectable for Database {
//!   fn parameters() -> Vec<Param> {
//!     vec![Param::new("db.url")]
//!   }
//!
//!   fn construct(args: &Arguments) -> Result<Self> {
//!     Ok(Database { url: args.cloned::<String>(0)? })
//!   }
//! }
//!
//! struct UserService {
//!   db: Arc<Database>,
//! }
//!
//! impl Injectable for UserService {
//!   fn parameters() -> Vec<Param> {
//!     vec![Param::typed::<Database>("db")]
//!   }
//!
//!   fn construct(args: &Arguments) -> Result<Self> {
//!     Ok(UserService { db: args.value::<Database>(0)? })
//!   }
//! }
//!
//! let container = Container::new();
//! container.register_type::<Database>();
//! container.register_type::<UserService>();
//!
//! container.bind("db.url", Concrete::literal(String::from("postgres://localhost/app")));
//! container.singleton(name_of::<Database>(), Concrete::SameAsAbstract);
//! container.bind("users", Concrete::class::<UserService>());
//!
//! let users = container.get_as::<UserService>("users").unwrap();
//! assert_eq!(users.db.url, "postgres://localhost/app");
//! ```

mod container;
mod core;
mod descriptor;
mod error;
mod global;
mod instance;
mod macros;
mod resolver;

#[cfg(feature = "serde")]
mod constants;

pub use crate::core::{name_of, Aliases, Concrete, Factory};
pub use container::Container;
pub use descriptor::{Arguments, Injectable, Param, TypeDescriptor};
pub use error::{ContainerError, Error, NotFoundError, Result, SingletonOperation};
pub use global::{global, SingletonContainer};
pub use instance::{Getter, Instance, Null, Parameters};

#[cfg(feature = "serde")]
pub use constants::Constants;
