//! Error types returned by container operations.

use std::fmt;
use thiserror::Error;

/// A binding or a constructor parameter could not be satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFoundError {
  #[error("Unable to resolve dependency: '{0}'")]
  Identifier(String),

  #[error(
    "Unable to resolve dependency: [{}] ${name} of '{owner}'",
    .type_name.as_deref().unwrap_or("")
  )]
  Parameter {
    owner: String,
    name: String,
    type_name: Option<String>,
  },
}

/// The operation that was refused on the process-wide container.
///
/// Construction and cloning are already rejected at compile time, so only
/// deserialization can be refused at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingletonOperation {
  Deserialize,
}

impl fmt::Display for SingletonOperation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SingletonOperation::Deserialize => f.write_str("deserialize"),
    }
  }
}

/// The container refused to produce or hand out a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
  #[error("Type '{0}' is not instantiable")]
  NotInstantiable(String),

  #[error("Cannot {0} a singleton container")]
  SingletonViolation(SingletonOperation),

  #[error("Expected '{expected}' for '{target}', found '{found}'")]
  TypeMismatch {
    target: String,
    expected: &'static str,
    found: &'static str,
  },

  #[error("Constructor of '{owner}' has no argument at position {index}")]
  MissingArgument { owner: String, index: usize },
}

/// The main error type for `skein_ioc`.
#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  NotFound(#[from] NotFoundError),

  #[error(transparent)]
  Container(#[from] ContainerError),

  #[error("Failed to parse constants: {0}")]
  Constants(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn is_not_found(&self) -> bool {
    matches!(self, Error::NotFound(_))
  }

  pub fn is_container(&self) -> bool {
    matches!(self, Error::Container(_))
  }
}

/// A specialized `Result` type for container operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
