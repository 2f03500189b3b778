use skein_ioc::{global, resolve, Error, NotFoundError, Param, TypeDescriptor};
use std::panic;

struct UnregisteredService;

struct NeedsPort {
  _port: u16,
}

fn main() {
  // --- The panicking `resolve!` macro ---
  println!("Attempting to resolve a service that was never bound...");

  let result = panic::catch_unwind(|| {
    let _service = resolve!(UnregisteredService);
  });

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Caught the expected panic from resolve!.");

  // --- The fallible API ---
  println!("\nNow resolving through `resolve()`...");

  match global().resolve::<UnregisteredService>() {
    Err(Error::NotFound(NotFoundError::Identifier(id))) => println!("Not found: {}", id),
    Err(other) => panic!("unexpected error: {}", other),
    Ok(_) => panic!("Should not have found the service!"),
  }

  // --- A parameter nothing can satisfy ---
  global().register(TypeDescriptor::with_constructor(
    vec![Param::typed::<u16>("port")],
    |args| Ok(NeedsPort { _port: *args.value::<u16>(0)? }),
  ));
  global().bind_self(skein_ioc::name_of::<NeedsPort>());

  match global().resolve::<NeedsPort>() {
    Err(err) => println!("{}", err),
    Ok(_) => panic!("`port` has no default and no binding"),
  }
}
