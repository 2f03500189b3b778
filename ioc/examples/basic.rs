use skein_ioc::{
  name_of, parameters, Arguments, Concrete, Container, Injectable, Instance, Param, Result,
};
use std::io::{self, Write};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Foo {
  value: Option<String>,
}

impl Injectable for Foo {
  fn parameters() -> Vec<Param> {
    vec![Param::typed::<String>("value").nullable()]
  }

  fn construct(args: &Arguments) -> Result<Self> {
    let value = args.optional::<String>(0)?.map(|value| (*value).clone());
    println!("foo::created {:?}", value);
    Ok(Foo { value })
  }
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let container = Container::new();
  container.register_type::<Foo>();

  // Self binding: the constructor parameter falls back to its default.
  container.bind_self(name_of::<Foo>());
  println!("{:?}", container.resolve::<Foo>()?);

  // Explicit parameters win over the default.
  println!(
    "{:?}",
    container.resolve_with::<Foo>(&parameters! { "value" => String::from("bar") })?
  );

  // A factory takes over construction entirely.
  container.bind(
    name_of::<Foo>(),
    Concrete::factory(|_, parameters| {
      let value = parameters.getter().value::<String>("value");
      Ok(Instance::new(Foo {
        value: value.map(|value| format!("from factory: {}", value)),
      }))
    }),
  );
  println!(
    "{:?}",
    container.resolve_with::<Foo>(&parameters! { "value" => String::from("bar") })?
  );

  // An alias for a class.
  container.bind("foo", Concrete::class::<Foo>());
  println!("{:?}", container.get_as::<Foo>("foo")?);

  // Anything else is handed back untouched.
  container.bind("foo", "bar");
  println!("{:?}", container.get_as::<String>("foo")?);

  container.bind("foo", Concrete::literal(vec!["foo", "bar"]));
  println!("{:?}", container.get_as::<Vec<&str>>("foo")?);

  container.bind("foo", Concrete::literal(true));
  println!("{:?}", container.get_as::<bool>("foo")?);

  container.bind("foo", Concrete::literal(1337_i64));
  println!("{:?}", container.get_as::<i64>("foo")?);

  container.bind("foo", Concrete::literal(13.37_f64));
  println!("{:?}", container.get_as::<f64>("foo")?);

  container.bind("baz", Concrete::null());
  println!("null: {}", container.get("baz")?.is_null());

  container.bind("foo", Concrete::literal(Mutex::new(io::stdout())));
  let stdout = container.get_as::<Mutex<io::Stdout>>("foo")?;
  if let Ok(mut out) = stdout.lock() {
    let _ = writeln!(out, "written through a bound handle");
  }

  Ok(())
}
