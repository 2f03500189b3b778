use skein_ioc::{global, name_of, resolve, Arguments, Injectable, Param, Result, TypeDescriptor};
use std::sync::Arc;

struct Foo {
  _bar: Arc<Bar>,
}

impl Injectable for Foo {
  fn parameters() -> Vec<Param> {
    vec![Param::typed::<Bar>("bar")]
  }

  fn construct(args: &Arguments) -> Result<Self> {
    let bar = args.value::<Bar>(0)?;
    println!("foo::created");
    Ok(Foo { _bar: bar })
  }
}

struct Bar {
  _baz: Arc<Baz>,
}

impl Injectable for Bar {
  fn parameters() -> Vec<Param> {
    vec![Param::typed::<Baz>("baz")]
  }

  fn construct(args: &Arguments) -> Result<Self> {
    let baz = args.value::<Baz>(0)?;
    println!("bar::created");
    Ok(Bar { _baz: baz })
  }
}

struct Baz;

impl Default for Baz {
  fn default() -> Self {
    println!("baz::created");
    Baz
  }
}

fn main() {
  let container = global();

  container.register_type::<Foo>();
  container.register_type::<Bar>();
  container.register(TypeDescriptor::without_constructor::<Baz>());

  container.bind_self(name_of::<Foo>());
  // Also binds the type name of `Bar`.
  container.bind("bar", skein_ioc::Concrete::class::<Bar>());
  container.bind(
    vec![name_of::<Baz>(), "baz", "baz-alias"],
    skein_ioc::Concrete::class::<Baz>(),
  );

  let _foo = resolve!(Foo);
  println!();

  let _bar = resolve!(Bar);
  println!();

  let _baz = resolve!(Baz, "baz-alias");
}
