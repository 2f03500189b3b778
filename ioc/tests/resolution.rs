use pretty_assertions::assert_eq;
use skein_ioc::{
  name_of, parameters, Arguments, Concrete, Container, ContainerError, Error, Injectable, Instance,
  NotFoundError, Param, Parameters, Result, TypeDescriptor,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// --- Test Fixtures ---

/// `Foo(value: Option<String> = None)`
#[derive(Debug)]
struct Foo {
  value: Option<String>,
}

impl Injectable for Foo {
  fn parameters() -> Vec<Param> {
    vec![Param::typed::<String>("value").nullable()]
  }

  fn construct(args: &Arguments) -> Result<Self> {
    Ok(Foo {
      value: args.optional::<String>(0)?.map(|value| (*value).clone()),
    })
  }
}

#[derive(Debug, Default)]
struct Baz;

#[derive(Debug)]
struct Bar {
  baz: Arc<Baz>,
}

impl Injectable for Bar {
  fn parameters() -> Vec<Param> {
    vec![Param::typed::<Baz>("baz")]
  }

  fn construct(args: &Arguments) -> Result<Self> {
    Ok(Bar {
      baz: args.value::<Baz>(0)?,
    })
  }
}

#[derive(Debug)]
struct Chain {
  bar: Arc<Bar>,
}

impl Injectable for Chain {
  fn parameters() -> Vec<Param> {
    vec![Param::typed::<Bar>("bar")]
  }

  fn construct(args: &Arguments) -> Result<Self> {
    Ok(Chain {
      bar: args.value::<Bar>(0)?,
    })
  }
}

/// A single parameter `port: u16 = 80`, used to check the lookup order.
#[derive(Debug)]
struct Server {
  port: u16,
}

fn server_descriptor(param: Param) -> TypeDescriptor {
  TypeDescriptor::with_constructor(vec![param], |args| {
    Ok(Server {
      port: *args.value::<u16>(0)?,
    })
  })
}

fn container_with_server(param: Param) -> Container {
  let container = Container::new();
  container.register(server_descriptor(param));
  container.bind_self(name_of::<Server>());
  container
}

fn resolve_port(container: &Container, parameters: &Parameters) -> u16 {
  container
    .resolve_with::<Server>(parameters)
    .map(|server| server.port)
    .unwrap()
}

// --- Parameter Bag and Defaults ---

#[test]
fn test_explicit_parameter_overrides_default() {
  let container = Container::new();
  container.register_type::<Foo>();
  container.bind_self(name_of::<Foo>());

  let with_value = container
    .resolve_with::<Foo>(&parameters! { "value" => String::from("bar") })
    .unwrap();
  let without_value = container.resolve::<Foo>().unwrap();

  assert_eq!(with_value.value.as_deref(), Some("bar"));
  assert_eq!(without_value.value, None);
}

#[test]
fn test_name_keyed_parameter_wins_over_type_keyed_parameter() {
  let container = container_with_server(Param::typed::<u16>("port").with_default(80_u16));
  let parameters = parameters! { "port" => 1_u16, name_of::<u16>() => 2_u16 };

  assert_eq!(resolve_port(&container, &parameters), 1);
}

#[test]
fn test_type_keyed_parameter_wins_over_default() {
  let container = container_with_server(Param::typed::<u16>("port").with_default(80_u16));
  let parameters = parameters! { name_of::<u16>() => 2_u16 };

  assert_eq!(resolve_port(&container, &parameters), 2);
}

#[test]
fn test_default_wins_over_bindings() {
  let container = container_with_server(Param::typed::<u16>("port").with_default(80_u16));
  container.bind(name_of::<u16>(), Concrete::literal(3_u16));
  container.bind("port", Concrete::literal(4_u16));

  assert_eq!(resolve_port(&container, &Parameters::new()), 80);
}

#[test]
fn test_type_binding_wins_over_name_binding() {
  let container = container_with_server(Param::typed::<u16>("port"));
  container.bind(name_of::<u16>(), Concrete::literal(3_u16));
  container.bind("port", Concrete::literal(4_u16));

  assert_eq!(resolve_port(&container, &Parameters::new()), 3);
}

#[test]
fn test_name_binding_is_used_when_type_is_unbound() {
  let container = container_with_server(Param::typed::<u16>("port"));
  container.bind("port", Concrete::literal(4_u16));

  assert_eq!(resolve_port(&container, &Parameters::new()), 4);
}

#[test]
fn test_untyped_parameter_resolves_by_name() {
  let container = container_with_server(Param::new("port"));
  container.bind("port", Concrete::literal(5_u16));

  assert_eq!(resolve_port(&container, &Parameters::new()), 5);
}

#[test]
fn test_unresolvable_parameter_names_type_and_parameter() {
  let container = container_with_server(Param::typed::<u16>("port"));

  let err = container.resolve::<Server>().unwrap_err();
  match err {
    Error::NotFound(NotFoundError::Parameter {
      owner,
      name,
      type_name,
    }) => {
      assert_eq!(owner, name_of::<Server>());
      assert_eq!(name, "port");
      assert_eq!(type_name.as_deref(), Some("u16"));
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn test_parameters_are_not_forwarded_to_dependencies() {
  let container = Container::new();
  container.register_type::<Foo>();
  container.bind_self(name_of::<Foo>());

  // `holder` needs a Foo; the "value" parameter is meant for the holder only.
  container.register(
    TypeDescriptor::with_constructor(
      vec![Param::typed::<Foo>("foo"), Param::new("value")],
      |args| Ok((args.value::<Foo>(0)?, args.cloned::<String>(1)?)),
    )
    .with_name("holder"),
  );
  container.bind_self("holder");

  let holder = container
    .get_as_with::<(Arc<Foo>, String)>("holder", &parameters! { "value" => String::from("outer") })
    .unwrap();
  let (foo, value) = &*holder;

  assert_eq!(value, "outer");
  assert_eq!(foo.value, None);
}

// --- Object Graphs ---

fn graph_container() -> Container {
  let container = Container::new();
  container.register(TypeDescriptor::without_constructor::<Baz>());
  container.register_type::<Bar>();
  container.register_type::<Chain>();
  container
}

#[test]
fn test_nested_dependencies_are_built_recursively() {
  let container = graph_container();
  container.bind_self(name_of::<Chain>());
  container.bind("bar", Concrete::class::<Bar>());
  container.bind(
    vec![name_of::<Baz>(), "baz", "baz-alias"],
    Concrete::class::<Baz>(),
  );

  let chain = container.resolve::<Chain>().unwrap();
  let bar = container.resolve::<Bar>().unwrap();
  let baz = container.get_as::<Baz>("baz-alias").unwrap();

  assert!(!Arc::ptr_eq(&chain.bar, &bar));
  assert!(!Arc::ptr_eq(&bar.baz, &baz));
}

#[test]
fn test_dependency_failure_fails_the_whole_graph() {
  let container = graph_container();
  container.bind_self(name_of::<Chain>());
  container.bind_self(name_of::<Bar>());

  let err = container.resolve::<Chain>().unwrap_err();
  assert!(err.is_not_found());
  assert!(err.to_string().contains("$baz"));
}

#[test]
fn test_shared_dependency_is_reused_across_graphs() {
  let container = graph_container();
  container.singleton(name_of::<Baz>(), Concrete::SameAsAbstract);
  container.bind_self(name_of::<Bar>());

  let first = container.resolve::<Bar>().unwrap();
  let second = container.resolve::<Bar>().unwrap();

  assert!(!Arc::ptr_eq(&first, &second));
  assert!(Arc::ptr_eq(&first.baz, &second.baz));
}

#[test]
fn test_abstract_type_is_not_instantiable() {
  trait Repository: Send + Sync {}

  let container = Container::new();
  container.register(TypeDescriptor::interface::<dyn Repository>());
  container.bind_self(name_of::<dyn Repository>());

  let err = container.get(name_of::<dyn Repository>()).unwrap_err();
  match err {
    Error::Container(ContainerError::NotInstantiable(name)) => {
      assert_eq!(name, name_of::<dyn Repository>())
    }
    other => panic!("unexpected error: {other}"),
  }
}

// --- Aliases and Dual Registration ---

#[test]
fn test_alias_set_shares_one_instance() {
  let container = graph_container();
  container.singleton(["A", "B", "alias"], Concrete::class::<Baz>());

  let a = container.get("A").unwrap();
  for id in ["B", "alias", name_of::<Baz>()] {
    let other = container.get(id).unwrap();
    assert!(Instance::ptr_eq(&a, &other), "{id} resolved to a different instance");
  }
}

#[test]
fn test_alias_to_registered_class_also_binds_the_class() {
  let container = graph_container();
  assert!(!container.has(name_of::<Baz>()));

  container.bind("baz", Concrete::class::<Baz>());

  assert!(container.has(name_of::<Baz>()));
  assert!(container.resolve::<Baz>().is_ok());
}

#[test]
fn test_registering_class_after_alias_binds_the_class() {
  let container = Container::new();
  container.singleton("baz", Concrete::class::<Baz>());
  assert!(!container.has(name_of::<Baz>()));

  container.register(TypeDescriptor::without_constructor::<Baz>());

  assert_eq!(container.is_shared(name_of::<Baz>()), Some(true));
  let by_alias = container.get("baz").unwrap();
  let by_type = container.get(name_of::<Baz>()).unwrap();
  assert!(Instance::ptr_eq(&by_alias, &by_type));
}

#[test]
fn test_alias_to_unregistered_class_is_not_dual_bound() {
  let container = Container::new();
  container.bind("foo", "bar");

  assert!(!container.has("bar"));
}

// --- Factories ---

#[test]
fn test_factory_receives_container_and_parameters() {
  let container = Container::new();
  let calls = Arc::new(AtomicUsize::new(0));
  let seen = Arc::new(Mutex::new(Vec::new()));

  container.bind("prefix", Concrete::literal(String::from("got")));
  {
    let calls = Arc::clone(&calls);
    let seen = Arc::clone(&seen);
    container.bind(
      "greeting",
      Concrete::factory(move |container, parameters| {
        calls.fetch_add(1, Ordering::SeqCst);
        seen.lock().unwrap().extend(parameters.keys().map(str::to_owned));
        let prefix = container.get_as::<String>("prefix")?;
        let value = parameters.getter().value::<String>("k").unwrap();
        Ok(Instance::new(format!("{prefix} {value}")))
      }),
    );
  }

  let greeting = container
    .get_as_with::<String>("greeting", &parameters! { "k" => String::from("v") })
    .unwrap();

  assert_eq!(*greeting, "got v");
  assert_eq!(calls.load(Ordering::SeqCst), 1);
  assert_eq!(*seen.lock().unwrap(), vec!["k".to_string()]);
}

#[test]
fn test_factory_result_is_returned_verbatim() {
  let container = Container::new();
  let made = Instance::new(42_u32);
  let returned = made.clone();

  container.bind("same", Concrete::factory(move |_, _| Ok(returned.clone())));
  container.bind("nothing", Concrete::factory(|_, _| Ok(Instance::null())));

  assert!(Instance::ptr_eq(&container.get("same").unwrap(), &made));
  assert!(container.get("nothing").unwrap().is_null());
}

#[test]
fn test_getter_factory_reads_parameters() {
  let container = Container::new();
  container.register_type::<Foo>();
  container.bind(
    name_of::<Foo>(),
    Concrete::getter(|get| {
      let value = get.get_or("value", Instance::new(String::from("fallback")));
      Ok(Instance::new(Foo {
        value: value.downcast::<String>().map(|value| (*value).clone()),
      }))
    }),
  );

  let explicit = container
    .resolve_with::<Foo>(&parameters! { "value" => String::from("bar") })
    .unwrap();
  let fallback = container.resolve::<Foo>().unwrap();

  assert_eq!(explicit.value.as_deref(), Some("bar"));
  assert_eq!(fallback.value.as_deref(), Some("fallback"));
}

#[test]
fn test_shared_factory_runs_once() {
  let container = Container::new();
  let calls = Arc::new(AtomicUsize::new(0));
  {
    let calls = Arc::clone(&calls);
    container.singleton(
      "tracker",
      Concrete::factory(move |_, _| Ok(Instance::new(calls.fetch_add(1, Ordering::SeqCst)))),
    );
  }

  let first = container.get("tracker").unwrap();
  let second = container.get("tracker").unwrap();

  assert!(Instance::ptr_eq(&first, &second));
  assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failed_shared_build_is_not_cached() {
  let container = Container::new();
  container.singleton(
    "needs-config",
    Concrete::factory(|container, _| container.get("config")),
  );

  assert!(container.get("needs-config").is_err());
  assert!(container.cached("needs-config").is_none());

  container.bind("config", Concrete::literal("ready"));
  assert_eq!(*container.get_as::<&str>("needs-config").unwrap(), "ready");
}
