//! Integration tests for registry isolation and multiple registries.
//!
//! Registries created by `define_registry!`, explicit `Arc<Registry>` containers and the
//! crate-root global registry never see each other's entries.

use name_registry::{define_registry, Args, Registry, RegistryApi};
use std::sync::Arc;

#[test]
fn test_multiple_isolated_registries() {
    define_registry!(database);
    define_registry!(cache);
    define_registry!(config);

    database::register_injectable("url", |s: &'static str| s.to_string(), "postgresql://localhost")
        .unwrap();
    cache::register_injectable("url", |s: &'static str| s.to_string(), "redis://localhost").unwrap();
    config::register_injectable("url", |s: &'static str| s.to_string(), "file://app.toml").unwrap();

    assert_eq!(
        &**database::injectable_get::<String>("url").unwrap(),
        "postgresql://localhost"
    );
    assert_eq!(&**cache::injectable_get::<String>("url").unwrap(), "redis://localhost");
    assert_eq!(&**config::injectable_get::<String>("url").unwrap(), "file://app.toml");
}

#[test]
fn test_registry_does_not_leak_between_instances() {
    define_registry!(isolated_a);
    define_registry!(isolated_b);

    isolated_a::register_injectable("only_in_a", |v: u8| v, 1).unwrap();

    assert!(isolated_a::injectable_get::<u8>("only_in_a").is_some());
    assert!(isolated_b::injectable_get::<u8>("only_in_a").is_none());
    assert!(name_registry::injectable_get::<u8>("only_in_a").is_none());
}

#[test]
fn test_clearing_one_registry_keeps_the_other() {
    define_registry!(keep);
    define_registry!(wipe);

    keep::register_injectable("n", |v: i32| v, 1).unwrap();
    wipe::register_injectable("n", |v: i32| v, 2).unwrap();

    wipe::injection_clear_cache();

    assert!(keep::injectable_get::<i32>("n").is_some());
    assert!(wipe::injectable_get::<i32>("n").is_none());
}

#[test]
fn test_explicit_containers_are_independent() {
    let first = Arc::new(Registry::with_label("first"));
    let second = Arc::new(Registry::with_label("second"));

    first.register_injectable("svc", |v: i32| v, 1).unwrap();
    second.register_injectable("svc", |v: i32| v, 2).unwrap();

    let read_first = first.inject(["svc"], |args: Args| Ok(*args.get::<i32>("svc")?));
    let read_second = second.inject(["svc"], |args: Args| Ok(*args.get::<i32>("svc")?));

    assert_eq!(read_first.call(Args::new()).unwrap(), 1);
    assert_eq!(read_second.call(Args::new()).unwrap(), 2);
}

#[test]
fn test_wrappers_stay_bound_to_their_registry() {
    define_registry!(bound_a);
    define_registry!(bound_b);

    let wrapper = bound_a::injectable("svc", |()| "a".to_string());
    bound_b::register_injectable("svc", |()| "b".to_string(), ()).unwrap();

    // The name is taken in bound_b only.
    wrapper.create().unwrap();
    assert_eq!(&**bound_a::injectable_get::<String>("svc").unwrap(), "a");
    assert_eq!(&**bound_b::injectable_get::<String>("svc").unwrap(), "b");
}
