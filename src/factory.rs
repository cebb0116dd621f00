//! Shorthands that build, and optionally invoke, registration wrappers.

use std::sync::Arc;

use crate::{naming::injectable_name_of, Injectable, Registry, Result};

/// Builds a zero-argument registration wrapper that calls `factory(args)`. The wrapper is
/// returned uninvoked.
///
/// `args` is cloned on every invocation, so the same wrapper can build again after the
/// registry is cleared.
pub fn injectable_factory<A, T, F>(
    registry: &Arc<Registry>,
    name: impl Into<String>,
    factory: F,
    args: A,
) -> Injectable<(), T>
where
    A: Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
    F: Fn(A) -> T + Send + Sync + 'static,
{
    Injectable::new(Arc::clone(registry), name, move |()| factory(args.clone()))
}

/// Builds the wrapper like [`injectable_factory`] and invokes it once.
pub fn register_injectable<A, T, F>(
    registry: &Arc<Registry>,
    name: impl Into<String>,
    factory: F,
    args: A,
) -> Result<Arc<T>>
where
    A: Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
    F: Fn(A) -> T + Send + Sync + 'static,
{
    injectable_factory(registry, name, factory, args).create()
}

/// Like [`register_injectable`], naming the entry after the produced type
/// (`MyService` → `my_service`).
pub fn register_injectable_from_type<A, T, F>(
    registry: &Arc<Registry>,
    factory: F,
    args: A,
) -> Result<Arc<T>>
where
    A: Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
    F: Fn(A) -> T + Send + Sync + 'static,
{
    register_injectable(registry, injectable_name_of::<T>(), factory, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InjectError;

    #[derive(Debug, PartialEq)]
    struct MyService {
        x: i32,
    }

    #[test]
    fn test_injectable_factory_is_not_invoked() {
        let registry = Arc::new(Registry::new());
        let wrapper = injectable_factory(&registry, "svc", |x| MyService { x }, 3);

        assert!(!registry.exists("svc"));
        assert_eq!(wrapper.name(), "svc");
        assert_eq!(wrapper.create().unwrap().x, 3);
        assert!(registry.exists("svc"));
    }

    #[test]
    fn test_injectable_factory_rebuilds_after_clear() {
        let registry = Arc::new(Registry::new());
        let wrapper = injectable_factory(
            &registry,
            "svc",
            |(x, label): (i32, String)| (MyService { x }, label),
            (3, "cfg".to_string()),
        );

        let first = wrapper.create().unwrap();
        registry.clear();
        let second = wrapper.create().unwrap();

        assert_eq!(first.0, MyService { x: 3 });
        assert_eq!(second.0, MyService { x: 3 });
        assert_eq!(second.1, "cfg");
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_register_injectable() {
        let registry = Arc::new(Registry::new());
        let value = register_injectable(&registry, "svc", |x: i32| x, 3).unwrap();
        assert_eq!(*value, 3);
        assert_eq!(
            registry.lookup("svc").unwrap().downcast_ref::<i32>(),
            Some(&3)
        );

        let err = register_injectable(&registry, "svc", |x: i32| x, 4).unwrap_err();
        assert!(matches!(err, InjectError::DuplicateRegistration { .. }));
    }

    #[test]
    fn test_register_injectable_with_tuple_args() {
        let registry = Arc::new(Registry::new());
        let value = register_injectable(
            &registry,
            "greeting",
            |(greeting, name): (&'static str, String)| format!("{greeting}, {name}"),
            ("hello", "world".to_string()),
        )
        .unwrap();
        assert_eq!(*value, "hello, world");
    }

    #[test]
    fn test_register_injectable_from_type() {
        let registry = Arc::new(Registry::new());
        let value = register_injectable_from_type(&registry, |x| MyService { x }, 7).unwrap();

        assert_eq!(value.x, 7);
        let stored = registry.lookup("my_service").unwrap();
        assert_eq!(stored.downcast_ref::<MyService>(), Some(&MyService { x: 7 }));
    }

    #[test]
    fn test_register_injectable_from_type_twice_fails() {
        let registry = Arc::new(Registry::new());
        register_injectable_from_type(&registry, |()| MyService { x: 1 }, ()).unwrap();
        assert!(register_injectable_from_type(&registry, |()| MyService { x: 2 }, ()).is_err());
    }
}
