//! The registration wrapper: construct at most once, then bind under a fixed name.

use std::{fmt, marker::PhantomData, sync::Arc};

use crate::{instance::Capability, InjectError, Instance, Registry, Result};

type Factory<A, T> = dyn Fn(A) -> T + Send + Sync;
type CapabilityCast<T> = dyn Fn(&Arc<T>) -> Capability + Send + Sync;

/// Wraps a factory so that invoking it constructs a singleton and registers it under `name`.
///
/// `A` is the factory's argument, a tuple for multi-argument constructors and `()` for
/// zero-argument ones. Only the first successful call runs the factory; every later call
/// fails with [`InjectError::DuplicateRegistration`] before the factory is touched.
///
/// ```
/// use name_registry::{Registry, RegistryApi};
/// use std::sync::Arc;
///
/// struct Counter { start: u32 }
///
/// let registry = Arc::new(Registry::new());
/// let counter = registry.injectable("counter", |start: u32| Counter { start });
///
/// assert_eq!(counter.call(7).unwrap().start, 7);
/// assert!(counter.call(8).is_err());
/// ```
pub struct Injectable<A, T> {
    name: String,
    registry: Arc<Registry>,
    factory: Arc<Factory<A, T>>,
    capabilities: Vec<Arc<CapabilityCast<T>>>,
    _args: PhantomData<fn(A)>,
}

impl<A, T: Send + Sync + 'static> Injectable<A, T> {
    pub fn new<F>(registry: Arc<Registry>, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(A) -> T + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            registry,
            factory: Arc::new(factory),
            capabilities: Vec::new(),
            _args: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Declares that values built by this wrapper also answer capability queries for `C`.
    ///
    /// ```
    /// use name_registry::{Registry, RegistryApi};
    /// use std::sync::Arc;
    ///
    /// trait Greeter: Send + Sync { fn greet(&self) -> &str; }
    /// struct English;
    /// impl Greeter for English { fn greet(&self) -> &str { "hello" } }
    ///
    /// let registry = Arc::new(Registry::new());
    /// registry
    ///     .injectable("english", |()| English)
    ///     .with_capability(|e| e as Arc<dyn Greeter>)
    ///     .create()
    ///     .unwrap();
    ///
    /// let greeters = registry.injectables_by_type::<dyn Greeter>();
    /// assert_eq!(greeters[0].greet(), "hello");
    /// ```
    pub fn with_capability<C>(mut self, cast: impl Fn(Arc<T>) -> Arc<C> + Send + Sync + 'static) -> Self
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.capabilities
            .push(Arc::new(move |value: &Arc<T>| Capability::of(cast(Arc::clone(value)))));
        self
    }

    /// Runs the factory with `args` and registers the result.
    ///
    /// # Errors
    ///
    /// [`InjectError::DuplicateRegistration`] if the name is already bound, including when
    /// another thread registered it while the factory was running. In that case the freshly
    /// built value is dropped.
    pub fn call(&self, args: A) -> Result<Arc<T>> {
        if let Some(existing) = self.registry.lookup(&self.name) {
            return Err(InjectError::DuplicateRegistration {
                name: self.name.clone(),
                existing,
            });
        }

        let value = Arc::new((self.factory)(args));
        let instance = Instance::with_capabilities(
            Arc::clone(&value),
            self.capabilities.iter().map(|cast| cast(&value)),
        );
        self.registry.register(self.name.as_str(), instance)?;

        tracing::info!(
            registry = self.registry.label(),
            name = %self.name,
            type_name = std::any::type_name::<T>(),
            "injectable created"
        );

        Ok(value)
    }
}

impl<T: Send + Sync + 'static> Injectable<(), T> {
    /// Shorthand for `call(())`.
    pub fn create(&self) -> Result<Arc<T>> {
        self.call(())
    }
}

impl<A, T> Clone for Injectable<A, T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            registry: Arc::clone(&self.registry),
            factory: Arc::clone(&self.factory),
            capabilities: self.capabilities.clone(),
            _args: PhantomData,
        }
    }
}

impl<A, T> fmt::Debug for Injectable<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injectable")
            .field("name", &self.name)
            .field("registry", &self.registry.label())
            .field("produces", &std::any::type_name::<T>())
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------
// Introspection
// -------------------------------------------------------------------------------------------------

/// Implemented by the callable wrappers this crate hands out.
pub trait Callable {
    /// The registration name, if this callable is a registration wrapper.
    fn injectable_name(&self) -> Option<&str> {
        None
    }
}

impl<A, T> Callable for Injectable<A, T> {
    fn injectable_name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl<R> Callable for fn() -> R {}

impl<A, R> Callable for fn(A) -> R {}

/// Whether `callable` is a registration wrapper. For diagnostics, never for dispatch.
///
/// Only types implementing [`Callable`] can be asked: the crate's wrappers and plain
/// function pointers. A closure has to be coerced to a `fn` pointer first, which only
/// works for closures that capture nothing.
///
/// ```
/// use name_registry::{is_injectable, Registry, RegistryApi};
/// use std::sync::Arc;
///
/// let registry = Arc::new(Registry::new());
/// let wrapper = registry.injectable("x", |()| 1u8);
/// let plain: fn(u8) -> u8 = |x| x;
///
/// assert!(is_injectable(&wrapper));
/// assert!(!is_injectable(&plain));
/// ```
pub fn is_injectable(callable: &dyn Callable) -> bool {
    callable.injectable_name().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    trait Shape: Send + Sync {
        fn area(&self) -> f64;
    }

    struct Square(f64);

    impl Shape for Square {
        fn area(&self) -> f64 {
            self.0 * self.0
        }
    }

    #[test]
    fn test_first_call_registers() {
        let registry = Arc::new(Registry::new());
        let wrapper = Injectable::new(registry.clone(), "x", |n: i32| n * 2);

        let value = wrapper.call(21).unwrap();
        assert_eq!(*value, 42);

        let stored = registry.lookup("x").unwrap();
        assert!(Arc::ptr_eq(&stored.downcast::<i32>().unwrap(), &value));
    }

    #[test]
    fn test_second_call_fails_without_running_factory() {
        let registry = Arc::new(Registry::new());
        let runs = Arc::new(AtomicUsize::new(0));
        let runs_clone = runs.clone();
        let wrapper = Injectable::new(registry.clone(), "x", move |()| {
            runs_clone.fetch_add(1, Ordering::SeqCst);
            "first".to_string()
        });

        wrapper.create().unwrap();
        let err = wrapper.create().unwrap_err();

        assert!(matches!(err, InjectError::DuplicateRegistration { ref name, .. } if name == "x"));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(
            registry.lookup("x").unwrap().downcast_ref::<String>().unwrap(),
            "first"
        );
    }

    #[test]
    fn test_name_taken_by_plain_registration() {
        let registry = Arc::new(Registry::new());
        registry.register_value("x", 1u8).unwrap();

        let wrapper = Injectable::new(registry, "x", |()| 2u8);
        assert!(wrapper.create().is_err());
    }

    #[test]
    fn test_clone_shares_the_slot() {
        let registry = Arc::new(Registry::new());
        let wrapper = Injectable::new(registry, "x", |()| 1u8);
        let copy = wrapper.clone();

        wrapper.create().unwrap();
        assert!(copy.create().is_err());
    }

    #[test]
    fn test_declared_capability() {
        let registry = Arc::new(Registry::new());
        Injectable::new(registry.clone(), "square", |side: f64| Square(side))
            .with_capability(|s| s as Arc<dyn Shape>)
            .call(3.0)
            .unwrap();

        let stored = registry.lookup("square").unwrap();
        assert!(stored.is::<Square>());
        assert_eq!(stored.downcast::<dyn Shape>().unwrap().area(), 9.0);
    }

    #[test]
    fn test_is_injectable() {
        let registry = Arc::new(Registry::new());
        let wrapper = Injectable::new(registry, "x", |()| 1u8);
        assert!(is_injectable(&wrapper));
        assert_eq!(wrapper.injectable_name(), Some("x"));
    }

    #[test]
    fn test_plain_function_is_not_injectable() {
        fn hidden_factory(x: i32) -> i32 {
            x
        }

        let plain: fn(i32) -> i32 = hidden_factory;
        let nullary: fn() -> u8 = || 1;
        assert!(!is_injectable(&plain));
        assert!(!is_injectable(&nullary));
        assert_eq!(plain.injectable_name(), None);
    }

    #[test]
    fn test_debug() {
        let registry = Arc::new(Registry::with_label("dbg"));
        let wrapper = Injectable::new(registry, "x", |()| 1u8);
        let rendered = format!("{wrapper:?}");
        assert!(rendered.contains("\"x\""));
        assert!(rendered.contains("dbg"));
        assert!(rendered.contains("u8"));
    }
}
