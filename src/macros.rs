//! Macros for creating process-wide registries.
//!
//! This module provides a simple macro-based approach to create isolated, thread-safe,
//! name-keyed registries that live for the whole process.

/// Creates a complete process-wide registry with a single macro invocation.
///
/// The macro generates a module containing:
/// - Registry static (hidden), labelled with the module name
/// - An `Api` struct that implements `RegistryApi`, and its `API` constant
/// - Free functions delegating to `API`
///
/// # Examples
///
/// ```rust
/// use name_registry::{define_registry, Args};
///
/// define_registry!(app);
///
/// struct Database { url: String }
///
/// let database = app::injectable("db", |url: &'static str| Database { url: url.to_string() });
/// database.call("postgres://localhost").unwrap();
///
/// let url = app::inject(["db"], |args: Args| Ok(args.get::<Database>("db")?.url.clone()));
/// assert_eq!(url.call(Args::new()).unwrap(), "postgres://localhost");
/// ```
///
/// # Multiple Registries
///
/// Each registry is completely isolated:
///
/// ```rust
/// use name_registry::define_registry;
///
/// define_registry!(database);
/// define_registry!(cache);
///
/// database::register_injectable("conn", |s: &'static str| s.to_string(), "postgres").unwrap();
///
/// assert!(database::injectable_get::<String>("conn").is_some());
/// assert!(cache::injectable_get::<String>("conn").is_none());
/// ```
///
/// Outer attributes, doc comments included, are applied to the generated module:
///
/// ```rust
/// name_registry::define_registry!(
///     /// Registry for request-scoped helpers.
///     helpers
/// );
/// assert!(helpers::registry().is_empty());
/// ```
///
/// # Trait-Based Usage
///
/// ```rust
/// use name_registry::{define_registry, RegistryApi};
///
/// define_registry!(services);
///
/// services::API.register_injectable("answer", |n: i32| n, 42).unwrap();
/// assert_eq!(*services::API.injectable_get::<i32>("answer").unwrap(), 42);
/// ```
#[macro_export]
macro_rules! define_registry {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        pub mod $name {
            #![allow(dead_code)]

            use std::sync::{Arc, LazyLock};

            // Storage for registered values (module-private)
            static REGISTRY: LazyLock<Arc<$crate::Registry>> =
                LazyLock::new(|| Arc::new($crate::Registry::with_label(stringify!($name))));

            /// Zero-sized type that implements the registry API.
            ///
            /// All registry operations are provided by the `RegistryApi` trait's
            /// default implementations. This struct only provides access to the static.
            pub struct Api;

            impl $crate::RegistryApi for Api {
                fn registry(&self) -> &Arc<$crate::Registry> {
                    &REGISTRY
                }
            }

            /// Convenient constant for accessing the registry API.
            pub const API: Api = Api;

            // Free functions for ergonomic usage - they delegate to API

            /// The registry behind this module.
            pub fn registry() -> Arc<$crate::Registry> {
                use $crate::RegistryApi;
                Arc::clone(API.registry())
            }

            /// Wrap a factory so that invoking it registers its value under `name`.
            pub fn injectable<A, T, F>(name: impl Into<String>, factory: F) -> $crate::Injectable<A, T>
            where
                T: Send + Sync + 'static,
                F: Fn(A) -> T + Send + Sync + 'static,
            {
                use $crate::RegistryApi;
                API.injectable(name, factory)
            }

            /// Wrap a function so that its declared parameters are resolved by name.
            pub fn inject<R, P, F>(params: P, func: F) -> $crate::Inject<R>
            where
                P: IntoIterator,
                P::Item: Into<String>,
                F: Fn($crate::Args) -> $crate::Result<R> + Send + Sync + 'static,
            {
                use $crate::RegistryApi;
                API.inject(params, func)
            }

            /// Retrieve the value bound to `name` as a `T`.
            pub fn injectable_get<T: ?Sized + Send + Sync + 'static>(name: &str) -> Option<Arc<T>> {
                use $crate::RegistryApi;
                API.injectable_get(name)
            }

            /// Retrieve the type-erased instance bound to `name`.
            pub fn injectable_instance(name: &str) -> Option<$crate::Instance> {
                use $crate::RegistryApi;
                API.injectable_instance(name)
            }

            /// Values of every entry matching `predicate`.
            pub fn injectables<P>(predicate: P) -> Vec<$crate::Instance>
            where
                P: Fn(&$crate::NamedItem<'_>) -> bool,
            {
                use $crate::RegistryApi;
                API.injectables(predicate)
            }

            /// `(name, value)` of every entry matching `predicate`.
            pub fn injectables_keyed<P>(predicate: P) -> Vec<(String, $crate::Instance)>
            where
                P: Fn(&$crate::NamedItem<'_>) -> bool,
            {
                use $crate::RegistryApi;
                API.injectables_keyed(predicate)
            }

            /// Every value that answers to capability `C`.
            pub fn injectables_by_type<C: ?Sized + Send + Sync + 'static>() -> Vec<Arc<C>> {
                use $crate::RegistryApi;
                API.injectables_by_type::<C>()
            }

            /// Every value that answers to capability `C`, with its name.
            pub fn injectables_by_type_keyed<C: ?Sized + Send + Sync + 'static>() -> Vec<(String, Arc<C>)> {
                use $crate::RegistryApi;
                API.injectables_by_type_keyed::<C>()
            }

            /// Build an uninvoked zero-argument wrapper calling `factory(args)`.
            pub fn injectable_factory<A, T, F>(
                name: impl Into<String>,
                factory: F,
                args: A,
            ) -> $crate::Injectable<(), T>
            where
                A: Clone + Send + Sync + 'static,
                T: Send + Sync + 'static,
                F: Fn(A) -> T + Send + Sync + 'static,
            {
                use $crate::RegistryApi;
                API.injectable_factory(name, factory, args)
            }

            /// Construct `factory(args)` and register it under `name`.
            pub fn register_injectable<A, T, F>(
                name: impl Into<String>,
                factory: F,
                args: A,
            ) -> $crate::Result<Arc<T>>
            where
                A: Clone + Send + Sync + 'static,
                T: Send + Sync + 'static,
                F: Fn(A) -> T + Send + Sync + 'static,
            {
                use $crate::RegistryApi;
                API.register_injectable(name, factory, args)
            }

            /// Construct `factory(args)` and register it under the produced type's snake_case name.
            pub fn register_injectable_from_type<A, T, F>(factory: F, args: A) -> $crate::Result<Arc<T>>
            where
                A: Clone + Send + Sync + 'static,
                T: Send + Sync + 'static,
                F: Fn(A) -> T + Send + Sync + 'static,
            {
                use $crate::RegistryApi;
                API.register_injectable_from_type(factory, args)
            }

            /// Print every `name value` pair to stdout.
            pub fn print_injectables() {
                use $crate::RegistryApi;
                API.print_injectables()
            }

            /// Remove every registered value.
            pub fn injection_clear_cache() {
                use $crate::RegistryApi;
                API.injection_clear_cache()
            }

            /// Set a tracing callback for registry operations.
            pub fn set_trace_callback(callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static) {
                use $crate::RegistryApi;
                API.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                use $crate::RegistryApi;
                API.clear_trace_callback()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Args, RegistryApi};
    use std::sync::Arc;

    #[test]
    fn test_define_registry_macro() {
        define_registry!(test_reg);

        test_reg::register_injectable("n", |v: i32| v, 100).unwrap();
        assert_eq!(test_reg::injectable_get::<i32>("n").as_deref(), Some(&100));
        assert!(test_reg::injectable_get::<f64>("n").is_none());
        assert_eq!(test_reg::registry().label(), "test_reg");
    }

    #[test]
    fn test_multiple_registries() {
        define_registry!(reg_a);
        define_registry!(reg_b);

        reg_a::register_injectable("n", |v: i32| v, 1).unwrap();
        reg_b::register_injectable("n", |v: i32| v, 2).unwrap();

        assert_eq!(*reg_a::injectable_get::<i32>("n").unwrap(), 1);
        assert_eq!(*reg_b::injectable_get::<i32>("n").unwrap(), 2);
    }

    #[test]
    fn test_api_constant() {
        define_registry!(api_reg);

        let wrapper = api_reg::API.injectable("svc", |()| 3i32);
        assert!(Arc::ptr_eq(wrapper.registry(), api_reg::API.registry()));
        wrapper.create().unwrap();

        let read = api_reg::inject(["svc"], |args: Args| Ok(*args.get::<i32>("svc")?));
        assert_eq!(read.call(Args::new()).unwrap(), 3);
    }

    #[test]
    fn test_tracing() {
        define_registry!(trace_test);

        use parking_lot::Mutex;
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        trace_test::set_trace_callback(move |event| {
            events_clone.lock().push(format!("{}", event));
        });

        trace_test::register_injectable("n", |v: i32| v, 42).unwrap();
        let _ = trace_test::injectable_get::<i32>("n");
        trace_test::injection_clear_cache();

        let recorded = events.lock();
        assert_eq!(recorded.len(), 4);
        assert!(recorded[0].contains("lookup"));
        assert!(recorded[1].contains("register"));
        assert!(recorded[2].contains("lookup"));
        assert!(recorded[3].contains("Clearing"));
    }
}
