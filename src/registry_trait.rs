//! Core trait defining the public registry surface.
//!
//! This module provides the `RegistryApi` trait with default implementations for
//! registration wrappers, resolution wrappers, queries, and the lifecycle/debug helpers.
//! Implementors only provide access to the registry they operate on.
//!
//! The registry is name-based: each name can have exactly one instance bound to it.
//! Binding the same name twice is an error until the registry is cleared.

use std::sync::Arc;

use crate::{
    factory, Args, Inject, Injectable, Instance, NamedItem, Registry, RegistryEvent, Result,
};

/// Core trait defining registry behavior.
///
/// Provides default implementations for all operations, requiring only the
/// [`registry`](RegistryApi::registry) accessor. It is implemented by `Arc<Registry>` for
/// explicit containers and by the `Api` type that [`define_registry!`](crate::define_registry)
/// generates for process-wide ones.
pub trait RegistryApi {
    /// Access the registry this API operates on.
    fn registry(&self) -> &Arc<Registry>;

    // ---------------------------------------------------------------------------------------------
    // Wrappers
    // ---------------------------------------------------------------------------------------------

    /// Wraps `factory` so that invoking it constructs and registers the value under `name`.
    fn injectable<A, T, F>(&self, name: impl Into<String>, factory: F) -> Injectable<A, T>
    where
        T: Send + Sync + 'static,
        F: Fn(A) -> T + Send + Sync + 'static,
    {
        Injectable::new(Arc::clone(self.registry()), name, factory)
    }

    /// Wraps `func` so that its declared `params` are resolved by name at call time.
    ///
    /// Use [`Inject::new`] when the wrapped function has its own error type.
    fn inject<R, P, F>(&self, params: P, func: F) -> Inject<R>
    where
        P: IntoIterator,
        P::Item: Into<String>,
        F: Fn(Args) -> Result<R> + Send + Sync + 'static,
    {
        Inject::new(Arc::clone(self.registry()), params, func)
    }

    // ---------------------------------------------------------------------------------------------
    // Lookups and queries
    // ---------------------------------------------------------------------------------------------

    /// The value bound to `name` as a `T`, or `None` when unbound or of another type.
    fn injectable_get<T: ?Sized + Send + Sync + 'static>(&self, name: &str) -> Option<Arc<T>> {
        self.registry().lookup(name)?.downcast::<T>()
    }

    /// The type-erased instance bound to `name`.
    fn injectable_instance(&self, name: &str) -> Option<Instance> {
        self.registry().lookup(name)
    }

    /// Values of every entry matching `predicate`, in registration order.
    fn injectables<P>(&self, predicate: P) -> Vec<Instance>
    where
        P: Fn(&NamedItem<'_>) -> bool,
    {
        self.registry()
            .query(predicate)
            .into_iter()
            .map(|(_, value)| value)
            .collect()
    }

    /// `(name, value)` of every entry matching `predicate`, in registration order.
    fn injectables_keyed<P>(&self, predicate: P) -> Vec<(String, Instance)>
    where
        P: Fn(&NamedItem<'_>) -> bool,
    {
        self.registry().query(predicate)
    }

    /// Every value that answers to capability `C`, in registration order.
    ///
    /// `C` is a concrete type or a capability declared with
    /// [`Injectable::with_capability`], typically a `dyn Trait`.
    fn injectables_by_type<C: ?Sized + Send + Sync + 'static>(&self) -> Vec<Arc<C>> {
        self.injectables_by_type_keyed::<C>()
            .into_iter()
            .map(|(_, value)| value)
            .collect()
    }

    /// Like [`injectables_by_type`](RegistryApi::injectables_by_type), with names.
    fn injectables_by_type_keyed<C: ?Sized + Send + Sync + 'static>(&self) -> Vec<(String, Arc<C>)> {
        self.registry()
            .query(|item| item.is::<C>())
            .into_iter()
            .filter_map(|(name, value)| value.downcast::<C>().map(|v| (name, v)))
            .collect()
    }

    // ---------------------------------------------------------------------------------------------
    // Factory helpers
    // ---------------------------------------------------------------------------------------------

    /// See [`factory::injectable_factory`].
    fn injectable_factory<A, T, F>(
        &self,
        name: impl Into<String>,
        factory: F,
        args: A,
    ) -> Injectable<(), T>
    where
        A: Clone + Send + Sync + 'static,
        T: Send + Sync + 'static,
        F: Fn(A) -> T + Send + Sync + 'static,
    {
        factory::injectable_factory(self.registry(), name, factory, args)
    }

    /// See [`factory::register_injectable`].
    fn register_injectable<A, T, F>(
        &self,
        name: impl Into<String>,
        factory: F,
        args: A,
    ) -> Result<Arc<T>>
    where
        A: Clone + Send + Sync + 'static,
        T: Send + Sync + 'static,
        F: Fn(A) -> T + Send + Sync + 'static,
    {
        factory::register_injectable(self.registry(), name, factory, args)
    }

    /// See [`factory::register_injectable_from_type`].
    fn register_injectable_from_type<A, T, F>(&self, factory: F, args: A) -> Result<Arc<T>>
    where
        A: Clone + Send + Sync + 'static,
        T: Send + Sync + 'static,
        F: Fn(A) -> T + Send + Sync + 'static,
    {
        factory::register_injectable_from_type(self.registry(), factory, args)
    }

    // ---------------------------------------------------------------------------------------------
    // Lifecycle, debugging and tracing
    // ---------------------------------------------------------------------------------------------

    /// Prints every `name value` pair to stdout. For diagnostics only.
    fn print_injectables(&self) {
        print!("{}", self.registry());
    }

    /// Removes every entry, primarily to isolate tests from each other.
    ///
    /// Already-retrieved `Arc` handles remain valid. The tracing callback is kept.
    fn injection_clear_cache(&self) {
        self.registry().clear();
    }

    /// Set a tracing callback for registry operations.
    fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        Registry::set_trace_callback(self.registry(), callback);
    }

    /// Clear the tracing callback.
    fn clear_trace_callback(&self) {
        Registry::clear_trace_callback(self.registry());
    }
}

impl RegistryApi for Arc<Registry> {
    fn registry(&self) -> &Arc<Registry> {
        self
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
