//! # Name Registry
//!
//! A thread-safe, name-keyed singleton registry with wrapper-driven registration
//! and parameter-name dependency injection.
//! Currently designed for write-once, read-many pattern.
//!
//! A factory wrapped with [`injectable`] constructs its value at most once and
//! binds it to a fixed name. A function wrapped with [`inject`] declares its
//! parameters by name; parameters the caller leaves out are filled in from the
//! registry at call time.
//!
//! ## Quick Start
//!
//! ```rust
//! use name_registry::{inject, injectable, injectable_get, Args};
//!
//! struct MyService { x: i32 }
//!
//! // Mark the constructor as the producer of the "my_service" singleton.
//! let my_service = injectable("my_service", |x: i32| MyService { x });
//!
//! // Invoking the wrapper constructs and registers the instance...
//! my_service.call(3).unwrap();
//! // ...exactly once.
//! assert!(my_service.call(4).is_err());
//!
//! // Dependencies are declared by name and resolved on each call.
//! let read_x = inject(["my_service"], |args: Args| Ok(args.get::<MyService>("my_service")?.x));
//! assert_eq!(read_x.call(Args::new()).unwrap(), 3);
//!
//! assert_eq!(injectable_get::<MyService>("my_service").unwrap().x, 3);
//! ```
//!
//! ## Features
//!
//! - **Thread-safe**: registration is an atomic insert-if-absent; reads run concurrently
//! - **Ordered**: queries and dumps follow registration order
//! - **Capability queries**: values can answer to `dyn Trait` views as well as their own type
//! - **Isolated registries**: [`define_registry!`] for process-wide ones, `Arc<Registry>` for explicit ones
//! - **Tracing support**: `tracing` records plus an optional callback for registry events
//!
//! ## Main Functions
//!
//! The crate-root functions operate on the process-wide [`global`] registry:
//!
//! - [`injectable`] / [`inject`] - Build registration and resolution wrappers
//! - [`injectable_get`] - Retrieve a value by name
//! - [`injectables`], [`injectables_keyed`], [`injectables_by_type`] - Query the registry
//! - [`register_injectable`], [`register_injectable_from_type`], [`injectable_factory`] - Factory shorthands
//! - [`print_injectables`], [`injection_clear_cache`] - Debug dump and reset
//! - [`set_trace_callback`] - Set up tracing for registry operations

#[macro_use]
mod macros;

mod args;
pub mod factory;
mod inject;
mod injectable;
mod instance;
mod named_item;
pub mod naming;
mod registry;
mod registry_error;
mod registry_event;
mod registry_trait;

pub use args::{Args, RECEIVER};
pub use inject::Inject;
pub use injectable::{is_injectable, Callable, Injectable};
pub use instance::Instance;
pub use named_item::NamedItem;
pub use registry::{Registry, TraceCallback};
pub use registry_error::{InjectError, Result};
pub use registry_event::RegistryEvent;
pub use registry_trait::RegistryApi;

define_registry!(
    /// The process-wide default registry. Its functions are re-exported at the crate root.
    global
);

// Re-export the main public API
pub use global::{
    clear_trace_callback, inject, injectable, injectable_factory, injectable_get,
    injectable_instance, injectables, injectables_by_type, injectables_by_type_keyed,
    injectables_keyed, injection_clear_cache, print_injectables, register_injectable,
    register_injectable_from_type, set_trace_callback,
};
