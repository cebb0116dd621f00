//! A thread-safe, name-keyed store of singleton instances.
//! Designed for the write-once, read-many pattern: a name can be bound exactly once
//! until the whole registry is cleared.
//!
//! # Examples
//!
//! ```
//! use name_registry::{Instance, Registry};
//!
//! let registry = Registry::new();
//! registry.register("greeting", Instance::new("Hello, World!".to_string())).unwrap();
//!
//! let message = registry.lookup("greeting").unwrap();
//! assert_eq!(message.downcast_ref::<String>().unwrap(), "Hello, World!");
//!
//! // A name is bound once.
//! assert!(registry.register("greeting", Instance::new(1u8)).is_err());
//! ```

use std::{borrow::Cow, fmt, sync::Arc};

use indexmap::{map::Entry, IndexMap};
use parking_lot::{Mutex, RwLock};

use crate::{InjectError, Instance, NamedItem, RegistryEvent, Result};

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a `RegistryEvent` every time the registry is
/// interacted with. It must be thread-safe because registries are shared across threads.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

/// Name → instance store with one-time registration per name.
///
/// Entries iterate in registration order.
pub struct Registry {
    label: Cow<'static, str>,
    entries: RwLock<IndexMap<String, Instance>>,
    trace: Mutex<Option<Arc<TraceCallback>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::with_label("registry")
    }

    /// Creates an empty registry whose label tags its log records and dumps.
    pub fn with_label(label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            label: label.into(),
            entries: RwLock::new(IndexMap::new()),
            trace: Mutex::new(None),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    // ---------------------------------------------------------------------------------------------
    // Tracing callback support
    // ---------------------------------------------------------------------------------------------

    /// Sets a tracing callback that will be invoked on every registry interaction.
    ///
    /// Events are delivered after the registry lock has been released, so the callback
    /// may call back into the registry.
    pub fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        *self.trace.lock() = Some(Arc::new(callback));
    }

    /// Clears the tracing callback (disables registry tracing).
    pub fn clear_trace_callback(&self) {
        *self.trace.lock() = None;
    }

    fn emit_event(&self, event: RegistryEvent) {
        tracing::trace!(registry = %self.label, %event);

        let callback = self.trace.lock().clone();
        if let Some(callback) = callback {
            callback(&event);
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Registry
    // ---------------------------------------------------------------------------------------------

    /// Binds `instance` to `name`.
    ///
    /// The check and the insert happen under one write lock, so concurrent callers racing
    /// on the same name see exactly one success.
    ///
    /// # Errors
    ///
    /// [`InjectError::DuplicateRegistration`] if `name` is already bound. The stored value
    /// is left untouched and returned inside the error.
    pub fn register(&self, name: impl Into<String>, instance: Instance) -> Result<()> {
        let type_name = instance.type_name();

        let name = match self.entries.write().entry(name.into()) {
            Entry::Occupied(entry) => {
                tracing::debug!(
                    registry = %self.label,
                    name = %entry.key(),
                    "rejected duplicate registration"
                );
                return Err(InjectError::DuplicateRegistration {
                    name: entry.key().clone(),
                    existing: entry.get().clone(),
                });
            }
            Entry::Vacant(entry) => {
                let name = entry.key().clone();
                entry.insert(instance);
                name
            }
        };

        self.emit_event(RegistryEvent::Register { name, type_name });
        Ok(())
    }

    /// Registers a plain value and returns the stored handle.
    pub fn register_value<T: Send + Sync + 'static>(
        &self,
        name: impl Into<String>,
        value: T,
    ) -> Result<Arc<T>> {
        let value = Arc::new(value);
        self.register(name, Instance::from_arc(Arc::clone(&value)))?;
        Ok(value)
    }

    /// Returns the instance bound to `name`, or `None`.
    pub fn lookup(&self, name: &str) -> Option<Instance> {
        let found = self.entries.read().get(name).cloned();

        self.emit_event(RegistryEvent::Lookup {
            name: name.to_string(),
            found: found.is_some(),
        });

        found
    }

    pub fn exists(&self, name: &str) -> bool {
        let found = self.entries.read().contains_key(name);

        self.emit_event(RegistryEvent::Exists {
            name: name.to_string(),
            found,
        });

        found
    }

    /// Evaluates `predicate` against every entry in registration order and returns the matches.
    ///
    /// Not optimized: every call is a full linear scan. The predicate runs over a snapshot,
    /// outside the registry lock.
    pub fn query<P>(&self, predicate: P) -> Vec<(String, Instance)>
    where
        P: Fn(&NamedItem<'_>) -> bool,
    {
        let snapshot = self.snapshot();
        let scanned = snapshot.len();

        let matches: Vec<_> = snapshot
            .into_iter()
            .filter(|(name, value)| predicate(&NamedItem::new(name, value)))
            .collect();

        self.emit_event(RegistryEvent::Query {
            scanned,
            matched: matches.len(),
        });

        matches
    }

    /// Removes every entry. Handles already given out stay valid.
    pub fn clear(&self) {
        self.entries.write().clear();
        self.emit_event(RegistryEvent::Clear {});
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    fn snapshot(&self) -> Vec<(String, Instance)> {
        self.entries
            .read()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("label", &self.label)
            .field("entries", &*self.entries.read())
            .finish_non_exhaustive()
    }
}

/// One `name value` line per entry, in registration order.
impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.entries.read().iter() {
            writeln!(f, "{name} {value}")?;
        }
        Ok(())
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let registry = Registry::new();
        let value = Arc::new(42i32);
        registry
            .register("answer", Instance::from_arc(value.clone()))
            .unwrap();

        let found = registry.lookup("answer").unwrap();
        assert_eq!(found.downcast_ref::<i32>(), Some(&42));
        // Same allocation, not a copy.
        assert!(Arc::ptr_eq(&found.downcast::<i32>().unwrap(), &value));
    }

    #[test]
    fn test_lookup_missing() {
        let registry = Registry::new();
        assert!(registry.lookup("missing").is_none());
        assert!(!registry.exists("missing"));
    }

    #[test]
    fn test_duplicate_registration_keeps_first_value() {
        let registry = Registry::new();
        registry.register_value("n", 1u32).unwrap();

        let err = registry.register_value("n", 2u32).unwrap_err();
        match err {
            InjectError::DuplicateRegistration { name, existing } => {
                assert_eq!(name, "n");
                assert_eq!(existing.downcast_ref::<u32>(), Some(&1));
            }
            other => panic!("unexpected error: {other}"),
        }

        assert_eq!(
            registry.lookup("n").unwrap().downcast_ref::<u32>(),
            Some(&1)
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_with_different_type_is_rejected() {
        let registry = Registry::new();
        registry.register_value("n", 1u32).unwrap();
        assert!(registry.register_value("n", "one".to_string()).is_err());
        assert!(registry.lookup("n").unwrap().is::<u32>());
    }

    #[test]
    fn test_clear_allows_reregistration() {
        let registry = Registry::new();
        let first = registry.register_value("x", 1i32).unwrap();

        registry.clear();
        assert!(registry.is_empty());
        registry.clear();

        registry.register_value("x", 2i32).unwrap();
        assert_eq!(registry.lookup("x").unwrap().downcast_ref::<i32>(), Some(&2));
        // Handles given out before the clear stay valid.
        assert_eq!(*first, 1);
    }

    #[test]
    fn test_query_preserves_registration_order() {
        let registry = Registry::new();
        for (name, value) in [("c", 3i32), ("a", 1), ("b", 2), ("d", 4)] {
            registry.register_value(name, value).unwrap();
        }

        let odd = registry.query(|item| {
            item.value()
                .downcast_ref::<i32>()
                .is_some_and(|v| v % 2 == 1)
        });
        let names: Vec<_> = odd.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["c", "a"]);

        assert_eq!(registry.names(), ["c", "a", "b", "d"]);
    }

    #[test]
    fn test_query_predicate_can_read_registry() {
        let registry = Registry::new();
        registry.register_value("a", 1i32).unwrap();
        registry.register_value("b", 2i32).unwrap();

        let matches = registry.query(|item| registry.exists(item.name()));
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_display_dump() {
        let registry = Registry::with_label("dump");
        registry.register_value("a", 1u8).unwrap();
        registry.register_value("b", "two".to_string()).unwrap();

        assert_eq!(
            registry.to_string(),
            "a <u8>\nb <alloc::string::String>\n"
        );
        assert_eq!(registry.label(), "dump");
    }

    #[test]
    fn test_trace_callback_events() {
        let registry = Registry::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        registry.set_trace_callback(move |e| {
            events_clone.lock().push(e.to_string());
        });

        registry.register_value("a", 5u8).unwrap();
        let _ = registry.register_value("a", 6u8);
        let _ = registry.lookup("a");
        let _ = registry.exists("b");
        let _ = registry.query(|_| true);
        registry.clear();

        let captured = events.lock();
        assert_eq!(
            *captured,
            [
                "register { name: a, type_name: u8 }",
                "lookup { name: a, found: true }",
                "exists { name: b, found: false }",
                "query { scanned: 1, matched: 1 }",
                "Clearing the Registry",
            ]
        );
    }

    #[test]
    fn test_clear_trace_callback_stops_events() {
        let registry = Registry::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        registry.set_trace_callback(move |e| {
            events_clone.lock().push(e.clone());
        });
        registry.register_value("a", 10u16).unwrap();
        registry.clear_trace_callback();
        registry.register_value("b", 20u16).unwrap();
        let _ = registry.lookup("b");

        assert_eq!(events.lock().len(), 1);
    }

    #[test]
    fn test_concurrent_registration_has_one_winner() {
        use std::sync::Barrier;
        use std::thread;

        let registry = Arc::new(Registry::new());
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8u32)
            .map(|i| {
                let registry = registry.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    registry.register_value("contended", i).is_ok()
                })
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(registry.len(), 1);
    }
}
