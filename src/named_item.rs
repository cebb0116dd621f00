use std::sync::Arc;

use crate::Instance;

/// A registry entry as seen by query predicates.
#[derive(Debug, Clone, Copy)]
pub struct NamedItem<'a> {
    name: &'a str,
    value: &'a Instance,
}

impl<'a> NamedItem<'a> {
    pub fn new(name: &'a str, value: &'a Instance) -> Self {
        Self { name, value }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn value(&self) -> &'a Instance {
        self.value
    }

    /// Shorthand for `self.value().has_capability::<C>()`.
    pub fn is<C: ?Sized + 'static>(&self) -> bool {
        self.value.has_capability::<C>()
    }

    /// Shorthand for `self.value().downcast::<C>()`.
    pub fn downcast<C: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<C>> {
        self.value.downcast::<C>()
    }
}
