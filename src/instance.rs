//! Type-erased handles to registered values.
//!
//! An [`Instance`] owns one strong reference to a value and the set of
//! capabilities the value answers to. Every instance answers to its own concrete
//! type; registration wrappers may declare more (typically `dyn Trait` views).

use std::{
    any::{Any, TypeId},
    fmt,
    sync::Arc,
};

/// A view of the value as `Arc<C>` for some capability `C`.
#[derive(Clone)]
pub(crate) struct Capability {
    type_id: TypeId,
    type_name: &'static str,
    // Holds an `Arc<C>`; `C` may be unsized so it cannot be recovered from `value` directly.
    view: Arc<dyn Any + Send + Sync>,
}

impl Capability {
    pub(crate) fn of<C: ?Sized + Send + Sync + 'static>(view: Arc<C>) -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            type_name: std::any::type_name::<C>(),
            view: Arc::new(view),
        }
    }
}

/// A registered value: shared, type-erased, and tagged with its capabilities.
///
/// Cloning an `Instance` clones the handle, never the value.
#[derive(Clone)]
pub struct Instance {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
    capabilities: Vec<Capability>,
}

impl Instance {
    /// Wraps a value that answers only to its own concrete type.
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wraps an existing `Arc` without adding a reference layer.
    pub fn from_arc<T: Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self::with_capabilities(value, std::iter::empty())
    }

    pub(crate) fn with_capabilities<T: Send + Sync + 'static>(
        value: Arc<T>,
        extra: impl IntoIterator<Item = Capability>,
    ) -> Self {
        let mut capabilities = vec![Capability::of(Arc::clone(&value))];
        for capability in extra {
            if !capabilities.iter().any(|c| c.type_id == capability.type_id) {
                capabilities.push(capability);
            }
        }

        Self {
            value,
            type_name: std::any::type_name::<T>(),
            capabilities,
        }
    }

    /// The concrete type name of the held value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Names of every capability the value answers to, concrete type first.
    pub fn capability_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.capabilities.iter().map(|c| c.type_name)
    }

    /// Whether the value answers capability queries for `C`.
    pub fn has_capability<C: ?Sized + 'static>(&self) -> bool {
        let wanted = TypeId::of::<C>();
        self.capabilities.iter().any(|c| c.type_id == wanted)
    }

    /// Returns the value viewed as `C`, if it declares that capability.
    ///
    /// `C` is either the concrete type or one of the declared capabilities.
    pub fn downcast<C: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<C>> {
        let wanted = TypeId::of::<C>();
        self.capabilities
            .iter()
            .find(|c| c.type_id == wanted)
            .and_then(|c| c.view.downcast_ref::<Arc<C>>())
            .cloned()
    }

    /// Borrows the value as its concrete type.
    pub fn downcast_ref<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Whether the value is of concrete type `T`.
    pub fn is<T: Send + Sync + 'static>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Whether both handles point at the same value.
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl<T: Send + Sync + 'static> From<Arc<T>> for Instance {
    fn from(value: Arc<T>) -> Self {
        Instance::from_arc(value)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .field("capabilities", &self.capability_names().collect::<Vec<_>>())
            .finish()
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.type_name)
    }
}
