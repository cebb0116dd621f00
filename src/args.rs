//! Call arguments for resolution-wrapped callables.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::{InjectError, Instance, Result};

/// The declared name of the implicit receiver parameter.
pub const RECEIVER: &str = "self";

/// Positional and keyword arguments of one call.
///
/// Callers build an `Args` to invoke an [`Inject`](crate::Inject) wrapper. The wrapped
/// function receives the bound `Args` and pulls its parameters out with [`get`](Args::get),
/// [`optional`](Args::optional) and [`receiver`](Args::receiver). Those are the only places
/// an unresolved parameter turns into an error.
#[derive(Debug, Clone, Default)]
pub struct Args {
    positional: Vec<Instance>,
    keywords: IndexMap<String, Instance>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the receiver as a positional argument.
    pub fn receiver_arc<T: Send + Sync + 'static>(self, receiver: Arc<T>) -> Self {
        self.positional(Instance::from_arc(receiver))
    }

    /// Appends a positional argument.
    pub fn positional(mut self, value: Instance) -> Self {
        self.positional.push(value);
        self
    }

    /// Supplies `value` for the parameter `name`.
    pub fn keyword<T: Send + Sync + 'static>(self, name: impl Into<String>, value: T) -> Self {
        self.keyword_instance(name, Instance::new(value))
    }

    /// Supplies an already shared value for the parameter `name`.
    pub fn keyword_instance(mut self, name: impl Into<String>, value: Instance) -> Self {
        self.keywords.insert(name.into(), value);
        self
    }

    pub(crate) fn from_parts(positional: Vec<Instance>, keywords: IndexMap<String, Instance>) -> Self {
        Self { positional, keywords }
    }

    pub(crate) fn into_parts(self) -> (Vec<Instance>, IndexMap<String, Instance>) {
        (self.positional, self.keywords)
    }

    pub fn positional_len(&self) -> usize {
        self.positional.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.keywords.contains_key(name)
    }

    /// Bound keyword names in binding order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.keywords.keys().map(String::as_str)
    }

    pub fn instance(&self, name: &str) -> Option<&Instance> {
        self.keywords.get(name)
    }

    /// Extracts a required parameter.
    ///
    /// # Errors
    ///
    /// [`InjectError::MissingArgument`] if `name` is unbound,
    /// [`InjectError::ArgumentType`] if it is bound to something that is not a `T`.
    pub fn get<T: ?Sized + Send + Sync + 'static>(&self, name: &str) -> Result<Arc<T>> {
        self.optional(name)?
            .ok_or_else(|| InjectError::MissingArgument {
                name: name.to_string(),
            })
    }

    /// Extracts a parameter that may be left unbound.
    pub fn optional<T: ?Sized + Send + Sync + 'static>(&self, name: &str) -> Result<Option<Arc<T>>> {
        self.keywords
            .get(name)
            .map(|value| downcast(name, value))
            .transpose()
    }

    /// Extracts the receiver passed positionally.
    pub fn receiver<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        let value = self
            .positional
            .first()
            .ok_or_else(|| InjectError::MissingArgument {
                name: RECEIVER.to_string(),
            })?;
        downcast(RECEIVER, value)
    }
}

fn downcast<T: ?Sized + Send + Sync + 'static>(name: &str, value: &Instance) -> Result<Arc<T>> {
    value.downcast::<T>().ok_or_else(|| InjectError::ArgumentType {
        name: name.to_string(),
        expected: std::any::type_name::<T>(),
        found: value.type_name(),
    })
}
