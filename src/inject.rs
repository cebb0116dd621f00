//! The resolution wrapper: fill a callable's unset named parameters from a registry.

use std::{fmt, sync::Arc};

use indexmap::IndexMap;

use crate::{args::RECEIVER, injectable::Callable, Args, InjectError, Registry};

type Func<R, E> = dyn Fn(Args) -> Result<R, E> + Send + Sync;

/// A callable whose declared parameters are resolved by name at call time.
///
/// The parameter list is fixed when the wrapper is built. On each call:
///
/// - positional arguments are rejected unless the first declared parameter is the receiver
///   `"self"` and exactly one positional argument is given;
/// - an explicitly supplied keyword always wins;
/// - otherwise the registry value bound to the parameter's name is used;
/// - otherwise the parameter is left unbound and the wrapped function decides what that means.
///
/// Keywords that are not declared parameters are not forwarded.
///
/// ```
/// use name_registry::{Args, Registry, RegistryApi};
/// use std::sync::Arc;
///
/// let registry = Arc::new(Registry::new());
/// registry.register_injectable("svc", |n: i32| n, 3).unwrap();
///
/// let double = registry.inject(["svc"], |args: Args| Ok(*args.get::<i32>("svc")? * 2));
/// assert_eq!(double.call(Args::new()).unwrap(), 6);
/// assert_eq!(double.call(Args::new().keyword("svc", 5i32)).unwrap(), 10);
/// ```
pub struct Inject<R, E = InjectError> {
    registry: Arc<Registry>,
    params: Arc<[String]>,
    callable: &'static str,
    func: Arc<Func<R, E>>,
}

impl<R, E: From<InjectError>> Inject<R, E> {
    pub fn new<P, F>(registry: Arc<Registry>, params: P, func: F) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        F: Fn(Args) -> Result<R, E> + Send + Sync + 'static,
    {
        Self {
            registry,
            params: params.into_iter().map(Into::into).collect(),
            callable: std::any::type_name::<F>(),
            func: Arc::new(func),
        }
    }

    /// Declared parameter names, receiver included.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Whether the first declared parameter is the receiver.
    pub fn is_method(&self) -> bool {
        self.params.first().is_some_and(|p| p == RECEIVER)
    }

    /// Resolves the declared parameters and invokes the wrapped function.
    ///
    /// # Errors
    ///
    /// [`InjectError::InvalidCallConvention`] (converted into `E`) for disallowed positional
    /// arguments; anything else comes unchanged from the wrapped function.
    pub fn call(&self, args: Args) -> Result<R, E> {
        self.check_call_convention(&args)?;
        (self.func)(self.resolve(args))
    }

    fn check_call_convention(&self, args: &Args) -> Result<(), InjectError> {
        let positional = args.positional_len();
        if positional == 0 || (positional == 1 && self.is_method()) {
            return Ok(());
        }

        Err(InjectError::InvalidCallConvention {
            callable: self.callable,
            positional,
        })
    }

    fn resolve(&self, args: Args) -> Args {
        let (positional, mut supplied) = args.into_parts();
        let mut bound = IndexMap::with_capacity(self.params.len());

        for name in self.params.iter().filter(|p| *p != RECEIVER) {
            if let Some(value) = supplied.shift_remove(name) {
                bound.insert(name.clone(), value);
            } else if let Some(value) = self.registry.lookup(name) {
                bound.insert(name.clone(), value);
            } else {
                tracing::trace!(callable = self.callable, param = %name, "parameter left unbound");
            }
        }

        if !supplied.is_empty() {
            tracing::debug!(
                callable = self.callable,
                ignored = ?supplied.keys().collect::<Vec<_>>(),
                "dropping undeclared keyword arguments"
            );
        }

        Args::from_parts(positional, bound)
    }
}

impl<R, E> Clone for Inject<R, E> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            params: Arc::clone(&self.params),
            callable: self.callable,
            func: Arc::clone(&self.func),
        }
    }
}

impl<R, E> fmt::Debug for Inject<R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inject")
            .field("callable", &self.callable)
            .field("params", &self.params)
            .field("registry", &self.registry.label())
            .finish()
    }
}

impl<R, E> Callable for Inject<R, E> {}
