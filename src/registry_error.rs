use crate::Instance;

/// Errors raised by the registry, the registration wrapper and argument binding.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InjectError {
    /// A name was registered twice. The stored value is left untouched.
    #[error("an injectable named `{name}` is already registered: {existing}")]
    DuplicateRegistration {
        name: String,
        /// Handle to the value that already owns the name.
        existing: Instance,
    },

    /// A resolution wrapper was invoked with positional arguments other than a sole receiver.
    #[error("`{callable}` must be invoked with keyword arguments only (got {positional} positional)")]
    InvalidCallConvention {
        callable: &'static str,
        positional: usize,
    },

    /// A wrapped callable asked for an argument that was neither supplied nor resolved.
    #[error("missing argument `{name}`")]
    MissingArgument { name: String },

    /// A wrapped callable asked for an argument as a type it does not hold.
    #[error("argument `{name}` holds a `{found}`, expected `{expected}`")]
    ArgumentType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl InjectError {
    /// The name involved in the failure, when there is one.
    pub fn name(&self) -> Option<&str> {
        match self {
            InjectError::DuplicateRegistration { name, .. }
            | InjectError::MissingArgument { name }
            | InjectError::ArgumentType { name, .. } => Some(name),
            InjectError::InvalidCallConvention { .. } => None,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T, E = InjectError> = std::result::Result<T, E>;
