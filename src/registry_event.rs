/// Events emitted by a registry during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use name_registry::RegistryEvent;
///
/// let event = RegistryEvent::Register { name: "db".into(), type_name: "i32" };
/// assert_eq!(event.to_string(), "register { name: db, type_name: i32 }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A value was registered under a name.
    Register {
        /// The name the value was bound to
        name: String,
        /// The concrete type name of the value (e.g. "i32", "alloc::string::String")
        type_name: &'static str,
    },

    /// A value was looked up by name.
    Lookup {
        name: String,
        /// Whether the name was bound
        found: bool,
    },

    /// A name existence check was performed.
    Exists { name: String, found: bool },

    /// A predicate query ran over the registry.
    Query {
        /// Number of entries the predicate was evaluated against
        scanned: usize,
        /// Number of entries that matched
        matched: usize,
    },

    /// The registry was cleared.
    Clear {},
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Register { name, type_name } => {
                write!(f, "register {{ name: {name}, type_name: {type_name} }}")
            }
            RegistryEvent::Lookup { name, found } => {
                write!(f, "lookup {{ name: {name}, found: {found} }}")
            }
            RegistryEvent::Exists { name, found } => {
                write!(f, "exists {{ name: {name}, found: {found} }}")
            }
            RegistryEvent::Query { scanned, matched } => {
                write!(f, "query {{ scanned: {scanned}, matched: {matched} }}")
            }
            RegistryEvent::Clear {} => write!(f, "Clearing the Registry"),
        }
    }
}
