//! Definition-time errors raised while building schemas and schema types.

/// Errors raised when a schema type is extended or a plugin is invoked.
///
/// These are programming mistakes, reported as soon as the offending
/// construction happens and never deferred to validation time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PluginError {
    /// A method with this name already exists on the schema type.
    #[error("PluginError: Function {0} is already defined.")]
    AlreadyDefined(String),

    /// A plugin entry cannot be registered.
    #[error("PluginError: Plugin {name} is malformed: {reason}")]
    Malformed { name: String, reason: String },

    /// No method with this name is registered on the schema type.
    #[error("PluginError: Function {0} is not defined.")]
    UnknownMethod(String),

    /// A plugin was invoked with arguments it cannot accept.
    #[error("PluginError: invalid arguments for {method}: {reason}")]
    InvalidArguments { method: String, reason: String },
}

impl PluginError {
    pub(crate) fn invalid_arguments(method: &str, reason: impl Into<String>) -> Self {
        PluginError::InvalidArguments {
            method: method.to_string(),
            reason: reason.into(),
        }
    }
}
