//! Engine errors.
//!
//! All errors are terminal to the triggering call: the engine performs no
//! partial-failure recovery, and a failed mutating call leaves the engine's
//! observable state unchanged.

use boardio_model::ModelError;
use thiserror::Error;

/// Errors raised by the constraint engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No available descriptor (or matched entry, for lookups) fits the
    /// requested `(name, number)` key.
    #[error("resource not found: {name}:{}", display_number(*.number))]
    ResourceNotFound {
        /// Requested resource name.
        name: String,
        /// Requested instance number, `None` matching any.
        number: Option<u32>,
    },

    /// A connector name was registered twice.
    #[error("connector specified more than once: {name}")]
    DuplicateConnector { name: String },

    /// An indirect pin identifier names a connector that was never
    /// registered.
    #[error("unknown connector '{name}'")]
    UnknownConnector { name: String },

    /// An indirect pin identifier addresses an entry its connector does not
    /// have (index out of range, absent key, or a non-numeric key into an
    /// index-addressed connector).
    #[error("connector '{connector}' has no pin '{key}'")]
    UnknownConnectorPin { connector: String, key: String },

    /// Indirect pin resolution did not terminate within the depth bound.
    #[error("cyclic connector reference while resolving '{identifier}'")]
    CyclicConnectorReference { identifier: String },

    /// A platform command template references a placeholder with no binding.
    #[error("unbound placeholder '{placeholder}' in platform command: {template}")]
    UnboundPlaceholder { placeholder: String, template: String },

    /// The external namer could not name a bound signal.
    #[error("no name assigned for signal '{signal}'")]
    UnresolvedSignal { signal: String },

    /// A mutating call, or a second finalize, after finalization.
    #[error("platform already finalized")]
    AlreadyFinalized,

    /// A board description error (malformed resource, unsupported connector
    /// format).
    #[error(transparent)]
    Model(#[from] ModelError),
}

fn display_number(number: Option<u32>) -> String {
    match number {
        Some(n) => n.to_string(),
        None => "None".to_string(),
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
