//! Errors for board description validation.

use thiserror::Error;

use crate::resource::ResourceTag;

/// Errors raised while validating a board description.
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    /// A resource's constraint list yields no inferable shape, or breaks the
    /// constraint grammar (mixed pin list and subsignals, duplicate pin
    /// lists, nested subsignals).
    #[error("malformed resource {tag}: {detail}")]
    MalformedResource {
        /// Identity of the offending resource.
        tag: ResourceTag,
        /// What was wrong with its constraints.
        detail: String,
    },

    /// A connector's pin-list value is neither the whitespace-token string
    /// form nor a name-keyed mapping of strings.
    #[error("unsupported pin list format for connector {connector}: {found}")]
    UnsupportedConnectorFormat {
        /// Name of the connector being registered.
        connector: String,
        /// Description of the rejected value's shape.
        found: String,
    },
}
