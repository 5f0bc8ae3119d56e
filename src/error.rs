//! @dose
//! purpose: Error types shared by command registration and argument resolution.
//!
//! invariants:
//!     - ArgError is the only error dispatch can return; "no matching command" is not an error
//!     - Display text of ArgError is the user-facing diagnostic printed by the binary
//!
//! do-not:
//!     - Never exit the process from library code - return ArgError and let the caller decide

use thiserror::Error;

/// Failure while resolving a handler argument
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    #[error("{name} is required.")]
    Missing { key: String, name: String },
    #[error("{message}")]
    Invalid { key: String, message: String },
}

impl ArgError {
    /// The option-map key the failing argument was bound to
    pub fn key(&self) -> &str {
        match self {
            ArgError::Missing { key, .. } | ArgError::Invalid { key, .. } => key,
        }
    }
}

/// Failure while building a command descriptor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Command has no components")]
    EmptyComponents,
    #[error("Command component {index} is blank")]
    BlankComponent { index: usize },
}
