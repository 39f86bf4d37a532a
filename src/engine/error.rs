//! Engine error types.

use thiserror::Error;

/// Errors reported by the dispatch engine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MachineError {
    /// `init` called on a running machine whose reinit policy forbids it.
    #[error("State machine '{machine}' is already initialized")]
    AlreadyInitialized { machine: String },
}
