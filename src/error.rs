//! Error types for the controller core

use thiserror::Error;

/// Errors reported by the controller core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    /// Address does not end in `/fader`, `/encoder` or `/button`
    #[error("Not implemented for address: {0}")]
    UnrecognizedAddress(String),

    /// Mode name that does not match any `ControllerMode`
    #[error("Unknown controller mode: {0}")]
    UnknownMode(String),

    /// No controller registered under the address
    #[error("No controller registered for address: {0}")]
    NotFound(String),
}
