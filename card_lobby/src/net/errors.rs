//! Protocol error types for inbound frame decoding.

use thiserror::Error;

/// Errors raised while decoding an inbound frame. The `Display` text is the
/// message reported back to the sender.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ProtocolError {
    /// Frame is not JSON, or its payload has the wrong shape
    #[error("Invalid JSON")]
    InvalidMessage,

    /// Frame has no usable `type`
    #[error("Missing type")]
    MissingActionKind,

    /// Frame names an action the server does not know
    #[error("Unknown event: {0}")]
    UnknownAction(String),
}

/// Result type for decoding operations
pub type Result<T> = std::result::Result<T, ProtocolError>;
