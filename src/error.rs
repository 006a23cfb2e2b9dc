use thiserror::Error;

/// Error family surfaced by every client operation.
///
/// Failures propagate straight to the caller; nothing is retried or
/// recovered internally, and list operations never return partial data.
#[derive(Debug, Error)]
pub enum PetTracerError {
    /// Caller-supplied request payload was malformed.
    #[error("invalid request payload: {0}")]
    Validation(String),
    /// Not logged in, or the login response carried no usable token.
    #[error("authentication error: {0}")]
    Authentication(String),
    /// Transport failure: connection error, timeout or non-2xx status.
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Response body was not JSON, or JSON of the wrong shape for the
    /// operation (object where a list was expected, and vice versa).
    #[error("protocol error: {0}")]
    Protocol(String),
    /// A record in the response failed required-field validation.
    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, PetTracerError>;
