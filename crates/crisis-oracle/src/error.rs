//! Error types for oracle calls and order interpretation.

use std::time::Duration;

use thiserror::Error;

/// Failure to obtain any reply from the oracle.
#[derive(Debug, Error)]
pub enum OracleError {
    /// No API key configured for the HTTP oracle.
    #[error("oracle API key is not configured")]
    MissingApiKey,

    /// Connection or protocol failure.
    #[error("oracle request failed: {0}")]
    Transport(String),

    /// No reply within the configured bound.
    #[error("oracle did not answer within {0:?}")]
    Timeout(Duration),

    /// Non-2xx HTTP status.
    #[error("oracle returned HTTP {status}: {message}")]
    HttpStatus {
        /// Status code returned by the service
        status: u16,
        /// Error message from the response body, if any
        message: String,
    },

    /// A reply arrived but carried no usable text.
    #[error("oracle reply was malformed: {0}")]
    Malformed(String),
}

/// Failure to turn a player directive into an order set.
///
/// Display strings are single human-readable messages for the intel feed.
#[derive(Debug, Error)]
pub enum InterpretError {
    /// Blank directive, rejected locally without contacting the oracle.
    #[error("No command entered.")]
    EmptyDirective,

    /// The oracle could not be reached.
    #[error("Oracle unreachable ({0}). Please try again.")]
    Unreachable(#[source] OracleError),

    /// The oracle answered, but not with a valid order set.
    #[error("Failed to parse AI response ({reason}). Please try a different command.")]
    Uninterpretable {
        /// What was wrong with the reply
        reason: String,
    },
}

// A reply that arrived but held nothing readable counts against the reply,
// not the connection.
impl From<OracleError> for InterpretError {
    fn from(err: OracleError) -> Self {
        match err {
            OracleError::Malformed(reason) => Self::Uninterpretable { reason },
            other => Self::Unreachable(other),
        }
    }
}
