//! Error types for backend operations.

use thiserror::Error;

/// Error type for backend operations.
///
/// Categorizes storage failures so callers can distinguish local faults from
/// network trouble with a remote store. The pipeline treats every variant
/// the same way: log and fall through to the transport.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Internal backend error, state or computation error.
    ///
    /// Any error not related to network interaction.
    #[error(transparent)]
    Internal(Box<dyn std::error::Error + Send>),

    /// Network interaction error.
    ///
    /// Errors occurring during communication with a remote store.
    #[error(transparent)]
    Connection(Box<dyn std::error::Error + Send>),

    /// Serialization or deserialization error.
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}
