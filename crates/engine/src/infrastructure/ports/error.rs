//! Error types for port operations.

/// Repository operation errors with context for debugging.
///
/// A missing record is not an error at this level; lookups return `Option`.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Backend unreachable or the operation failed in transport.
    /// Includes the operation name for tracing.
    #[error("Storage unavailable in {operation}: {message}")]
    Unavailable {
        operation: &'static str,
        message: String,
    },

    /// A stored document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    /// Create an Unavailable error with operation context.
    pub fn unavailable(operation: &'static str, message: impl ToString) -> Self {
        Self::Unavailable {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}
