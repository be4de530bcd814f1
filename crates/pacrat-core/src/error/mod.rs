//! Error types and result aliases for Pacrat operations.
//!
//! Provides a unified error type covering the three failure categories a
//! query can end in: an upstream index answered badly, its answer could not
//! be understood, or the caller's request was invalid to begin with.

use thiserror::Error;

use crate::types::Index;

/// Unified error type for all Pacrat operations
#[derive(Error, Debug)]
pub enum PacratError {
    // Upstream errors
    #[error("{index} request failed with status code {status}")]
    UpstreamStatus { index: Index, status: u16 },

    #[error("failed to parse {index} response: {message}")]
    Parse { index: Index, message: String },

    // Transport errors
    #[error("network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Caller errors
    #[error("invalid request: {message}")]
    Validation { message: String },
}

/// Result type alias for Pacrat operations
pub type PacratResult<T> = Result<T, PacratError>;

impl PacratError {
    /// Create a network error from any error type
    pub fn network<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create a parse error for a backend response
    pub fn parse(index: Index, message: impl Into<String>) -> Self {
        Self::Parse {
            index,
            message: message.into(),
        }
    }

    /// Create a validation error for a caller mistake
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether this error was caused by the caller's input rather than an
    /// upstream or transport failure. Dispatch layers report the two
    /// categories with distinct codes.
    pub fn is_user_error(&self) -> bool {
        matches!(self, PacratError::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_message_names_index_and_code() {
        let error = PacratError::UpstreamStatus {
            index: Index::Pypi,
            status: 500,
        };
        let message = error.to_string();
        assert!(message.contains("pypi"));
        assert!(message.contains("500"));
    }

    #[test]
    fn validation_is_the_only_user_error_category() {
        assert!(PacratError::validation("bad limit").is_user_error());
        assert!(!PacratError::parse(Index::Npm, "truncated body").is_user_error());
        assert!(!PacratError::UpstreamStatus {
            index: Index::Crates,
            status: 404
        }
        .is_user_error());
        assert!(!PacratError::Network {
            message: "timed out".to_string(),
            source: None
        }
        .is_user_error());
    }
}
