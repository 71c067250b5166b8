//! Error types for the tagging pipeline.
//!
//! This module defines all error types that can occur while decoding, tagging
//! and filing documents.

use std::path::PathBuf;

use crate::pipeline::DocumentState;

/// Result type alias for pdftag operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document processing.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)] // "Invalid" prefix is intentional for clarity
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Directory traversal error
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// The glyph source could not open or decode a document
    #[error("Failed to decode {}: {reason}", .path.display())]
    Decode {
        /// Document that failed to decode
        path: PathBuf,
        /// Reason reported by the decoder
        reason: String,
    },

    /// Malformed classification rule
    #[error("Invalid rule '{name}': {reason}")]
    InvalidRule {
        /// Rule name as written in the rule file
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// Inconsistent pipeline configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A document tried to move back to an earlier lifecycle state
    #[error("Invalid document transition for {}: {from:?} -> {to:?}", .path.display())]
    InvalidTransition {
        /// Document path
        path: PathBuf,
        /// Current state
        from: DocumentState,
        /// Requested state
        to: DocumentState,
    },

    /// A document would keep a name another output already holds
    #[error("Output name '{name}' is already taken")]
    NameTaken {
        /// Base name without extension
        name: String,
    },

    /// Worker pool could not be created
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A processing unit disappeared without returning its token
    #[error("Worker exited without returning its completion token")]
    WorkerLost,

    /// Unsupported feature on this platform or build
    #[error("Unsupported feature: {0}")]
    Unsupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error() {
        let err = Error::Decode {
            path: PathBuf::from("scans/2021_03_03_10_11_12.pdf"),
            reason: "password required".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("2021_03_03_10_11_12.pdf"));
        assert!(msg.contains("password required"));
    }

    #[test]
    fn test_invalid_rule_error() {
        let err = Error::InvalidRule {
            name: "-".to_string(),
            reason: "no keywords".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Invalid rule '-'"));
        assert!(msg.contains("no keywords"));
    }

    #[test]
    fn test_invalid_transition_error() {
        let err = Error::InvalidTransition {
            path: PathBuf::from("a.pdf"),
            from: DocumentState::Merged,
            to: DocumentState::Dispatched,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Merged -> Dispatched"));
    }

    #[test]
    fn test_name_taken_error() {
        let err = Error::NameTaken {
            name: "Tesla-2021-Mar-3".to_string(),
        };
        assert_eq!(err.to_string(), "Output name 'Tesla-2021-Mar-3' is already taken");
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
