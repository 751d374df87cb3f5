//! Error types for the CipherFS system.

use thiserror::Error;

/// Error type for all CipherFS operations.
///
/// The only condition lookup-dependent calls can surface is [`FsError::NotFound`];
/// the remaining variants guard insertion (duplicate names, capacity) and
/// malformed input. No variant is fatal to the process.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path does not resolve to any known directory or file.
    #[error("no such entry: {path}")]
    NotFound {
        path: String,
    },

    /// An entry with this name already exists in its namespace.
    #[error("entry already exists: {path}")]
    AlreadyExists {
        path: String,
    },

    /// The entity store reached its configured capacity.
    #[error("entity store is full: {count} entries, maximum {max}")]
    StoreFull {
        count: usize,
        max: usize,
    },

    /// Malformed path provided by the caller.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        path: String,
        reason: String,
    },
}

/// Result type alias for CipherFS operations.
pub type Result<T> = std::result::Result<T, FsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FsError::NotFound {
            path: "/missing".to_string(),
        };
        assert_eq!(err.to_string(), "no such entry: /missing");

        let err = FsError::AlreadyExists {
            path: "/docs".to_string(),
        };
        assert_eq!(err.to_string(), "entry already exists: /docs");

        let err = FsError::StoreFull {
            count: 4096,
            max: 4096,
        };
        assert_eq!(
            err.to_string(),
            "entity store is full: 4096 entries, maximum 4096"
        );

        let err = FsError::InvalidPath {
            path: "notes.txt".to_string(),
            reason: "must begin with '/'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid path 'notes.txt': must begin with '/'"
        );
    }
}
