//! Typed failures for store operations and history persistence

use thiserror::Error;

/// Result alias for [`crate::core::store::RatingStore`] operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Result alias for history file persistence
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Failures produced by rating store mutations and lookups.
///
/// Every variant leaves the store exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A movie name was empty after trimming
    #[error("movie name must not be empty")]
    InvalidName,

    /// A score outside the accepted range
    #[error("score {score} is out of range (accepted: 1 to 8)")]
    InvalidScore {
        /// The rejected score
        score: u8,
    },

    /// Registration under a name that is already present
    #[error("movie '{name}' is already registered")]
    AlreadyExists {
        /// The movie name that collided
        name: String,
    },

    /// Lookup of a movie or class that does not exist
    #[error("{entity} '{name}' not found")]
    NotFound {
        /// What was looked up ("movie" or "class")
        entity: &'static str,
        /// The missing key
        name: String,
    },

    /// A rating index past the end of a class's rating list
    #[error("rating index {index} is out of range (class has {len} ratings)")]
    IndexOutOfRange {
        /// The rejected zero-based index
        index: usize,
        /// Ratings currently in the class set
        len: usize,
    },
}

impl StoreError {
    /// Shorthand for a movie lookup miss
    #[must_use]
    pub fn movie_not_found(name: &str) -> Self {
        Self::NotFound {
            entity: "movie",
            name: name.to_string(),
        }
    }

    /// Shorthand for a class lookup miss
    #[must_use]
    pub fn class_not_found(label: &str) -> Self {
        Self::NotFound {
            entity: "class",
            name: label.to_string(),
        }
    }
}

/// Failures at the history file boundary.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Reading or writing the history file failed
    #[error("history file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The history file exists but is not a valid history document
    #[error("history file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_messages() {
        assert_eq!(
            StoreError::InvalidName.to_string(),
            "movie name must not be empty"
        );
        assert_eq!(
            StoreError::InvalidScore { score: 11 }.to_string(),
            "score 11 is out of range (accepted: 1 to 8)"
        );
        assert_eq!(
            StoreError::movie_not_found("Matrix").to_string(),
            "movie 'Matrix' not found"
        );
        assert_eq!(
            StoreError::class_not_found("7A").to_string(),
            "class '7A' not found"
        );
        assert_eq!(
            StoreError::IndexOutOfRange { index: 3, len: 2 }.to_string(),
            "rating index 3 is out of range (class has 2 ratings)"
        );
    }

    #[test]
    fn test_history_error_wraps_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = HistoryError::from(io);
        assert!(err.to_string().contains("denied"));
    }
}
