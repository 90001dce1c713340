//! Route table errors.

use thiserror::Error;

/// Errors raised while loading or validating a route table.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// A rule has neither or both of `if_error_tag` / `if_mastered`.
    #[error("route {index} from '{from_task_type}': {message}")]
    InvalidRule {
        /// Position of the rule in the table.
        index: usize,
        /// Category the rule applies to.
        from_task_type: String,
        /// What is wrong with it.
        message: String,
    },

    /// A rule targets a task id the catalog does not know.
    #[error("route {index} targets unknown task: {to_task_id}")]
    UnknownTarget {
        /// Position of the rule in the table.
        index: usize,
        /// The missing target.
        to_task_id: String,
    },

    /// The table was not valid JSON.
    #[error("failed to parse route table: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for routing operations.
pub type Result<T> = std::result::Result<T, RoutingError>;
