//! Error types for task lookup and content parsing.
//!
//! The engines themselves never fail; these errors only arise at the
//! lookup boundary (unknown task id) and when content is parsed.

use thiserror::Error;

/// Errors raised by the catalog and content parsing.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No task with the requested id exists.
    #[error("task not found: {task_id}")]
    TaskNotFound {
        /// The id that was looked up.
        task_id: String,
    },

    /// Two task records share the same id.
    #[error("duplicate task id: {task_id}")]
    DuplicateTask {
        /// The repeated id.
        task_id: String,
    },

    /// Task content was not valid JSON for the task model.
    #[error("failed to parse task content: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_not_found_display() {
        let err = CoreError::TaskNotFound {
            task_id: "t9".into(),
        };
        assert_eq!(err.to_string(), "task not found: t9");
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{bad}").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Json(_)));
        assert!(err.to_string().contains("parse task content"));
    }
}
