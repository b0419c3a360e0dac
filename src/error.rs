//! Error types for aitodo
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Failure while asking the completion endpoint for subtasks.
///
/// Every variant renders as a single human-readable message, which is what
/// the presentation layer shows to the user.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Endpoint answered with a non-2xx status
    #[error("API error {status}: {message}")]
    Http { status: u16, message: String },

    /// Request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// Response body was not the expected chat-completion shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// HTTP client could not be constructed
    #[error("Client error: {0}")]
    Client(String),
}

/// All error types that can occur in aitodo
#[derive(Debug, Error)]
pub enum TodoError {
    /// No task or subtask carries this ID
    #[error("Task not found: {0}")]
    TaskNotFound(u64),

    /// Subtasks can only hang off top-level tasks
    #[error("Task {0} is not a top-level task")]
    NotATopLevelTask(u64),

    /// An operation needs a selected task and none is selected
    #[error("Please select a task first")]
    NoSelection,

    /// The file already holds the largest representable ID
    #[error("No task IDs left: the highest ID ({max}) is already in use", max = u64::MAX)]
    IdExhausted,

    /// Configuration missing or invalid
    #[error("Config error: {0}")]
    Config(String),

    /// Storage/persistence error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Subtask generation failed
    #[error("Failed to generate subtasks: {0}")]
    Generation(#[from] GenerationError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TodoError {
    /// Errors a user action can trigger and recover from.
    ///
    /// These are reported as notifications; everything else indicates a
    /// broken environment (disk, config) and is treated as fatal.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            TodoError::TaskNotFound(_) | TodoError::NotATopLevelTask(_) | TodoError::NoSelection | TodoError::Generation(_)
        )
    }
}

/// Result type alias for aitodo operations
pub type Result<T> = std::result::Result<T, TodoError>;
