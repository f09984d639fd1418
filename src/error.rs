//! Custom error types for Tasker.
//!
//! This module provides structured error types that enable better
//! error handling, reporting, and recovery throughout the application.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Tasker operations
#[derive(Error, Debug)]
pub enum TaskerError {
    // =========================================================================
    // Input Errors
    // =========================================================================
    /// Caller-supplied input was rejected
    #[error("Invalid input: {reason}")]
    Validation { reason: String },

    /// No task exists with the given id
    #[error("No task with id {id}")]
    NotFound { id: u64 },

    // =========================================================================
    // Persistence Errors
    // =========================================================================
    /// Reading or writing the data file failed
    #[error("Persistence error: {message}")]
    Persistence {
        message: String,
        path: Option<PathBuf>,
    },

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    /// IO error wrapper
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON error wrapper
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl TaskerError {
    // =========================================================================
    // Constructor helpers
    // =========================================================================

    /// Create a validation error
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(id: u64) -> Self {
        Self::NotFound { id }
    }

    /// Create a persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
            path: None,
        }
    }

    /// Create a persistence error with the offending path
    pub fn persistence_with_path(message: impl Into<String>, path: PathBuf) -> Self {
        Self::Persistence {
            message: message.into(),
            path: Some(path),
        }
    }

    // =========================================================================
    // Classification helpers
    // =========================================================================

    /// Check if this error is a normal negative outcome the caller should
    /// report and move on from (re-prompt, print, continue)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::NotFound { .. })
    }

    /// Get error code for exit status
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } => 2,
            Self::NotFound { .. } => 3,
            _ => 1,
        }
    }
}

/// Type alias for Tasker results
pub type Result<T> = std::result::Result<T, TaskerError>;
