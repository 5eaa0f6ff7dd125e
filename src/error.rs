//! Error types for answer sheet operations
//!
//! Validation findings are never errors (they are collected into
//! `ValidationResult`). These cover caller mistakes at the API edge.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnswerSheetError {
    /// No block with the given id exists in the document
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    /// A block constructor was given an empty or inverted line range
    #[error("Invalid line range: {start}..={end}")]
    InvalidLineRange { start: i32, end: i32 },

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
