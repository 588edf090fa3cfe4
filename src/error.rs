//! Error types for the checkers engine.

use thiserror::Error;

/// Errors surfaced by engine, session and store operations.
#[derive(Error, Debug)]
pub enum CheckersError {
    /// Board dimensions or options rejected at creation.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// A stored blob does not describe a well-formed game state.
    #[error("Could not deserialize game state: {reason}")]
    Deserialization { reason: String },

    /// A coordinate outside the grid.
    #[error("Coordinate ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    /// A move selector answered with a position that is not a legal successor.
    #[error("Illegal move: {reason}")]
    IllegalMove { reason: String },

    /// Nothing stored under this game id or options name.
    #[error("Nothing stored under {id:?}")]
    NotFound { id: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CheckersError {
    pub(crate) fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    pub(crate) fn deserialization(reason: impl Into<String>) -> Self {
        Self::Deserialization {
            reason: reason.into(),
        }
    }
}

/// Result type alias for checkers operations.
pub type CheckersResult<T> = Result<T, CheckersError>;
