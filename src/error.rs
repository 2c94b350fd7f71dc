use std::io;

use thiserror::Error;

/// Rejected board size. Sizes must be even and within 4..=16.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeError {
    #[error("board size must be an integer, got {0:?}")]
    NotAnInteger(String),
    #[error("board size must be an even integer, got {0}")]
    Odd(usize),
    #[error("board size must be 4 or above, got {0}")]
    TooSmall(usize),
    #[error("board size must be 16 or below, got {0}")]
    TooLarge(usize),
}

/// A nested grid that cannot become a [`crate::board::Board`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error(transparent)]
    Size(#[from] SizeError),
    #[error("board is not square: row {row} has {len} cells, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("unknown colour token {0:?}")]
    Colour(String),
    #[error("unknown cell token {0:?}")]
    Cell(String),
}

/// Why a move was not accepted. Routine, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("The game is over")]
    GameOver,
    #[error("Coordinates must be whole number between 1 and {size}")]
    OutOfRange { size: usize },
    #[error("Move is not legal")]
    Illegal,
    #[error("No move could be selected")]
    NoSelection,
}

#[derive(Debug, Error)]
pub enum LoadCause {
    #[error("could not read snapshot: {0}")]
    Io(#[from] io::Error),
    #[error("malformed snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed binary snapshot: {0}")]
    Format(String),
    #[error("invalid board: {0}")]
    Grid(#[from] GridError),
}

/// A snapshot could not be loaded. The live game is left as it was.
#[derive(Debug, Error)]
#[error("load failed: {cause}")]
pub struct LoadError {
    #[source]
    cause: LoadCause,
}

impl LoadError {
    pub fn new(cause: impl Into<LoadCause>) -> Self {
        Self {
            cause: cause.into(),
        }
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::new(LoadCause::Format(message.into()))
    }

    pub fn cause(&self) -> &LoadCause {
        &self.cause
    }
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("could not write snapshot: {0}")]
    Io(#[from] io::Error),
    #[error("could not encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
}
