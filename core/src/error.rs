use alloc::string::String;
use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("No saved grid found")]
    MissingSnapshot,
    #[error("No saved guess count found")]
    MissingGuessCount,
    #[error("Saved grid has {actual} cells, expected {expected}")]
    SnapshotSize { expected: CellCount, actual: usize },
    #[error("Saved cell {index} does not match its grid position")]
    SnapshotPosition { index: usize },
    #[error("Saved cell {index} shows a different prize than it hides")]
    SnapshotState { index: usize },
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Could not encode {key}: {reason}")]
    Encode { key: &'static str, reason: String },
    #[error("Could not write {key}: {reason}")]
    Write { key: &'static str, reason: String },
}
