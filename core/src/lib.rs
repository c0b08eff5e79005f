#![no_std]

extern crate alloc;

pub use budget::*;
pub use cell::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use format::*;
pub use generator::*;
pub use grid::*;
pub use storage::*;
pub use sweep::*;
pub use types::*;

mod budget;
mod cell;
mod config;
mod engine;
mod error;
mod format;
mod generator;
mod grid;
mod storage;
mod sweep;
mod types;

/// Outcome of a player asking to open a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UserRevealOutcome {
    Revealed(Prize),
    NoGuessesLeft,
    InvalidCell,
    AlreadyOpen,
}

impl UserRevealOutcome {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }

    /// Prize behind the cell, only when this reveal spent a guess.
    pub const fn revealed_prize(self) -> Option<Prize> {
        match self {
            Self::Revealed(prize) => Some(prize),
            _ => None,
        }
    }

    /// Whether the player hit something worth celebrating.
    pub const fn is_winning(self) -> bool {
        match self {
            Self::Revealed(prize) => prize.is_winning(),
            _ => false,
        }
    }
}
