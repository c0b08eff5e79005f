use serde::{Deserialize, Serialize};

use crate::*;

/// Prize concealed under a cell, fixed once the grid is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Prize {
    Jackpot,
    SmallJackpot,
    Empty,
}

impl Prize {
    /// Whether revealing this prize deserves a celebration.
    pub const fn is_winning(self) -> bool {
        matches!(self, Self::Jackpot | Self::SmallJackpot)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jackpot => "jackpot",
            Self::SmallJackpot => "small-jackpot",
            Self::Empty => "empty",
        }
    }
}

impl Default for Prize {
    fn default() -> Self {
        Self::Empty
    }
}

/// What the player currently sees for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellState {
    Closed,
    Jackpot,
    SmallJackpot,
    Empty,
}

impl CellState {
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Name used in stored snapshots.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Jackpot => "jackpot",
            Self::SmallJackpot => "small-jackpot",
            Self::Empty => "empty",
        }
    }

    pub const fn prize(self) -> Option<Prize> {
        match self {
            Self::Closed => None,
            Self::Jackpot => Some(Prize::Jackpot),
            Self::SmallJackpot => Some(Prize::SmallJackpot),
            Self::Empty => Some(Prize::Empty),
        }
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Closed
    }
}

impl From<Prize> for CellState {
    fn from(prize: Prize) -> Self {
        match prize {
            Prize::Jackpot => Self::Jackpot,
            Prize::SmallJackpot => Self::SmallJackpot,
            Prize::Empty => Self::Empty,
        }
    }
}

/// One grid position. `visible` is either `Closed` or the `hidden` prize, and only ever moves from the former to
/// the latter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    id: CellIndex,
    coords: Coord2,
    visible: CellState,
    hidden: Prize,
}

impl Cell {
    pub(crate) const fn closed(id: CellIndex, coords: Coord2, hidden: Prize) -> Self {
        Self {
            id,
            coords,
            visible: CellState::Closed,
            hidden,
        }
    }

    pub(crate) const fn with_visible(mut self, visible: CellState) -> Self {
        self.visible = visible;
        self
    }

    pub const fn id(&self) -> CellIndex {
        self.id
    }

    pub const fn row(&self) -> Coord {
        self.coords.0
    }

    pub const fn col(&self) -> Coord {
        self.coords.1
    }

    pub const fn coords(&self) -> Coord2 {
        self.coords
    }

    pub const fn visible(&self) -> CellState {
        self.visible
    }

    pub const fn hidden(&self) -> Prize {
        self.hidden
    }

    pub const fn is_closed(&self) -> bool {
        self.visible.is_closed()
    }

    pub fn is_consistent(&self) -> bool {
        match self.visible.prize() {
            None => true,
            Some(prize) => prize == self.hidden,
        }
    }

    /// Shows the hidden prize, returns `None` when the cell was already open.
    pub(crate) fn open(&mut self) -> Option<Prize> {
        if self.is_closed() {
            self.visible = self.hidden.into();
            Some(self.hidden)
        } else {
            None
        }
    }
}
