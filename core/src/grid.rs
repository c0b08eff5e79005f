use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

/// Result of trying to open a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellReveal {
    Opened(Prize),
    AlreadyOpen,
    Invalid,
}

/// Fixed-size set of cells, stored row-major so a cell's id doubles as its linear index.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Builds a fully closed grid, `prizes` must hold exactly one entry per cell in row-major order.
    pub(crate) fn from_prizes(size: Coord2, prizes: &[Prize]) -> Self {
        debug_assert_eq!(prizes.len(), usize::from(mult(size.0, size.1)));
        let cols = usize::from(size.1);
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            let id = row * cols + col;
            Cell::closed(id as CellIndex, (row as Coord, col as Coord), prizes[id])
        });
        Self { cells }
    }

    /// Validates a stored snapshot field by field. Nothing from a snapshot is trusted partially, any mismatch
    /// rejects the whole grid.
    pub fn from_snapshot(snapshot: &GridSnapshot, size: Coord2) -> Result<Self> {
        let expected = mult(size.0, size.1);
        if snapshot.cells.len() != usize::from(expected) {
            return Err(GameError::SnapshotSize {
                expected,
                actual: snapshot.cells.len(),
            });
        }

        let mut prizes = Vec::with_capacity(snapshot.cells.len());
        for (index, record) in snapshot.cells.iter().enumerate() {
            let position = size.position_of(record.id);
            if usize::from(record.id) != index || position != Some((record.row, record.col)) {
                return Err(GameError::SnapshotPosition { index });
            }
            prizes.push(record.hidden_state);
        }

        let mut grid = Self::from_prizes(size, &prizes);
        for (index, (cell, record)) in grid.cells.iter_mut().zip(&snapshot.cells).enumerate() {
            *cell = cell.with_visible(record.visible_state);
            if !cell.is_consistent() {
                return Err(GameError::SnapshotState { index });
            }
        }

        Ok(grid)
    }

    pub fn to_snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            cells: self.cells.iter().map(CellRecord::from).collect(),
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn cell(&self, index: CellIndex) -> Option<&Cell> {
        let coords = self.size().position_of(index)?;
        self.cells.get(coords.to_nd_index())
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    /// Cells in ascending id order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn prize_count(&self, prize: Prize) -> CellCount {
        self.cells.iter().filter(|cell| cell.hidden() == prize).count() as CellCount
    }

    pub fn closed_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_closed()).count() as CellCount
    }

    pub fn closed_indices(&self) -> Vec<CellIndex> {
        self.cells
            .iter()
            .filter(|cell| cell.is_closed())
            .map(Cell::id)
            .collect()
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_closed())
    }

    pub(crate) fn reveal(&mut self, index: CellIndex) -> CellReveal {
        let Some(coords) = self.size().position_of(index) else {
            return CellReveal::Invalid;
        };
        match self.cells.get_mut(coords.to_nd_index()) {
            None => CellReveal::Invalid,
            Some(cell) => match cell.open() {
                Some(prize) => CellReveal::Opened(prize),
                None => CellReveal::AlreadyOpen,
            },
        }
    }
}
