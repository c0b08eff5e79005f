/// Single coordinate axis used for grid rows, columns, and positions.
pub type Coord = u8;

/// Count type used for prize counts, cell ids, and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Row-major index of a cell, identical to its id.
pub type CellIndex = CellCount;

/// Prize value as shown to the player.
pub type Amount = u32;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Converts between row-major cell indices and `(row, col)` positions for a grid of `size`.
pub trait RowMajor {
    fn position_of(self, index: CellIndex) -> Option<Coord2>;
    fn index_of(self, coords: Coord2) -> Option<CellIndex>;
}

impl RowMajor for Coord2 {
    fn position_of(self, index: CellIndex) -> Option<Coord2> {
        let (rows, cols) = self;
        if cols == 0 || index >= mult(rows, cols) {
            return None;
        }
        let cols = CellCount::from(cols);
        let row = (index / cols).try_into().ok()?;
        let col = (index % cols).try_into().ok()?;
        Some((row, col))
    }

    fn index_of(self, (row, col): Coord2) -> Option<CellIndex> {
        let (rows, cols) = self;
        if row >= rows || col >= cols {
            return None;
        }
        Some(CellCount::from(row) * CellCount::from(cols) + CellCount::from(col))
    }
}
