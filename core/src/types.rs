/// Single coordinate axis, 1-based inside the board.
pub type Coord = u8;

/// Count type used for mine counts and cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

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

/// 1-based board coordinates to the 0-based ones used by a view.
pub const fn to_view((row, col): Coord2) -> Coord2 {
    (row - 1, col - 1)
}

/// 0-based view coordinates to 1-based board coordinates.
pub const fn from_view((row, col): Coord2) -> Option<Coord2> {
    match (row.checked_add(1), col.checked_add(1)) {
        (Some(row), Some(col)) => Some((row, col)),
        _ => None,
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Applies `delta` to `coords`, returning a value only when it stays within `1..=max`.
fn apply_delta(coords: Coord2, delta: (i8, i8), max: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (drow, dcol) = delta;
    let (max_row, max_col) = max;

    let next_row = row.checked_add_signed(drow)?;
    if next_row == 0 || next_row > max_row {
        return None;
    }

    let next_col = col.checked_add_signed(dcol)?;
    if next_col == 0 || next_col > max_col {
        return None;
    }

    Some((next_row, next_col))
}

/// Interior neighbors of a cell, in compass order starting north-west.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    max: Coord2,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, max: Coord2) -> Self {
        Self {
            center,
            max,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.max);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

/// All 8 surrounding cells including the border ring, for bookkeeping on the padded grid.
pub(crate) fn padded_neighbors((row, col): Coord2) -> impl Iterator<Item = Coord2> {
    DISPLACEMENTS.into_iter().map(move |(drow, dcol)| {
        (
            row.wrapping_add_signed(drow),
            col.wrapping_add_signed(dcol),
        )
    })
}
