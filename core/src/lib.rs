//! Game-state engine for sapper: board generation, flood-fill reveal, chord checks and the
//! session that ties them to the scoreboard.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use stopwatch::*;
pub use types::*;

pub use sapper_records::{Difficulty, RecordStore, ScoreEntry, ScoreRecord, Scoreboard};

mod board;
mod error;
mod generator;
mod session;
mod stopwatch;
mod types;

/// Board dimensions and mine count. Construction guarantees at least one safe cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

impl GameConfig {
    pub(crate) const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        // the padded grid has to stay addressable by `Coord`
        if rows == 0 || cols == 0 || rows == Coord::MAX || cols == Coord::MAX {
            return Err(GameError::InvalidCoords);
        }
        if mines >= mult(rows, cols) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(rows, cols, mines))
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    /// Number of cells that must be uncovered to win.
    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub const fn contains(&self, (row, col): Coord2) -> bool {
        row >= 1 && row <= self.rows && col >= 1 && col <= self.cols
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Every interior cell, row by row.
    pub fn interior(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = (self.rows, self.cols);
        (1..=rows).flat_map(move |row| (1..=cols).map(move |col| (row, col)))
    }

    pub(crate) fn padded_dim(&self) -> [usize; 2] {
        [usize::from(self.rows) + 2, usize::from(self.cols) + 2]
    }
}

/// Board presets for the three difficulty tiers.
pub trait DifficultyConfig {
    fn config(self) -> GameConfig;
}

impl DifficultyConfig for Difficulty {
    fn config(self) -> GameConfig {
        match self {
            Difficulty::Easy => GameConfig::new_unchecked(9, 9, 10),
            Difficulty::Medium => GameConfig::new_unchecked(16, 16, 40),
            Difficulty::Hard => GameConfig::new_unchecked(16, 30, 99),
        }
    }
}

/// Result of comparing a numbered cell's marked neighbors with its real mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkCheck {
    /// Marks are exactly the neighboring mines; safe to open the rest.
    Confirmed,
    /// Right number of marks on the wrong cells, which loses the game.
    Mismatched,
    /// Number of marks differs from the number of mines; nothing happens.
    WrongCount,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Continue,
    Win,
    Loss,
}

impl Verdict {
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Win | Self::Loss)
    }
}

/// What a click changed, in 0-based view coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealOutcome {
    pub cells_opened: BTreeSet<Coord2>,
    /// Every mine on the board, present only when the click lost the game.
    pub mines_opened: Option<BTreeSet<Coord2>>,
    pub verdict: Verdict,
}

impl RevealOutcome {
    pub(crate) fn unchanged() -> Self {
        Self {
            cells_opened: BTreeSet::new(),
            mines_opened: None,
            verdict: Verdict::Continue,
        }
    }

    pub fn has_update(&self) -> bool {
        !self.cells_opened.is_empty() || self.verdict.is_final()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_classic_tiers() {
        let hard = Difficulty::Hard.config();

        assert_eq!((hard.rows(), hard.cols(), hard.mines()), (16, 30, 99));
        assert_eq!(Difficulty::Easy.config().safe_cells(), 71);
        assert_eq!(Difficulty::Medium.config().safe_cells(), 216);
    }

    #[test]
    fn rejects_configs_without_a_safe_cell() {
        assert_eq!(GameConfig::new(3, 3, 9), Err(GameError::TooManyMines));
        assert_eq!(GameConfig::new(3, 3, 12), Err(GameError::TooManyMines));
        assert!(GameConfig::new(3, 3, 8).is_ok());
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert_eq!(GameConfig::new(0, 5, 1), Err(GameError::InvalidCoords));
        assert_eq!(GameConfig::new(5, 255, 1), Err(GameError::InvalidCoords));
    }

    #[test]
    fn interior_walks_every_cell_once() {
        let config = GameConfig::new(2, 3, 1).unwrap();

        let cells: Vec<_> = config.interior().collect();

        assert_eq!(cells, vec![(1, 1), (1, 2), (1, 3), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn contains_excludes_border() {
        let config = Difficulty::Easy.config();

        assert!(config.contains((1, 1)));
        assert!(config.contains((9, 9)));
        assert!(!config.contains((0, 4)));
        assert!(!config.contains((10, 4)));
    }
}
