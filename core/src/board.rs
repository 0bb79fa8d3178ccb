use std::collections::{BTreeSet, HashSet};

use ndarray::Array2;

use crate::*;

/// Cell value marking a mine. Mine cells may hold larger values since neighbors are counted
/// onto them too; anything at or above this is a mine.
pub const MINE: u8 = 9;

/// The padded grid plus the mine, uncovered and marked coordinate sets of one game.
///
/// The grid is `(rows + 2) x (cols + 2)`; the outer ring soaks up neighbor increments so the
/// interior can be updated without bounds checks. All coordinates here are 1-based.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    config: GameConfig,
    grid: Array2<u8>,
    mines: BTreeSet<Coord2>,
    uncovered: HashSet<Coord2>,
    marked: HashSet<Coord2>,
}

impl Board {
    /// Places `config.mines()` mines uniformly at random and derives every neighbor count.
    pub fn generate(config: GameConfig, sampler: &mut impl MineSampler) -> Self {
        let mines: BTreeSet<Coord2> = sampler.sample_layout(config).into_iter().collect();
        if mines.len() != usize::from(config.mines()) {
            log::warn!(
                "Sampled mine count mismatch, actual: {}, requested: {}",
                mines.len(),
                config.mines()
            );
        }
        Self::with_mines(config, mines)
    }

    /// Builds a board from a known layout.
    pub fn from_mines(config: GameConfig, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mines = BTreeSet::new();
        for &coords in mine_coords {
            let coords = config.validate_coords(coords)?;
            if !mines.insert(coords) {
                return Err(GameError::InvalidMineLayout);
            }
        }
        if mines.len() != usize::from(config.mines()) {
            return Err(GameError::InvalidMineLayout);
        }
        Ok(Self::with_mines(config, mines))
    }

    fn with_mines(config: GameConfig, mines: BTreeSet<Coord2>) -> Self {
        let mut grid = Array2::zeros(config.padded_dim());
        for &coords in &mines {
            grid[coords.to_nd_index()] = MINE;
        }
        for &coords in &mines {
            for pos in padded_neighbors(coords) {
                grid[pos.to_nd_index()] += 1;
            }
        }

        Self {
            config,
            grid,
            mines,
            uncovered: HashSet::new(),
            marked: HashSet::new(),
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Raw cell value: `0` empty, `1..=8` neighbor count, `MINE` or more for a mine.
    pub fn value(&self, coords: Coord2) -> Result<u8> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.grid[coords.to_nd_index()])
    }

    pub fn is_mine(&self, coords: Coord2) -> bool {
        self.mines.contains(&coords)
    }

    pub fn mines(&self) -> &BTreeSet<Coord2> {
        &self.mines
    }

    pub fn uncovered(&self) -> &HashSet<Coord2> {
        &self.uncovered
    }

    pub fn is_uncovered(&self, coords: Coord2) -> bool {
        self.uncovered.contains(&coords)
    }

    pub fn marked(&self) -> &HashSet<Coord2> {
        &self.marked
    }

    pub fn is_marked(&self, coords: Coord2) -> bool {
        self.marked.contains(&coords)
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, (self.config.rows(), self.config.cols()))
    }

    /// Every uncovered cell is safe and all of them are open.
    pub fn check_win(&self) -> bool {
        self.uncovered.len() == usize::from(self.config.safe_cells())
    }

    /// Adds or removes a mark. Removing a mark that is not there is a caller bug.
    pub fn set_mark(&mut self, coords: Coord2, present: bool) -> Result<()> {
        let coords = self.config.validate_coords(coords)?;
        if present {
            self.marked.insert(coords);
        } else if !self.marked.remove(&coords) {
            debug_assert!(false, "unmarking {coords:?} which is not marked");
            return Err(GameError::NotMarked);
        }
        Ok(())
    }

    /// Marked cells among the neighbors of `coords`.
    pub fn marked_neighbors(&self, coords: Coord2) -> HashSet<Coord2> {
        self.neighbors(coords)
            .filter(|pos| self.marked.contains(pos))
            .collect()
    }

    /// Moves a mine away from `coords` so a first click is always safe.
    ///
    /// Neighbor counts are patched in place: counts around the vacated cell drop by one, while a
    /// neighboring mine adds one to the vacated cell's own count. The new mine is written after
    /// that pass so a relocation next door is counted once. Returns whether a mine was moved.
    pub fn relocate_if_mined(&mut self, coords: Coord2, sampler: &mut impl MineSampler) -> bool {
        if !self.mines.contains(&coords) {
            return false;
        }

        let mut target = coords;
        while self.mines.contains(&target) {
            target = sampler.sample_cell(self.config);
        }

        self.mines.remove(&coords);
        self.mines.insert(target);
        log::debug!("Relocated mine from {:?} to {:?}", coords, target);

        self.grid[coords.to_nd_index()] = 0;
        for pos in padded_neighbors(coords) {
            if self.grid[pos.to_nd_index()] < MINE {
                self.grid[pos.to_nd_index()] = self.grid[pos.to_nd_index()].saturating_sub(1);
            } else {
                self.grid[coords.to_nd_index()] += 1;
            }
        }

        self.grid[target.to_nd_index()] = MINE;
        for pos in padded_neighbors(target) {
            self.grid[pos.to_nd_index()] += 1;
        }
        true
    }

    /// Opens `coords` and floods outward through empty cells, returning the newly uncovered cells
    /// in 0-based view coordinates.
    ///
    /// Numbered cells are opened but not expanded; marked and already uncovered cells are never
    /// entered by the flood. With a non-empty `excluded` set (a confirmed chord) the start cell's
    /// own neighbors are queued once, minus the excluded ones, whatever its value.
    pub fn reveal_region(
        &mut self,
        coords: Coord2,
        excluded: Option<&HashSet<Coord2>>,
    ) -> BTreeSet<Coord2> {
        let excluded = excluded.filter(|excluded| !excluded.is_empty());
        let mut revealed = BTreeSet::new();
        let mut frontier = HashSet::from([coords]);
        let mut start_expanded = false;

        loop {
            let Some(&visit) = frontier.iter().next() else {
                break;
            };
            frontier.remove(&visit);

            if let Some(excluded) = excluded
                && !start_expanded
                && visit == coords
            {
                start_expanded = true;
                frontier.extend(
                    self.neighbors(visit)
                        .filter(|&pos| self.is_floodable(pos))
                        .filter(|pos| !excluded.contains(pos)),
                );
            }

            if self.uncovered.insert(visit) {
                self.marked.remove(&visit);
                revealed.insert(to_view(visit));
                log::trace!("Opened {:?} with value {}", visit, self.grid[visit.to_nd_index()]);
            }

            if self.grid[visit.to_nd_index()] != 0 {
                continue;
            }

            frontier.extend(self.neighbors(visit).filter(|&pos| self.is_floodable(pos)));
        }

        revealed
    }

    fn is_floodable(&self, coords: Coord2) -> bool {
        self.config.contains(coords)
            && !self.uncovered.contains(&coords)
            && !self.marked.contains(&coords)
    }

    /// Compares the marks around a numbered cell with the mines actually there.
    pub fn verify_marks(&self, coords: Coord2, marked_nearby: &HashSet<Coord2>) -> MarkCheck {
        let mut mines = 0;
        let mut confirmed = 0;
        for pos in self.neighbors(coords) {
            if self.mines.contains(&pos) {
                mines += 1;
                if marked_nearby.contains(&pos) {
                    confirmed += 1;
                }
            }
        }

        if mines != marked_nearby.len() {
            MarkCheck::WrongCount
        } else if confirmed == mines {
            MarkCheck::Confirmed
        } else {
            MarkCheck::Mismatched
        }
    }

    /// A reveal that opened exactly one cell, and that cell is a mine.
    pub fn is_loss(&self, revealed: &BTreeSet<Coord2>) -> bool {
        match (revealed.len(), revealed.first()) {
            (1, Some(&view)) => from_view(view).is_some_and(|coords| self.mines.contains(&coords)),
            _ => false,
        }
    }
}
