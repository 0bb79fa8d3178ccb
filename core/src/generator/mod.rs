use crate::*;
pub use random::*;

mod random;

/// Source of mine positions for board generation and first-click relocation.
pub trait MineSampler {
    /// `config.mines()` distinct interior cells, uniformly without replacement.
    fn sample_layout(&mut self, config: GameConfig) -> Vec<Coord2>;

    /// A single interior cell, uniformly.
    fn sample_cell(&mut self, config: GameConfig) -> Coord2;
}
