use rand::prelude::*;

use super::*;

/// Seeded uniform sampler, reproducible for a given seed.
#[derive(Clone, Debug)]
pub struct RandomMineSampler {
    rng: SmallRng,
}

impl RandomMineSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MineSampler for RandomMineSampler {
    fn sample_layout(&mut self, config: GameConfig) -> Vec<Coord2> {
        let mut cells: Vec<Coord2> = config.interior().collect();
        let mines = usize::from(config.mines()).min(cells.len());

        // partial Fisher-Yates, the first `mines` slots end up a uniform sample
        for i in 0..mines {
            let j = self.rng.random_range(i..cells.len());
            cells.swap(i, j);
        }
        cells.truncate(mines);
        cells
    }

    fn sample_cell(&mut self, config: GameConfig) -> Coord2 {
        (
            self.rng.random_range(1..=config.rows()),
            self.rng.random_range(1..=config.cols()),
        )
    }
}

/// Seed derived from the wall clock, for games that do not ask for a specific one.
pub fn seed_from_clock() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
