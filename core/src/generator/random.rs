use alloc::vec::Vec;
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Generation strategy that can optionally try to make the starting cell zero or at least safe, but other than that is
/// purely random.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
    start: Coord2,
    start_cell: StartCell,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64, start: Coord2, start_cell: StartCell) -> Self {
        Self {
            seed,
            start,
            start_cell,
        }
    }
}

impl MineLayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use StartCell::*;

        let total_cells = config.total_cells();
        let (rows, columns) = config.size;
        let start = (
            self.start.0.min(rows.saturating_sub(1)),
            self.start.1.min(columns.saturating_sub(1)),
        );

        // optimize for full boards
        if config.mines >= total_cells {
            return MineLayout::from_parts(
                Array2::from_elem(config.size.to_nd_index(), true),
                total_cells,
            );
        }

        let protected_cells = NeighborIter::new(start, config.size).count() as CellCount + 1;
        let actual_start_cell = match self.start_cell {
            Random => Random,
            SimpleSafe | AlwaysZero if config.mines + 1 > total_cells => {
                log::warn!("Cannot make start cell safe, fallback to random");
                Random
            }
            SimpleSafe => SimpleSafe,
            AlwaysZero if config.mines + protected_cells > total_cells => {
                log::warn!("Cannot make start cell zero, fallback to simple safe");
                SimpleSafe
            }
            AlwaysZero => AlwaysZero,
        };

        let mut protected: Array2<bool> = Array2::default(config.size.to_nd_index());
        match actual_start_cell {
            Random => {}
            SimpleSafe => protected[start.to_nd_index()] = true,
            AlwaysZero => {
                protected[start.to_nd_index()] = true;
                for coords in NeighborIter::new(start, config.size) {
                    protected[coords.to_nd_index()] = true;
                }
            }
        }

        let candidates: Vec<Coord2> = iter_positions(config.size)
            .filter(|&coords| !protected[coords.to_nd_index()])
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        for index in rand::seq::index::sample(&mut rng, candidates.len(), config.mines.into()) {
            mine_mask[candidates[index].to_nd_index()] = true;
        }

        log::debug!(
            "generated {:?} layout with {} mines, seed {}",
            config.size,
            config.mines,
            self.seed
        );
        MineLayout::from_parts(mine_mask, config.mines)
    }
}
