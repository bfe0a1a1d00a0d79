use ndarray::Array2;

use crate::*;

/// What the agent knows about one position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewCell {
    #[default]
    Unknown,
    Marked,
    Revealed(u8),
}

impl From<Symbol> for ViewCell {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::Unknown => Self::Unknown,
            Symbol::Count(count) => Self::Revealed(count),
            // an `X` is settled just like a mark, nothing left to do there
            Symbol::Marked | Symbol::Exploded => Self::Marked,
        }
    }
}

/// The agent's projection of the board, rebuilt from every rendering it receives.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentView {
    cells: Array2<ViewCell>,
    unknown_neighbors: Array2<u8>,
    marked_neighbors: Array2<u8>,
}

impl AgentView {
    pub fn new(size: Coord2) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }
        let mut view = Self {
            cells: Array2::default(size.to_nd_index()),
            unknown_neighbors: Array2::zeros(size.to_nd_index()),
            marked_neighbors: Array2::zeros(size.to_nd_index()),
        };
        view.recount();
        Ok(view)
    }

    pub fn size(&self) -> Coord2 {
        array_size(&self.cells).unwrap_or((Coord::MAX, Coord::MAX))
    }

    pub fn cell_at(&self, coords: Coord2) -> ViewCell {
        self.cells[coords.to_nd_index()]
    }

    pub fn unknown_neighbors(&self, coords: Coord2) -> u8 {
        self.unknown_neighbors[coords.to_nd_index()]
    }

    pub fn marked_neighbors(&self, coords: Coord2) -> u8 {
        self.marked_neighbors[coords.to_nd_index()]
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Unknown positions in row-major order.
    pub fn unknown_cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        iter_positions(self.size()).filter(|&coords| self.cell_at(coords) == ViewCell::Unknown)
    }

    /// Overwrites the whole view with `rendering`.
    pub fn sync(&mut self, rendering: &Rendering) -> Result<()> {
        if rendering.size() != self.size() {
            return Err(GameError::InvalidBoardShape);
        }

        for coords in iter_positions(self.size()) {
            self.cells[coords.to_nd_index()] = rendering.symbol_at(coords).into();
        }
        self.recount();
        Ok(())
    }

    /// Back to an all-unknown board.
    pub fn clear(&mut self) {
        self.cells.fill(ViewCell::Unknown);
        self.recount();
    }

    fn recount(&mut self) {
        for coords in iter_positions(self.size()) {
            let mut unknown = 0;
            let mut marked = 0;
            for neighbor in self.cells.iter_neighbor_cells(coords) {
                match neighbor {
                    ViewCell::Unknown => unknown += 1,
                    ViewCell::Marked => marked += 1,
                    ViewCell::Revealed(_) => {}
                }
            }
            self.unknown_neighbors[coords.to_nd_index()] = unknown;
            self.marked_neighbors[coords.to_nd_index()] = marked;
        }
    }
}
