use core::ops::{Index, IndexMut};
use ndarray::Array2;

use crate::*;

/// Everything the authority knows about one position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub mine: bool,
    pub adjacent_mines: u8,
    pub visited: bool,
    pub marked: bool,
}

/// Fixed-size cell storage with precomputed neighbor mine counts.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    pub fn from_layout(layout: &MineLayout) -> Self {
        let size = layout.size();
        let mut cells: Array2<Cell> = Array2::default(size.to_nd_index());

        for coords in iter_positions(size) {
            cells[coords.to_nd_index()] = Cell {
                mine: layout.contains_mine(coords),
                adjacent_mines: layout.adjacent_mine_count(coords),
                visited: false,
                marked: false,
            };
        }

        Self { cells }
    }

    pub fn size(&self) -> Coord2 {
        array_size(&self.cells).unwrap_or((Coord::MAX, Coord::MAX))
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    pub fn get_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        self.cells.get_mut(coords.to_nd_index())
    }

    /// In-bounds neighbors of `coords`, clipped at the grid edges.
    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn count_neighbors(&self, coords: Coord2, pred: impl Fn(&Cell) -> bool) -> u8 {
        self.cells
            .iter_neighbor_cells(coords)
            .filter(|cell| pred(cell))
            .count() as u8
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
