use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// One character of a rendered board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symbol {
    /// `?`
    Unknown,
    /// `@`
    Marked,
    /// `0`..`8`
    Count(u8),
    /// `X`, only in a lost rendering: the mine that was hit or the wrong mark.
    Exploded,
}

impl Symbol {
    pub const fn to_char(self) -> char {
        match self {
            Self::Unknown => '?',
            Self::Marked => '@',
            Self::Count(count) => (b'0' + count) as char,
            Self::Exploded => 'X',
        }
    }

    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '?' => Some(Self::Unknown),
            '@' => Some(Self::Marked),
            'X' => Some(Self::Exploded),
            '0'..='8' => Some(Self::Count(ch as u8 - b'0')),
            _ => None,
        }
    }

    /// Symbol shown for `cell` while the game is in `state`.
    pub const fn for_cell(cell: Cell, state: GameState) -> Self {
        match state {
            GameState::Playing => {
                if cell.marked {
                    Self::Marked
                } else if cell.visited {
                    Self::Count(cell.adjacent_mines)
                } else {
                    Self::Unknown
                }
            }
            GameState::Won => {
                if cell.mine {
                    Self::Marked
                } else {
                    Self::Count(cell.adjacent_mines)
                }
            }
            GameState::Lost => {
                if !cell.visited && !cell.marked {
                    Self::Unknown
                } else if (cell.mine && cell.visited) || (!cell.mine && cell.marked) {
                    Self::Exploded
                } else if cell.mine {
                    Self::Marked
                } else {
                    Self::Count(cell.adjacent_mines)
                }
            }
        }
    }
}

/// A full board as one side of the protocol sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct Rendering {
    symbols: Array2<Symbol>,
}

impl Rendering {
    pub fn from_symbols(symbols: Array2<Symbol>) -> Result<Self> {
        let (rows, columns) = symbols.dim();
        if rows == 0 || columns == 0 {
            return Err(GameError::EmptyBoard);
        }
        if array_size(&symbols).is_none() {
            return Err(GameError::BoardTooLarge);
        }
        Ok(Self { symbols })
    }

    pub(crate) fn from_board_symbols(symbols: Array2<Symbol>) -> Self {
        Self { symbols }
    }

    /// Builds a rendering from equally long rows.
    pub fn from_rows(rows: Vec<Vec<Symbol>>) -> Result<Self> {
        let row_count = rows.len();
        let column_count = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != column_count) {
            return Err(GameError::InvalidBoardShape);
        }

        let flat: Vec<Symbol> = rows.into_iter().flatten().collect();
        let symbols = Array2::from_shape_vec([row_count, column_count], flat)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Self::from_symbols(symbols)
    }

    pub fn size(&self) -> Coord2 {
        array_size(&self.symbols).unwrap_or((Coord::MAX, Coord::MAX))
    }

    pub fn symbol_at(&self, coords: Coord2) -> Symbol {
        self.symbols[coords.to_nd_index()]
    }

    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Symbol> + '_> + '_ {
        self.symbols.rows().into_iter().map(|row| row.into_iter().copied())
    }

    /// Terminal state implied by the symbols alone.
    ///
    /// Any `X` means the game was lost. A board without `?` can only be a win: while playing at
    /// least one safe cell is still hidden, and a safe cell cannot carry a mark without losing.
    pub fn implied_state(&self) -> GameState {
        if self.symbols.iter().any(|&symbol| symbol == Symbol::Exploded) {
            GameState::Lost
        } else if self.symbols.iter().all(|&symbol| symbol != Symbol::Unknown) {
            GameState::Won
        } else {
            GameState::Playing
        }
    }
}
