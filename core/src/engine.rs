use alloc::vec;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Final tally reported when the game ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub state: GameState,
    pub visited: CellCount,
    pub marked: CellCount,
}

/// The board authority: owns the true layout and enforces the rules.
///
/// Moves never fail. Out-of-range coordinates, moves on already resolved cells and anything
/// after the game ended are ignored and leave the board untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    grid: Grid,
    total_mines: CellCount,
    visited_count: CellCount,
    correctly_marked_count: CellCount,
    state: GameState,
}

impl Board {
    pub fn new(layout: &MineLayout) -> Self {
        log::debug!(
            "new board {:?} with {} mines",
            layout.size(),
            layout.mine_count()
        );
        Self {
            grid: Grid::from_layout(layout),
            total_mines: layout.mine_count(),
            visited_count: 0,
            correctly_marked_count: 0,
            state: Default::default(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.total_mines
    }

    pub fn visited_count(&self) -> CellCount {
        self.visited_count
    }

    pub fn correctly_marked_count(&self) -> CellCount {
        self.correctly_marked_count
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.grid.get(coords).copied()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        let (rows, columns) = self.size();
        mult(rows, columns) - self.total_mines
    }

    pub fn apply(&mut self, action: Action) -> MoveOutcome {
        let outcome = match action.kind {
            ActionKind::Visit => self.visit(action.coords),
            ActionKind::Mark => self.mark(action.coords),
            ActionKind::AutoExplore => self.auto_explore(action.coords),
        };
        if outcome.has_update() {
            log::debug!("{:?} -> {:?}", action, outcome);
        }
        outcome
    }

    pub fn visit(&mut self, coords: Coord2) -> MoveOutcome {
        if !self.state.is_playing() {
            return MoveOutcome::Ignored;
        }
        match self.grid.get(coords) {
            Some(cell) if !cell.visited && !cell.marked => self.flood_fill(coords),
            _ => MoveOutcome::Ignored,
        }
    }

    pub fn mark(&mut self, coords: Coord2) -> MoveOutcome {
        if !self.state.is_playing() {
            return MoveOutcome::Ignored;
        }
        let Some(cell) = self.grid.get_mut(coords) else {
            return MoveOutcome::Ignored;
        };
        if cell.visited || cell.marked {
            return MoveOutcome::Ignored;
        }

        cell.marked = true;
        if cell.mine {
            self.correctly_marked_count += 1;
            MoveOutcome::Applied
        } else {
            self.state = GameState::Lost;
            MoveOutcome::Lost
        }
    }

    pub fn auto_explore(&mut self, coords: Coord2) -> MoveOutcome {
        if !self.state.is_playing() {
            return MoveOutcome::Ignored;
        }
        let Some(&cell) = self.grid.get(coords) else {
            return MoveOutcome::Ignored;
        };
        if !cell.visited || cell.mine {
            return MoveOutcome::Ignored;
        }

        // not enough marks around yet
        if self.grid.count_neighbors(coords, |cell| cell.marked) != cell.adjacent_mines {
            return MoveOutcome::Ignored;
        }

        let hidden: Vec<Coord2> = self
            .grid
            .iter_neighbors(coords)
            .filter(|&pos| {
                let neighbor = self.grid[pos];
                !neighbor.visited && !neighbor.marked
            })
            .collect();

        hidden
            .into_iter()
            .map(|pos| self.visit(pos))
            .fold(MoveOutcome::Ignored, core::ops::BitOr::bitor)
    }

    /// Reveals `start` and cascades through zero cells, in the same order a depth-first
    /// recursion over the neighbor scan order would.
    fn flood_fill(&mut self, start: Coord2) -> MoveOutcome {
        let mut frontier = vec![start];

        while let Some(coords) = frontier.pop() {
            let cell = &mut self.grid[coords];
            if cell.visited || cell.marked {
                continue;
            }
            cell.visited = true;
            let Cell {
                mine,
                adjacent_mines,
                ..
            } = *cell;

            if mine {
                self.state = GameState::Lost;
                return MoveOutcome::Lost;
            }

            self.visited_count += 1;
            if self.visited_count == self.safe_cell_count() {
                self.state = GameState::Won;
                return MoveOutcome::Won;
            }

            if adjacent_mines == 0 {
                let next: Vec<Coord2> = self
                    .grid
                    .iter_neighbors(coords)
                    .filter(|&pos| !self.grid[pos].visited)
                    .collect();
                frontier.extend(next.into_iter().rev());
            }
        }

        MoveOutcome::Applied
    }

    pub fn render(&self) -> Rendering {
        let symbols = Array2::from_shape_fn(self.size().to_nd_index(), |(row, column)| {
            Symbol::for_cell(self.grid[(row as Coord, column as Coord)], self.state)
        });
        Rendering::from_board_symbols(symbols)
    }

    pub fn summary(&self) -> Summary {
        let marked = match self.state {
            GameState::Won => self.total_mines,
            _ => self.correctly_marked_count,
        };
        Summary {
            state: self.state,
            visited: self.visited_count,
            marked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    fn layout(size: Coord2, mines: &[Coord2]) -> MineLayout {
        MineLayout::from_mine_coords(size, mines).unwrap()
    }

    /// The 3x3 board with mines at (0, 1) and (2, 2).
    fn sample() -> Board {
        Board::new(&layout((3, 3), &[(0, 1), (2, 2)]))
    }

    fn text(board: &Board) -> Vec<String> {
        board
            .render()
            .rows()
            .map(|row| row.map(Symbol::to_char).collect())
            .collect()
    }

    #[test]
    fn visit_reveals_single_numbered_cell() {
        let mut board = sample();

        assert_eq!(board.visit((0, 0)), MoveOutcome::Applied);
        assert_eq!(text(&board), ["1??", "???", "???"]);
        assert_eq!(board.visited_count(), 1);
    }

    #[test]
    fn visit_on_mine_loses_and_highlights_it() {
        let mut board = sample();
        board.visit((0, 0));

        assert_eq!(board.visit((0, 1)), MoveOutcome::Lost);
        assert_eq!(board.state(), GameState::Lost);
        assert_eq!(text(&board), ["1X?", "???", "???"]);
        assert_eq!(board.visited_count(), 1);
    }

    #[test]
    fn sample_game_is_won_after_last_safe_cell() {
        let mut board = sample();

        assert_eq!(board.visit((0, 0)), MoveOutcome::Applied);
        assert_eq!(board.visit((0, 2)), MoveOutcome::Applied);
        assert_eq!(board.visit((2, 0)), MoveOutcome::Applied);
        assert_eq!(board.visit((1, 2)), MoveOutcome::Won);

        assert_eq!(text(&board), ["1@1", "122", "01@"]);
        assert_eq!(
            board.summary(),
            Summary {
                state: GameState::Won,
                visited: 7,
                marked: 2,
            }
        );
    }

    #[test]
    fn flood_fill_opens_connected_zero_region() {
        let mut board = Board::new(&layout((4, 4), &[(3, 3)]));

        assert_eq!(board.visit((0, 0)), MoveOutcome::Won);
        for row in 0..4 {
            for column in 0..4 {
                let cell = board.cell_at((row, column)).unwrap();
                assert_eq!(cell.visited, (row, column) != (3, 3));
            }
        }
    }

    #[test]
    fn flood_fill_stops_at_numbered_border() {
        let mut board = Board::new(&layout((3, 5), &[(0, 4), (2, 4)]));

        assert_eq!(board.visit((1, 0)), MoveOutcome::Applied);
        assert_eq!(text(&board), ["0001?", "0002?", "0001?"]);
        assert_eq!(board.visited_count(), 12);
    }

    #[test]
    fn flood_fill_skips_marked_cells() {
        let mut board = Board::new(&layout((3, 3), &[(2, 2)]));
        assert_eq!(board.mark((2, 2)), MoveOutcome::Applied);

        assert_eq!(board.visit((0, 0)), MoveOutcome::Won);
        assert!(board.cell_at((2, 2)).unwrap().marked);
        assert!(!board.cell_at((2, 2)).unwrap().visited);
    }

    #[test]
    fn correct_mark_is_counted() {
        let mut board = sample();

        assert_eq!(board.mark((0, 1)), MoveOutcome::Applied);
        assert_eq!(board.correctly_marked_count(), 1);
        assert_eq!(board.state(), GameState::Playing);
        assert_eq!(text(&board), ["?@?", "???", "???"]);
    }

    #[test]
    fn wrong_mark_loses_immediately() {
        let mut board = sample();
        board.visit((0, 0));
        board.visit((0, 2));

        assert_eq!(board.mark((1, 0)), MoveOutcome::Lost);
        let cell = board.cell_at((1, 0)).unwrap();
        assert!(cell.marked);
        assert!(!cell.visited);
        assert_eq!(text(&board), ["1?1", "X??", "???"]);
        assert_eq!(
            board.summary(),
            Summary {
                state: GameState::Lost,
                visited: 2,
                marked: 0,
            }
        );
    }

    #[test]
    fn lost_rendering_keeps_correct_marks() {
        let mut board = sample();
        board.mark((2, 2));
        board.visit((0, 1));

        assert_eq!(text(&board), ["?X?", "???", "??@"]);
        assert_eq!(board.summary().marked, 1);
    }

    #[test]
    fn marks_alone_never_win() {
        let mut board = sample();

        assert_eq!(board.mark((0, 1)), MoveOutcome::Applied);
        assert_eq!(board.mark((2, 2)), MoveOutcome::Applied);
        assert_eq!(board.state(), GameState::Playing);
    }

    #[test]
    fn auto_explore_reveals_when_marks_satisfy_count() {
        let mut board = sample();
        board.visit((1, 1));
        board.mark((0, 1));
        board.mark((2, 2));

        assert_eq!(board.auto_explore((1, 1)), MoveOutcome::Won);
        assert_eq!(text(&board), ["1@1", "122", "01@"]);
        assert_eq!(board.summary().marked, 2);
    }

    #[test]
    fn auto_explore_waits_for_enough_marks() {
        let mut board = sample();
        board.visit((1, 1));
        board.mark((0, 1));
        let before = board.clone();

        assert_eq!(board.auto_explore((1, 1)), MoveOutcome::Ignored);
        assert_eq!(board, before);
    }

    #[test]
    fn auto_explore_ignores_hidden_cells() {
        let mut board = sample();
        let before = board.clone();

        assert_eq!(board.auto_explore((2, 0)), MoveOutcome::Ignored);
        assert_eq!(board, before);
    }

    #[test]
    fn invalid_moves_leave_board_untouched() {
        let mut board = sample();
        board.visit((0, 0));
        board.mark((0, 1));
        let before = board.clone();

        assert_eq!(board.visit((0, 0)), MoveOutcome::Ignored);
        assert_eq!(board.visit((0, 1)), MoveOutcome::Ignored);
        assert_eq!(board.mark((0, 0)), MoveOutcome::Ignored);
        assert_eq!(board.mark((0, 1)), MoveOutcome::Ignored);
        assert_eq!(board.visit((3, 0)), MoveOutcome::Ignored);
        assert_eq!(board.mark((0, 200)), MoveOutcome::Ignored);
        assert_eq!(board.auto_explore((9, 9)), MoveOutcome::Ignored);
        assert_eq!(board, before);
    }

    #[test]
    fn finished_game_is_absorbing() {
        let mut board = sample();
        board.visit((0, 1));
        let before = board.clone();

        assert_eq!(board.visit((2, 0)), MoveOutcome::Ignored);
        assert_eq!(board.mark((2, 2)), MoveOutcome::Ignored);
        assert_eq!(board.apply(Action::auto_explore((0, 0))), MoveOutcome::Ignored);
        assert_eq!(board, before);
    }

    #[test]
    fn mine_free_board_is_won_by_first_visit() {
        let mut board = Board::new(&layout((2, 2), &[]));

        assert_eq!(board.apply(Action::visit((1, 1))), MoveOutcome::Won);
        assert_eq!(text(&board), ["00", "00"]);
        assert_eq!(board.summary().visited, 4);
    }
}
