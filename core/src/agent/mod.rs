use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;
pub use inference::*;
pub use view::*;

mod inference;
mod view;

/// The decision agent: sees only rendered boards and answers with one action per turn.
///
/// Deductions are queued and played one per turn; the queue is refilled only once it runs dry,
/// and a uniform guess among unknown cells is made when nothing can be deduced.
#[derive(Clone, Debug)]
pub struct Agent {
    view: AgentView,
    pending: VecDeque<Action>,
    queued_marks: Array2<bool>,
}

impl Agent {
    pub fn new(size: Coord2) -> Result<Self> {
        Ok(Self {
            view: AgentView::new(size)?,
            pending: VecDeque::new(),
            queued_marks: Array2::default(size.to_nd_index()),
        })
    }

    pub fn view(&self) -> &AgentView {
        &self.view
    }

    pub fn pending(&self) -> impl Iterator<Item = &Action> {
        self.pending.iter()
    }

    /// Forgets everything from a previous game.
    pub fn reset(&mut self) {
        self.view.clear();
        self.pending.clear();
        self.queued_marks.fill(false);
    }

    /// Starts a new game; the opening cell handed out by the authority is always visited first.
    pub fn start(&mut self, opening: Coord2) -> Action {
        self.reset();
        Action::visit(opening)
    }

    /// Takes in the authority's latest rendering.
    pub fn observe(&mut self, rendering: &Rendering) -> Result<()> {
        self.view.sync(rendering)
    }

    /// Picks the next action, `None` only when no unknown cell is left to guess.
    pub fn decide<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Option<Action> {
        if self.pending.is_empty() {
            let batch = infer(&self.view, &mut self.queued_marks);
            if !batch.is_empty() {
                log::debug!("queued {} deduced actions", batch.len());
            }
            self.pending.extend(batch);
        }

        if let Some(action) = self.pending.pop_front() {
            return Some(action);
        }

        let unknown: Vec<Coord2> = self.view.unknown_cells().collect();
        if unknown.is_empty() {
            return None;
        }
        let coords = unknown[rng.pick_index(unknown.len())];
        log::debug!("no deduction, guessing {:?} out of {}", coords, unknown.len());
        Some(Action::visit(coords))
    }
}
