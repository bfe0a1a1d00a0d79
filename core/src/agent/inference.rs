use alloc::vec::Vec;
use ndarray::Array2;

use super::{AgentView, ViewCell};
use crate::*;

/// One scan over `view` for moves that follow from single numbered cells.
///
/// A number whose unknown and marked neighbors add up to exactly its count has only mines left
/// around it: every unknown neighbor gets a `Mark`, unless `queued_marks` says it was already
/// queued. A number already satisfied by marks, with unknown neighbors left, gets an
/// `AutoExplore` and the authority opens the rest.
///
/// Actions come out in row-major order of the deducing cell, marks in neighbor scan order.
pub fn infer(view: &AgentView, queued_marks: &mut Array2<bool>) -> Vec<Action> {
    let mut actions = Vec::new();

    for coords in iter_positions(view.size()) {
        let ViewCell::Revealed(count) = view.cell_at(coords) else {
            continue;
        };
        if count == 0 {
            continue;
        }

        let unknown = view.unknown_neighbors(coords);
        let marked = view.marked_neighbors(coords);

        if marked + unknown == count {
            for neighbor in view.iter_neighbors(coords) {
                let queued = &mut queued_marks[neighbor.to_nd_index()];
                if !*queued && view.cell_at(neighbor) == ViewCell::Unknown {
                    *queued = true;
                    actions.push(Action::mark(neighbor));
                }
            }
        }

        if marked == count && unknown > 0 {
            actions.push(Action::auto_explore(coords));
        }
    }

    log::trace!("inferred {} actions", actions.len());
    actions
}
