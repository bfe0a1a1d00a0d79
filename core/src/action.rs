use serde::{Deserialize, Serialize};

use crate::*;

/// What an action does to its target cell, with its protocol code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Visit,
    Mark,
    AutoExplore,
}

impl ActionKind {
    pub const fn code(self) -> u8 {
        match self {
            Self::Visit => 0,
            Self::Mark => 1,
            Self::AutoExplore => 2,
        }
    }

    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Visit),
            1 => Some(Self::Mark),
            2 => Some(Self::AutoExplore),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub coords: Coord2,
    pub kind: ActionKind,
}

impl Action {
    pub const fn new(coords: Coord2, kind: ActionKind) -> Self {
        Self { coords, kind }
    }

    pub const fn visit(coords: Coord2) -> Self {
        Self::new(coords, ActionKind::Visit)
    }

    pub const fn mark(coords: Coord2) -> Self {
        Self::new(coords, ActionKind::Mark)
    }

    pub const fn auto_explore(coords: Coord2) -> Self {
        Self::new(coords, ActionKind::AutoExplore)
    }
}
