use crate::*;
pub use random::*;

mod random;

pub trait MineLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}

/// How much protection the opening cell gets when mines are placed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StartCell {
    Random,
    SimpleSafe,
    AlwaysZero,
}
