/// Source of the agent's random guesses.
///
/// Any `rand` generator works; a seeded `SmallRng` gives reproducible games.
pub trait RandomSource {
    /// Uniform index in `0..len`, `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: rand::Rng + ?Sized> RandomSource for R {
    fn pick_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}
