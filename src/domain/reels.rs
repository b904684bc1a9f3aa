//! Reel indices
//!
//! The machine has a fixed number of reels, each showing one symbol index.
//! Indices only change when a spin starts; the animation never touches them.

use rand::Rng;

/// Number of reels on the machine
pub const REEL_COUNT: usize = 3;

/// Errors that can occur when building reel state
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReelError {
    #[error("a reel needs at least one symbol")]
    NoSymbols,
}

/// Current symbol index for every reel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReelState {
    symbols: [usize; REEL_COUNT],
    symbol_count: usize,
}

impl ReelState {
    /// Creates reels with uniformly random starting symbols
    pub fn random<R: Rng + ?Sized>(symbol_count: usize, rng: &mut R) -> Result<Self, ReelError> {
        if symbol_count == 0 {
            return Err(ReelError::NoSymbols);
        }

        let mut reels = Self {
            symbols: [0; REEL_COUNT],
            symbol_count,
        };
        reels.reroll(rng);
        Ok(reels)
    }

    /// Draws a new symbol for every reel, uniformly in `0..symbol_count`
    pub fn reroll<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for slot in self.symbols.iter_mut() {
            *slot = rng.random_range(0..self.symbol_count);
        }
    }

    /// Symbol indices, one per reel
    pub fn symbols(&self) -> [usize; REEL_COUNT] {
        self.symbols
    }

    /// Number of distinct symbols a reel can show
    pub fn symbol_count(&self) -> usize {
        self.symbol_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn zero_symbols_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(ReelState::random(0, &mut rng), Err(ReelError::NoSymbols));
    }

    #[test]
    fn same_seed_draws_same_reels() {
        let a = ReelState::random(4, &mut StdRng::seed_from_u64(11)).unwrap();
        let b = ReelState::random(4, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.symbol_count(), 4);
    }

    #[test]
    fn reroll_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut reels = ReelState::random(4, &mut rng).unwrap();
        for _ in 0..1_000 {
            reels.reroll(&mut rng);
            assert!(reels.symbols().iter().all(|&s| s < 4));
        }
    }

    #[test]
    fn reroll_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut reels = ReelState::random(4, &mut rng).unwrap();
        let mut counts = [[0u32; 4]; REEL_COUNT];

        let spins = 20_000;
        for _ in 0..spins {
            reels.reroll(&mut rng);
            for (reel, &symbol) in reels.symbols().iter().enumerate() {
                counts[reel][symbol] += 1;
            }
        }

        // Expected 5000 per bucket; 10% tolerance is far outside sampling noise.
        for reel_counts in counts {
            for count in reel_counts {
                assert!((4_500..=5_500).contains(&count), "bucket count {count}");
            }
        }
    }

    #[test]
    fn single_symbol_always_zero() {
        let mut rng = StdRng::seed_from_u64(3);
        let reels = ReelState::random(1, &mut rng).unwrap();
        assert_eq!(reels.symbols(), [0; REEL_COUNT]);
    }
}
