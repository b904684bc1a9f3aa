//! Win evaluation

use crate::domain::reels::REEL_COUNT;

/// Final result of a spin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinOutcome {
    /// Every reel landed on the same symbol
    Win { symbols: [usize; REEL_COUNT] },
    Lose { symbols: [usize; REEL_COUNT] },
}

impl SpinOutcome {
    pub fn is_win(&self) -> bool {
        matches!(self, SpinOutcome::Win { .. })
    }

    /// Symbol indices the reels stopped on
    pub fn symbols(&self) -> [usize; REEL_COUNT] {
        match self {
            SpinOutcome::Win { symbols } | SpinOutcome::Lose { symbols } => *symbols,
        }
    }
}

/// Evaluates the stopped reels: a win iff all indices are equal
pub fn evaluate(symbols: [usize; REEL_COUNT]) -> SpinOutcome {
    let first = symbols[0];
    if symbols.iter().all(|&symbol| symbol == first) {
        SpinOutcome::Win { symbols }
    } else {
        SpinOutcome::Lose { symbols }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_of_a_kind_wins() {
        for symbol in 0..4 {
            let outcome = evaluate([symbol; REEL_COUNT]);
            assert!(outcome.is_win());
            assert_eq!(outcome.symbols(), [symbol; REEL_COUNT]);
        }
    }

    #[test]
    fn any_mismatch_loses() {
        assert!(!evaluate([0, 0, 1]).is_win());
        assert!(!evaluate([1, 0, 0]).is_win());
        assert!(!evaluate([0, 1, 0]).is_win());
        assert!(!evaluate([0, 1, 2]).is_win());
    }

    #[test]
    fn exhaustive_win_iff_all_equal() {
        for a in 0..4 {
            for b in 0..4 {
                for c in 0..4 {
                    let outcome = evaluate([a, b, c]);
                    assert_eq!(outcome.is_win(), a == b && b == c);
                    assert_eq!(outcome.symbols(), [a, b, c]);
                }
            }
        }
    }
}
