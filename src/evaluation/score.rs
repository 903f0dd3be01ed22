use std::fmt::Display;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg};

/// The score represents the relative value of the position in centipawns (100
/// centipawns = material value of one pawn).
///
/// All evaluation terms (including the fractional positional bonuses) are
/// whole numbers of centipawns, so scores are compared exactly and search
/// tie-breaks are deterministic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Score {
    value: i32,
}

impl Score {
    /// Bound for alpha-beta windows: strictly greater than any score the
    /// evaluator or the search can produce.
    pub const INFINITY: Self = Self {
        value: 1_000_000_000,
    };

    /// Returned by the search when the side to move has no moves at all,
    /// regardless of whether it is checkmate or stalemate. Equals 1000 pawns.
    pub const NO_MOVES: Self = Self { value: 100_000 };

    /// Creates a new score in centipawn units.
    ///
    /// # Panics
    ///
    /// The value must be strictly within `(-INFINITY, INFINITY)`.
    #[must_use]
    pub const fn cp(value: i32) -> Self {
        assert!(
            value > -Self::INFINITY.value && value < Self::INFINITY.value,
            "score should be within (-INFINITY, INFINITY)"
        );
        Self { value }
    }

    /// Returns the raw centipawn value.
    #[must_use]
    pub const fn centipawns(self) -> i32 {
        self.value
    }
}

impl Neg for Score {
    type Output = Self;

    /// Mirrors evaluation to other player's perspective.
    fn neg(self) -> Self::Output {
        Self { value: -self.value }
    }
}

impl Add for Score {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            value: self.value + rhs.value,
        }
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Self) {
        self.value += rhs.value;
    }
}

impl Sum for Score {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl Display for Score {
    /// Formats the score in centipawn units, e.g. `cp -120`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cp {}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn cp() {
        let cp = Score::cp(42);
        assert_eq!(cp, Score { value: 42 });
        assert_eq!(cp.centipawns(), 42);

        assert!(Score::cp(42) < Score::cp(43));
        assert!(Score::cp(0) > Score::cp(-42));
    }

    #[test]
    fn bounds() {
        assert!(Score::NO_MOVES < Score::INFINITY);
        assert!(-Score::NO_MOVES > -Score::INFINITY);
        assert!(Score::cp(9_000) < Score::NO_MOVES);
    }

    #[test]
    fn arithmetic() {
        assert_eq!(-Score::cp(42), Score::cp(-42));
        assert_eq!(Score::cp(40) + Score::cp(2), Score::cp(42));
        let mut score = Score::default();
        score += Score::cp(-5);
        assert_eq!(score, Score::cp(-5));
        assert_eq!(
            [Score::cp(1), Score::cp(2), Score::cp(3)].into_iter().sum::<Score>(),
            Score::cp(6)
        );
    }

    #[test]
    fn display() {
        assert_eq!(Score::cp(123).to_string(), "cp 123");
        assert_eq!(Score::cp(-7).to_string(), "cp -7");
    }

    #[test]
    #[should_panic(expected = "score should be within (-INFINITY, INFINITY)")]
    fn cp_panic() {
        let _ = Score::cp(Score::INFINITY.value);
    }
}
