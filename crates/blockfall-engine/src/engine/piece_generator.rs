use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Serialize, Serializer};

use crate::{ParsePieceSeedError, PieceKind};

/// Supplies piece kinds, each drawn uniformly at random from all seven.
///
/// The generator always holds the upcoming kind so it can be previewed; every
/// [`pop_next`](Self::pop_next) hands that kind out and draws a fresh one.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceGenerator, PieceSeed};
///
/// let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// let mut a = PieceGenerator::with_seed(seed);
/// let mut b = PieceGenerator::with_seed(seed);
///
/// let upcoming = a.peek_next();
/// assert_eq!(a.pop_next(), upcoming);
/// assert_eq!(b.pop_next(), upcoming);
/// ```
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    seed: PieceSeed,
    rng: Pcg32,
    next: PieceKind,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for the piece generator.
///
/// A 128-bit seed, written as 32 hexadecimal digits. The same seed yields the
/// same sequence of kinds, which is handy for debugging and tests.
///
/// # Example
///
/// ```
/// use blockfall_engine::PieceSeed;
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let parsed: PieceSeed = seed.to_string().parse().unwrap();
/// assert_eq!(parsed, seed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParsePieceSeedError::new(s));
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParsePieceSeedError::new(s))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl PieceGenerator {
    /// Creates a generator seeded from the thread-local RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but deterministic for a given seed.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut rng = Pcg32::from_seed(seed.0);
        let next = rng.random();
        Self { seed, rng, next }
    }

    /// Returns the seed this generator started from.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }

    /// Returns the kind the next [`pop_next`](Self::pop_next) will hand out.
    #[must_use]
    pub fn peek_next(&self) -> PieceKind {
        self.next
    }

    /// Hands out the upcoming kind and draws its successor.
    pub fn pop_next(&mut self) -> PieceKind {
        let next = self.rng.random();
        std::mem::replace(&mut self.next, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_seed_round_trip() {
        let seed: PieceSeed = SEED.parse().unwrap();
        assert_eq!(seed.to_string(), SEED);

        let json = serde_json::to_string(&seed).unwrap();
        assert_eq!(json, format!("\"{SEED}\""));
    }

    #[test]
    fn test_seed_parse_errors() {
        assert!("".parse::<PieceSeed>().is_err());
        assert!("0123".parse::<PieceSeed>().is_err());
        assert!("0123456789abcdef0123456789abcdeg".parse::<PieceSeed>().is_err());
        assert!("+123456789abcdef0123456789abcdef".parse::<PieceSeed>().is_err());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let seed: PieceSeed = SEED.parse().unwrap();
        let mut a = PieceGenerator::with_seed(seed);
        let mut b = PieceGenerator::with_seed(seed);
        for _ in 0..100 {
            assert_eq!(a.peek_next(), b.peek_next());
            assert_eq!(a.pop_next(), b.pop_next());
        }
    }

    #[test]
    fn test_seed_is_kept() {
        let seed: PieceSeed = SEED.parse().unwrap();
        let mut generator = PieceGenerator::with_seed(seed);
        generator.pop_next();
        assert_eq!(generator.seed(), seed);
    }

    #[test]
    fn test_peek_matches_pop() {
        let mut generator = PieceGenerator::new();
        for _ in 0..50 {
            let peeked = generator.peek_next();
            assert_eq!(generator.pop_next(), peeked);
        }
    }

    #[test]
    fn test_every_kind_is_generated() {
        let seed: PieceSeed = SEED.parse().unwrap();
        let mut generator = PieceGenerator::with_seed(seed);
        let mut counts = [0_usize; PieceKind::LEN];
        for _ in 0..7000 {
            counts[generator.pop_next() as usize] += 1;
        }
        // Uniform draws: each kind lands near 1000 out of 7000
        for (kind, count) in PieceKind::ALL.iter().zip(counts) {
            assert!((700..1300).contains(&count), "{kind:?} drawn {count} times");
        }
    }
}
