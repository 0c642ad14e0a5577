//! Number-sequence puzzles: show a few terms, ask for the next one.
//!
//! Each [`Difficulty`] draws from a fixed pool of [`SequenceKind`]s. A
//! [`SequenceGenerator`] keeps one [`RepeatGuard`] per pool so that two
//! consecutive puzzles from the same pool never share a pattern type.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ParseError;

/// First twenty primes; the prime pattern slices a window out of this table.
const PRIMES: [i64; 20] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71,
];

/// Pattern type tag carried by every generated [`Sequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SequenceKind {
    Arithmetic,
    Geometric,
    Squares,
    Fibonacci,
    Triangular,
    Cubes,
    Primes,
    Alternating,
    DoubleArithmetic,
}

impl SequenceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SequenceKind::Arithmetic => "arithmetic",
            SequenceKind::Geometric => "geometric",
            SequenceKind::Squares => "squares",
            SequenceKind::Fibonacci => "fibonacci",
            SequenceKind::Triangular => "triangular",
            SequenceKind::Cubes => "cubes",
            SequenceKind::Primes => "primes",
            SequenceKind::Alternating => "alternating",
            SequenceKind::DoubleArithmetic => "double-arithmetic",
        }
    }

    /// Generate one puzzle of this pattern type.
    pub fn generate<R: Rng + ?Sized>(self, rng: &mut R) -> Sequence {
        let (numbers, answer) = match self {
            SequenceKind::Arithmetic => arithmetic(rng),
            SequenceKind::Geometric => geometric(rng),
            SequenceKind::Squares => powers(rng, 2, 8),
            SequenceKind::Fibonacci => fibonacci(rng),
            SequenceKind::Triangular => triangular(rng),
            SequenceKind::Cubes => powers(rng, 3, 5),
            SequenceKind::Primes => primes(rng),
            SequenceKind::Alternating => alternating(rng),
            SequenceKind::DoubleArithmetic => double_arithmetic(rng),
        };
        Sequence {
            numbers,
            answer,
            kind: self,
        }
    }
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated puzzle: the shown terms and the expected next term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub numbers: Vec<i64>,
    pub answer: i64,
    #[serde(rename = "type")]
    pub kind: SequenceKind,
}

impl Sequence {
    pub fn is_correct(&self, guess: i64) -> bool {
        guess == self.answer
    }
}

/// Difficulty tier selecting a pool of pattern types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Mixed,
}

const EASY_POOL: &[SequenceKind] = &[SequenceKind::Arithmetic, SequenceKind::Geometric];
const MEDIUM_POOL: &[SequenceKind] = &[
    SequenceKind::Squares,
    SequenceKind::Fibonacci,
    SequenceKind::Triangular,
    SequenceKind::Cubes,
];
const HARD_POOL: &[SequenceKind] = &[
    SequenceKind::Primes,
    SequenceKind::Alternating,
    SequenceKind::DoubleArithmetic,
];
const MIXED_POOL: &[SequenceKind] = &[
    SequenceKind::Arithmetic,
    SequenceKind::Geometric,
    SequenceKind::Squares,
    SequenceKind::Fibonacci,
    SequenceKind::Triangular,
    SequenceKind::Cubes,
    SequenceKind::Primes,
    SequenceKind::Alternating,
    SequenceKind::DoubleArithmetic,
];

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Mixed,
    ];

    /// Pattern types available at this tier.
    pub fn pool(self) -> &'static [SequenceKind] {
        match self {
            Difficulty::Easy => EASY_POOL,
            Difficulty::Medium => MEDIUM_POOL,
            Difficulty::Hard => HARD_POOL,
            Difficulty::Mixed => MIXED_POOL,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Mixed => "mixed",
        }
    }

    fn slot(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
            Difficulty::Mixed => 3,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "mixed" => Ok(Difficulty::Mixed),
            _ => Err(ParseError::Difficulty(s.to_string())),
        }
    }
}

/// Uniform index picker that never returns the previous index twice in a
/// row when more than one index is available.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepeatGuard {
    last: Option<usize>,
}

impl RepeatGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index picked by the previous call, if any.
    pub fn last(&self) -> Option<usize> {
        self.last
    }

    /// Pick an index in `0..len`. `len` must be at least 1.
    pub fn pick<R: Rng + ?Sized>(&mut self, len: usize, rng: &mut R) -> usize {
        let idx = match self.last {
            _ if len <= 1 => 0,
            // Draw from the len - 1 other slots and skip over the last one.
            Some(last) if last < len => {
                let i = rng.gen_range(0..len - 1);
                if i >= last {
                    i + 1
                } else {
                    i
                }
            }
            _ => rng.gen_range(0..len),
        };
        self.last = Some(idx);
        idx
    }
}

/// Sequence puzzle source owned by one play session.
#[derive(Debug, Clone, Default)]
pub struct SequenceGenerator {
    guards: [RepeatGuard; 4],
}

impl SequenceGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the next puzzle for `difficulty`.
    pub fn generate<R: Rng + ?Sized>(&mut self, difficulty: Difficulty, rng: &mut R) -> Sequence {
        let pool = difficulty.pool();
        let idx = self.guards[difficulty.slot()].pick(pool.len(), rng);
        let kind = pool[idx];
        debug!(%difficulty, %kind, "generating sequence");
        kind.generate(rng)
    }

    /// Pattern type produced by the previous call for `difficulty`.
    pub fn last_kind(&self, difficulty: Difficulty) -> Option<SequenceKind> {
        self.guards[difficulty.slot()]
            .last()
            .map(|idx| difficulty.pool()[idx])
    }
}

// ──────────────────────────────────────────────
// Pattern generators
// ──────────────────────────────────────────────

fn arithmetic<R: Rng + ?Sized>(rng: &mut R) -> (Vec<i64>, i64) {
    let start = rng.gen_range(1..=50);
    let step: i64 = rng.gen_range(2..=12);
    let diff = if rng.gen_bool(0.3) { -step } else { step };
    let length = rng.gen_range(4..=6);
    let numbers = (0..length).map(|i| start + diff * i).collect();
    (numbers, start + diff * length)
}

fn geometric<R: Rng + ?Sized>(rng: &mut R) -> (Vec<i64>, i64) {
    let start: i64 = rng.gen_range(1..=7);
    let ratio: i64 = rng.gen_range(2..=4);
    let length = rng.gen_range(4..=5);
    let mut numbers = Vec::with_capacity(length);
    let mut current = start;
    for _ in 0..length {
        numbers.push(current);
        current *= ratio;
    }
    (numbers, current)
}

/// Consecutive integer powers `(n + i)^exp`, with `n` in `1..=max_start`.
fn powers<R: Rng + ?Sized>(rng: &mut R, exp: u32, max_start: i64) -> (Vec<i64>, i64) {
    let start_n = rng.gen_range(1..=max_start);
    let length = rng.gen_range(4..=5);
    let numbers = (0..length).map(|i| (start_n + i).pow(exp)).collect();
    (numbers, (start_n + length).pow(exp))
}

fn fibonacci<R: Rng + ?Sized>(rng: &mut R) -> (Vec<i64>, i64) {
    let a = rng.gen_range(1..=8);
    let b = rng.gen_range(1..=8);
    let length = rng.gen_range(5..=6);
    let mut numbers = vec![a, b];
    while numbers.len() < length {
        let n = numbers.len();
        numbers.push(numbers[n - 1] + numbers[n - 2]);
    }
    let answer = numbers[length - 1] + numbers[length - 2];
    (numbers, answer)
}

fn triangular<R: Rng + ?Sized>(rng: &mut R) -> (Vec<i64>, i64) {
    let tri = |n: i64| n * (n + 1) / 2;
    let start_n = rng.gen_range(1..=6);
    let length = rng.gen_range(4..=5);
    let numbers = (0..length).map(|i| tri(start_n + i)).collect();
    (numbers, tri(start_n + length))
}

fn primes<R: Rng + ?Sized>(rng: &mut R) -> (Vec<i64>, i64) {
    let start = rng.gen_range(0..=10);
    let length = rng.gen_range(4..=5);
    (
        PRIMES[start..start + length].to_vec(),
        PRIMES[start + length],
    )
}

/// Alternates `+ addend` and `* multiplier`, starting with the addition.
fn alternating<R: Rng + ?Sized>(rng: &mut R) -> (Vec<i64>, i64) {
    let start = rng.gen_range(1..=10);
    let addend = rng.gen_range(1..=5);
    let multiplier = rng.gen_range(2..=3);
    let length = 5;
    let step = |i: usize, prev: i64| {
        if i % 2 == 1 {
            prev + addend
        } else {
            prev * multiplier
        }
    };
    let mut numbers = vec![start];
    for i in 1..length {
        numbers.push(step(i, numbers[i - 1]));
    }
    let answer = step(length, numbers[length - 1]);
    (numbers, answer)
}

/// Differences grow by a constant increment.
fn double_arithmetic<R: Rng + ?Sized>(rng: &mut R) -> (Vec<i64>, i64) {
    let start = rng.gen_range(1..=20);
    let mut diff = rng.gen_range(1..=4);
    let increment = rng.gen_range(1..=3);
    let length = rng.gen_range(5..=6);
    let mut numbers = vec![start];
    for i in 1..length {
        numbers.push(numbers[i - 1] + diff);
        diff += increment;
    }
    let answer = numbers[length - 1] + diff;
    (numbers, answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn pools_match_tiers() {
        assert_eq!(Difficulty::Easy.pool().len(), 2);
        assert_eq!(Difficulty::Medium.pool().len(), 4);
        assert_eq!(Difficulty::Hard.pool().len(), 3);
        assert_eq!(Difficulty::Mixed.pool().len(), 9);
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            for kind in d.pool() {
                assert!(Difficulty::Mixed.pool().contains(kind));
            }
        }
    }

    #[test]
    fn repeat_guard_single_slot_always_zero() {
        let mut guard = RepeatGuard::new();
        let mut rng = rng();
        for _ in 0..10 {
            assert_eq!(guard.pick(1, &mut rng), 0);
        }
    }

    #[test]
    fn repeat_guard_two_slots_alternates() {
        let mut guard = RepeatGuard::new();
        let mut rng = rng();
        let first = guard.pick(2, &mut rng);
        for i in 1..50 {
            let idx = guard.pick(2, &mut rng);
            assert_eq!(idx, (first + i) % 2);
        }
    }

    #[test]
    fn repeat_guard_reaches_every_slot() {
        let mut guard = RepeatGuard::new();
        let mut rng = rng();
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[guard.pick(4, &mut rng)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn generator_tracks_each_pool_separately() {
        let mut gen = SequenceGenerator::new();
        let mut rng = rng();
        let easy = gen.generate(Difficulty::Easy, &mut rng);
        assert_eq!(gen.last_kind(Difficulty::Easy), Some(easy.kind));
        assert_eq!(gen.last_kind(Difficulty::Hard), None);
    }

    #[test]
    fn arithmetic_answer_continues_difference() {
        let mut rng = rng();
        for _ in 0..100 {
            let seq = SequenceKind::Arithmetic.generate(&mut rng);
            let n = seq.numbers.len();
            assert!((4..=6).contains(&n));
            let diff = seq.numbers[1] - seq.numbers[0];
            assert!((2..=12).contains(&diff.abs()));
            assert_eq!(seq.answer - seq.numbers[n - 1], diff);
        }
    }

    #[test]
    fn geometric_answer_continues_ratio() {
        let mut rng = rng();
        for _ in 0..100 {
            let seq = SequenceKind::Geometric.generate(&mut rng);
            let n = seq.numbers.len();
            let ratio = seq.numbers[1] / seq.numbers[0];
            assert!((2..=4).contains(&ratio));
            assert_eq!(seq.answer, seq.numbers[n - 1] * ratio);
        }
    }

    #[test]
    fn fibonacci_answer_is_sum_of_last_two() {
        let mut rng = rng();
        for _ in 0..100 {
            let seq = SequenceKind::Fibonacci.generate(&mut rng);
            let n = seq.numbers.len();
            assert!((5..=6).contains(&n));
            for i in 2..n {
                assert_eq!(seq.numbers[i], seq.numbers[i - 1] + seq.numbers[i - 2]);
            }
            assert_eq!(seq.answer, seq.numbers[n - 1] + seq.numbers[n - 2]);
        }
    }

    #[test]
    fn squares_and_cubes_are_consecutive_powers() {
        let mut rng = rng();
        for _ in 0..50 {
            let sq = SequenceKind::Squares.generate(&mut rng);
            let root = (sq.numbers[0] as f64).sqrt() as i64;
            assert_eq!(sq.answer, (root + sq.numbers.len() as i64).pow(2));

            let cu = SequenceKind::Cubes.generate(&mut rng);
            let root = (cu.numbers[0] as f64).cbrt().round() as i64;
            assert_eq!(cu.answer, (root + cu.numbers.len() as i64).pow(3));
        }
    }

    #[test]
    fn triangular_known_prefix() {
        let mut rng = rng();
        for _ in 0..50 {
            let seq = SequenceKind::Triangular.generate(&mut rng);
            let n = seq.numbers.len();
            // Successive differences increase by one.
            let last_gap = seq.numbers[n - 1] - seq.numbers[n - 2];
            assert_eq!(seq.answer - seq.numbers[n - 1], last_gap + 1);
        }
    }

    #[test]
    fn primes_answer_is_next_prime() {
        let mut rng = rng();
        for _ in 0..100 {
            let seq = SequenceKind::Primes.generate(&mut rng);
            let last = *seq.numbers.last().unwrap();
            let pos = PRIMES.iter().position(|p| *p == last).unwrap();
            assert_eq!(seq.answer, PRIMES[pos + 1]);
        }
    }

    #[test]
    fn alternating_ends_with_addition() {
        let mut rng = rng();
        for _ in 0..100 {
            let seq = SequenceKind::Alternating.generate(&mut rng);
            assert_eq!(seq.numbers.len(), 5);
            let addend = seq.numbers[1] - seq.numbers[0];
            assert_eq!(seq.answer, seq.numbers[4] + addend);
        }
    }

    #[test]
    fn double_arithmetic_differences_grow_evenly() {
        let mut rng = rng();
        for _ in 0..100 {
            let seq = SequenceKind::DoubleArithmetic.generate(&mut rng);
            let mut terms = seq.numbers.clone();
            terms.push(seq.answer);
            let diffs: Vec<i64> = terms.windows(2).map(|w| w[1] - w[0]).collect();
            let inc = diffs[1] - diffs[0];
            assert!((1..=3).contains(&inc));
            assert!(diffs.windows(2).all(|w| w[1] - w[0] == inc));
        }
    }

    #[test]
    fn kind_serializes_kebab_case() {
        let json = serde_json::to_string(&SequenceKind::DoubleArithmetic).unwrap();
        assert_eq!(json, "\"double-arithmetic\"");
    }

    #[test]
    fn difficulty_from_str() {
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("extreme".parse::<Difficulty>().is_err());
    }
}
