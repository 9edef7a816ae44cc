//! Operand vector fixtures for the test battery.

use crate::error::HarnessError;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Slot count every fixture vector carries.
pub const VECTOR_LEN: usize = 5;

/// Upper bound (exclusive) for random draws of operand A.
pub const RANDOM_BOUND_A: i64 = 10;

/// Upper bound (exclusive) for random draws of operand B.
pub const RANDOM_BOUND_B: i64 = 5;

const FIXED_A: [i64; VECTOR_LEN] = [1, 2, 3, 4, 5];
const FIXED_B: [i64; VECTOR_LEN] = [2, 2, 2, 2, 2];

/// How the base operand vectors are produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixtureMode {
    /// Literal vectors `[1,2,3,4,5]` and `[2,2,2,2,2]`.
    Fixed,
    /// Uniform draws, A from `[0, 10)` and B from `[0, 5)`.
    Random,
}

impl FixtureMode {
    /// Resolve the two exclusive CLI flags into a mode.
    ///
    /// Setting both or neither is a usage error and must abort before any
    /// encryption work happens.
    pub fn from_flags(fixed: bool, random: bool) -> Result<Self, HarnessError> {
        match (fixed, random) {
            (true, false) => Ok(Self::Fixed),
            (false, true) => Ok(Self::Random),
            _ => Err(HarnessError::InvalidMode),
        }
    }
}

/// The operand vectors for one run of the battery.
///
/// Each scenario gets its own independently-copied operands, so mutating one
/// scenario's ciphertext can never bleed into another's expectations. The
/// field pairing mirrors the battery: one pair threaded through the chained
/// mutating operators, fresh copies of A for each power form, and a second
/// pair reserved for the non-mutating operators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixtureSet {
    /// Left operand of the chained `+=`, `-=`, `*=`, `%=` block.
    pub chain_a: Vec<i64>,
    /// Right operand of the chained block.
    pub chain_b: Vec<i64>,
    /// Operand of the mutating square.
    pub square: Vec<i64>,
    /// Operand of the mutating cube.
    pub cube: Vec<i64>,
    /// Left operand of the non-mutating `+`.
    pub plain_a: Vec<i64>,
    /// Right operand of the non-mutating `+`.
    pub plain_b: Vec<i64>,
    /// Operand of the non-mutating square.
    pub square_nm: Vec<i64>,
    /// Operand of the non-mutating cube.
    pub cube_nm: Vec<i64>,
}

impl FixtureSet {
    /// Produce the full operand set for `mode` using `rng` for random draws.
    pub fn generate<R: Rng>(mode: FixtureMode, rng: &mut R) -> Self {
        let (a, b) = match mode {
            FixtureMode::Fixed => (FIXED_A.to_vec(), FIXED_B.to_vec()),
            FixtureMode::Random => {
                let dist_a = Uniform::new(0, RANDOM_BOUND_A);
                let dist_b = Uniform::new(0, RANDOM_BOUND_B);
                let a = (0..VECTOR_LEN).map(|_| dist_a.sample(rng)).collect();
                let b = (0..VECTOR_LEN).map(|_| dist_b.sample(rng)).collect();
                (a, b)
            }
        };
        Self::from_base(a, b)
    }

    /// Convenience wrapper over [`FixtureSet::generate`] using the thread RNG.
    pub fn generate_with_thread_rng(mode: FixtureMode) -> Self {
        Self::generate(mode, &mut rand::thread_rng())
    }

    fn from_base(a: Vec<i64>, b: Vec<i64>) -> Self {
        Self {
            square: a.clone(),
            cube: a.clone(),
            plain_a: a.clone(),
            plain_b: b.clone(),
            square_nm: a.clone(),
            cube_nm: a.clone(),
            chain_a: a,
            chain_b: b,
        }
    }
}
