//! Pool evaluation
//!
//! Rolls `n` d10s. A die showing a trigger face rolls again and the new face
//! joins its chain; the chain stops at the first non-trigger face. Chain sums
//! add up to the pool total, and every face of 8 or more anywhere in the pool
//! counts as a success, exploded faces included. A face of 1 is a fail.

use serde::Serialize;
use tracing::debug;

use super::{DiceError, DieSource, Face, Triggers, FAIL_FACE, SUCCESS_THRESHOLD};

/// Faces rolled by one die slot, in draw order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chain {
    values: Vec<Face>,
    sum: u32,
}

impl Chain {
    /// Roll one die, rerolling while the latest face is a trigger
    pub fn roll<S: DieSource + ?Sized>(triggers: &Triggers, source: &mut S) -> Self {
        let mut face = source.draw();
        let mut values = vec![face];
        while triggers.contains(face) {
            face = source.draw();
            values.push(face);
        }
        let sum = values.iter().map(|&v| v as u32).sum();
        Self { values, sum }
    }

    /// Faces in draw order (never empty)
    pub fn values(&self) -> &[Face] {
        &self.values
    }

    pub fn sum(&self) -> u32 {
        self.sum
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the die rolled more than once
    pub fn exploded(&self) -> bool {
        self.values.len() > 1
    }

    /// Faces of 8 or more in this chain
    pub fn successes(&self) -> u32 {
        self.values
            .iter()
            .filter(|&&v| is_success(v))
            .count() as u32
    }

    /// Faces of 1 in this chain
    pub fn fails(&self) -> u32 {
        self.values.iter().filter(|&&v| is_fail(v)).count() as u32
    }
}

/// Renders as `[10 → 3] = 13`
impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let faces = self
            .values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" → ");
        write!(f, "[{}] = {}", faces, self.sum)
    }
}

/// Result of rolling a whole pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolOutcome {
    chains: Vec<Chain>,
    total: u32,
    successes: u32,
    fails: u32,
}

impl PoolOutcome {
    /// One chain per die slot, in slot order
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Sum of every chain sum
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Count of individual faces >= 8 across all chains
    pub fn successes(&self) -> u32 {
        self.successes
    }

    /// Count of faces showing 1 across all chains
    pub fn fails(&self) -> u32 {
        self.fails
    }

    pub fn pool_size(&self) -> usize {
        self.chains.len()
    }

    /// Per-die result lines, `D1: [10 → 3] = 13`, slots numbered from 1
    pub fn lines(&self) -> Vec<String> {
        self.chains
            .iter()
            .enumerate()
            .map(|(i, chain)| format!("D{}: {}", i + 1, chain))
            .collect()
    }
}

/// Whether a single face counts as a success
pub fn is_success(face: Face) -> bool {
    face >= SUCCESS_THRESHOLD
}

/// Whether a single face counts as a fail
pub fn is_fail(face: Face) -> bool {
    face == FAIL_FACE
}

/// Roll `pool_size` dice, exploding on `triggers`.
///
/// Fails with [`DiceError::InvalidPoolSize`] before drawing anything when
/// `pool_size` is zero.
pub fn roll_pool<S: DieSource + ?Sized>(
    pool_size: u32,
    triggers: &Triggers,
    source: &mut S,
) -> Result<PoolOutcome, DiceError> {
    if pool_size == 0 {
        return Err(DiceError::InvalidPoolSize(0));
    }

    let mut chains = Vec::with_capacity(pool_size as usize);
    let mut total = 0;
    let mut successes = 0;
    let mut fails = 0;

    for _ in 0..pool_size {
        let chain = Chain::roll(triggers, source);
        total += chain.sum();
        successes += chain.successes();
        fails += chain.fails();
        chains.push(chain);
    }

    debug!(
        pool_size,
        triggers = %triggers,
        total,
        successes,
        fails,
        "rolled pool"
    );

    Ok(PoolOutcome {
        chains,
        total,
        successes,
        fails,
    })
}
