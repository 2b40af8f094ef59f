//! Dice pool engine
//!
//! Rolls pools of ten-sided dice with:
//! - Exploding faces (8, 9 and/or 10 roll again and chain)
//! - Chain sums and a pool total
//! - Success counting over every individual face, and 1s as fails
//! - Injectable die sources for deterministic rolls

mod error;
mod pool;
mod source;
mod triggers;

pub use error::DiceError;
pub use pool::{is_fail, is_success, roll_pool, Chain, PoolOutcome};
pub use source::{DieSource, FixedSource, RngSource};
pub use triggers::{Triggers, EXPLODABLE};

/// A single d10 face, `1..=10`
pub type Face = u8;

/// Faces on every die
pub const SIDES: Face = 10;

/// Lowest face that counts as a success
pub const SUCCESS_THRESHOLD: Face = 8;

/// Face marked as a fail
pub const FAIL_FACE: Face = 1;
