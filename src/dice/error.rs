use thiserror::Error;

use super::Face;

/// Errors raised while building or rolling a pool
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("pool size must be at least 1 (got {0})")]
    InvalidPoolSize(u64),

    #[error("face {0} cannot trigger an explosion (allowed: 8, 9, 10)")]
    InvalidTrigger(Face),
}
