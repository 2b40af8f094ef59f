//! Rolling session
//!
//! Owns everything one user of the roller sees: the die source, the result of
//! the last roll, and the roll history.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::dice::{roll_pool, DiceError, DieSource, PoolOutcome, Triggers};
use crate::history::RollHistory;

/// Errors from a roll request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Dice(#[from] DiceError),

    #[error("pool of {size} dice exceeds the limit of {max}")]
    PoolTooLarge { size: u64, max: u32 },
}

/// What one roll produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollReport {
    pub base: u32,
    pub modifier: u32,
    pub triggers: Triggers,
    pub outcome: PoolOutcome,
}

impl RollReport {
    /// Dice rolled (base plus modifier)
    pub fn pool_size(&self) -> usize {
        self.outcome.pool_size()
    }
}

/// A single rolling session
pub struct Session {
    source: Box<dyn DieSource + Send>,
    history: RollHistory,
    current: Option<RollReport>,
    max_pool: u32,
}

impl Session {
    /// Create a session drawing from `source`
    pub fn new(source: Box<dyn DieSource + Send>, history: RollHistory, max_pool: u32) -> Self {
        Self {
            source,
            history,
            current: None,
            max_pool,
        }
    }

    /// Roll `base + modifier` dice and record the result.
    ///
    /// Nothing is drawn or recorded when the pool size is rejected.
    pub fn roll(
        &mut self,
        base: u32,
        modifier: u32,
        triggers: Triggers,
    ) -> Result<&RollReport, SessionError> {
        let size = base as u64 + modifier as u64;
        if size == 0 {
            return Err(DiceError::InvalidPoolSize(size).into());
        }
        if size > self.max_pool as u64 {
            return Err(SessionError::PoolTooLarge {
                size,
                max: self.max_pool,
            });
        }

        let outcome = roll_pool(size as u32, &triggers, &mut self.source)?;
        self.history.add(
            base,
            modifier,
            &triggers,
            outcome.total(),
            outcome.successes(),
        );

        info!(
            base,
            modifier,
            triggers = %triggers,
            total = outcome.total(),
            successes = outcome.successes(),
            "roll"
        );

        Ok(&*self.current.insert(RollReport {
            base,
            modifier,
            triggers,
            outcome,
        }))
    }

    /// Forget the current result. History is kept.
    pub fn clear(&mut self) {
        if self.current.take().is_some() {
            debug!("cleared current result");
        }
    }

    /// Result of the last roll, unless cleared since
    pub fn current(&self) -> Option<&RollReport> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &RollHistory {
        &self.history
    }

    /// Largest pool this session accepts
    pub fn max_pool(&self) -> u32 {
        self.max_pool
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("history", &self.history)
            .field("current", &self.current)
            .field("max_pool", &self.max_pool)
            .finish_non_exhaustive()
    }
}
