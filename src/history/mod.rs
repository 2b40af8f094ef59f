//! Roll history
//!
//! Keeps one summary line per roll, newest first, bounded to a fixed number
//! of entries. Only [`RollHistory::add`] and [`RollHistory::push`] change it;
//! clearing the displayed result leaves it alone.

use std::collections::VecDeque;

use chrono::{Local, NaiveTime, Timelike};
use thiserror::Error;
use tracing::debug;

use crate::dice::Triggers;

/// Entries kept when no limit is configured
pub const DEFAULT_MAX_ENTRIES: usize = 20;

/// Text rendered for an empty history
pub const EMPTY_HISTORY: &str = "no rolls recorded";

/// History configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("invalid history configuration: max entries must be at least 1 (got {0})")]
    InvalidConfiguration(usize),
}

/// One recorded roll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Local wall-clock time of the roll
    pub timestamp: NaiveTime,
    /// Base dice requested
    pub base: u32,
    /// Modifier dice added to the base
    pub modifier: u32,
    /// Faces that exploded
    pub triggers: Triggers,
    /// Pool total
    pub total: u32,
    /// Success count
    pub successes: u32,
}

impl HistoryEntry {
    /// Entry stamped with the current local time, truncated to the second
    pub fn now(base: u32, modifier: u32, triggers: Triggers, total: u32, successes: u32) -> Self {
        let time = Local::now().time();
        let timestamp = time.with_nanosecond(0).unwrap_or(time);
        Self {
            timestamp,
            base,
            modifier,
            triggers,
            total,
            successes,
        }
    }
}

/// Renders as `[HH:MM:SS] In:<base>+<mod> | Expl:<triggers> | SUCC:<n> | TOT:<n>`
impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] In:{}+{} | Expl:{} | SUCC:{} | TOT:{}",
            self.timestamp.format("%H:%M:%S"),
            self.base,
            self.modifier,
            self.triggers,
            self.successes,
            self.total
        )
    }
}

/// Bounded most-recent-first log of rolls
#[derive(Debug, Clone)]
pub struct RollHistory {
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
}

impl RollHistory {
    /// Create a history that keeps at most `max_entries` rolls
    pub fn new(max_entries: usize) -> Result<Self, HistoryError> {
        if max_entries == 0 {
            return Err(HistoryError::InvalidConfiguration(max_entries));
        }
        Ok(Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
        })
    }

    /// Record a roll made just now
    pub fn add(&mut self, base: u32, modifier: u32, triggers: &Triggers, total: u32, successes: u32) {
        self.push(HistoryEntry::now(
            base,
            modifier,
            triggers.clone(),
            total,
            successes,
        ));
    }

    /// Record a pre-built entry, evicting the oldest past the limit
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        if self.entries.len() > self.max_entries {
            let evicted = self.entries.len() - self.max_entries;
            self.entries.truncate(self.max_entries);
            debug!(evicted, "history full, dropped oldest entries");
        }
    }

    /// All entries joined by a blank line, newest first
    pub fn render_all(&self) -> String {
        if self.entries.is_empty() {
            return EMPTY_HISTORY.to_string();
        }
        self.lines().join("\n\n")
    }

    /// Rendered entries, newest first
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.to_string()).collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}

impl Default for RollHistory {
    fn default() -> Self {
        Self {
            entries: VecDeque::with_capacity(DEFAULT_MAX_ENTRIES),
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}
