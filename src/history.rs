//! Bounded, order-preserving log of submitted command lines.

use std::collections::VecDeque;

/// Maximum number of lines retained by [`HistoryLog`].
pub const HISTORY_LIMIT: usize = 100;

/// A fixed-capacity FIFO of raw command lines.
///
/// Recording at capacity evicts the oldest entry, so the log always holds
/// the most recent `capacity` submitted non-empty lines in submission
/// order. Eviction is drop-front/push-back on a [`VecDeque`]; no index
/// arithmetic is exposed.
#[derive(Debug)]
pub struct HistoryLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl HistoryLog {
    /// Create an empty log holding up to [`HISTORY_LIMIT`] lines.
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_LIMIT)
    }

    /// Create an empty log with an explicit capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a copy of `line`, evicting the oldest entry when full.
    pub fn record(&mut self, line: &str) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line.to_owned());
    }

    /// Stored lines in insertion order, paired with their 1-based display
    /// index. Indexes are assigned here, not stored; iterating never
    /// mutates the log.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, line)| (i + 1, line.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}
