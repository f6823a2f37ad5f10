//! Outgoing-message history with wraparound recall.
//!
//! A local recall list of raw input the user has sent, not server chat
//! history. Bounded: beyond [`HISTORY_CAPACITY`] entries the oldest is
//! evicted, since the list only exists for up-arrow recall.

use std::collections::VecDeque;

/// Maximum retained history entries before oldest-first eviction.
pub const HISTORY_CAPACITY: usize = 100;

/// Ordered recall list of previously sent raw input.
///
/// The cursor satisfies `0 <= cursor <= len` at all times; `cursor == len`
/// means "one past the newest", the state every push resets to.
#[derive(Debug, Clone)]
pub struct MessageHistory {
    entries: VecDeque<String>,
    cursor: usize,
    capacity: usize,
}

impl Default for MessageHistory {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

impl MessageHistory {
    /// Create a history bounded to `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self { entries: VecDeque::new(), cursor: 0, capacity }
    }

    /// Append sent input and reset the cursor for a fresh recall.
    pub fn push(&mut self, raw: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(raw.into());
        self.cursor = self.entries.len();
    }

    /// Step the cursor backward, wrapping past zero to the newest entry.
    ///
    /// Returns `None` on an empty history.
    pub fn recall_previous(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        self.cursor = if self.cursor == 0 { self.entries.len() - 1 } else { self.cursor - 1 };
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Step the cursor forward modulo the history length.
    ///
    /// Returns `None` on an empty history.
    pub fn recall_next(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.entries.len();
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no input has been retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
