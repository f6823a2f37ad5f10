//! Typing-indicator debounce.
//!
//! Converts raw keystroke activity into start/stop typing signals with a
//! trailing timeout. The tracker is a two-state machine over an abstract
//! instant type; the coordinator sweeps it from `handle_tick`, so the
//! "timer" is just the single deadline slot below. Arming a new deadline
//! overwrites the old one, which is the only cancellation semantic in
//! this crate.

use std::{ops::Add, time::Duration};

/// Trailing quiet period after the last keystroke before stop is sent.
pub const TYPING_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State<I> {
    Idle,
    Announcing { deadline: I },
}

/// Debounce state machine for the viewer's own typing signals.
///
/// Guarantees exactly one start and exactly one stop per contiguous
/// typing burst: the stop fires on deadline expiry or immediately on
/// message send, whichever comes first.
#[derive(Debug, Clone, Copy)]
pub struct TypingTracker<I> {
    state: State<I>,
}

impl<I> Default for TypingTracker<I> {
    fn default() -> Self {
        Self { state: State::Idle }
    }
}

impl<I> TypingTracker<I>
where
    I: Copy + Ord + Add<Duration, Output = I>,
{
    /// Create an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record keystroke activity at `now`.
    ///
    /// Returns `true` when a start signal should be sent (first keystroke
    /// of a burst). Later keystrokes only re-arm the trailing deadline.
    pub fn keystroke(&mut self, now: I) -> bool {
        let started = matches!(self.state, State::Idle);
        self.state = State::Announcing { deadline: now + TYPING_TIMEOUT };
        started
    }

    /// Record a message send, which short-circuits the trailing deadline.
    ///
    /// Returns `true` when a stop signal should be sent.
    pub fn message_sent(&mut self) -> bool {
        let announcing = matches!(self.state, State::Announcing { .. });
        self.state = State::Idle;
        announcing
    }

    /// Sweep the deadline at `now`.
    ///
    /// Returns `true` when the quiet period elapsed and a stop signal
    /// should be sent.
    pub fn poll(&mut self, now: I) -> bool {
        match self.state {
            State::Announcing { deadline } if now >= deadline => {
                self.state = State::Idle;
                true
            },
            _ => false,
        }
    }

    /// Whether a typing burst is currently announced.
    pub fn is_announcing(&self) -> bool {
        matches!(self.state, State::Announcing { .. })
    }
}
