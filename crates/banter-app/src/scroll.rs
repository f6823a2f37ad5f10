//! Scroll preservation.
//!
//! Any view mutation that can grow a room's content height goes through
//! [`scroll_if_necessary`]: the viewport is re-pinned to the bottom only
//! if it was already there, so a reader who scrolled up stays put.
//! Appended external content (embeds) can resize after insertion; those
//! mutations additionally schedule a [`DeferredScrollCheck`] that the
//! coordinator replays once the settle delay elapses.

use std::time::Duration;

use crate::ViewSink;

/// How long to wait before re-checking a room that received external
/// content of unknown final size.
pub const EMBED_SETTLE_DELAY: Duration = Duration::from_millis(850);

/// A pending second look at a room's scroll position.
#[derive(Debug, Clone)]
pub(crate) struct DeferredScrollCheck<I> {
    /// Room to re-check.
    pub room: String,
    /// When to re-check.
    pub deadline: I,
    /// Whether the viewport was pinned before the mutation.
    pub was_near_end: bool,
}

/// Run a content-growing mutation, keeping live viewers pinned.
pub(crate) fn scroll_if_necessary<V, F>(view: &mut V, room: &str, mutate: F)
where
    V: ViewSink,
    F: FnOnce(&mut V),
{
    let near_end = view.is_near_end(room);

    mutate(view);

    if near_end {
        view.scroll_to_bottom(room);
    }
}
