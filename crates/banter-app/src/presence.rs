//! Presence and notification accounting.
//!
//! Everything that feeds the unread badge and window title: the mention
//! matcher, the message view-model builder, and the focus/unread state
//! machine. The title is derived, never stored; [`update_title`] must be
//! called after every change to the fields it reads.

use banter_proto::Message;
use regex::Regex;

use crate::{MessageView, Session, ViewSink};

/// Case-insensitive whole-word matcher for the viewer's own name.
///
/// Rebuilt whenever the viewer's name changes; with no name set, nothing
/// matches. An optional leading `@` is folded into the match so `@alice`
/// and `alice` both count.
#[derive(Debug, Clone, Default)]
pub struct MentionMatcher {
    pattern: Option<Regex>,
}

impl MentionMatcher {
    /// Create a matcher with no name set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the pattern for a new viewer name.
    pub fn set_name(&mut self, name: &str) {
        match Regex::new(&format!(r"(?i)\b@?{}\b", regex::escape(name))) {
            Ok(pattern) => self.pattern = Some(pattern),
            Err(error) => {
                // Escaped input should always compile; degrade to no mentions
                tracing::warn!(%error, "failed to build mention pattern");
                self.pattern = None;
            },
        }
    }

    /// Forget the viewer name (logout).
    pub fn clear(&mut self) {
        self.pattern = None;
    }

    /// Whether the content mentions the viewer.
    pub fn is_mention(&self, content: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(content))
    }

    /// Build the per-message view model, computing the mention flag once.
    pub fn view_model(&self, message: &Message) -> MessageView {
        MessageView {
            name: message.user.name.clone(),
            hash: message.user.hash.clone(),
            content: message.content.clone(),
            id: message.id.clone(),
            when: message.when,
            highlight: self.is_mention(&message.content),
        }
    }
}

/// Derive the window title from the unread state.
///
/// Pure function of its inputs: zero unread yields the original title
/// unchanged, otherwise the count is prefixed and a `*` marks a pending
/// mention.
pub fn title(unread: u32, mention_pending: bool, original: &str) -> String {
    if unread == 0 {
        original.to_owned()
    } else {
        let star = if mention_pending { "*" } else { "" };
        format!("{star}({unread}) {original}")
    }
}

/// Push the derived title into the view.
pub fn update_title<V: ViewSink>(session: &Session, view: &mut V) {
    view.set_title(&title(session.unread, session.mention_pending, &session.original_title));
}

/// Account for one incoming message in the unread state.
///
/// Unfocused: the counter increments by exactly one and the mention flag
/// is monotone-true. Focused: counters are left alone but the mention
/// flag is forced off, so a focused viewer never sees a stale star.
pub fn update_unread<V: ViewSink>(session: &mut Session, view: &mut V, room: &str, mentioned: bool) {
    if session.focused {
        session.mention_pending = false;
    } else {
        session.mention_pending = session.mention_pending || mentioned;
        session.unread += 1;
    }

    view.update_unread(room, mentioned);
    update_title(session, view);
}
