//! Property tests for the pure state-machine pieces.

#[allow(dead_code)]
mod support;

use banter_app::{HISTORY_CAPACITY, MessageHistory, Session, title, update_unread};
use proptest::prelude::*;
use support::RecordingView;

proptest! {
    /// While unfocused, the unread counter is exactly the number of
    /// messages seen and the mention flag is true iff any mentioned.
    #[test]
    fn unread_accounting_is_exact(mentions in proptest::collection::vec(any::<bool>(), 0..50)) {
        let mut session = Session::new("banter");
        session.focused = false;
        let mut view = RecordingView::new();

        for &mentioned in &mentions {
            update_unread(&mut session, &mut view, "rust", mentioned);
        }

        prop_assert_eq!(session.unread as usize, mentions.len());
        prop_assert_eq!(session.mention_pending, mentions.iter().any(|&m| m));
    }

    /// A focused viewer accumulates nothing, whatever arrives.
    #[test]
    fn focused_viewer_accumulates_nothing(mentions in proptest::collection::vec(any::<bool>(), 0..50)) {
        let mut session = Session::new("banter");
        let mut view = RecordingView::new();

        for &mentioned in &mentions {
            update_unread(&mut session, &mut view, "rust", mentioned);
        }

        prop_assert_eq!(session.unread, 0);
        prop_assert!(!session.mention_pending);
        prop_assert_eq!(view.title.as_str(), "banter");
    }

    /// The derived title always round-trips the original verbatim and
    /// carries the star only alongside a nonzero count.
    #[test]
    fn title_shape(unread in 0u32..10_000, mention in any::<bool>(), original in "[a-zA-Z0-9 ]{1,20}") {
        let derived = title(unread, mention, &original);

        prop_assert!(derived.ends_with(&original));
        if unread == 0 {
            prop_assert_eq!(&derived, &original);
        } else {
            let marker = format!("({unread})");
            prop_assert!(derived.contains(&marker));
            prop_assert_eq!(derived.starts_with('*'), mention);
        }
    }

    /// Recalling backwards walks every entry newest-to-oldest, then wraps
    /// back to the newest.
    #[test]
    fn recall_cycles_through_all_entries(entries in proptest::collection::vec("[a-z]{1,8}", 1..20)) {
        let mut history = MessageHistory::default();
        for entry in &entries {
            history.push(entry.clone());
        }

        let mut recalled = Vec::new();
        for _ in 0..=entries.len() {
            recalled.push(history.recall_previous().map(str::to_owned));
        }

        let expected: Vec<_> = entries.iter().rev().map(|e| Some(e.clone())).collect();
        prop_assert_eq!(&recalled[..entries.len()], &expected[..]);
        prop_assert_eq!(&recalled[entries.len()], &Some(entries[entries.len() - 1].clone()));
    }

    /// The history never holds more than its capacity and always keeps
    /// the most recent entries.
    #[test]
    fn history_is_bounded(count in 0usize..300) {
        let mut history = MessageHistory::default();
        for i in 0..count {
            history.push(format!("m{i}"));
        }

        prop_assert!(history.len() <= HISTORY_CAPACITY);
        if count > 0 {
            let expected = format!("m{}", count - 1);
            prop_assert_eq!(history.recall_previous(), Some(expected.as_str()));
        } else {
            prop_assert_eq!(history.recall_previous(), None);
        }
    }
}
