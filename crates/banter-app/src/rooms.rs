//! Joined-room registry.
//!
//! Tracks which rooms the session belongs to, plus the two flags the
//! coordinator needs per room: whether the one-time population has
//! completed (`initialized`) and whether the room is locked. The view
//! owns everything presentational about a room.

use std::collections::HashMap;

/// Per-room tracked state.
#[derive(Debug, Clone, Default)]
struct RoomEntry {
    /// Set once, after the first full population completes.
    initialized: bool,
    /// Whether the room is locked (invite-only).
    locked: bool,
}

/// Registry of joined rooms, keyed by case-sensitive room name.
#[derive(Debug, Clone, Default)]
pub struct RoomTracker {
    rooms: HashMap<String, RoomEntry>,
}

impl RoomTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a room. Returns `true` if the room was newly added.
    ///
    /// Idempotent: re-registering an existing room only refreshes the lock
    /// flag and never resets `initialized`.
    pub fn register(&mut self, room: &str, locked: bool) -> bool {
        match self.rooms.get_mut(room) {
            Some(entry) => {
                entry.locked = locked;
                false
            },
            None => {
                self.rooms.insert(room.to_owned(), RoomEntry { initialized: false, locked });
                true
            },
        }
    }

    /// Deregister a room. Unknown rooms are a no-op.
    pub fn remove(&mut self, room: &str) {
        self.rooms.remove(room);
    }

    /// Whether a room is tracked.
    pub fn contains(&self, room: &str) -> bool {
        self.rooms.contains_key(room)
    }

    /// Whether a room has completed its one-time population.
    pub fn is_initialized(&self, room: &str) -> bool {
        self.rooms.get(room).is_some_and(|r| r.initialized)
    }

    /// Mark a room's population complete. Unknown rooms are a no-op.
    pub fn set_initialized(&mut self, room: &str) {
        if let Some(entry) = self.rooms.get_mut(room) {
            entry.initialized = true;
        }
    }

    /// Whether a room is locked.
    pub fn is_locked(&self, room: &str) -> bool {
        self.rooms.get(room).is_some_and(|r| r.locked)
    }

    /// Update a room's lock flag. Unknown rooms are a no-op.
    pub fn set_locked(&mut self, room: &str, locked: bool) {
        if let Some(entry) = self.rooms.get_mut(room) {
            entry.locked = locked;
        }
    }

    /// Number of tracked rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether no rooms are tracked.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_is_idempotent() {
        let mut tracker = RoomTracker::new();

        assert!(tracker.register("rust", false));
        tracker.set_initialized("rust");

        // Redundant join: lock flag refreshes, initialized survives
        assert!(!tracker.register("rust", true));
        assert!(tracker.is_initialized("rust"));
        assert!(tracker.is_locked("rust"));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut tracker = RoomTracker::new();
        tracker.register("Rust", false);

        assert!(tracker.contains("Rust"));
        assert!(!tracker.contains("rust"));
    }

    #[test]
    fn unknown_room_operations_are_noops() {
        let mut tracker = RoomTracker::new();

        tracker.remove("ghost");
        tracker.set_initialized("ghost");
        tracker.set_locked("ghost", true);

        assert!(tracker.is_empty());
        assert!(!tracker.is_initialized("ghost"));
        assert!(!tracker.is_locked("ghost"));
    }
}
