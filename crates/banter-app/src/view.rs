//! View sink seam and user-intent events.
//!
//! The presentation layer owns all rendering; this module defines the
//! fixed catalog of idempotent mutations the coordinator may ask of it
//! ([`ViewSink`]), the few queries it needs back, and the closed set of
//! user-intent events the view feeds in ([`UserIntent`]).

use banter_proto::{CommandInfo, LobbyRoom, User};
use chrono::{DateTime, Utc};

/// Styling class for a non-chat message rendered into a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Informational notification.
    Notification,
    /// Error-styled inline message.
    Error,
    /// Header line for a list response.
    ListHeader,
    /// Item line for a list response.
    ListItem,
    /// Private-message styling.
    PrivateMessage,
}

/// Per-message view model.
///
/// Built once when the message arrives; `highlight` is computed at
/// creation time from the viewer's own name and never recomputed, so a
/// later rename does not restyle old messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    /// Author name.
    pub name: String,
    /// Author gravatar hash.
    pub hash: String,
    /// Message content.
    pub content: String,
    /// Server-assigned message ID.
    pub id: String,
    /// Server timestamp.
    pub when: DateTime<Utc>,
    /// Whether the viewer was mentioned.
    pub highlight: bool,
}

/// User-intent events raised by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIntent {
    /// Keystroke activity in the input box.
    Typing,

    /// The user submitted raw input.
    SendMessage {
        /// The raw input.
        content: String,
    },

    /// The window gained focus.
    Focus,

    /// The window lost focus.
    Blur,

    /// The user asked to open a room (lobby click, URL).
    OpenRoom {
        /// Room name.
        room: String,
    },

    /// The user asked to close a room.
    CloseRoom {
        /// Room name.
        room: String,
    },

    /// Recall the previous entry of the outgoing-message history.
    RecallPrevious,

    /// Recall the next entry of the outgoing-message history.
    RecallNext,

    /// The visible room changed (tab switch, navigation).
    ActiveRoomChanged {
        /// The newly visible room.
        room: String,
    },

    /// The user scrolled to the top of a room's backlog.
    ScrollRoomTop {
        /// The room.
        room: String,
        /// Oldest currently-rendered message ID.
        message_id: String,
    },

    /// View-owned preferences changed and should be persisted.
    PreferencesChanged,
}

/// Mutation and query surface of the presentation layer.
///
/// Mutations must be idempotent: the coordinator may replay them on
/// reconnect. Methods that report whether anything changed (`add_room`,
/// `add_user`) let the coordinator suppress duplicate notifications.
pub trait ViewSink {
    /// Register a room tab. Returns `true` if the room was newly added.
    fn add_room(&mut self, room: &str) -> bool;

    /// Remove a room tab.
    fn remove_room(&mut self, room: &str);

    /// Make a room the visible one.
    fn set_active_room(&mut self, room: &str);

    /// Mark a room locked or unlocked.
    fn set_room_locked(&mut self, room: &str, locked: bool);

    /// Add a user to a room's list. Returns `true` if newly added.
    fn add_user(&mut self, user: &User, room: &str, owner: bool) -> bool;

    /// Remove a user from a room's list.
    fn remove_user(&mut self, user: &User, room: &str);

    /// Mark a user as a room owner.
    fn set_room_owner(&mut self, name: &str, room: &str);

    /// Clear a user's room-owner marker.
    fn clear_room_owner(&mut self, name: &str, room: &str);

    /// Render a chat message into a room.
    fn add_chat_message(&mut self, message: &MessageView, room: &str);

    /// Append content to an already-rendered message.
    fn add_chat_message_content(&mut self, id: &str, content: &str, room: &str);

    /// Prepend older messages above a room's current backlog.
    fn prepend_chat_messages(&mut self, messages: &[MessageView], room: &str);

    /// Update a user's activity indicator.
    fn set_user_activity(&mut self, user: &User);

    /// Rename a user everywhere they appear in a room.
    fn change_user_name(&mut self, old_name: &str, user: &User, room: &str);

    /// Update a user's avatar in a room.
    fn change_gravatar(&mut self, user: &User, room: &str);

    /// Show or clear a user's typing indicator in a room.
    fn set_user_typing(&mut self, user: &User, room: &str, typing: bool);

    /// Update a room's unread badge.
    fn update_unread(&mut self, room: &str, mentioned: bool);

    /// Pin a room's viewport to the newest content.
    fn scroll_to_bottom(&mut self, room: &str);

    /// Whether a room's viewport is at (or near) the newest content.
    fn is_near_end(&self, room: &str) -> bool;

    /// Mark a room fully populated, so later messages render as live.
    fn set_initialized(&mut self, room: &str);

    /// Replace the input box contents (history recall).
    fn set_message(&mut self, content: &str);

    /// Replace the lobby's room listing.
    fn populate_lobby_rooms(&mut self, rooms: &[LobbyRoom]);

    /// Update one lobby room's occupant count.
    fn update_lobby_room_count(&mut self, room: &str, count: u32);

    /// Trigger a desktop-style notification; `force` bypasses preferences.
    fn notify(&mut self, force: bool);

    /// Store the available slash commands.
    fn set_commands(&mut self, commands: &[CommandInfo]);

    /// The stored slash commands.
    fn commands(&self) -> Vec<CommandInfo>;

    /// View-owned preferences, persisted opaquely by the coordinator.
    fn preferences(&self) -> serde_json::Value;

    /// Display the viewer's own name.
    fn set_user_name(&mut self, name: &str);

    /// Render a non-chat message; `None` scopes it to the default view.
    fn add_message(&mut self, content: &str, kind: MessageKind, room: Option<&str>);

    /// Set the window/tab title.
    fn set_title(&mut self, title: &str);

    /// Process any pending navigation (URLs that name rooms).
    fn run(&mut self);

    /// One-time setup with previously persisted preferences.
    fn initialize(&mut self, preferences: Option<serde_json::Value>);
}
