//! Inbound server event union.

use serde::{Deserialize, Serialize};

use crate::types::{LobbyRoom, Message, RoomSummary, User, UserInfo};

/// Every event the server can push at a client.
///
/// This is a closed union: the coordinator dispatches it through one
/// exhaustive `match`, so adding a variant is a compile-time change at
/// every dispatch site rather than a silently-ignored handler name.
///
/// Events are assumed delivered in transport order, exactly once per
/// logical stream; the client neither re-orders nor deduplicates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerEvent {
    /// You joined a room (echo of a `/join`).
    RoomJoined {
        /// The room that was joined.
        room: RoomSummary,
    },

    /// Reconnect with an existing identity: the rooms you already belong to.
    LoggedOn {
        /// Your display name.
        name: String,
        /// Your stable user ID.
        user_id: String,
        /// Rooms the identity is a member of.
        rooms: Vec<RoomSummary>,
    },

    /// A user locked a room.
    RoomLocked {
        /// The user who locked it.
        user: User,
        /// The room.
        room: String,
    },

    /// Confirmation that a room you locked is now locked.
    RoomLockedSelf {
        /// The room.
        room: String,
    },

    /// A user unlocked a room.
    RoomUnlocked {
        /// The user who unlocked it.
        user: User,
        /// The room.
        room: String,
    },

    /// A user was made a room owner.
    OwnerAdded {
        /// The new owner.
        user: User,
        /// The room.
        room: String,
    },

    /// A user lost room ownership.
    OwnerRemoved {
        /// The former owner.
        user: User,
        /// The room.
        room: String,
    },

    /// A lobby room's occupant count changed.
    RoomCountChanged {
        /// The room.
        room: String,
        /// New occupant count.
        count: u32,
    },

    /// Users went inactive (idle sweep).
    UsersInactive {
        /// The affected users.
        users: Vec<User>,
    },

    /// A user's activity status changed.
    UserActivityUpdated {
        /// The affected user.
        user: User,
    },

    /// Additional content was appended to an existing message (embeds,
    /// unfurled links). Arrives after the message itself.
    MessageContentAppended {
        /// ID of the message being extended.
        id: String,
        /// Content to append.
        content: String,
        /// Room the message lives in.
        room: String,
    },

    /// A chat message arrived.
    MessageAdded {
        /// The message.
        message: Message,
        /// Room it was sent to.
        room: String,
    },

    /// A user entered a room.
    UserJoined {
        /// The user.
        user: User,
        /// The room.
        room: String,
        /// Whether the user owns the room.
        owner: bool,
    },

    /// A user changed their name.
    UserRenamed {
        /// Previous name.
        old_name: String,
        /// The user, carrying the new name.
        user: User,
        /// Room scope for the rename notification.
        room: String,
    },

    /// A user's gravatar changed.
    GravatarChanged {
        /// The user, carrying the new hash.
        user: User,
        /// Room scope for the notification.
        room: String,
    },

    /// You were granted access to a private room.
    AccessGranted {
        /// The room.
        room: String,
    },

    /// A user you control access for was granted access.
    UserAccessGranted {
        /// The user's name.
        user: String,
        /// The room.
        room: String,
    },

    /// Your access to a private room was revoked.
    AccessRevoked {
        /// The room.
        room: String,
    },

    /// You revoked a user's access.
    UserAccessRevoked {
        /// The user's name.
        user: String,
        /// The room.
        room: String,
    },

    /// You made a user an owner.
    OwnerGranted {
        /// The user's name.
        user: String,
        /// The room.
        room: String,
    },

    /// You removed a user as owner.
    OwnerRevoked {
        /// The user's name.
        user: String,
        /// The room.
        room: String,
    },

    /// You were made an owner.
    OwnershipGranted {
        /// The room.
        room: String,
    },

    /// You were removed as an owner.
    OwnershipRevoked {
        /// The room.
        room: String,
    },

    /// Your gravatar was set.
    GravatarSet,

    /// Free-form server notification.
    Notification {
        /// Notification text.
        content: String,
        /// Room scope, if any.
        room: Option<String>,
    },

    /// A fresh identity was created for you.
    UserCreated {
        /// Your display name.
        name: String,
        /// Your stable user ID.
        user_id: String,
    },

    /// You were logged out.
    LoggedOut {
        /// Rooms to close.
        rooms: Vec<String>,
    },

    /// Response to a user-info request.
    UserInfoReceived {
        /// The requested info.
        info: UserInfo,
    },

    /// Your password was set for the first time.
    PasswordSet,

    /// Your password was changed.
    PasswordChanged,

    /// Your own name changed (server-confirmed).
    NameChanged {
        /// The user, carrying your new name.
        user: User,
    },

    /// A user started or stopped typing.
    TypingChanged {
        /// The user.
        user: User,
        /// The room.
        room: String,
        /// Whether the user is typing.
        typing: bool,
    },

    /// An action message (`/me`).
    MeMessage {
        /// Author name.
        name: String,
        /// Action text.
        content: String,
        /// The room.
        room: String,
    },

    /// A private message between two users.
    PrivateMessage {
        /// Sender name.
        from: String,
        /// Recipient name.
        to: String,
        /// Message content.
        content: String,
    },

    /// A nudge aimed at you or at the whole room.
    Nudge {
        /// Sender name.
        from: String,
        /// Recipient name; `None` when the room was nudged.
        to: Option<String>,
    },

    /// A user left a room.
    UserLeft {
        /// The user.
        user: User,
        /// The room.
        room: String,
    },

    /// You were kicked from a room.
    Kicked {
        /// The room.
        room: String,
    },

    /// The server asked the client to render its command list (`/help`).
    CommandsRequested,

    /// Response to a room-list request (`/rooms`).
    RoomsListed {
        /// The available rooms with occupant counts.
        rooms: Vec<LobbyRoom>,
    },

    /// Response to a who-is-here request (`/list`).
    UsersInRoom {
        /// The room that was asked about.
        room: String,
        /// Names of the occupants.
        users: Vec<String>,
    },

    /// Response to a user search (`/who`).
    UsersMatched {
        /// Names matching the search.
        users: Vec<String>,
    },
}
