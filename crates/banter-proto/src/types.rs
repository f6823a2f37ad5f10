//! Payload types carried by server events and channel responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user as the server projects it to clients.
///
/// Read-only: renames and avatar changes arrive as fresh `User` values,
/// never as in-place mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name, unique per identity.
    pub name: String,
    /// Gravatar hash used to render the avatar.
    pub hash: String,
}

/// A chat message delivered by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Server-assigned message ID, used for history paging.
    pub id: String,
    /// Author of the message.
    pub user: User,
    /// Raw message content.
    pub content: String,
    /// Server timestamp.
    pub when: DateTime<Utc>,
}

/// A room as listed in membership events (join, reconnect).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    /// Room name, unique and case-sensitive.
    pub name: String,
    /// Whether the room is locked (invite-only).
    pub private: bool,
}

/// Full room info returned by the room-info fetch.
///
/// Applied in a fixed order during population: users, then owners, then the
/// recent message backlog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RoomDetail {
    /// Current occupants.
    pub users: Vec<User>,
    /// Names of the room owners.
    pub owners: Vec<String>,
    /// Most recent messages, oldest first.
    pub recent_messages: Vec<Message>,
}

/// A room as shown in the lobby listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyRoom {
    /// Room name.
    pub name: String,
    /// Occupant count.
    pub count: u32,
    /// Whether the room is locked.
    pub private: bool,
}

/// Response to a user-info request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Display name.
    pub name: String,
    /// Last activity timestamp.
    pub last_activity: DateTime<Utc>,
    /// Rooms the user currently occupies.
    pub rooms: Vec<String>,
    /// Rooms the user owns.
    pub owned_rooms: Vec<String>,
}

/// A slash command the server understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInfo {
    /// Command name, including the leading slash.
    pub name: String,
    /// Human-readable description.
    pub description: String,
}
