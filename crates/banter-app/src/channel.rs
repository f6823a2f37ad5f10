//! Chat channel seam.
//!
//! The [`ChatChannel`] trait abstracts the transport's request/response
//! surface the way the rest of the crate needs it: a handful of async
//! calls with no retry policy and no local timeouts. Failures are carried
//! in [`ChannelError`] and surfaced once as inline error messages; the
//! user re-issues the action.

use std::future::Future;

use banter_proto::{CommandInfo, LobbyRoom, Message, RoomDetail};
use thiserror::Error;

/// Errors surfaced by channel requests.
///
/// Nothing in this taxonomy is fatal; every variant degrades to an inline
/// error-styled message in the relevant room context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// A request/response call was rejected or failed in transit.
    #[error("{0}")]
    Request(String),

    /// The channel is not connected.
    #[error("not connected")]
    Disconnected,
}

/// Request/response surface of the transport.
///
/// Methods take `&self` so the coordinator can issue several room-info
/// fetches concurrently during reconnect. Implementations are expected to
/// deliver push events in transport order through their own receive loop;
/// that side is out of this trait's scope.
pub trait ChatChannel: Send + Sync {
    /// Announce ourselves after connect. Returns `false` when the server
    /// has no identity for us yet and a nick must be chosen.
    fn join(&self) -> impl Future<Output = Result<bool, ChannelError>> + Send;

    /// Send raw user input (a message or a slash command).
    fn send(&self, raw: &str) -> impl Future<Output = Result<(), ChannelError>> + Send;

    /// Signal typing state for the active room. Fire-and-forget.
    fn typing(&self, active: bool) -> impl Future<Output = ()> + Send;

    /// Fetch a room's users, owners, and recent backlog.
    fn room_info(&self, room: &str)
    -> impl Future<Output = Result<RoomDetail, ChannelError>> + Send;

    /// Fetch the lobby room list.
    fn rooms(&self) -> impl Future<Output = Result<Vec<LobbyRoom>, ChannelError>> + Send;

    /// Fetch messages older than the given message ID.
    fn previous_messages(
        &self,
        before_id: &str,
    ) -> impl Future<Output = Result<Vec<Message>, ChannelError>> + Send;

    /// Fetch the list of available slash commands.
    fn commands(&self) -> impl Future<Output = Result<Vec<CommandInfo>, ChannelError>> + Send;

    /// Tear down and re-establish the connection (used after logout).
    fn restart(&self) -> impl Future<Output = ()> + Send;
}
