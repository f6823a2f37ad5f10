//! Wire-level data model for the banter chat channel.
//!
//! The server pushes a closed set of events at connected clients; this crate
//! defines that set ([`ServerEvent`]) together with the payload types it
//! carries. The transport itself (how frames arrive, request/response
//! plumbing) lives behind the channel seam in `banter-app` and is out of
//! scope here.

mod event;
mod types;

pub use event::ServerEvent;
pub use types::{CommandInfo, LobbyRoom, Message, RoomDetail, RoomSummary, User, UserInfo};
