//! Client-side chat session coordinator.
//!
//! Reconciles the stream of server-pushed events with a local view of
//! multiple chat rooms and drives the client-only features around it:
//! unread/title badges, typing debounce, outgoing-message recall, and
//! reconnect-safe state restore.
//!
//! # Components
//!
//! - [`Coordinator`]: single owning dispatcher for server events, user
//!   intents, and timer ticks
//! - [`ChatChannel`]: seam to the transport (request/response + signals)
//! - [`ViewSink`]: seam to the presentation layer (idempotent mutations)
//! - [`StateStore`]: seam to persisted-preference storage
//! - [`Environment`]: time abstraction for deterministic timers
//!
//! All state mutation happens inside discrete handler invocations on the
//! coordinator; a multi-threaded embedding must own it from a single task.

mod channel;
mod coordinator;
mod env;
mod history;
mod persist;
mod presence;
mod rooms;
mod scroll;
mod session;
mod typing;
mod view;

pub use channel::{ChannelError, ChatChannel};
pub use coordinator::{Coordinator, DEFAULT_ROOM};
pub use env::{Environment, TokioEnv};
pub use history::{HISTORY_CAPACITY, MessageHistory};
pub use persist::{ClientState, LEGACY_KEYS, STATE_KEY, STATE_TTL, StateStore};
pub use presence::{MentionMatcher, title, update_title, update_unread};
pub use rooms::RoomTracker;
pub use scroll::EMBED_SETTLE_DELAY;
pub use session::Session;
pub use typing::{TYPING_TIMEOUT, TypingTracker};
pub use view::{MessageKind, MessageView, UserIntent, ViewSink};
