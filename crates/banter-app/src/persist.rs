//! Persisted client state.
//!
//! One JSON blob under a fixed key holds everything that survives a page
//! reload: the user ID, the active room, and the view's opaque
//! preferences. Writes are write-through: every active-room change,
//! preference change, login, and logout re-serializes the whole blob.
//! A missing or malformed blob is not an error; it reads as defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Session, ViewSink};

/// Fixed key the state blob is stored under.
pub const STATE_KEY: &str = "banter.state";

/// Expiry applied on every write.
pub const STATE_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Single-field keys from older clients, cleared on every write.
pub const LEGACY_KEYS: [&str; 5] = ["userid", "username", "userroom", "userhash", "currentroom"];

/// Key/value storage with expiry (cookies, local storage, a file).
pub trait StateStore {
    /// Read the value stored under `key`, if any and not expired.
    fn read(&self, key: &str) -> Option<String>;

    /// Store `value` under `key` with the given time-to-live.
    fn write(&mut self, key: &str, value: &str, ttl: Duration);

    /// Remove `key`. Unknown keys are a no-op.
    fn clear(&mut self, key: &str);
}

/// The persisted state blob.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientState {
    /// Stable user ID, if an identity was established.
    pub user_id: Option<String>,
    /// Active room at the time of the last write.
    pub active_room: Option<String>,
    /// View-owned preferences, opaque to this crate.
    pub preferences: Option<serde_json::Value>,
}

/// Load the persisted blob, treating absence or corruption as defaults.
pub fn load_state<S: StateStore>(store: &S) -> ClientState {
    let Some(raw) = store.read(STATE_KEY) else {
        return ClientState::default();
    };
    match serde_json::from_str(&raw) {
        Ok(state) => state,
        Err(error) => {
            tracing::debug!(%error, "discarding malformed persisted state");
            ClientState::default()
        },
    }
}

/// Serialize and store the current session snapshot, clearing legacy keys.
pub fn save_state<S, V>(store: &mut S, session: &Session, view: &V)
where
    S: StateStore,
    V: ViewSink,
{
    let state = ClientState {
        user_id: session.user_id.clone(),
        active_room: session.active_room.clone(),
        preferences: Some(view.preferences()),
    };

    for key in LEGACY_KEYS {
        store.clear(key);
    }

    match serde_json::to_string(&state) {
        Ok(blob) => store.write(STATE_KEY, &blob, STATE_TTL),
        Err(error) => tracing::warn!(%error, "failed to serialize persisted state"),
    }
}
