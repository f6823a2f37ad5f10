//! Session context.
//!
//! One [`Session`] exists per coordinator and is passed explicitly to the
//! helpers that need it; there is no process-wide singleton. Identity
//! fields are cleared on logout, everything else survives reconnects.

/// Mutable per-connection session state.
#[derive(Debug, Clone)]
pub struct Session {
    /// Stable user ID, once established.
    pub user_id: Option<String>,
    /// Viewer's display name, once established.
    pub name: Option<String>,
    /// The room the viewer currently has focused; `None` means the lobby.
    pub active_room: Option<String>,
    /// Whether the window currently has focus.
    pub focused: bool,
    /// Messages received while unfocused.
    pub unread: u32,
    /// Whether any unread message mentioned the viewer.
    pub mention_pending: bool,
    /// Window title before any unread decoration.
    pub original_title: String,
}

impl Session {
    /// Create a fresh session. The window starts focused with no unread.
    pub fn new(original_title: impl Into<String>) -> Self {
        Self {
            user_id: None,
            name: None,
            active_room: None,
            focused: true,
            unread: 0,
            mention_pending: false,
            original_title: original_title.into(),
        }
    }

    /// Whether the given name is the viewer's own.
    ///
    /// Names are case-sensitive, matching the server's identity rules.
    pub fn is_self(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// Clear identity state on logout. Focus and title survive.
    pub fn reset_identity(&mut self) {
        self.user_id = None;
        self.name = None;
        self.active_room = None;
    }
}
