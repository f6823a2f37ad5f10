//! Session coordinator.
//!
//! The [`Coordinator`] is the single owner of all client-side chat state.
//! It consumes three input streams through discrete handler invocations:
//!
//! - [`ServerEvent`]s pushed by the transport ([`handle_server_event`])
//! - [`UserIntent`]s raised by the view ([`handle_intent`])
//! - clock ticks for the two deadline slots ([`handle_tick`])
//!
//! Each handler runs to completion before the next starts; suspension
//! happens only at channel awaits. A multi-threaded embedding must drive
//! the coordinator from one owning task.
//!
//! [`handle_server_event`]: Coordinator::handle_server_event
//! [`handle_intent`]: Coordinator::handle_intent
//! [`handle_tick`]: Coordinator::handle_tick

use banter_proto::{RoomDetail, RoomSummary, ServerEvent};
use futures::future::join_all;

use crate::{
    ChatChannel, Environment, MentionMatcher, MessageHistory, MessageKind, RoomTracker, Session,
    StateStore, UserIntent, ViewSink, persist, presence,
    scroll::{DeferredScrollCheck, EMBED_SETTLE_DELAY, scroll_if_necessary},
    typing::TypingTracker,
};

/// Well-known fallback room shown when no room is active.
pub const DEFAULT_ROOM: &str = "Lobby";

/// Client-side chat session coordinator.
///
/// Owns the session context, the joined-room registry, the typing
/// debounce, the outgoing-message history, and the seams to the
/// transport, the view, and persisted storage.
pub struct Coordinator<C, V, S, E>
where
    E: Environment,
{
    channel: C,
    view: V,
    store: S,
    env: E,
    session: Session,
    rooms: RoomTracker,
    history: MessageHistory,
    typing: TypingTracker<E::Instant>,
    mention: MentionMatcher,
    /// Serializes backlog paging: a second scroll-to-top fetch is dropped
    /// while one is outstanding.
    loading_history: bool,
    /// Pending re-checks for rooms that received late-resizing content.
    scroll_checks: Vec<DeferredScrollCheck<E::Instant>>,
}

impl<C, V, S, E> Coordinator<C, V, S, E>
where
    C: ChatChannel,
    V: ViewSink,
    S: StateStore,
    E: Environment,
{
    /// Create a coordinator around the given seams.
    pub fn new(channel: C, view: V, store: S, env: E, original_title: impl Into<String>) -> Self {
        Self {
            channel,
            view,
            store,
            env,
            session: Session::new(original_title),
            rooms: RoomTracker::new(),
            history: MessageHistory::default(),
            typing: TypingTracker::new(),
            mention: MentionMatcher::new(),
            loading_history: false,
            scroll_checks: Vec::new(),
        }
    }

    /// Startup sequence: restore persisted state, greet, announce
    /// ourselves to the server, and fetch the command list.
    pub async fn start(&mut self) {
        let state = persist::load_state(&self.store);
        self.session.user_id = state.user_id;
        self.session.active_room = state.active_room;
        self.view.initialize(state.preferences);

        let welcome = format!("Welcome to {}", self.session.original_title);
        self.view.add_message(&welcome, MessageKind::Notification, None);
        self.view.add_message(
            "Type /help to see the list of commands",
            MessageKind::Notification,
            None,
        );

        match self.channel.join().await {
            Ok(success) => {
                if !success {
                    self.view.add_message(
                        "Choose a name using \"/nick nickname password\".",
                        MessageKind::Notification,
                        None,
                    );
                }

                // Command list is only useful once joined
                match self.channel.commands().await {
                    Ok(commands) => self.view.set_commands(&commands),
                    Err(error) => tracing::debug!(%error, "command list fetch failed"),
                }
            },
            Err(error) => {
                self.view.add_message(&error.to_string(), MessageKind::Error, None);
            },
        }
    }

    /// Dispatch one server-pushed event.
    #[allow(clippy::too_many_lines)]
    pub async fn handle_server_event(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::RoomJoined { room } => {
                let added = self.rooms.register(&room.name, room.private);
                let _ = self.view.add_room(&room.name);
                self.activate_room(&room.name).await;
                if room.private {
                    self.view.set_room_locked(&room.name, true);
                }

                // First successful population narrates the entry exactly once;
                // redundant joins neither re-fetch nor re-notify.
                if added && self.populate_room(&room.name).await {
                    self.view.add_message(
                        &format!("You just entered {}", room.name),
                        MessageKind::Notification,
                        Some(&room.name),
                    );
                }
            },

            ServerEvent::LoggedOn { name, user_id, rooms } => {
                self.log_on(name, user_id, rooms).await;
            },

            ServerEvent::RoomLocked { user, room } => {
                if !self.session.is_self(&user.name)
                    && self.session.active_room.as_deref() == Some(room.as_str())
                {
                    self.notify_active(&format!("{} has locked {room}.", user.name));
                }
                self.rooms.set_locked(&room, true);
                self.view.set_room_locked(&room, true);
            },

            ServerEvent::RoomLockedSelf { room } => {
                self.notify_active(&format!("{room} is now locked."));
            },

            ServerEvent::RoomUnlocked { user, room } => {
                if !self.session.is_self(&user.name)
                    && self.session.active_room.as_deref() == Some(room.as_str())
                {
                    self.notify_active(&format!("{} has unlocked {room}.", user.name));
                }
                self.rooms.set_locked(&room, false);
                self.view.set_room_locked(&room, false);
            },

            ServerEvent::OwnerAdded { user, room } => {
                self.view.set_room_owner(&user.name, &room);
            },

            ServerEvent::OwnerRemoved { user, room } => {
                self.view.clear_room_owner(&user.name, &room);
            },

            ServerEvent::RoomCountChanged { room, count } => {
                self.view.update_lobby_room_count(&room, count);
            },

            ServerEvent::UsersInactive { users } => {
                for user in &users {
                    self.view.set_user_activity(user);
                }
            },

            ServerEvent::UserActivityUpdated { user } => {
                self.view.set_user_activity(&user);
            },

            ServerEvent::MessageContentAppended { id, content, room } => {
                let was_near_end = self.view.is_near_end(&room);
                scroll_if_necessary(&mut self.view, &room, |v| {
                    v.add_chat_message_content(&id, &content, &room);
                });
                // Appended content never counts as a mention
                presence::update_unread(&mut self.session, &mut self.view, &room, false);

                // The content's final size is unknown until embeds settle, so
                // the same near-end condition gets one delayed re-check.
                self.scroll_checks.push(DeferredScrollCheck {
                    room,
                    deadline: self.env.now() + EMBED_SETTLE_DELAY,
                    was_near_end,
                });
            },

            ServerEvent::MessageAdded { message, room } => {
                let view_model = self.mention.view_model(&message);
                let mentioned = view_model.highlight;
                scroll_if_necessary(&mut self.view, &room, |v| {
                    v.add_chat_message(&view_model, &room);
                });
                presence::update_unread(&mut self.session, &mut self.view, &room, mentioned);
            },

            ServerEvent::UserJoined { user, room, owner } => {
                let added = self.view.add_user(&user, &room, owner);
                if added && !self.session.is_self(&user.name) {
                    self.view.add_message(
                        &format!("{} just entered {room}", user.name),
                        MessageKind::Notification,
                        Some(&room),
                    );
                }
            },

            ServerEvent::UserRenamed { old_name, user, room } => {
                self.view.change_user_name(&old_name, &user, &room);
                if !self.session.is_self(&user.name) {
                    self.view.add_message(
                        &format!("{old_name}'s nick has changed to {}", user.name),
                        MessageKind::Notification,
                        Some(&room),
                    );
                }
            },

            ServerEvent::GravatarChanged { user, room } => {
                self.view.change_gravatar(&user, &room);
                if !self.session.is_self(&user.name) {
                    self.view.add_message(
                        &format!("{}'s gravatar changed.", user.name),
                        MessageKind::Notification,
                        Some(&room),
                    );
                }
            },

            ServerEvent::AccessGranted { room } => {
                self.notify_active(&format!("You were granted access to {room}"));
            },

            ServerEvent::UserAccessGranted { user, room } => {
                self.notify_active(&format!("{user} now has access to {room}"));
            },

            ServerEvent::AccessRevoked { room } => {
                self.notify_active(&format!("Your access to {room} was revoked."));
            },

            ServerEvent::UserAccessRevoked { user, room } => {
                self.notify_active(&format!("You have revoked {user}'s access to {room}"));
            },

            ServerEvent::OwnerGranted { user, room } => {
                self.notify_active(&format!("{user} is now an owner of {room}"));
            },

            ServerEvent::OwnerRevoked { user, room } => {
                self.notify_active(&format!("{user} is no longer an owner of {room}"));
            },

            ServerEvent::OwnershipGranted { room } => {
                self.notify_active(&format!("You are now an owner of {room}"));
            },

            ServerEvent::OwnershipRevoked { room } => {
                self.notify_active(&format!("You are no longer an owner of {room}"));
            },

            ServerEvent::GravatarSet => {
                self.notify_active("Your gravatar has been set");
            },

            ServerEvent::Notification { content, room } => {
                self.view.add_message(&content, MessageKind::Notification, room.as_deref());
            },

            ServerEvent::UserCreated { name, user_id } => {
                self.session.name = Some(name.clone());
                self.session.user_id = Some(user_id);
                self.mention.set_name(&name);
                self.view.set_user_name(&name);
                self.view.add_message(
                    &format!("Your nick is {name}"),
                    MessageKind::Notification,
                    None,
                );

                // Process any urls that may contain room names
                self.view.run();

                if self.session.active_room.is_none() {
                    self.activate_room(DEFAULT_ROOM).await;
                }
                self.persist_state();
            },

            ServerEvent::LoggedOut { rooms } => {
                self.activate_room(DEFAULT_ROOM).await;
                for room in &rooms {
                    self.view.remove_room(room);
                    self.rooms.remove(room);
                }
                self.view.add_message("You've been logged out.", MessageKind::Notification, None);

                self.session.reset_identity();
                self.mention.clear();
                self.persist_state();

                self.channel.restart().await;
            },

            ServerEvent::UserInfoReceived { info } => {
                let last_seen = info.last_activity.format("%Y-%m-%d %H:%M UTC");
                self.view.add_message(
                    &format!("User information for {} (last seen {last_seen})", info.name),
                    MessageKind::ListHeader,
                    None,
                );
                self.show_room_list(
                    &info.name,
                    &info.rooms,
                    "is in the following rooms",
                    "is not in any rooms",
                );
                self.show_room_list(
                    &info.name,
                    &info.owned_rooms,
                    "owns the following rooms",
                    "does not own any rooms",
                );
            },

            ServerEvent::PasswordSet => {
                self.notify_active("Your password has been set");
            },

            ServerEvent::PasswordChanged => {
                self.notify_active("Your password has been changed");
            },

            ServerEvent::NameChanged { user } => {
                self.session.name = Some(user.name.clone());
                self.mention.set_name(&user.name);
                self.view.set_user_name(&user.name);
                self.notify_active(&format!("Your name is now {}", user.name));
            },

            ServerEvent::TypingChanged { user, room, typing } => {
                self.view.set_user_typing(&user, &room, typing);
            },

            ServerEvent::MeMessage { name, content, room } => {
                self.view.add_message(
                    &format!("*{name} {content}"),
                    MessageKind::Notification,
                    Some(&room),
                );
            },

            ServerEvent::PrivateMessage { from, to, content } => {
                if self.session.is_self(&to) {
                    // Force notification for direct messages
                    self.view.notify(true);
                }
                self.view.add_message(
                    &format!("*{from}* » *{to}* {content}"),
                    MessageKind::PrivateMessage,
                    None,
                );
            },

            ServerEvent::Nudge { from, to } => {
                let (text, kind) = match to {
                    Some(_) => (format!("*{from} nudged you"), MessageKind::PrivateMessage),
                    None => (format!("*{from} nudged the room"), MessageKind::Notification),
                };
                self.view.add_message(&text, kind, None);
            },

            ServerEvent::UserLeft { user, room } => {
                if self.session.is_self(&user.name) {
                    self.activate_room(DEFAULT_ROOM).await;
                    self.view.remove_room(&room);
                    self.rooms.remove(&room);
                    self.view.add_message(
                        &format!("You have left {room}"),
                        MessageKind::Notification,
                        None,
                    );
                } else {
                    self.view.remove_user(&user, &room);
                    self.view.add_message(
                        &format!("{} left {room}", user.name),
                        MessageKind::Notification,
                        Some(&room),
                    );
                }
            },

            ServerEvent::Kicked { room } => {
                self.activate_room(DEFAULT_ROOM).await;
                self.view.remove_room(&room);
                self.rooms.remove(&room);
                self.view.add_message(
                    &format!("You were kicked from {room}"),
                    MessageKind::Notification,
                    None,
                );
            },

            ServerEvent::CommandsRequested => {
                self.view.add_message("Help", MessageKind::ListHeader, None);
                for command in self.view.commands() {
                    self.view.add_message(
                        &format!("{} - {}", command.name, command.description),
                        MessageKind::ListItem,
                        None,
                    );
                }
            },

            ServerEvent::RoomsListed { mut rooms } => {
                self.view.add_message("Rooms", MessageKind::ListHeader, None);
                if rooms.is_empty() {
                    self.view.add_message("No rooms available", MessageKind::ListItem, None);
                } else {
                    rooms.sort_by(|a, b| b.count.cmp(&a.count));
                    for room in &rooms {
                        self.view.add_message(
                            &format!("{} ({})", room.name, room.count),
                            MessageKind::ListItem,
                            None,
                        );
                    }
                }
            },

            ServerEvent::UsersInRoom { room, users } => {
                self.view.add_message(&format!("Users in {room}"), MessageKind::ListHeader, None);
                if users.is_empty() {
                    self.view.add_message("Room is empty", MessageKind::ListItem, None);
                } else {
                    for name in &users {
                        self.view.add_message(&format!("- {name}"), MessageKind::ListItem, None);
                    }
                }
            },

            ServerEvent::UsersMatched { users } => {
                if users.is_empty() {
                    self.view.add_message(
                        "No users matched your search",
                        MessageKind::ListHeader,
                        None,
                    );
                } else {
                    self.view.add_message(
                        "The following users match your search",
                        MessageKind::ListHeader,
                        None,
                    );
                    self.view.add_message(&users.join(", "), MessageKind::ListItem, None);
                }
            },
        }
    }

    /// Dispatch one user-intent event from the view.
    pub async fn handle_intent(&mut self, intent: UserIntent) {
        match intent {
            UserIntent::Typing => {
                // Not in a room: no typing notifications at all
                if self.session.active_room.is_none() {
                    return;
                }
                let now = self.env.now();
                if self.typing.keystroke(now) {
                    self.channel.typing(true).await;
                }
            },

            UserIntent::SendMessage { content } => {
                if let Err(error) = self.channel.send(&content).await {
                    self.view.add_message(&error.to_string(), MessageKind::Error, None);
                }

                if self.typing.message_sent() {
                    self.channel.typing(false).await;
                }

                self.history.push(content);
            },

            UserIntent::Focus => {
                self.session.focused = true;
                self.session.unread = 0;
                self.session.mention_pending = false;
                presence::update_title(&self.session, &mut self.view);
            },

            UserIntent::Blur => {
                self.session.focused = false;
                presence::update_title(&self.session, &mut self.view);
            },

            UserIntent::OpenRoom { room } => {
                if let Err(error) = self.channel.send(&format!("/join {room}")).await {
                    self.activate_room(DEFAULT_ROOM).await;
                    self.view.add_message(&error.to_string(), MessageKind::Error, None);
                }
            },

            UserIntent::CloseRoom { room } => {
                if let Err(error) = self.channel.send(&format!("/leave {room}")).await {
                    self.view.add_message(&error.to_string(), MessageKind::Error, None);
                }
            },

            UserIntent::RecallPrevious => {
                if let Some(content) = self.history.recall_previous() {
                    self.view.set_message(content);
                }
            },

            UserIntent::RecallNext => {
                if let Some(content) = self.history.recall_next() {
                    self.view.set_message(content);
                }
            },

            UserIntent::ActiveRoomChanged { room } => {
                self.room_activated(&room).await;
            },

            UserIntent::ScrollRoomTop { room, message_id } => {
                // Drop concurrent paging requests rather than queueing them
                if self.loading_history {
                    return;
                }
                self.loading_history = true;

                match self.channel.previous_messages(&message_id).await {
                    Ok(messages) => {
                        let views: Vec<_> =
                            messages.iter().map(|m| self.mention.view_model(m)).collect();
                        self.view.prepend_chat_messages(&views, &room);
                    },
                    Err(error) => tracing::debug!(%room, %error, "history load failed"),
                }

                self.loading_history = false;
            },

            UserIntent::PreferencesChanged => {
                self.persist_state();
            },
        }
    }

    /// Sweep both deadline slots: the typing debounce and any deferred
    /// scroll re-checks.
    pub async fn handle_tick(&mut self, now: E::Instant) {
        if self.typing.poll(now) {
            self.channel.typing(false).await;
        }

        let mut due = Vec::new();
        self.scroll_checks.retain(|check| {
            if check.deadline <= now {
                due.push(check.clone());
                false
            } else {
                true
            }
        });
        for check in due {
            if check.was_near_end && self.view.is_near_end(&check.room) {
                self.view.scroll_to_bottom(&check.room);
            }
        }
    }

    /// Reconnect path: register every room, greet, then populate with the
    /// previously active room first so the visible room renders before
    /// background rooms finish loading.
    async fn log_on(&mut self, name: String, user_id: String, rooms: Vec<RoomSummary>) {
        let previously_active = self.session.active_room.clone();
        self.session.name = Some(name.clone());
        self.session.user_id = Some(user_id);
        self.mention.set_name(&name);

        for room in &rooms {
            self.rooms.register(&room.name, room.private);
            let _ = self.view.add_room(&room.name);
            if room.private {
                self.view.set_room_locked(&room.name, true);
            }
        }

        self.view.set_user_name(&name);
        self.view.add_message(
            &format!("Welcome back {name}"),
            MessageKind::Notification,
            Some(DEFAULT_ROOM),
        );
        self.view.add_message(
            "You can join any of the rooms on the right",
            MessageKind::Notification,
            Some(DEFAULT_ROOM),
        );
        self.view.add_message(
            "Type /rooms to list all available rooms",
            MessageKind::Notification,
            Some(DEFAULT_ROOM),
        );

        // Process any urls that may contain room names
        self.view.run();

        // Re-assert the active room unless navigation already changed it
        // mid-bootstrap
        if previously_active == self.session.active_room {
            let target =
                self.session.active_room.clone().unwrap_or_else(|| DEFAULT_ROOM.to_owned());
            self.activate_room(&target).await;
        }

        match self.session.active_room.clone() {
            Some(active) => {
                if self.populate_room(&active).await {
                    self.populate_remaining(&rooms).await;
                }
            },
            None => self.populate_remaining(&rooms).await,
        }
    }

    /// Populate every registered room except the currently active one,
    /// fetching concurrently with no relative ordering, then refresh the
    /// lobby listing.
    async fn populate_remaining(&mut self, rooms: &[RoomSummary]) {
        let pending: Vec<String> = rooms
            .iter()
            .map(|room| room.name.clone())
            .filter(|name| self.session.active_room.as_deref() != Some(name.as_str()))
            .collect();

        let channel = &self.channel;
        let results = join_all(
            pending.iter().map(|name| async move { (name.clone(), channel.room_info(name).await) }),
        )
        .await;

        for (name, result) in results {
            match result {
                Ok(info) => self.apply_room_info(&name, &info),
                Err(error) => tracing::debug!(room = %name, %error, "room population failed"),
            }
        }

        self.populate_lobby_rooms().await;
    }

    /// One-time population of a room: fetch, then apply users, owners, and
    /// backlog in that fixed order. Returns `false` on fetch failure, in
    /// which case the room stays uninitialized with no user-visible error.
    async fn populate_room(&mut self, room: &str) -> bool {
        match self.channel.room_info(room).await {
            Ok(info) => {
                self.apply_room_info(room, &info);
                true
            },
            Err(error) => {
                tracing::debug!(%room, %error, "room population failed");
                false
            },
        }
    }

    fn apply_room_info(&mut self, room: &str, info: &RoomDetail) {
        for user in &info.users {
            let _ = self.view.add_user(user, room, false);
            self.view.set_user_activity(user);
        }

        for owner in &info.owners {
            self.view.set_room_owner(owner, room);
        }

        for message in &info.recent_messages {
            let view_model = self.mention.view_model(message);
            self.view.add_chat_message(&view_model, room);
        }

        // Initialized gates live-message treatment; set only after the
        // whole backlog applied
        self.rooms.set_initialized(room);
        self.view.set_initialized(room);
        self.view.scroll_to_bottom(room);
    }

    async fn populate_lobby_rooms(&mut self) {
        match self.channel.rooms().await {
            Ok(rooms) => self.view.populate_lobby_rooms(&rooms),
            Err(error) => tracing::debug!(%error, "lobby room list fetch failed"),
        }
    }

    /// Server-driven activation: point the view at the room, then apply
    /// the same bookkeeping as a view-driven switch.
    async fn activate_room(&mut self, room: &str) {
        self.view.set_active_room(room);
        self.room_activated(room).await;
    }

    /// Bookkeeping shared by server- and view-driven room switches. The
    /// lobby counts as "no active room" and refreshes its listing.
    async fn room_activated(&mut self, room: &str) {
        if room == DEFAULT_ROOM {
            self.populate_lobby_rooms().await;
            self.session.active_room = None;
        } else {
            self.session.active_room = Some(room.to_owned());
        }

        self.view.scroll_to_bottom(room);
        self.persist_state();
    }

    fn notify_active(&mut self, content: &str) {
        let room = self.session.active_room.clone();
        self.view.add_message(content, MessageKind::Notification, room.as_deref());
    }

    fn show_room_list(&mut self, user: &str, rooms: &[String], header: &str, empty: &str) {
        if rooms.is_empty() {
            self.view.add_message(&format!("{user} {empty}"), MessageKind::ListHeader, None);
        } else {
            self.view.add_message(&format!("{user} {header}"), MessageKind::ListHeader, None);
            self.view.add_message(&rooms.join(", "), MessageKind::ListItem, None);
        }
    }

    fn persist_state(&mut self) {
        persist::save_state(&mut self.store, &self.session, &self.view);
    }

    /// Current session context.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Joined-room registry.
    pub fn rooms(&self) -> &RoomTracker {
        &self.rooms
    }

    /// Outgoing-message history.
    pub fn history(&self) -> &MessageHistory {
        &self.history
    }

    /// The view seam.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// The channel seam.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// The persisted-state seam.
    pub fn store(&self) -> &S {
        &self.store
    }
}
