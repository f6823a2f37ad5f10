//! Scripted fakes for coordinator tests.
//!
//! Every seam gets a recording double: the channel logs each request and
//! answers from canned data, the view logs each mutation as a readable
//! op string, the store keeps blobs in memory, and the clock only moves
//! when a test advances it.

use std::{
    collections::{HashMap, HashSet},
    future::Future,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use banter_app::{ChannelError, ChatChannel, Environment, MessageKind, MessageView, ViewSink};
use banter_proto::{CommandInfo, LobbyRoom, Message, RoomDetail, User};

/// Build a user with a fixed hash.
pub fn user(name: &str) -> User {
    User { name: name.into(), hash: "00".into() }
}

/// Build a message from `name` with the given id and content.
pub fn message(id: &str, name: &str, content: &str) -> Message {
    Message { id: id.into(), user: user(name), content: content.into(), when: chrono::Utc::now() }
}

/// Room info with the given occupants and backlog.
pub fn room_detail(users: &[&str], owners: &[&str], messages: Vec<Message>) -> RoomDetail {
    RoomDetail {
        users: users.iter().map(|n| user(n)).collect(),
        owners: owners.iter().map(|n| (*n).to_owned()).collect(),
        recent_messages: messages,
    }
}

/// Channel double answering from canned data and logging every request.
#[derive(Default)]
pub struct FakeChannel {
    pub calls: Mutex<Vec<String>>,
    pub join_ok: bool,
    pub join_fails: bool,
    pub room_infos: HashMap<String, RoomDetail>,
    pub fail_rooms: HashSet<String>,
    pub send_fails_with: Option<String>,
    pub previous: Vec<Message>,
    pub previous_fails: bool,
    pub command_list: Vec<CommandInfo>,
    pub commands_fail: bool,
    pub lobby: Vec<LobbyRoom>,
}

impl FakeChannel {
    pub fn new() -> Self {
        Self { join_ok: true, ..Self::default() }
    }

    fn record(&self, call: impl Into<String>) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call.into());
        }
    }

    /// Snapshot of the recorded request log.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// How many recorded requests equal `call`.
    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    /// Position of the first request equal to `call`, if any.
    pub fn position(&self, call: &str) -> Option<usize> {
        self.calls().iter().position(|c| c == call)
    }
}

impl ChatChannel for FakeChannel {
    async fn join(&self) -> Result<bool, ChannelError> {
        self.record("join");
        if self.join_fails {
            return Err(ChannelError::Disconnected);
        }
        Ok(self.join_ok)
    }

    async fn send(&self, raw: &str) -> Result<(), ChannelError> {
        self.record(format!("send:{raw}"));
        match &self.send_fails_with {
            Some(reason) => Err(ChannelError::Request(reason.clone())),
            None => Ok(()),
        }
    }

    async fn typing(&self, active: bool) {
        self.record(format!("typing:{active}"));
    }

    async fn room_info(&self, room: &str) -> Result<RoomDetail, ChannelError> {
        self.record(format!("room_info:{room}"));
        if self.fail_rooms.contains(room) {
            return Err(ChannelError::Request(format!("no such room {room}")));
        }
        Ok(self.room_infos.get(room).cloned().unwrap_or_default())
    }

    async fn rooms(&self) -> Result<Vec<LobbyRoom>, ChannelError> {
        self.record("rooms");
        Ok(self.lobby.clone())
    }

    async fn previous_messages(&self, before_id: &str) -> Result<Vec<Message>, ChannelError> {
        self.record(format!("previous:{before_id}"));
        if self.previous_fails {
            return Err(ChannelError::Request("history unavailable".into()));
        }
        Ok(self.previous.clone())
    }

    async fn commands(&self) -> Result<Vec<CommandInfo>, ChannelError> {
        self.record("commands");
        if self.commands_fail {
            return Err(ChannelError::Request("commands unavailable".into()));
        }
        Ok(self.command_list.clone())
    }

    async fn restart(&self) {
        self.record("restart");
    }
}

/// View double recording each mutation as a readable op string.
#[derive(Default)]
pub struct RecordingView {
    pub ops: Vec<String>,
    pub near_end: bool,
    pub title: String,
    rooms: HashSet<String>,
    users: HashSet<(String, String)>,
    commands: Vec<CommandInfo>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an op was recorded at least once.
    pub fn has(&self, op: &str) -> bool {
        self.ops.iter().any(|o| o == op)
    }

    /// How many recorded ops equal `op`.
    pub fn count(&self, op: &str) -> usize {
        self.ops.iter().filter(|o| o.as_str() == op).count()
    }

    /// How many recorded ops start with `prefix`.
    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.ops.iter().filter(|o| o.starts_with(prefix)).count()
    }
}

fn room_tag(room: Option<&str>) -> &str {
    room.unwrap_or("-")
}

impl ViewSink for RecordingView {
    fn add_room(&mut self, room: &str) -> bool {
        self.ops.push(format!("add_room:{room}"));
        self.rooms.insert(room.to_owned())
    }

    fn remove_room(&mut self, room: &str) {
        self.ops.push(format!("remove_room:{room}"));
        self.rooms.remove(room);
    }

    fn set_active_room(&mut self, room: &str) {
        self.ops.push(format!("set_active_room:{room}"));
    }

    fn set_room_locked(&mut self, room: &str, locked: bool) {
        self.ops.push(format!("set_room_locked:{room}:{locked}"));
    }

    fn add_user(&mut self, user: &User, room: &str, _owner: bool) -> bool {
        self.ops.push(format!("add_user:{}:{room}", user.name));
        self.users.insert((user.name.clone(), room.to_owned()))
    }

    fn remove_user(&mut self, user: &User, room: &str) {
        self.ops.push(format!("remove_user:{}:{room}", user.name));
        self.users.remove(&(user.name.clone(), room.to_owned()));
    }

    fn set_room_owner(&mut self, name: &str, room: &str) {
        self.ops.push(format!("set_room_owner:{name}:{room}"));
    }

    fn clear_room_owner(&mut self, name: &str, room: &str) {
        self.ops.push(format!("clear_room_owner:{name}:{room}"));
    }

    fn add_chat_message(&mut self, message: &MessageView, room: &str) {
        self.ops.push(format!("chat:{room}:{}", message.id));
    }

    fn add_chat_message_content(&mut self, id: &str, _content: &str, room: &str) {
        self.ops.push(format!("chat_append:{room}:{id}"));
    }

    fn prepend_chat_messages(&mut self, messages: &[MessageView], room: &str) {
        self.ops.push(format!("prepend:{room}:{}", messages.len()));
    }

    fn set_user_activity(&mut self, user: &User) {
        self.ops.push(format!("set_user_activity:{}", user.name));
    }

    fn change_user_name(&mut self, old_name: &str, user: &User, room: &str) {
        self.ops.push(format!("change_user_name:{old_name}:{}:{room}", user.name));
    }

    fn change_gravatar(&mut self, user: &User, room: &str) {
        self.ops.push(format!("change_gravatar:{}:{room}", user.name));
    }

    fn set_user_typing(&mut self, user: &User, room: &str, typing: bool) {
        self.ops.push(format!("set_user_typing:{}:{room}:{typing}", user.name));
    }

    fn update_unread(&mut self, room: &str, mentioned: bool) {
        self.ops.push(format!("update_unread:{room}:{mentioned}"));
    }

    fn scroll_to_bottom(&mut self, room: &str) {
        self.ops.push(format!("scroll_to_bottom:{room}"));
    }

    fn is_near_end(&self, _room: &str) -> bool {
        self.near_end
    }

    fn set_initialized(&mut self, room: &str) {
        self.ops.push(format!("set_initialized:{room}"));
    }

    fn set_message(&mut self, content: &str) {
        self.ops.push(format!("set_message:{content}"));
    }

    fn populate_lobby_rooms(&mut self, rooms: &[LobbyRoom]) {
        self.ops.push(format!("populate_lobby_rooms:{}", rooms.len()));
    }

    fn update_lobby_room_count(&mut self, room: &str, count: u32) {
        self.ops.push(format!("update_lobby_room_count:{room}:{count}"));
    }

    fn notify(&mut self, force: bool) {
        self.ops.push(format!("notify:{force}"));
    }

    fn set_commands(&mut self, commands: &[CommandInfo]) {
        self.ops.push(format!("set_commands:{}", commands.len()));
        self.commands = commands.to_vec();
    }

    fn commands(&self) -> Vec<CommandInfo> {
        self.commands.clone()
    }

    fn preferences(&self) -> serde_json::Value {
        serde_json::json!({ "theme": "dark" })
    }

    fn set_user_name(&mut self, name: &str) {
        self.ops.push(format!("set_user_name:{name}"));
    }

    fn add_message(&mut self, content: &str, kind: MessageKind, room: Option<&str>) {
        self.ops.push(format!("message[{kind:?}]:{}:{content}", room_tag(room)));
    }

    fn set_title(&mut self, title: &str) {
        self.ops.push(format!("title:{title}"));
        self.title = title.to_owned();
    }

    fn run(&mut self) {
        self.ops.push("run".to_owned());
    }

    fn initialize(&mut self, _preferences: Option<serde_json::Value>) {
        self.ops.push("initialize".to_owned());
    }
}

/// In-memory state store recording writes and cleared keys.
#[derive(Default)]
pub struct MemoryStore {
    pub values: HashMap<String, String>,
    pub cleared: Vec<String>,
    pub writes: usize,
}

impl banter_app::StateStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str, _ttl: Duration) {
        self.writes += 1;
        self.values.insert(key.to_owned(), value.to_owned());
    }

    fn clear(&mut self, key: &str) {
        self.cleared.push(key.to_owned());
        self.values.remove(key);
    }
}

/// Manually-advanced clock.
#[derive(Clone)]
pub struct FakeEnv {
    now: Arc<Mutex<Instant>>,
}

impl FakeEnv {
    pub fn new() -> Self {
        Self { now: Arc::new(Mutex::new(Instant::now())) }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl Environment for FakeEnv {
    type Instant = Instant;

    fn now(&self) -> Instant {
        self.now.lock().map(|now| *now).unwrap_or_else(|_| Instant::now())
    }

    fn sleep(&self, _duration: Duration) -> impl Future<Output = ()> + Send {
        std::future::ready(())
    }
}
