//! In-process message relay
//!
//! Every frame received from one client is delivered, untouched, to every
//! connected client (the sender included). A frame is an event name plus an
//! opaque payload; the relay never inspects either and keeps nothing once a
//! client disconnects.

use std::collections::{BTreeMap, VecDeque};

use crate::protocol::{CLIENT_COMMAND, CommandMessage};

/// Frames held per client before the oldest is dropped
pub const MAX_PENDING_FRAMES: usize = 256;

/// Handle for a connected client
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientId(u32);

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "client-{}", self.0)
    }
}

/// One relayed message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayFrame {
    pub event: String,
    pub payload: String,
}

impl RelayFrame {
    pub fn new(event: &str, payload: &str) -> Self {
        Self {
            event: event.to_string(),
            payload: payload.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Relay {
    inboxes: BTreeMap<ClientId, VecDeque<RelayFrame>>,
    next_id: u32,
}

impl Relay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self) -> ClientId {
        let id = ClientId(self.next_id);
        self.next_id += 1;
        self.inboxes.insert(id, VecDeque::new());
        log::info!("Client connected: {}", id);
        id
    }

    /// Drop a client and anything still queued for it
    pub fn disconnect(&mut self, id: ClientId) {
        if self.inboxes.remove(&id).is_some() {
            log::info!("Client disconnected: {}", id);
        }
    }

    /// Fan a frame out to all connected clients
    pub fn broadcast(&mut self, from: ClientId, event: &str, payload: &str) {
        log::trace!(
            "{} -> {} clients: {} {}",
            from,
            self.inboxes.len(),
            event,
            payload
        );
        let frame = RelayFrame::new(event, payload);
        for (id, inbox) in self.inboxes.iter_mut() {
            push_capped(*id, inbox, frame.clone());
        }
    }

    /// Encode and fan out a command on [`CLIENT_COMMAND`]
    pub fn broadcast_command(&mut self, from: ClientId, message: CommandMessage) {
        self.broadcast(from, CLIENT_COMMAND, &message.encode());
    }

    /// Deliver a frame to a single client; unknown IDs are ignored
    pub fn send_to(&mut self, to: ClientId, event: &str, payload: &str) {
        match self.inboxes.get_mut(&to) {
            Some(inbox) => push_capped(to, inbox, RelayFrame::new(event, payload)),
            None => log::debug!("Dropping {} frame for unknown {}", event, to),
        }
    }

    /// Take every frame queued for `id`, oldest first
    pub fn drain(&mut self, id: ClientId) -> Vec<RelayFrame> {
        self.inboxes
            .get_mut(&id)
            .map(|inbox| inbox.drain(..).collect())
            .unwrap_or_default()
    }

    /// Frames waiting for `id`
    pub fn pending(&self, id: ClientId) -> usize {
        self.inboxes.get(&id).map_or(0, VecDeque::len)
    }

    pub fn client_count(&self) -> usize {
        self.inboxes.len()
    }
}

/// Queue `frame`, evicting the oldest once the inbox is full
fn push_capped(id: ClientId, inbox: &mut VecDeque<RelayFrame>, frame: RelayFrame) {
    if inbox.len() >= MAX_PENDING_FRAMES
        && let Some(dropped) = inbox.pop_front()
    {
        log::warn!("{} inbox full, dropping {} frame", id, dropped.event);
    }
    inbox.push_back(frame);
}
