//! Channel Broker
//!
//! Manages per-channel subscriber tables for real-time event delivery.
//! Each subscriber is a connection's outbound queue; broadcasting locks
//! the table once and enqueues to every subscriber in a single pass, so
//! subscribers of one channel observe events in dispatch order.
//!
//! The broker holds no references to rooms or posts; a channel is just a
//! name, created on first join and dropped with its last subscriber.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::model::ServerEvent;

/// Identity of a fan-out channel
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChannelId {
    /// Chat room membership channel
    Room(String),
    /// Blog post comment/vote channel
    BlogPost(String),
    /// Per-user notification feed
    Notifications(String),
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelId::Room(id) => write!(f, "room:{id}"),
            ChannelId::BlogPost(id) => write!(f, "blogpost:{id}"),
            ChannelId::Notifications(id) => write!(f, "notifications:{id}"),
        }
    }
}

/// Broadcast state for realtime channels
///
/// Clones share one subscription table; handlers receive this by `State`
/// extraction and socket tasks hold a clone for their lifetime.
#[derive(Clone)]
pub struct ChannelBroker {
    channels: Arc<Mutex<HashMap<ChannelId, HashMap<Uuid, UnboundedSender<ServerEvent>>>>>,
}

impl ChannelBroker {
    pub fn new() -> Self {
        Self {
            channels: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Subscribe a connection's outbound queue to a channel
    pub fn join(&self, channel: ChannelId, connection_id: Uuid, sender: UnboundedSender<ServerEvent>) {
        let mut channels = self.channels.lock().unwrap();
        channels
            .entry(channel)
            .or_default()
            .insert(connection_id, sender);
    }

    /// Unsubscribe a connection from one channel
    pub fn leave(&self, channel: &ChannelId, connection_id: Uuid) {
        let mut channels = self.channels.lock().unwrap();
        if let Some(subscribers) = channels.get_mut(channel) {
            subscribers.remove(&connection_id);
            if subscribers.is_empty() {
                channels.remove(channel);
            }
        }
    }

    /// Unsubscribe a connection from every channel it joined
    ///
    /// Called when a socket closes; empty channels are dropped with it.
    pub fn drop_connection(&self, connection_id: Uuid) {
        let mut channels = self.channels.lock().unwrap();
        for subscribers in channels.values_mut() {
            subscribers.remove(&connection_id);
        }
        channels.retain(|_, subscribers| !subscribers.is_empty());
    }

    /// Send an event to every subscriber of a channel
    pub fn broadcast(&self, channel: &ChannelId, event: ServerEvent) {
        if let Some(subscribers) = self.channels.lock().unwrap().get(channel) {
            for sender in subscribers.values() {
                let _ = sender.send(event.clone()); // Ignore queues mid-teardown
            }
        }
    }

    /// Send an event to every subscriber except the acting connection
    pub fn broadcast_except(&self, channel: &ChannelId, connection_id: Uuid, event: ServerEvent) {
        if let Some(subscribers) = self.channels.lock().unwrap().get(channel) {
            for (id, sender) in subscribers {
                if *id != connection_id {
                    let _ = sender.send(event.clone());
                }
            }
        }
    }

    /// Push a notification payload to a user's feed
    ///
    /// In-process hook for collaborators that mint notifications; the
    /// payload rides through opaque.
    pub fn notify_user(&self, user_id: &str, notification: serde_json::Value) {
        self.broadcast(
            &ChannelId::Notifications(user_id.to_string()),
            ServerEvent::NewNotification(notification),
        );
    }

    /// Get subscriber count for a channel (for debugging)
    pub fn subscriber_count(&self, channel: &ChannelId) -> usize {
        self.channels
            .lock()
            .unwrap()
            .get(channel)
            .map(|subscribers| subscribers.len())
            .unwrap_or(0)
    }
}

impl Default for ChannelBroker {
    fn default() -> Self {
        Self::new()
    }
}
