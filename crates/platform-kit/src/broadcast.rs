//! # Broadcast Channel
//!
//! In-process publish/subscribe keyed by channel name, used for loosely coupled
//! signals between feature modules (e.g. the feed telling the profile how many
//! posts the signed-in user has).
//!
//! The channel is constructed explicitly at composition time and handed to
//! whoever needs it. Clones share one subscriber registry.
//!
//! ## Delivery
//!
//! - `publish` delivers synchronously to every subscriber registered at the
//!   moment of the call, in subscription order.
//! - Nothing is retained: a subscriber registered after a publish never sees it.
//! - The subscriber list is snapshotted under a read lock and the lock is
//!   released before handlers run. A handler may subscribe, cancel or publish
//!   without deadlocking, and a subscriber added mid-publish takes part in the
//!   next publish only.
//! - Each subscriber carries a liveness flag that is checked right before its
//!   handler runs, so a subscriber cancelled mid-publish is skipped.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};
use tracing::{debug, trace};

/// Well-known channel names.
pub mod channels {
    use super::ChannelName;

    /// Number of posts authored by the signed-in user.
    pub const SELF_POSTS_COUNT: ChannelName = ChannelName::from_static("selfPostsCount");
}

/// Name of a broadcast channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelName(Cow<'static, str>);

impl ChannelName {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ChannelName {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for ChannelName {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

/// A published message as seen by a subscriber.
#[derive(Debug, Clone, PartialEq)]
pub struct BroadcastMessage {
    pub channel: ChannelName,
    pub payload: Value,
}

impl BroadcastMessage {
    /// Decode the payload as `T`, or `None` if it has a different shape.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Option<T> {
        T::deserialize(&self.payload).ok()
    }
}

type Handler = Arc<dyn Fn(&BroadcastMessage) + Send + Sync>;

struct Subscriber {
    id: u64,
    live: Arc<AtomicBool>,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: AtomicU64,
    channels: RwLock<HashMap<ChannelName, Vec<Subscriber>>>,
}

impl Registry {
    fn remove(&self, channel: &ChannelName, id: u64) -> bool {
        let mut channels = self.channels.write().unwrap_or_else(PoisonError::into_inner);
        let Some(subscribers) = channels.get_mut(channel) else {
            return false;
        };
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        let removed = subscribers.len() != before;
        if subscribers.is_empty() {
            channels.remove(channel);
        }
        removed
    }
}

/// Process-wide named publish/subscribe.
#[derive(Clone, Default)]
pub struct BroadcastChannel {
    registry: Arc<Registry>,
}

impl fmt::Debug for BroadcastChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channels = self.registry.channels.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("BroadcastChannel")
            .field("channels", &channels.len())
            .finish()
    }
}

impl BroadcastChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `payload` to every current subscriber of `channel`.
    ///
    /// Returns the number of handlers that received the message.
    pub fn publish(&self, channel: impl Into<ChannelName>, payload: impl Into<Value>) -> usize {
        let message = BroadcastMessage {
            channel: channel.into(),
            payload: payload.into(),
        };

        let snapshot: Vec<(Arc<AtomicBool>, Handler)> = {
            let channels = self.registry.channels.read().unwrap_or_else(PoisonError::into_inner);
            channels
                .get(&message.channel)
                .map(|subs| {
                    subs.iter()
                        .map(|s| (Arc::clone(&s.live), Arc::clone(&s.handler)))
                        .collect()
                })
                .unwrap_or_default()
        };

        let mut delivered = 0;
        for (live, handler) in &snapshot {
            if live.load(Ordering::Acquire) {
                handler(&message);
                delivered += 1;
            }
        }
        debug!(channel = %message.channel, subscribers = snapshot.len(), delivered, "Publish");
        delivered
    }

    /// Registers `handler` for `channel`.
    ///
    /// The handler stays registered until the returned [`Subscription`] is
    /// cancelled or dropped.
    #[must_use = "dropping the subscription unsubscribes the handler"]
    pub fn subscribe<F>(&self, channel: impl Into<ChannelName>, handler: F) -> Subscription
    where
        F: Fn(&BroadcastMessage) + Send + Sync + 'static,
    {
        let channel = channel.into();
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        let live = Arc::new(AtomicBool::new(true));
        self.registry
            .channels
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(channel.clone())
            .or_default()
            .push(Subscriber {
                id,
                live: Arc::clone(&live),
                handler: Arc::new(handler),
            });
        trace!(%channel, id, "Subscribed");

        Subscription {
            channel,
            id,
            live,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Number of live subscribers on `channel`.
    pub fn subscriber_count(&self, channel: &ChannelName) -> usize {
        self.registry
            .channels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(channel)
            .map_or(0, Vec::len)
    }
}

/// Handle to a registered handler. Cancelling or dropping it unsubscribes.
pub struct Subscription {
    channel: ChannelName,
    id: u64,
    live: Arc<AtomicBool>,
    registry: Weak<Registry>,
}

impl Subscription {
    pub fn channel(&self) -> &ChannelName {
        &self.channel
    }

    /// Removes the handler.
    ///
    /// Once this returns, no publish starts a new invocation of the handler,
    /// including a publish already iterating its snapshot. An invocation that
    /// already started on another thread may still be running.
    pub fn cancel(self) {
        // Drop does the work.
    }

    fn unsubscribe(&self) {
        self.live.store(false, Ordering::Release);
        if let Some(registry) = self.registry.upgrade() {
            if registry.remove(&self.channel, self.id) {
                trace!(channel = %self.channel, id = self.id, "Unsubscribed");
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("channel", &self.channel)
            .field("id", &self.id)
            .finish()
    }
}
