//! Topic-based event bus implementation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use xp_core::{CreatureSnapshot, EncounterId};

use crate::notify::{Notice, Notifier};
use crate::processor::AwardReport;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Completed award cycles
    Award,
    /// Creatures banked after mid-combat removal
    Banking,
    /// User-facing notices
    Notice,
}

/// Events published by the runtime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum XpEvent {
    Awarded(Box<AwardReport>),
    Banked {
        encounter: EncounterId,
        creature: CreatureSnapshot,
    },
    Notice(Notice),
}

impl XpEvent {
    pub fn topic(&self) -> Topic {
        match self {
            XpEvent::Awarded(_) => Topic::Award,
            XpEvent::Banked { .. } => Topic::Banking,
            XpEvent::Notice(_) => Topic::Notice,
        }
    }
}

struct Channels {
    award: broadcast::Sender<XpEvent>,
    banking: broadcast::Sender<XpEvent>,
    notice: broadcast::Sender<XpEvent>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<XpEvent> {
        match topic {
            Topic::Award => &self.award,
            Topic::Banking => &self.banking,
            Topic::Notice => &self.notice,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing is best-effort: events published while
/// nobody listens are dropped.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                award: broadcast::channel(capacity).0,
                banking: broadcast::channel(capacity).0,
                notice: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: XpEvent) {
        let topic = event.topic();
        if self.channels.get(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<XpEvent> {
        self.channels.get(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for EventBus {
    fn notify(&self, notice: Notice) {
        self.publish(XpEvent::Notice(notice));
    }
}
