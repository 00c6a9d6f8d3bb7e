//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{OutcomeEvent, ProgressEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Battle start and per-poll log growth
    Progress,
    /// Resolution, stop, reset and rematch
    Outcome,
}

impl Topic {
    pub const ALL: [Topic; 2] = [Topic::Progress, Topic::Outcome];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Progress(ProgressEvent),
    Outcome(OutcomeEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Progress(_) => Topic::Progress,
            Event::Outcome(_) => Topic::Outcome,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Every topic's channel is created up front and the
/// map is never modified afterwards.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity.max(1)).0))
            .collect();

        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels[&topic].send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels[&topic].subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn routes_events_by_topic() {
        let bus = EventBus::with_capacity(8);
        let mut progress = bus.subscribe(Topic::Progress);
        let mut outcome = bus.subscribe(Topic::Outcome);

        bus.publish(Event::Outcome(OutcomeEvent::Reset));

        assert_eq!(
            outcome.recv().await.unwrap(),
            Event::Outcome(OutcomeEvent::Reset)
        );
        assert!(matches!(
            progress.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::default();
        bus.publish(Event::Outcome(OutcomeEvent::RematchQueued { harder: true }));
    }
}
