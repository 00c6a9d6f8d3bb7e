//! Topic-based event bus for runtime events.
//!
//! Battle progress and battle outcomes are published to separate topics so a
//! consumer that only cares about results never sees per-poll traffic.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{OutcomeEvent, ProgressEvent};
