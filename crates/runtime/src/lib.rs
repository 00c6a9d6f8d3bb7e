//! Runtime orchestration for the arena battle resolver.
//!
//! This crate wires the pure `battle-core` controller to tokio: a worker task
//! owns the controller, a ticker feeds it polls, and consumers drive it and
//! observe it through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`oracle`] adapts static content for the worker
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod oracle;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, OutcomeEvent, ProgressEvent, Topic};
pub use oracle::BattleOracles;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
