//! High-level runtime orchestrator.
//!
//! The runtime owns the battle worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive battles.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use battle_content::BattleContent;
use battle_core::BattleConfig;

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::oracle::BattleOracles;
use crate::workers::{BattleWorker, Command};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub battle: BattleConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that hosts the battle worker
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker, which exits once every cloned handle is dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    oracles: Option<BattleOracles>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required oracles
    pub fn oracles(mut self, oracles: BattleOracles) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Use a content bundle for both the oracles and the battle config.
    pub fn content(mut self, content: BattleContent) -> Self {
        self.config.battle = content.config.clone();
        self.oracles = Some(content.into());
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;
        if self.config.battle.poll_interval_ms == 0 {
            return Err(RuntimeError::InvalidPollInterval);
        }

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx.clone(), event_bus.clone());

        let worker = BattleWorker::new(
            self.config.battle,
            oracles,
            command_rx,
            command_tx.downgrade(),
            event_bus,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
