//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving the battle state machine or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use battle_core::{BattleProgress, BattleResult, BattleSpeed, Epoch, FightContext, Roster};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, OutcomeEvent, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Start a battle with the given player roster.
    ///
    /// Returns the epoch the battle runs under; its events carry the same one.
    pub async fn start_battle(&self, roster: Roster) -> Result<Epoch> {
        self.request(|reply| Command::Start { roster, reply }).await?
    }

    /// Abort the running battle without a result.
    pub async fn stop(&self) -> Result<()> {
        self.request(|reply| Command::Stop { reply }).await?
    }

    /// Discard a resolved battle and return to idle.
    pub async fn reset(&self) -> Result<()> {
        self.request(|reply| Command::Reset { reply }).await?
    }

    /// Discard a resolved battle and queue a rematch against a regenerated opponent.
    pub async fn rematch(&self, harder: bool) -> Result<()> {
        self.request(|reply| Command::Rematch { harder, reply }).await?
    }

    /// Change playback speed. Rejected unless idle.
    pub async fn set_speed(&self, speed: BattleSpeed) -> Result<()> {
        self.request(|reply| Command::SetSpeed { speed, reply }).await?
    }

    /// Set the fight number and game-plus loop for the next start. Rejected unless idle.
    pub async fn set_fight(&self, fight: FightContext) -> Result<()> {
        self.request(|reply| Command::SetFight { fight, reply }).await?
    }

    /// Query the current scores and log (read-only snapshot)
    pub async fn query_progress(&self) -> Result<BattleProgress> {
        self.request(|reply| Command::QueryProgress { reply }).await
    }

    /// Start a battle and wait until it resolves.
    ///
    /// Fails with [`RuntimeError::BattleStopped`] if the battle is stopped
    /// from another handle first. A stalemate never resolves; wrap the call
    /// in a timeout when the rosters may not be able to finish.
    pub async fn play(&self, roster: Roster) -> Result<BattleResult> {
        let mut outcomes = self.subscribe(Topic::Outcome);
        let epoch = self.start_battle(roster).await?;

        loop {
            match outcomes.recv().await {
                Ok(Event::Outcome(OutcomeEvent::Resolved {
                    epoch: resolved,
                    result,
                })) if resolved == epoch => return Ok(result),
                Ok(Event::Outcome(OutcomeEvent::Stopped { epoch: stopped })) if stopped == epoch => {
                    return Err(RuntimeError::BattleStopped);
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Outcome subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(RuntimeError::EventChannelClosed);
                }
            }
        }
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Progress` - Battle start and log growth
    /// - `Topic::Outcome` - Resolution, stop, reset and rematch
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use battle_runtime::Topic;
    ///
    /// let mut outcomes = handle.subscribe(Topic::Outcome);
    /// while let Ok(event) = outcomes.recv().await {
    ///     // Handle outcome events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }
}
