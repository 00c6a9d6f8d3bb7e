//! Battle worker that owns the authoritative [`BattleController`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), drives the
//! controller, and publishes progress and outcome events to the EventBus.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, trace};

use battle_core::{
    BattleConfig, BattleController, BattleProgress, BattleSpeed, Epoch, FightContext,
    PollOutcome, Roster, Side,
};

use super::ticker::Ticker;
use crate::api::Result;
use crate::events::{Event, EventBus, OutcomeEvent, ProgressEvent};
use crate::oracle::BattleOracles;

/// Commands that can be sent to the battle worker
pub enum Command {
    /// `Idle → Running` with the given player roster.
    Start {
        roster: Roster,
        reply: oneshot::Sender<Result<Epoch>>,
    },
    /// `Running → Idle` without a result.
    Stop { reply: oneshot::Sender<Result<()>> },
    /// `Resolved → Idle`.
    Reset { reply: oneshot::Sender<Result<()>> },
    /// `Resolved → Idle`, next start regenerates the opponent.
    Rematch {
        harder: bool,
        reply: oneshot::Sender<Result<()>>,
    },
    SetSpeed {
        speed: BattleSpeed,
        reply: oneshot::Sender<Result<()>>,
    },
    SetFight {
        fight: FightContext,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Read-only snapshot of scores and log.
    QueryProgress {
        reply: oneshot::Sender<BattleProgress>,
    },
    /// Timer tick for the battle started under `epoch`.
    Poll { epoch: Epoch },
}

/// Background task that processes battle commands.
pub struct BattleWorker {
    controller: BattleController,
    oracles: BattleOracles,
    command_rx: mpsc::Receiver<Command>,
    poll_source: mpsc::WeakSender<Command>,
    event_bus: EventBus,
    ticker: Option<Ticker>,
    /// Number of log entries already published for the current session.
    published: usize,
}

impl BattleWorker {
    pub fn new(
        config: BattleConfig,
        oracles: BattleOracles,
        command_rx: mpsc::Receiver<Command>,
        poll_source: mpsc::WeakSender<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            target: "runtime::worker",
            poll_interval_ms = config.poll_interval_ms,
            speed = %config.default_speed,
            "BattleWorker initialized"
        );

        Self {
            controller: BattleController::new(config),
            oracles,
            command_rx,
            poll_source,
            event_bus,
            ticker: None,
            published: 0,
        }
    }

    /// Main worker loop. Ends once every handle is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }

        self.ticker = None;
        debug!(target: "runtime::worker", "BattleWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Start { roster, reply } => {
                let result = self.handle_start(&roster);
                if reply.send(result).is_err() {
                    debug!("Start reply channel closed (caller dropped)");
                }
            }
            Command::Stop { reply } => {
                let result = self.handle_stop();
                if reply.send(result).is_err() {
                    debug!("Stop reply channel closed (caller dropped)");
                }
            }
            Command::Reset { reply } => {
                let result: Result<()> = self.controller.reset().map_err(Into::into);
                if result.is_ok() {
                    self.published = 0;
                    self.event_bus.publish(Event::Outcome(OutcomeEvent::Reset));
                }
                if reply.send(result).is_err() {
                    debug!("Reset reply channel closed (caller dropped)");
                }
            }
            Command::Rematch { harder, reply } => {
                let result: Result<()> = self.controller.rematch(harder).map_err(Into::into);
                if result.is_ok() {
                    self.published = 0;
                    self.event_bus
                        .publish(Event::Outcome(OutcomeEvent::RematchQueued { harder }));
                }
                if reply.send(result).is_err() {
                    debug!("Rematch reply channel closed (caller dropped)");
                }
            }
            Command::SetSpeed { speed, reply } => {
                let result = self.controller.set_speed(speed).map_err(Into::into);
                if reply.send(result).is_err() {
                    debug!("SetSpeed reply channel closed (caller dropped)");
                }
            }
            Command::SetFight { fight, reply } => {
                let result = self.controller.set_fight(fight).map_err(Into::into);
                if reply.send(result).is_err() {
                    debug!("SetFight reply channel closed (caller dropped)");
                }
            }
            Command::QueryProgress { reply } => {
                if reply.send(self.controller.progress()).is_err() {
                    debug!("QueryProgress reply channel closed (caller dropped)");
                }
            }
            Command::Poll { epoch } => self.handle_poll(epoch),
        }
    }

    fn handle_start(&mut self, roster: &Roster) -> Result<Epoch> {
        let env = self.oracles.as_battle_env();
        let epoch = self.controller.start(&env, roster)?;
        self.published = 0;

        let (player_instances, opponent_instances) = self
            .controller
            .session()
            .map(|session| {
                (
                    session.scheduler().count_for(Side::Player),
                    session.scheduler().count_for(Side::Opponent),
                )
            })
            .unwrap_or_default();

        info!(
            target: "runtime::worker",
            %epoch,
            speed = %self.controller.speed(),
            fight = self.controller.fight().fight_number,
            game_plus = self.controller.fight().game_plus,
            harder = self.controller.fight().harder_rematch,
            player_instances,
            opponent_instances,
            "Battle started"
        );

        self.event_bus.publish(Event::Progress(ProgressEvent::Started {
            epoch,
            speed: self.controller.speed(),
            fight: self.controller.fight(),
            player_instances,
            opponent_instances,
        }));
        self.publish_new_entries(epoch);

        let period = Duration::from_millis(self.controller.config().poll_interval_ms);
        self.ticker = Some(Ticker::spawn(self.poll_source.clone(), epoch, period));

        Ok(epoch)
    }

    fn handle_stop(&mut self) -> Result<()> {
        let epoch = self.controller.epoch();
        self.controller.stop()?;
        self.ticker = None;
        self.published = 0;

        info!(target: "runtime::worker", %epoch, "Battle stopped");
        self.event_bus
            .publish(Event::Outcome(OutcomeEvent::Stopped { epoch }));
        Ok(())
    }

    fn handle_poll(&mut self, epoch: Epoch) {
        match self.controller.poll(epoch) {
            PollOutcome::Stale => {
                trace!(target: "runtime::worker", %epoch, "Ignoring stale poll");
            }
            PollOutcome::Continue { .. } => self.publish_new_entries(epoch),
            PollOutcome::Resolved(result) => {
                if self.ticker.as_ref().is_some_and(|t| t.epoch() == epoch) {
                    self.ticker = None;
                }
                self.publish_new_entries(epoch);

                info!(
                    target: "runtime::worker",
                    %epoch,
                    winner = %result.winner,
                    reason = %result.reason,
                    resolved_at = %result.resolved_at,
                    harder = result.is_harder_rematch,
                    "Battle resolved"
                );
                self.event_bus
                    .publish(Event::Outcome(OutcomeEvent::Resolved { epoch, result }));
            }
        }
    }

    /// Publishes log entries appended since the last publication, if any.
    fn publish_new_entries(&mut self, epoch: Epoch) {
        let Some(session) = self.controller.session() else {
            return;
        };
        let entries = session.log().since(self.published);
        if entries.is_empty() {
            return;
        }

        let event = ProgressEvent::Advanced {
            epoch,
            now: session.now(),
            player_score: session.ledger().player(),
            opponent_score: session.ledger().opponent(),
            entries: entries.to_vec(),
        };
        self.published = session.log().len();
        self.event_bus.publish(Event::Progress(event));
    }
}
