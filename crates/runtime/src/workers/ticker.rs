//! Poll ticker for a single running battle.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use battle_core::Epoch;

use super::battle::Command;

/// Cancellable periodic poll source.
///
/// Holds only a weak sender so a forgotten ticker never keeps the worker
/// alive. Dropping the ticker aborts its task.
pub(crate) struct Ticker {
    epoch: Epoch,
    task: JoinHandle<()>,
}

impl Ticker {
    pub(crate) fn spawn(commands: mpsc::WeakSender<Command>, epoch: Epoch, period: Duration) -> Self {
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let Some(tx) = commands.upgrade() else {
                    break;
                };
                if tx.send(Command::Poll { epoch }).await.is_err() {
                    break;
                }
            }

            tracing::trace!(target: "runtime::ticker", %epoch, "ticker finished");
        });

        Self { epoch, task }
    }

    pub(crate) fn epoch(&self) -> Epoch {
        self.epoch
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
