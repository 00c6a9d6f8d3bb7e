//! Discrete tick scheduler.
//!
//! A poll at battle time `now` walks every live instance once:
//!
//! 1. expired instances (`now >= expires_at`, after their first activation) are dropped
//! 2. due instances (`now >= next_fire_at`) fire once per interval elapsed
//!    since their previous fire time, each firing at its own scheduled tick
//! 3. everything else is left untouched
//!
//! Catch-up firing keeps speed scaling exact when a scaled interval is shorter
//! than the poll interval. The resulting deltas are summed into a single
//! [`ScoreDelta`] so the ledger sees one atomic update per poll.

use crate::state::{ItemId, Side, Tick};

/// A scheduled, timed application of one item's battle ability.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectInstance {
    pub owner: Side,
    pub slot_index: usize,
    pub item_id: ItemId,
    pub effective_magnitude: f64,
    pub tick_interval_ms: u64,
    pub next_fire_at: Tick,
    pub expires_at: Option<Tick>,
    /// Number of times this instance has fired.
    pub activations: u32,
}

impl EffectInstance {
    pub fn is_due(&self, now: Tick) -> bool {
        now >= self.next_fire_at
    }

    /// An instance past its expiry is dropped, but only once it has fired.
    ///
    /// Every timed effect therefore activates at least once, even when its
    /// duration is shorter than its interval.
    pub fn is_expired(&self, now: Tick) -> bool {
        self.activations > 0 && self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    /// Whether the pending fire at `next_fire_at` is due by `now` and still
    /// inside the instance's lifetime.
    fn can_fire(&self, now: Tick) -> bool {
        self.is_due(now) && !self.is_expired(self.next_fire_at)
    }

    /// Side whose score this instance moves.
    ///
    /// Positive effects feed their owner; negative effects always hit the
    /// other side and never the owner.
    pub fn target(&self) -> Side {
        if self.effective_magnitude < 0.0 {
            self.owner.opponent()
        } else {
            self.owner
        }
    }

    fn fire(&mut self) -> Activation {
        let scheduled_at = self.next_fire_at;
        self.next_fire_at = scheduled_at + self.tick_interval_ms;
        self.activations = self.activations.saturating_add(1);

        Activation {
            owner: self.owner,
            slot_index: self.slot_index,
            item_id: self.item_id.clone(),
            magnitude: self.effective_magnitude,
            target: self.target(),
            scheduled_at,
        }
    }
}

/// Record of a single instance firing during a poll.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Activation {
    pub owner: Side,
    pub slot_index: usize,
    pub item_id: ItemId,
    /// Signed effective magnitude of the instance.
    pub magnitude: f64,
    pub target: Side,
    /// The instance's `next_fire_at` before it fired.
    pub scheduled_at: Tick,
}

/// Net score movement accumulated over one poll.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreDelta {
    pub player: f64,
    pub opponent: f64,
}

impl ScoreDelta {
    pub fn get(&self, side: Side) -> f64 {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }

    pub fn add(&mut self, side: Side, amount: f64) {
        match side {
            Side::Player => self.player += amount,
            Side::Opponent => self.opponent += amount,
        }
    }

    /// Applies an activation with the sign convention: `+m` to the owner,
    /// `-|m|` to the owner's opponent. `target` already encodes the side.
    pub fn record(&mut self, activation: &Activation) {
        self.add(activation.target, activation.magnitude);
    }

    pub fn is_zero(&self) -> bool {
        self.player == 0.0 && self.opponent == 0.0
    }
}

/// Outcome of a single poll.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PollReport {
    pub now: Tick,
    pub activations: Vec<Activation>,
    pub expired: usize,
    pub delta: ScoreDelta,
}

/// Owns the live effect instances of one battle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scheduler {
    instances: Vec<EffectInstance>,
}

impl Scheduler {
    pub fn new(instances: Vec<EffectInstance>) -> Self {
        Self { instances }
    }

    pub fn instances(&self) -> &[EffectInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Live instance count for `side`.
    pub fn count_for(&self, side: Side) -> usize {
        self.instances.iter().filter(|i| i.owner == side).count()
    }

    /// Fires every due instance at `now` and drops expired ones.
    ///
    /// An instance that fell more than one interval behind fires once per
    /// missed interval, stopping at its expiry. Activations are reported in
    /// instance order (player slots, then opponent slots), each instance's
    /// firings in scheduled order, which keeps logs stable across runs.
    pub fn poll(&mut self, now: Tick) -> PollReport {
        let before = self.instances.len();
        self.instances.retain(|instance| !instance.is_expired(now));
        let expired = before - self.instances.len();

        let mut delta = ScoreDelta::default();
        let mut activations = Vec::new();
        for instance in &mut self.instances {
            while instance.can_fire(now) {
                activations.push(instance.fire());
            }
        }

        for activation in &activations {
            delta.record(activation);
        }

        PollReport {
            now,
            activations,
            expired,
            delta,
        }
    }
}
