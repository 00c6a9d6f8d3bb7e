//! Roster → scheduled effect instances.
//!
//! Runs once per battle attempt (rematches included) against frozen roster
//! snapshots:
//!
//! ```text
//! effective_magnitude = base × upgrade(level) × synergy(slot, own roster) × difficulty(side)
//! next_fire_at        = battle_start + scaled interval
//! expires_at          = battle_start + scaled duration   (timed effects only)
//! ```

use crate::config::BattleSpeed;
use crate::env::BattleEnv;
use crate::opponent::OpponentSetup;
use crate::scheduler::EffectInstance;
use crate::state::{Roster, Side, Tick};
use crate::synergy::SynergyResolver;

/// Magnitude multiplier for a slot's upgrade level.
pub const fn upgrade_multiplier(level: u8) -> f64 {
    match level {
        0 => 1.0,
        1 => 1.5,
        2 => 2.0,
        _ => 3.0,
    }
}

/// Difficulty applied to a side. The player always fights at 1.0.
pub const fn difficulty_multiplier(side: Side, opponent_difficulty: f64) -> f64 {
    match side {
        Side::Player => 1.0,
        Side::Opponent => opponent_difficulty,
    }
}

/// Timing parameters frozen at battle start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    pub speed: BattleSpeed,
    pub battle_start: Tick,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            speed: BattleSpeed::Normal,
            battle_start: Tick::ZERO,
        }
    }
}

/// Compiles one side's roster. Inert and empty slots produce nothing.
pub fn compile_side(
    side: Side,
    roster: &Roster,
    difficulty: f64,
    env: &BattleEnv<'_>,
    options: CompileOptions,
) -> Vec<EffectInstance> {
    let synergy = SynergyResolver::new(roster, env.catalog(), env.synergy());
    let difficulty = difficulty_multiplier(side, difficulty);

    roster
        .occupied()
        .filter_map(|slot| {
            let item = slot.item.as_ref()?;
            let descriptor = env.catalog().descriptor(item)?;

            let magnitude = descriptor.magnitude_per_tick
                * upgrade_multiplier(slot.upgrade_level)
                * synergy.multiplier(slot.index)
                * difficulty;
            let interval = options.speed.scale_ms(descriptor.tick_interval_ms);
            let expires_at = descriptor
                .duration_ms
                .map(|duration| options.battle_start + options.speed.scale_ms(duration));

            Some(EffectInstance {
                owner: side,
                slot_index: slot.index,
                item_id: item.clone(),
                effective_magnitude: magnitude,
                tick_interval_ms: interval,
                next_fire_at: options.battle_start + interval,
                expires_at,
                activations: 0,
            })
        })
        .collect()
}

/// Compiles both sides: player instances first, then opponent, each in slot order.
pub fn compile_battle(
    player: &Roster,
    opponent: &OpponentSetup,
    env: &BattleEnv<'_>,
    options: CompileOptions,
) -> Vec<EffectInstance> {
    let mut instances = compile_side(Side::Player, player, 1.0, env, options);
    instances.extend(compile_side(
        Side::Opponent,
        &opponent.roster,
        opponent.difficulty,
        env,
        options,
    ));
    instances
}
