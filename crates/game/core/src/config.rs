/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Battle time that elapses between two scheduler polls, in milliseconds.
    ///
    /// Independent of individual effect intervals.
    pub poll_interval_ms: u64,

    /// Speed selected for new controllers until the player changes it.
    pub default_speed: BattleSpeed,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Width of the roster grid used for adjacency.
    pub const GRID_WIDTH: usize = 4;
    /// Maximum number of unlocked roster slots per side.
    pub const MAX_SLOTS: usize = 16;

    // ===== score bounds =====
    pub const SCORE_MIN: f64 = 0.0;
    pub const SCORE_MAX: f64 = 100.0;
    pub const STARTING_SCORE: f64 = 50.0;

    // ===== synergy bounds =====
    pub const SYNERGY_MIN: f64 = 1.0;
    pub const SYNERGY_MAX: f64 = 3.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

    pub fn new() -> Self {
        Self {
            poll_interval_ms: Self::DEFAULT_POLL_INTERVAL_MS,
            default_speed: BattleSpeed::Normal,
        }
    }

    /// Zero is coerced to 1ms so the clock always moves forward.
    pub fn with_poll_interval(poll_interval_ms: u64) -> Self {
        Self {
            poll_interval_ms: poll_interval_ms.max(1),
            ..Self::new()
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Player-selected playback speed.
///
/// Speed scales every effect's interval and duration; the poll cadence stays
/// fixed. It is chosen before a battle and frozen while the battle runs.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BattleSpeed {
    /// 0.5×
    Half,
    /// 1.0×
    #[default]
    Normal,
    /// 2.0×
    Double,
}

impl BattleSpeed {
    pub const ALL: [BattleSpeed; 3] = [Self::Half, Self::Normal, Self::Double];

    /// Speed factor as a percentage (100 = 1.0×).
    pub const fn percent(self) -> u64 {
        match self {
            Self::Half => 50,
            Self::Normal => 100,
            Self::Double => 200,
        }
    }

    /// Scales a battle-time span by this speed. Never returns zero.
    pub const fn scale_ms(self, ms: u64) -> u64 {
        let scaled = ms.saturating_mul(100) / self.percent();
        if scaled == 0 { 1 } else { scaled }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_scales_intervals_inversely() {
        assert_eq!(BattleSpeed::Normal.scale_ms(1000), 1000);
        assert_eq!(BattleSpeed::Double.scale_ms(1000), 500);
        assert_eq!(BattleSpeed::Half.scale_ms(1000), 2000);
        assert_eq!(BattleSpeed::Double.scale_ms(1), 1);
    }

    #[test]
    fn speed_parses_from_snake_case() {
        assert_eq!("double".parse::<BattleSpeed>().unwrap(), BattleSpeed::Double);
        assert_eq!("HALF".parse::<BattleSpeed>().unwrap(), BattleSpeed::Half);
    }

    #[test]
    fn zero_poll_interval_is_coerced() {
        assert_eq!(BattleConfig::with_poll_interval(0).poll_interval_ms, 1);
    }
}
