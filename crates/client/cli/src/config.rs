//! CLI configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use battle_core::{BattleSpeed, FightContext};

/// Configuration for a headless battle run.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Player platter, see [`crate::roster::parse_roster`].
    pub roster: String,
    pub speed: BattleSpeed,
    pub fight: FightContext,
    /// Play a harder rematch after the first battle resolves.
    pub harder_rematch: bool,
    /// Content directory; builtin content when unset.
    pub data_dir: Option<PathBuf>,
    /// Overrides the content's poll interval.
    pub poll_interval_ms: Option<u64>,
    /// Wall-clock limit per battle before it is stopped.
    pub timeout: Duration,
    /// Include the full battle log in the report.
    pub print_log: bool,
    /// Directory for the log file; stderr only when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            roster: "honey:1,strawberry,sugar,pepper".to_owned(),
            speed: BattleSpeed::Normal,
            fight: FightContext::default(),
            harder_rematch: false,
            data_dir: None,
            poll_interval_ms: None,
            timeout: Duration::from_secs(120),
            print_log: false,
            log_dir: None,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_ROSTER` - Player platter, e.g. `honey:2,strawberry,,whisk`
    /// - `BATTLE_SPEED` - `half`, `normal` or `double` (default: normal)
    /// - `BATTLE_FIGHT` - Fight number within the loop (default: 1)
    /// - `BATTLE_GAME_PLUS` - Completed game-plus loops (default: 0)
    /// - `BATTLE_HARDER_REMATCH` - Play a harder rematch afterwards (default: false)
    /// - `BATTLE_DATA_DIR` - Content directory (default: builtin content)
    /// - `BATTLE_POLL_INTERVAL_MS` - Poll interval override
    /// - `BATTLE_TIMEOUT_SECS` - Per-battle timeout (default: 120)
    /// - `BATTLE_PRINT_LOG` - Include the battle log in the output (default: false)
    /// - `BATTLE_LOG_DIR` - Also write logs to `battle.log` in this directory
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(roster) = env::var("BATTLE_ROSTER") {
            config.roster = roster;
        }

        if let Some(speed) = read_env::<BattleSpeed>("BATTLE_SPEED") {
            config.speed = speed;
        }

        if let Some(fight) = read_env::<u32>("BATTLE_FIGHT") {
            config.fight.fight_number = fight.max(1);
        }
        if let Some(game_plus) = read_env::<u32>("BATTLE_GAME_PLUS") {
            config.fight.game_plus = game_plus;
        }

        if let Some(enable) = read_env::<bool>("BATTLE_HARDER_REMATCH") {
            config.harder_rematch = enable;
        }

        config.data_dir = env::var("BATTLE_DATA_DIR").ok().map(PathBuf::from);
        config.poll_interval_ms = read_env::<u64>("BATTLE_POLL_INTERVAL_MS").map(|ms| ms.max(1));

        if let Some(secs) = read_env::<u64>("BATTLE_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(secs.max(1));
        }

        if let Some(enable) = read_env::<bool>("BATTLE_PRINT_LOG") {
            config.print_log = enable;
        }

        config.log_dir = env::var("BATTLE_LOG_DIR").ok().map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
