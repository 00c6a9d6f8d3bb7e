//! Headless battle simulator.
//!
//! Loads content, plays one battle (plus an optional harder rematch) through
//! the runtime at live speed, and prints a JSON report to stdout.
mod config;
mod roster;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use battle_content::{BattleContent, ContentFactory};
use battle_core::{BattleLogEntry, BattlePhase, BattleResult, LogKind, Roster, Tick};
use battle_runtime::{Runtime, RuntimeConfig, RuntimeHandle};
use config::CliConfig;

/// One battle as printed to stdout.
#[derive(Debug, Serialize)]
struct BattleReport {
    result: Option<BattleResult>,
    timed_out: bool,
    battle_time: Tick,
    player_score: f64,
    opponent_score: f64,
    activations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    log: Option<Vec<BattleLogEntry>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = setup_logging(&config)?;

    let roster = roster::parse_roster(&config.roster).context("invalid BATTLE_ROSTER")?;
    let mut content = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir).load_all()?,
        None => BattleContent::builtin()?,
    };
    if let Some(ms) = config.poll_interval_ms {
        content.config.poll_interval_ms = ms;
    }

    let runtime = Runtime::builder()
        .config(RuntimeConfig::default())
        .content(content)
        .build()
        .await?;
    let handle = runtime.handle();

    handle.set_speed(config.speed).await?;
    handle.set_fight(config.fight).await?;

    let mut reports = vec![run_battle(&handle, &config, roster.clone()).await?];
    if config.harder_rematch && reports[0].result.is_some() {
        handle.rematch(true).await?;
        reports.push(run_battle(&handle, &config, roster).await?);
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);

    drop(handle);
    runtime.shutdown().await?;
    Ok(())
}

async fn run_battle(
    handle: &RuntimeHandle,
    config: &CliConfig,
    roster: Roster,
) -> Result<BattleReport> {
    let timed_out = match tokio::time::timeout(config.timeout, handle.play(roster)).await {
        Ok(result) => {
            result?;
            false
        }
        Err(_) => true,
    };

    let progress = handle.query_progress().await?;
    if timed_out && progress.phase == BattlePhase::Running {
        tracing::warn!(
            timeout_secs = config.timeout.as_secs(),
            now = %progress.now,
            "Battle did not resolve in time, stopping"
        );
        handle.stop().await?;
    }

    Ok(BattleReport {
        result: progress.result,
        timed_out,
        battle_time: progress.now,
        player_score: progress.player_score,
        opponent_score: progress.opponent_score,
        activations: progress
            .log
            .iter()
            .filter(|entry| entry.kind() == LogKind::Activation)
            .count(),
        log: config.print_log.then_some(progress.log),
    })
}

/// Setup logging to stderr and, when `BATTLE_LOG_DIR` is set, to a file.
///
/// The returned guard must be held until exit so buffered file output is flushed.
fn setup_logging(config: &CliConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let file_appender = tracing_appender::rolling::never(dir, "battle.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = &config.log_dir {
        tracing::info!("Log file: {}/battle.log", dir.display());
    }

    Ok(guard)
}
