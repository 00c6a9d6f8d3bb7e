use std::time::Duration;

use battle_content::BattleContent;
use battle_core::{
    BattleError, BattlePhase, BattleSpeed, ControllerAction, ControllerError, ErrorSeverity,
    FightContext, LogKind, Roster, Side, Tick,
};
use battle_runtime::{
    Event, OutcomeEvent, ProgressEvent, Runtime, RuntimeConfig, RuntimeError, Topic,
};
use tokio::sync::broadcast::error::TryRecvError;

fn strong_roster() -> Roster {
    Roster::from_slots([
        (Some("honey".into()), 2),
        (Some("strawberry".into()), 1),
        (Some("sugar".into()), 0),
        (Some("pepper".into()), 1),
    ])
    .unwrap()
}

async fn runtime() -> Runtime {
    Runtime::builder()
        .config(RuntimeConfig {
            event_buffer_size: 4096,
            ..RuntimeConfig::default()
        })
        .content(BattleContent::builtin().unwrap())
        .build()
        .await
        .unwrap()
}

#[tokio::test(start_paused = true)]
async fn play_resolves_with_a_player_win() {
    let runtime = runtime().await;
    let handle = runtime.handle();

    let result = handle.play(strong_roster()).await.unwrap();
    assert_eq!(result.winner, Side::Player);
    assert!(!result.is_harder_rematch);

    let progress = handle.query_progress().await.unwrap();
    assert_eq!(progress.phase, BattlePhase::Resolved);
    assert_eq!(progress.result, Some(result));
    assert_eq!(progress.player_score, 100.0);
    assert_eq!(
        progress
            .log
            .iter()
            .filter(|e| e.kind() == LogKind::End)
            .count(),
        1
    );

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn progress_events_reconstruct_the_log() {
    let runtime = runtime().await;
    let handle = runtime.handle();
    let mut progress_rx = handle.subscribe(Topic::Progress);

    handle.play(strong_roster()).await.unwrap();

    let mut started = 0;
    let mut streamed = Vec::new();
    loop {
        match progress_rx.try_recv() {
            Ok(Event::Progress(ProgressEvent::Started { .. })) => started += 1,
            Ok(Event::Progress(ProgressEvent::Advanced { entries, .. })) => {
                streamed.extend(entries)
            }
            Ok(other) => panic!("unexpected event on progress topic: {other:?}"),
            Err(TryRecvError::Empty) => break,
            Err(err) => panic!("progress stream failed: {err}"),
        }
    }

    assert_eq!(started, 1);
    assert_eq!(streamed, handle.query_progress().await.unwrap().log);
}

#[tokio::test(start_paused = true)]
async fn stop_cancels_polling_and_discards_the_battle() {
    let runtime = runtime().await;
    let handle = runtime.handle();
    let mut outcomes = handle.subscribe(Topic::Outcome);

    // an empty platter against the first opponent takes far longer than this
    let stale = handle
        .start_battle(Roster::empty(4).unwrap())
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(550)).await;

    let running = handle.query_progress().await.unwrap();
    assert_eq!(running.phase, BattlePhase::Running);
    assert!(running.now > Tick::ZERO);

    handle.stop().await.unwrap();
    assert_eq!(
        outcomes.recv().await.unwrap(),
        Event::Outcome(OutcomeEvent::Stopped { epoch: stale })
    );

    tokio::time::sleep(Duration::from_secs(5)).await;
    let idle = handle.query_progress().await.unwrap();
    assert_eq!(idle.phase, BattlePhase::Idle);
    assert!(idle.result.is_none());
    assert!(idle.log.is_empty());

    let fresh = handle
        .start_battle(Roster::empty(4).unwrap())
        .await
        .unwrap();
    assert_ne!(fresh, stale);
    assert_eq!(handle.query_progress().await.unwrap().now, Tick::ZERO);
}

#[tokio::test(start_paused = true)]
async fn speed_is_locked_while_running() {
    let runtime = runtime().await;
    let handle = runtime.handle();

    handle.set_speed(BattleSpeed::Double).await.unwrap();
    handle
        .start_battle(Roster::empty(2).unwrap())
        .await
        .unwrap();

    let err = handle.set_speed(BattleSpeed::Half).await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Controller(ControllerError::InvalidTransition {
            action: ControllerAction::ChangeSpeed,
            phase: BattlePhase::Running,
        })
    ));
    assert!(err.severity().is_recoverable());
    assert_eq!(
        handle.query_progress().await.unwrap().speed,
        BattleSpeed::Double
    );

    assert!(handle.set_fight(FightContext::new(2, 0)).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn harder_rematch_and_reset() {
    let runtime = runtime().await;
    let handle = runtime.handle();
    let mut outcomes = handle.subscribe(Topic::Outcome);

    handle.set_fight(FightContext::new(3, 1)).await.unwrap();
    let first = handle.play(strong_roster()).await.unwrap();
    assert!(!first.is_harder_rematch);

    handle.rematch(true).await.unwrap();
    let second = handle.play(strong_roster()).await.unwrap();
    assert!(second.is_harder_rematch);

    handle.reset().await.unwrap();
    assert!(handle.reset().await.is_err());
    let progress = handle.query_progress().await.unwrap();
    assert!(!progress.fight.harder_rematch);
    assert_eq!(progress.fight.fight_number, 3);

    let mut events = Vec::new();
    while let Ok(Event::Outcome(event)) = outcomes.try_recv() {
        events.push(event);
    }
    assert_eq!(events.len(), 4);
    assert!(matches!(events[0], OutcomeEvent::Resolved { .. }));
    assert_eq!(events[1], OutcomeEvent::RematchQueued { harder: true });
    assert!(matches!(events[2], OutcomeEvent::Resolved { .. }));
    assert_eq!(events[3], OutcomeEvent::Reset);
}

#[tokio::test(start_paused = true)]
async fn identical_runs_produce_identical_logs() {
    let mut runs = Vec::new();
    for _ in 0..2 {
        let runtime = runtime().await;
        let handle = runtime.handle();
        handle.set_fight(FightContext::new(5, 0)).await.unwrap();
        handle.set_speed(BattleSpeed::Half).await.unwrap();
        let result = handle.play(strong_roster()).await.unwrap();
        runs.push((result, handle.query_progress().await.unwrap().log));
    }

    assert_eq!(runs[0], runs[1]);
}

#[tokio::test]
async fn build_requires_content() {
    let err = Runtime::builder().build().await.err().unwrap();
    assert!(matches!(err, RuntimeError::MissingOracles));
}

#[tokio::test]
async fn build_rejects_zero_poll_interval() {
    let mut content = BattleContent::builtin().unwrap();
    content.config.poll_interval_ms = 0;

    let err = Runtime::builder().content(content).build().await.err().unwrap();
    assert!(matches!(err, RuntimeError::InvalidPollInterval));
    assert_eq!(err.severity(), ErrorSeverity::Validation);
}

#[tokio::test(start_paused = true)]
async fn outcome_events_serialize_as_json() {
    let runtime = runtime().await;
    let handle = runtime.handle();
    let mut outcomes = handle.subscribe(Topic::Outcome);

    let result = handle.play(strong_roster()).await.unwrap();
    let event = outcomes.recv().await.unwrap();

    let json = serde_json::to_string(&event).unwrap();
    let decoded: Event = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, event);
    assert!(matches!(
        decoded,
        Event::Outcome(OutcomeEvent::Resolved { result: r, .. }) if r == result
    ));
}
