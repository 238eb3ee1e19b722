//! Integration tests for the tokio cycle driver.

use std::time::Duration;

use cipherrank_core::{
    CycleClock, CycleDriver, CycleDuration, Dashboard, Event, Leaderboard, RevealGate,
    RevealPolicy,
};

fn board(secs: u64, policy: RevealPolicy) -> Dashboard {
    Dashboard::new(
        CycleClock::new(CycleDuration::from_secs(secs), 3),
        RevealGate::default(),
        Leaderboard::sample(),
        policy,
    )
}

fn revealed(event: &Event) -> bool {
    match event {
        Event::StateSnapshot { revealed, .. } => *revealed,
        other => panic!("Expected StateSnapshot, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_driver_reveals_on_cycle_end() {
    let mut handle = CycleDriver::spawn(board(3, RevealPolicy::OnCycleEnd), Duration::from_secs(1))
        .unwrap();

    tokio::time::sleep(Duration::from_millis(3500)).await;

    assert!(matches!(
        handle.next_event().await,
        Some(Event::CycleCompleted { total_duration_secs: 3, .. })
    ));
    assert!(matches!(
        handle.next_event().await,
        Some(Event::RankingsRevealed { .. })
    ));
    assert!(revealed(&handle.snapshot()));
}

#[tokio::test(start_paused = true)]
async fn test_driver_applies_toggle_commands() {
    let mut handle = CycleDriver::spawn(board(100, RevealPolicy::Manual), Duration::from_secs(1))
        .unwrap();
    let mut snapshots = handle.subscribe();

    handle.toggle_reveal().unwrap();
    assert!(matches!(
        handle.next_event().await,
        Some(Event::RevealToggled { revealed: true, .. })
    ));
    snapshots.changed().await.unwrap();
    assert!(revealed(&snapshots.borrow_and_update()));

    handle.toggle_reveal().unwrap();
    assert!(matches!(
        handle.next_event().await,
        Some(Event::RevealToggled { revealed: false, .. })
    ));

    let dashboard = handle.shutdown().await.unwrap();
    assert!(!dashboard.is_revealed());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_cancels_timer() {
    let handle = CycleDriver::spawn(board(100, RevealPolicy::Manual), Duration::from_secs(1))
        .unwrap();
    let mut snapshots = handle.subscribe();

    tokio::time::sleep(Duration::from_millis(1500)).await;
    snapshots.borrow_and_update();
    drop(handle);

    // The aborted task drops its snapshot sender.
    assert!(snapshots.changed().await.is_err());
    match &*snapshots.borrow() {
        Event::StateSnapshot { remaining_secs, .. } => assert_eq!(*remaining_secs, 99),
        other => panic!("Expected StateSnapshot, got {other:?}"),
    };
}
