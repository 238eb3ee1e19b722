//! Integration tests for the countdown and reveal workflow.

use cipherrank_core::cycle::SECS_PER_DAY;
use cipherrank_core::reveal::MASKED_NAME;
use cipherrank_core::{
    present, Config, CycleClock, CycleDuration, Dashboard, Event, Leaderboard, RevealGate,
    RevealPolicy,
};

#[test]
fn test_countdown_runs_to_zero_and_stays_there() {
    let start = CycleDuration::new(0, 1, 0, 3).unwrap();
    let mut clock = CycleClock::new(start, 3 * SECS_PER_DAY);

    let mut completions = 0;
    let mut previous = clock.remaining_secs();
    for _ in 0..start.total_secs() {
        if clock.tick().is_some() {
            completions += 1;
        }
        let remaining = clock.remaining();
        assert!(remaining.is_normalized(), "not normalized: {remaining:?}");
        assert_eq!(clock.remaining_secs(), previous - 1);
        previous = clock.remaining_secs();
    }

    assert_eq!(completions, 1);
    assert!(clock.is_complete());
    assert_eq!(clock.progress_fraction(), 1.0);

    for _ in 0..10 {
        assert!(clock.tick().is_none());
    }
    assert_eq!(clock.remaining(), CycleDuration::ZERO);
}

#[test]
fn test_progress_increases_monotonically() {
    let mut clock = CycleClock::full(90);
    let mut last = clock.progress_fraction();
    assert_eq!(last, 0.0);
    while !clock.is_complete() {
        clock.tick();
        let now = clock.progress_fraction();
        assert!(now > last);
        last = now;
    }
    assert_eq!(last, 1.0);
}

#[test]
fn test_masked_board_hides_every_identity() {
    let board = Leaderboard::sample();
    for entry in board.entries() {
        let masked = present(entry, false);
        assert_eq!(masked.name, MASKED_NAME);
        assert_eq!(masked.score, None);
        assert_eq!(masked.rank, entry.rank);

        let shown = present(entry, true);
        assert_eq!(shown.name, entry.player_name);
        assert_eq!(shown.score, Some(entry.score));
    }
}

#[test]
fn test_gate_toggle_is_an_involution() {
    let mut gate = RevealGate::default();
    let before = gate.is_revealed();
    gate.toggle();
    gate.toggle();
    assert_eq!(gate.is_revealed(), before);
}

#[test]
fn test_configured_board_with_auto_reveal() {
    let mut config = Config::default();
    config.set("cycle.start_days", "0").unwrap();
    config.set("cycle.start_hours", "0").unwrap();
    config.set("cycle.start_minutes", "0").unwrap();
    config.set("cycle.start_seconds", "2").unwrap();
    config.set("reveal.policy", "on_cycle_end").unwrap();

    let mut board = Dashboard::from_config(&config).unwrap();
    assert!(board.entries().iter().all(|e| e.encrypted));

    assert!(board.tick().is_empty());
    let events = board.tick();
    assert!(matches!(events.as_slice(), [
        Event::CycleCompleted { .. },
        Event::RankingsRevealed { .. }
    ]));
    assert!(board.entries().iter().all(|e| !e.encrypted));
}

#[test]
fn test_manual_board_stays_masked_after_cycle_end() {
    let board_clock = CycleClock::new(CycleDuration::from_secs(1), 259_200);
    let mut board = Dashboard::new(
        board_clock,
        RevealGate::default(),
        Leaderboard::sample(),
        RevealPolicy::Manual,
    );
    board.tick();
    assert!(board.clock().is_complete());
    assert!(!board.is_revealed());

    board.toggle_reveal();
    assert!(board.is_revealed());
}

#[test]
fn test_snapshot_serializes_for_presentation() {
    let board = Dashboard::default();
    let json = serde_json::to_value(board.snapshot()).unwrap();
    assert_eq!(json["type"], "state_snapshot");
    assert_eq!(json["remaining"]["days"], 2);
    assert_eq!(json["remaining"]["hours"], 14);
    assert_eq!(json["policy"], "manual");
    assert_eq!(json["entries"].as_array().unwrap().len(), 8);
    assert_eq!(json["entries"][0]["tier"], "champion");
    assert_eq!(json["entries"][0]["change"]["direction"], "up");
}
