//! The board: one cycle clock, one reveal gate, one leaderboard.
//!
//! All inbound events (ticks, toggles) are applied here and all snapshots for
//! the presentation layer are produced here. Under [`RevealPolicy::Manual`]
//! the clock never touches the gate.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::cycle::CycleClock;
use crate::error::Result;
use crate::events::Event;
use crate::leaderboard::{DisplayEntry, Leaderboard};
use crate::reveal::{present, RevealGate, RevealPolicy};
use crate::storage::Config;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    clock: CycleClock,
    gate: RevealGate,
    leaderboard: Leaderboard,
    policy: RevealPolicy,
}

impl Dashboard {
    pub fn new(
        clock: CycleClock,
        gate: RevealGate,
        leaderboard: Leaderboard,
        policy: RevealPolicy,
    ) -> Self {
        Self {
            clock,
            gate,
            leaderboard,
            policy,
        }
    }

    /// Board with the configured clock and gate over the sample leaderboard.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            config.clock()?,
            config.gate(),
            Leaderboard::sample(),
            config.reveal.policy,
        ))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn clock(&self) -> &CycleClock {
        &self.clock
    }

    pub fn gate(&self) -> &RevealGate {
        &self.gate
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn policy(&self) -> RevealPolicy {
        self.policy
    }

    pub fn is_revealed(&self) -> bool {
        self.gate.is_revealed()
    }

    /// Every row passed through the gate.
    pub fn entries(&self) -> Vec<DisplayEntry> {
        let revealed = self.gate.is_revealed();
        self.leaderboard
            .entries()
            .iter()
            .map(|entry| present(entry, revealed))
            .collect()
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            remaining: self.clock.remaining(),
            remaining_secs: self.clock.remaining_secs(),
            total_duration_secs: self.clock.total_duration_secs(),
            progress_pct: self.clock.progress_pct(),
            completed: self.clock.is_complete(),
            revealed: self.gate.is_revealed(),
            policy: self.policy,
            entries: self.entries(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Advance the clock by one tick.
    ///
    /// Emits `CycleCompleted` on the tick that reaches zero and, under
    /// `OnCycleEnd`, `RankingsRevealed` if the gate was still masked.
    pub fn tick(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        let Some(completed) = self.clock.tick() else {
            return events;
        };
        events.push(completed);

        if self.policy == RevealPolicy::OnCycleEnd && self.gate.reveal() {
            tracing::info!("cycle ended, rankings revealed");
            events.push(Event::RankingsRevealed { at: Utc::now() });
        }
        events
    }

    pub fn toggle_reveal(&mut self) -> Event {
        let revealed = self.gate.toggle();
        tracing::debug!(revealed, "reveal gate toggled");
        Event::RevealToggled {
            revealed,
            at: Utc::now(),
        }
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(
            CycleClock::default(),
            RevealGate::default(),
            Leaderboard::sample(),
            RevealPolicy::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::CycleDuration;

    fn board(secs: u64, policy: RevealPolicy) -> Dashboard {
        Dashboard::new(
            CycleClock::new(CycleDuration::from_secs(secs), 10),
            RevealGate::default(),
            Leaderboard::sample(),
            policy,
        )
    }

    #[test]
    fn manual_policy_never_reveals_on_completion() {
        let mut b = board(1, RevealPolicy::Manual);
        let events = b.tick();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::CycleCompleted { .. }));
        assert!(!b.is_revealed());
        assert!(b.entries().iter().all(|e| e.encrypted));
    }

    #[test]
    fn on_cycle_end_reveals_exactly_once() {
        let mut b = board(2, RevealPolicy::OnCycleEnd);
        assert!(b.tick().is_empty());
        assert!(!b.is_revealed());

        let events = b.tick();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], Event::RankingsRevealed { .. }));
        assert!(b.is_revealed());

        assert!(b.tick().is_empty());
    }

    #[test]
    fn on_cycle_end_is_quiet_if_already_revealed() {
        let mut b = board(1, RevealPolicy::OnCycleEnd);
        b.toggle_reveal();
        let events = b.tick();
        assert_eq!(events.len(), 1);
        assert!(b.is_revealed());
    }

    #[test]
    fn toggle_allowed_regardless_of_clock() {
        let mut b = board(0, RevealPolicy::OnCycleEnd);
        assert!(b.clock().is_complete());
        assert_eq!(
            match b.toggle_reveal() {
                Event::RevealToggled { revealed, .. } => revealed,
                other => panic!("unexpected {other:?}"),
            },
            true
        );
        b.toggle_reveal();
        assert!(!b.is_revealed());
    }

    #[test]
    fn snapshot_reflects_state() {
        let b = Dashboard::default();
        match b.snapshot() {
            Event::StateSnapshot {
                remaining_secs,
                total_duration_secs,
                completed,
                revealed,
                entries,
                ..
            } => {
                assert_eq!(remaining_secs, 225_165);
                assert_eq!(total_duration_secs, 259_200);
                assert!(!completed);
                assert!(!revealed);
                assert_eq!(entries.len(), 8);
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }
}
