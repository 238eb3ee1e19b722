use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cycle::CycleDuration;
use crate::leaderboard::DisplayEntry;
use crate::reveal::RevealPolicy;

/// Every state change in the board produces an Event.
/// The presentation layer renders snapshots; the driver forwards the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The clock reached zero on this tick.
    CycleCompleted {
        total_duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// Explicit user toggle of the reveal gate.
    RevealToggled {
        revealed: bool,
        at: DateTime<Utc>,
    },
    /// The gate was opened by [`RevealPolicy::OnCycleEnd`].
    RankingsRevealed {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        remaining: CycleDuration,
        remaining_secs: u64,
        total_duration_secs: u64,
        progress_pct: f64,
        completed: bool,
        revealed: bool,
        policy: RevealPolicy,
        entries: Vec<DisplayEntry>,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::CycleCompleted { at, .. }
            | Event::RevealToggled { at, .. }
            | Event::RankingsRevealed { at }
            | Event::StateSnapshot { at, .. } => *at,
        }
    }
}
