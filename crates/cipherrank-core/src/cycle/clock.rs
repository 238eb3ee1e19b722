//! Cycle clock implementation.
//!
//! The clock is a plain state machine. It owns no timer - the caller (the
//! [`CycleDriver`](crate::driver::CycleDriver) or a test) invokes `tick()`
//! once per period.
//!
//! ## State Transitions
//!
//! ```text
//! Counting -> Complete (terminal, ticks are no-ops)
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::duration::{CycleDuration, SECS_PER_DAY};
use crate::events::Event;

/// Length of a full competition cycle: three days.
pub const DEFAULT_CYCLE_SECS: u64 = 3 * SECS_PER_DAY;

/// Countdown of the current competition cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleClock {
    remaining: CycleDuration,
    total_duration_secs: u64,
}

impl CycleClock {
    pub fn new(remaining: CycleDuration, total_duration_secs: u64) -> Self {
        Self {
            remaining,
            total_duration_secs,
        }
    }

    /// A fresh cycle with the full duration remaining.
    pub fn full(total_duration_secs: u64) -> Self {
        Self::new(
            CycleDuration::from_secs(total_duration_secs),
            total_duration_secs,
        )
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn remaining(&self) -> CycleDuration {
        self.remaining
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining.total_secs()
    }

    pub fn total_duration_secs(&self) -> u64 {
        self.total_duration_secs
    }

    pub fn is_complete(&self) -> bool {
        self.remaining.is_zero()
    }

    /// 0.0 .. 1.0 fraction of the cycle elapsed.
    ///
    /// A zero-length cycle counts as complete. Values are clamped so a
    /// remaining time larger than the configured total reads as 0.
    pub fn progress_fraction(&self) -> f64 {
        let total = self.total_duration_secs;
        if total == 0 {
            return 1.0;
        }
        let elapsed = total as f64 - self.remaining_secs() as f64;
        (elapsed / total as f64).clamp(0.0, 1.0)
    }

    /// 0.0 .. 100.0 progress, for progress bars.
    pub fn progress_pct(&self) -> f64 {
        self.progress_fraction() * 100.0
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Advance by one second. Returns `Some(Event::CycleCompleted)` only on
    /// the tick that reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.remaining.decrement() || !self.remaining.is_zero() {
            return None;
        }
        tracing::debug!(
            total_duration_secs = self.total_duration_secs,
            "cycle reached zero"
        );
        Some(Event::CycleCompleted {
            total_duration_secs: self.total_duration_secs,
            at: Utc::now(),
        })
    }

    /// Begin a new cycle. Never called by `tick()`.
    pub fn restart(&mut self) {
        self.remaining = CycleDuration::from_secs(self.total_duration_secs);
    }
}

impl Default for CycleClock {
    fn default() -> Self {
        Self::new(
            CycleDuration {
                days: 2,
                hours: 14,
                minutes: 32,
                seconds: 45,
            },
            DEFAULT_CYCLE_SECS,
        )
    }
}
