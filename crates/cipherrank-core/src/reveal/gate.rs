use serde::{Deserialize, Serialize};

/// What happens to the gate when the cycle clock reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPolicy {
    /// Reveal only on explicit toggle. The clock and the gate are independent.
    #[default]
    Manual,
    /// Open the gate on the tick that completes the cycle.
    OnCycleEnd,
}

/// Masked/revealed switch for leaderboard rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RevealGate {
    revealed: bool,
}

impl RevealGate {
    pub fn new(revealed: bool) -> Self {
        Self { revealed }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Flip the gate and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.revealed = !self.revealed;
        self.revealed
    }

    /// Force the gate open. Returns `true` if this call changed it.
    pub fn reveal(&mut self) -> bool {
        let changed = !self.revealed;
        self.revealed = true;
        changed
    }
}
