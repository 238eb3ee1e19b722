//! Leaderboard rows and their displayable form.
//!
//! Entries are immutable sample data; a real deployment would feed them from
//! an external source. [`Leaderboard`] only guarantees the ordering
//! invariants of the displayed list.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub player_name: String,
    pub score: u64,
    /// Rank movement since the previous cycle. Negative means dropped.
    #[serde(default)]
    pub change: i64,
}

impl LeaderboardEntry {
    pub fn new(rank: u32, player_name: impl Into<String>, score: u64, change: i64) -> Self {
        Self {
            rank,
            player_name: player_name.into(),
            score,
            change,
        }
    }
}

/// Styling bucket for a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankTier {
    /// Rank 1
    Champion,
    /// Ranks 2 and 3
    Podium,
    Contender,
}

impl RankTier {
    pub fn for_rank(rank: u32) -> Self {
        match rank {
            1 => RankTier::Champion,
            2 | 3 => RankTier::Podium,
            _ => RankTier::Contender,
        }
    }
}

/// Movement badge. Zero change has no badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "direction", content = "by", rename_all = "lowercase")]
pub enum ChangeBadge {
    Up(u64),
    Down(u64),
}

impl ChangeBadge {
    pub fn from_change(change: i64) -> Option<Self> {
        match change {
            0 => None,
            c if c > 0 => Some(ChangeBadge::Up(c.unsigned_abs())),
            c => Some(ChangeBadge::Down(c.unsigned_abs())),
        }
    }
}

impl fmt::Display for ChangeBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeBadge::Up(n) => write!(f, "+{n}"),
            ChangeBadge::Down(n) => write!(f, "-{n}"),
        }
    }
}

/// A row as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayEntry {
    pub rank: u32,
    pub tier: RankTier,
    pub name: String,
    /// `None` while masked.
    pub score: Option<u64>,
    pub change: Option<ChangeBadge>,
    pub encrypted: bool,
}

/// Ordered, rank-unique list of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// # Errors
    ///
    /// Returns an error if a rank is zero, or ranks are not strictly ascending.
    pub fn new(entries: Vec<LeaderboardEntry>) -> Result<Self, ValidationError> {
        let mut previous = 0;
        for entry in &entries {
            if entry.rank == 0 {
                return Err(ValidationError::InvalidRank(entry.rank));
            }
            if entry.rank <= previous {
                return Err(ValidationError::RankOrder {
                    previous,
                    rank: entry.rank,
                });
            }
            previous = entry.rank;
        }
        Ok(Self { entries })
    }

    /// The eight rows shown on the demo dashboard.
    pub fn sample() -> Self {
        Self {
            entries: vec![
                LeaderboardEntry::new(1, "CryptoKing", 15420, 2),
                LeaderboardEntry::new(2, "ShadowTrader", 14890, -1),
                LeaderboardEntry::new(3, "NeonNinja", 14201, 1),
                LeaderboardEntry::new(4, "QuantumPlayer", 13888, 0),
                LeaderboardEntry::new(5, "CyberWolf", 13654, 3),
                LeaderboardEntry::new(6, "DataMiner", 13420, -2),
                LeaderboardEntry::new(7, "BlockChaser", 13199, 1),
                LeaderboardEntry::new(8, "CodeBreaker", 12980, -1),
            ],
        }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
