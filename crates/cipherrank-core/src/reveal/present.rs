use crate::leaderboard::{ChangeBadge, DisplayEntry, LeaderboardEntry, RankTier};

/// Fixed-width stand-in for a player name.
pub const MASKED_NAME: &str = "████████";

/// Map an entry to its displayable form.
///
/// Masked rows keep rank, tier and the movement badge; the name becomes
/// [`MASKED_NAME`] and the score is withheld. Revealed rows carry name and
/// score verbatim, leaving formatting to the presentation layer.
pub fn present(entry: &LeaderboardEntry, revealed: bool) -> DisplayEntry {
    let (name, score) = if revealed {
        (entry.player_name.clone(), Some(entry.score))
    } else {
        (MASKED_NAME.to_string(), None)
    };
    DisplayEntry {
        rank: entry.rank,
        tier: RankTier::for_rank(entry.rank),
        name,
        score,
        change: ChangeBadge::from_change(entry.change),
        encrypted: !revealed,
    }
}
