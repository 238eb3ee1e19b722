use clap::Subcommand;
use cipherrank_core::{Config, Dashboard, DisplayEntry, RankTier};

/// Stand-in for a withheld score.
const MASKED_SCORE: &str = "████ pts";

#[derive(Subcommand)]
pub enum BoardAction {
    /// Render the leaderboard through the reveal gate
    Show {
        /// Show names and scores regardless of the configured gate
        #[arg(long)]
        revealed: bool,
        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: BoardAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        BoardAction::Show { revealed, json } => {
            let config = Config::load()?;
            let mut dashboard = Dashboard::from_config(&config)?;
            if revealed && !dashboard.is_revealed() {
                dashboard.toggle_reveal();
            }
            let entries = dashboard.entries();
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in &entries {
                    println!("{}", row(entry));
                }
            }
        }
    }
    Ok(())
}

fn row(entry: &DisplayEntry) -> String {
    let tier = match entry.tier {
        RankTier::Champion => "*",
        RankTier::Podium => "+",
        RankTier::Contender => " ",
    };
    let score = match entry.score {
        Some(score) => format!("{} pts", format_score(score)),
        None => MASKED_SCORE.to_string(),
    };
    let change = entry.change.map(|c| c.to_string()).unwrap_or_default();
    let lock = if entry.encrypted { "[encrypted]" } else { "" };
    format!(
        "#{:<3}{tier} {:<16}{:>12}  {:>3}  {lock}",
        entry.rank, entry.name, score, change
    )
    .trim_end()
    .to_string()
}

/// Group digits in threes: `15420` -> `"15,420"`.
fn format_score(score: u64) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
