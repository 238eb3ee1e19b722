use std::time::Duration;

use clap::Subcommand;
use cipherrank_core::{Config, CycleDriver, Dashboard, Event, RevealPolicy};

#[derive(Subcommand)]
pub enum CycleAction {
    /// Print the configured starting state as JSON
    Status,
    /// Apply ticks without waiting and print the resulting state
    Simulate {
        /// Number of one-second ticks to apply
        #[arg(long)]
        ticks: u64,
        /// Open the gate when the cycle ends
        #[arg(long)]
        reveal_on_end: bool,
        /// Print events and snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the countdown live, one status line per tick
    Watch {
        /// Stop after this many ticks
        #[arg(long)]
        limit: Option<u64>,
        /// Open the gate when the cycle ends
        #[arg(long)]
        reveal_on_end: bool,
    },
}

fn load_dashboard(reveal_on_end: bool) -> Result<(Config, Dashboard), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    if reveal_on_end {
        config.reveal.policy = RevealPolicy::OnCycleEnd;
    }
    let dashboard = Dashboard::from_config(&config)?;
    Ok((config, dashboard))
}

pub fn run(action: CycleAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CycleAction::Status => {
            let (_, dashboard) = load_dashboard(false)?;
            println!("{}", serde_json::to_string_pretty(&dashboard.snapshot())?);
        }
        CycleAction::Simulate {
            ticks,
            reveal_on_end,
            json,
        } => {
            let (_, mut dashboard) = load_dashboard(reveal_on_end)?;
            let mut events = Vec::new();
            for _ in 0..ticks {
                events.extend(dashboard.tick());
            }
            let snapshot = dashboard.snapshot();
            if json {
                for event in &events {
                    println!("{}", serde_json::to_string(event)?);
                }
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                for event in &events {
                    println!("{}", describe(event));
                }
                println!("{}", status_line(&snapshot));
            }
        }
        CycleAction::Watch {
            limit,
            reveal_on_end,
        } => {
            let (config, dashboard) = load_dashboard(reveal_on_end)?;
            let period = config.tick_period();
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            runtime.block_on(watch(dashboard, period, limit))?;
        }
    }
    Ok(())
}

async fn watch(
    dashboard: Dashboard,
    period: Duration,
    limit: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let initial = status_line(&dashboard.snapshot());
    if limit == Some(0) {
        println!("{initial}");
        return Ok(());
    }
    let mut handle = CycleDriver::spawn(dashboard, period)?;
    println!("{initial}");
    let mut snapshots = handle.subscribe();
    let mut seen = 0u64;

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                println!("{}", status_line(&snapshot));
                seen += 1;
                let completed = matches!(snapshot, Event::StateSnapshot { completed: true, .. });
                if completed || limit.is_some_and(|l| seen >= l) {
                    break;
                }
            }
            Some(event) = handle.next_event() => {
                println!("{}", describe(&event));
            }
        }
    }

    // Drain anything emitted on the final tick.
    while let Some(event) = handle.try_next_event() {
        println!("{}", describe(&event));
    }
    handle.shutdown().await?;
    Ok(())
}

fn status_line(snapshot: &Event) -> String {
    match snapshot {
        Event::StateSnapshot {
            remaining,
            progress_pct,
            revealed,
            ..
        } => format!(
            "{remaining}  progress {progress_pct:5.1}%  {}",
            if *revealed { "revealed" } else { "encrypted" }
        ),
        other => describe(other),
    }
}

fn describe(event: &Event) -> String {
    match event {
        Event::CycleCompleted { at, .. } => format!("cycle completed at {at}"),
        Event::RevealToggled { revealed, .. } => format!("reveal toggled: {revealed}"),
        Event::RankingsRevealed { at } => format!("rankings revealed at {at}"),
        Event::StateSnapshot { .. } => status_line(event),
    }
}
