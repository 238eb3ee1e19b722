//! Recurring tick driver for a [`Dashboard`].
//!
//! The spawned task is the only owner of the board. The presentation layer
//! talks to it through a [`DriverHandle`]: commands go in over an mpsc
//! channel, snapshots come out over a `watch` channel and discrete events
//! over a bounded mpsc channel. Events that do not fit in the buffer are
//! dropped; the snapshot still reflects them.
//!
//! Dropping the handle aborts the task, which deregisters the interval timer.
//! [`DriverHandle::shutdown`] stops it gracefully and hands the board back.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use crate::dashboard::Dashboard;
use crate::error::{ConfigError, CoreError, Result};
use crate::events::Event;

/// Undrained events kept before newer ones are dropped.
pub const EVENT_BUFFER: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCommand {
    ToggleReveal,
}

pub struct CycleDriver;

impl CycleDriver {
    /// Spawn the tick loop on the current tokio runtime.
    ///
    /// The first tick fires one `period` after spawning.
    ///
    /// # Errors
    ///
    /// Returns an error if `period` is zero.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn(dashboard: Dashboard, period: Duration) -> Result<DriverHandle> {
        if period.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "cycle.tick_period_ms".into(),
                message: "must be greater than zero".into(),
            }
            .into());
        }

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let (snapshot_tx, snapshot_rx) = watch::channel(dashboard.snapshot());

        tracing::info!(period_ms = period.as_millis() as u64, "cycle driver started");
        let task = tokio::spawn(run(dashboard, period, command_rx, snapshot_tx, event_tx));

        Ok(DriverHandle {
            commands: Some(command_tx),
            snapshots: snapshot_rx,
            events: event_rx,
            task: Some(task),
        })
    }
}

async fn run(
    mut dashboard: Dashboard,
    period: Duration,
    mut commands: mpsc::UnboundedReceiver<DriverCommand>,
    snapshots: watch::Sender<Event>,
    events: mpsc::Sender<Event>,
) -> Dashboard {
    let mut interval = interval_at(Instant::now() + period, period);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                for event in dashboard.tick() {
                    publish(&events, event);
                }
            }
            command = commands.recv() => match command {
                Some(DriverCommand::ToggleReveal) => {
                    publish(&events, dashboard.toggle_reveal());
                }
                None => break,
            },
        }
        snapshots.send_replace(dashboard.snapshot());
    }
    tracing::info!("cycle driver stopped");
    dashboard
}

fn publish(events: &mpsc::Sender<Event>, event: Event) {
    match events.try_send(event) {
        Ok(()) => {}
        Err(mpsc::error::TrySendError::Full(event)) => {
            tracing::warn!(?event, "event buffer full, dropping event");
        }
        // Nobody listening is fine; the snapshot still carries the state.
        Err(mpsc::error::TrySendError::Closed(_)) => {}
    }
}

/// Owner-side handle of a running [`CycleDriver`].
pub struct DriverHandle {
    commands: Option<mpsc::UnboundedSender<DriverCommand>>,
    snapshots: watch::Receiver<Event>,
    events: mpsc::Receiver<Event>,
    task: Option<JoinHandle<Dashboard>>,
}

impl DriverHandle {
    pub fn toggle_reveal(&self) -> Result<()> {
        self.send(DriverCommand::ToggleReveal)
    }

    fn send(&self, command: DriverCommand) -> Result<()> {
        self.commands
            .as_ref()
            .and_then(|tx| tx.send(command).ok())
            .ok_or_else(|| CoreError::Custom("cycle driver is not running".into()))
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Event {
        self.snapshots.borrow().clone()
    }

    /// A receiver that wakes on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Event> {
        self.snapshots.clone()
    }

    /// Next discrete event (completion, toggle, reveal). `None` once stopped.
    ///
    /// At most [`EVENT_BUFFER`] undrained events are kept; later ones are
    /// dropped until the caller catches up.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.events.recv().await
    }

    /// An already-emitted event, without waiting.
    pub fn try_next_event(&mut self) -> Option<Event> {
        self.events.try_recv().ok()
    }

    /// Stop ticking and return the board in its final state.
    pub async fn shutdown(mut self) -> Result<Dashboard> {
        self.commands.take();
        let task = self
            .task
            .take()
            .ok_or_else(|| CoreError::Custom("cycle driver already stopped".into()))?;
        task.await
            .map_err(|e| CoreError::Custom(format!("cycle driver task failed: {e}")))
    }
}

impl Drop for DriverHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            tracing::debug!("driver handle dropped, aborting tick loop");
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::{CycleClock, CycleDuration};
    use crate::leaderboard::Leaderboard;
    use crate::reveal::{RevealGate, RevealPolicy};

    fn board(secs: u64) -> Dashboard {
        Dashboard::new(
            CycleClock::new(CycleDuration::from_secs(secs), 60),
            RevealGate::default(),
            Leaderboard::sample(),
            RevealPolicy::Manual,
        )
    }

    fn remaining(event: &Event) -> u64 {
        match event {
            Event::StateSnapshot { remaining_secs, .. } => *remaining_secs,
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn rejects_zero_period() {
        assert!(CycleDriver::spawn(board(5), Duration::ZERO).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_one_period() {
        let handle = CycleDriver::spawn(board(5), Duration::from_secs(1)).unwrap();
        assert_eq!(remaining(&handle.snapshot()), 5);
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(remaining(&handle.snapshot()), 5);
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(remaining(&handle.snapshot()), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn undrained_events_are_bounded() {
        let mut handle = CycleDriver::spawn(board(100), Duration::from_secs(100)).unwrap();
        for _ in 0..EVENT_BUFFER + 36 {
            handle.toggle_reveal().unwrap();
        }
        tokio::time::sleep(Duration::from_millis(10)).await;

        let mut buffered = 0;
        while let Some(event) = handle.try_next_event() {
            assert!(matches!(event, Event::RevealToggled { .. }));
            buffered += 1;
        }
        assert_eq!(buffered, EVENT_BUFFER);

        // Every toggle was applied even though its event was dropped.
        match handle.snapshot() {
            Event::StateSnapshot { revealed, .. } => assert!(!revealed),
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
        assert_eq!(remaining(&handle.snapshot()), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_returns_final_board() {
        let handle = CycleDriver::spawn(board(10), Duration::from_secs(1)).unwrap();
        tokio::time::sleep(Duration::from_millis(3500)).await;
        let dashboard = handle.shutdown().await.unwrap();
        assert_eq!(dashboard.clock().remaining_secs(), 7);
    }
}
