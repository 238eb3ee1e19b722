//! # Cipherrank Core Library
//!
//! Core logic behind a confidential leaderboard: rankings stay masked while a
//! competition cycle counts down, and are shown once the reveal gate opens.
//! The CLI binary and any UI are thin layers over the same library.
//!
//! ## Architecture
//!
//! - **Cycle Clock**: an owned countdown state machine; the caller invokes
//!   `tick()` once per period
//! - **Reveal Gate**: manual masked/revealed toggle plus the pure `present`
//!   transform applied to every leaderboard row
//! - **Dashboard**: binds clock, gate and leaderboard under a [`RevealPolicy`]
//! - **Driver**: tokio task that ticks a dashboard and publishes snapshots
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`CycleClock`]: countdown and progress
//! - [`RevealGate`]: masked/revealed switch
//! - [`Dashboard`]: event application and snapshots
//! - [`CycleDriver`]: recurring timer with scoped teardown
//! - [`Config`]: application configuration management

pub mod cycle;
pub mod dashboard;
pub mod driver;
pub mod error;
pub mod events;
pub mod leaderboard;
pub mod reveal;
pub mod storage;

pub use cycle::{CycleClock, CycleDuration};
pub use dashboard::Dashboard;
pub use driver::{CycleDriver, DriverCommand, DriverHandle, EVENT_BUFFER};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use leaderboard::{ChangeBadge, DisplayEntry, Leaderboard, LeaderboardEntry, RankTier};
pub use reveal::{present, RevealGate, RevealPolicy};
pub use storage::Config;
