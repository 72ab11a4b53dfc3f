//! # Nudger Core Library
//!
//! Business logic for Nudger, a productivity nudger that interrupts the user
//! at randomized intervals to ask whether they are working or wasting time.
//! The CLI binary is a thin layer over this library: it supplies a dialog
//! implementation, a log sink and a shutdown signal.
//!
//! ## Architecture
//!
//! - **Config**: validated settings and message pools, loaded from JSON or TOML
//! - **Scheduler**: the sequential reminder loop and its response state machine
//! - **Notifier**: follow-up messages for the on-task / off-task branches
//! - **Dialog**: the trait every dialog backend implements
//!
//! ## Key Components
//!
//! - [`ReminderScheduler`]: reminder loop state machine
//! - [`ReminderConfig`]: immutable configuration
//! - [`DialogGateway`]: blocking modal dialog seam
//! - [`RandomSource`]: injectable randomness
//! - [`Shutdown`]: cooperative cancellation token

pub mod config;
pub mod dialog;
pub mod error;
pub mod notifier;
pub mod random;
pub mod scheduler;
pub mod shutdown;

pub use config::{ConfigFormat, ConfigSummary, MessagePools, ReminderConfig, Settings};
pub use dialog::{DialogGateway, ScriptedGateway};
pub use error::{Cancelled, ConfigError, CoreError, CycleError, DialogError};
pub use notifier::{Notifier, NotifyOutcome};
pub use random::{FixedSequence, PcgRandom, RandomSource};
pub use scheduler::{
    CycleReport, ReminderEvent, ReminderScheduler, ReminderState, ResponseBranch, RunSummary,
};
pub use shutdown::{Shutdown, Sleeper};
