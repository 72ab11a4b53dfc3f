//! Reminder scheduler.
//!
//! A single sequential loop. Sleeps and dialogs are blocking suspension
//! points; shutdown is observed through the [`Sleeper`] and the gateway.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> AwaitingResponse -> (Working | Wasting) -> Idle
//!                          \-> Idle   (no recognised answer, or dialog error)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut scheduler = ReminderScheduler::new(config, gateway, random, shutdown);
//! let summary = scheduler.run(); // returns once shutdown is triggered
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::{minutes, ReminderConfig};
use crate::dialog::{
    question_text, DialogGateway, DIALOG_TITLE, QUESTION_BUTTONS, WASTING_LABEL, WORKING_LABEL,
};
use crate::error::{Cancelled, CycleError, DialogError};
use crate::notifier::{Notifier, NotifyOutcome};
use crate::random::{choose, RandomSource};
use crate::shutdown::Sleeper;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderState {
    /// Sleeping until the next reminder.
    Idle,
    /// Question dialog is up.
    AwaitingResponse,
    /// User said they are on-task; success message is up.
    Working,
    /// User said they are off-task; motivational message is up.
    Wasting,
}

/// Where a question dialog answer leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseBranch {
    Working,
    Wasting,
    /// Anything else: dismissed dialog, unknown label, gateway error.
    NoBranch,
}

impl ResponseBranch {
    /// Route a raw gateway answer. Total over every possible input.
    pub fn classify(choice: Option<&str>) -> Self {
        match choice {
            Some(WASTING_LABEL) => ResponseBranch::Wasting,
            Some(WORKING_LABEL) => ResponseBranch::Working,
            _ => ResponseBranch::NoBranch,
        }
    }
}

/// One reminder as it appears in the log. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderEvent {
    pub question: String,
    pub at: DateTime<Utc>,
    pub branch: ResponseBranch,
    /// What the gateway returned, verbatim.
    pub response: Option<String>,
}

impl ReminderEvent {
    fn new(question: String, response: Option<String>) -> Self {
        Self {
            branch: ResponseBranch::classify(response.as_deref()),
            question,
            at: Utc::now(),
            response,
        }
    }

    fn response_label(&self) -> &str {
        self.response.as_deref().unwrap_or("<none>")
    }
}

/// Result of one pass through `AwaitingResponse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// `None` only if no question could be selected.
    pub event: Option<ReminderEvent>,
    /// Set when a follow-up message was attempted.
    pub notification: Option<NotifyOutcome>,
    /// The failure absorbed during this cycle, if any.
    pub error: Option<CycleError>,
    /// Every state entered during the cycle, in order. Always ends in `Idle`.
    pub states: Vec<ReminderState>,
}

impl CycleReport {
    pub fn branch(&self) -> ResponseBranch {
        self.event
            .as_ref()
            .map(|e| e.branch)
            .unwrap_or(ResponseBranch::NoBranch)
    }
}

/// Totals reported when the loop stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub cycles: u64,
}

/// Owns the reminder loop.
///
/// Configuration is moved in at construction and never changes afterwards.
pub struct ReminderScheduler<G, R, S> {
    config: ReminderConfig,
    gateway: G,
    random: R,
    sleeper: S,
    state: ReminderState,
    trail: Vec<ReminderState>,
    cycles: u64,
}

impl<G, R, S> ReminderScheduler<G, R, S>
where
    G: DialogGateway,
    R: RandomSource,
    S: Sleeper,
{
    pub fn new(config: ReminderConfig, gateway: G, random: R, sleeper: S) -> Self {
        Self {
            config,
            gateway,
            random,
            sleeper,
            state: ReminderState::Idle,
            trail: Vec::new(),
            cycles: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> ReminderState {
        self.state
    }

    /// Number of question dialogs attempted so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn config(&self) -> &ReminderConfig {
        &self.config
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Delay before the very first reminder. Independent of the interval bounds.
    pub fn first_delay(&self) -> Duration {
        self.config.settings().initial_delay()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Draw the next interval in minutes, uniform over `[min, max]`.
    pub fn next_interval(&mut self) -> u32 {
        let (low, high) = self.config.settings().interval_bounds();
        let interval = self.random.range_inclusive(low, high);
        info!("Next reminder in {interval} minutes");
        interval
    }

    /// Run until shutdown: initial delay, then question/branch/sleep cycles.
    pub fn run(&mut self) -> RunSummary {
        let delay = self.config.settings().initial_delay_minutes();
        info!("Starting reminder app with {delay} minute initial delay");

        if self.pause(self.first_delay()).is_ok() {
            loop {
                if self.run_cycle().is_err() {
                    break;
                }
                let interval = self.next_interval();
                if self.pause(minutes(interval)).is_err() {
                    break;
                }
            }
        }

        info!("Application stopped by user after {} reminder(s)", self.cycles);
        RunSummary {
            cycles: self.cycles,
        }
    }

    /// Show one question and dispatch on the answer.
    ///
    /// Dialog and selection failures are logged and reported in the
    /// [`CycleReport`]; the cycle still completes on the no-branch path.
    ///
    /// # Errors
    ///
    /// Only [`Cancelled`], when shutdown interrupts a dialog.
    pub fn run_cycle(&mut self) -> Result<CycleReport, Cancelled> {
        self.cycles += 1;
        self.trail.clear();
        self.transition(ReminderState::AwaitingResponse);

        let Some(question) = choose(&mut self.random, self.config.pools().questions()).cloned()
        else {
            let err = CycleError::EmptyPool("questions");
            error!("Error showing reminder: {err}");
            self.transition(ReminderState::Idle);
            return Ok(CycleReport {
                event: None,
                notification: None,
                error: Some(err),
                states: std::mem::take(&mut self.trail),
            });
        };

        info!("Showing reminder: {question}");
        let (response, error) =
            match self
                .gateway
                .confirm(&question_text(&question), DIALOG_TITLE, &QUESTION_BUTTONS)
            {
                Ok(choice) => (choice, None),
                Err(DialogError::Cancelled) => {
                    self.transition(ReminderState::Idle);
                    return Err(Cancelled);
                }
                Err(e) => {
                    error!("Error showing reminder: {e}");
                    (None, Some(CycleError::from(e)))
                }
            };

        let event = ReminderEvent::new(question, response);
        info!(
            branch = ?event.branch,
            "User response: {} to question: {}",
            event.response_label(),
            event.question
        );

        let outcome = match event.branch {
            ResponseBranch::Wasting => {
                self.transition(ReminderState::Wasting);
                Some(Notifier::new(&self.config).present_motivation(&mut self.gateway, &mut self.random))
            }
            ResponseBranch::Working => {
                self.transition(ReminderState::Working);
                Some(Notifier::new(&self.config).present_success(&mut self.gateway))
            }
            ResponseBranch::NoBranch => None,
        };
        self.transition(ReminderState::Idle);
        let notification = outcome.transpose()?;

        Ok(CycleReport {
            event: Some(event),
            notification,
            error,
            states: std::mem::take(&mut self.trail),
        })
    }

    fn transition(&mut self, next: ReminderState) {
        debug!(from = ?self.state, to = ?next, "State transition");
        self.state = next;
        self.trail.push(next);
    }

    fn pause(&mut self, duration: Duration) -> Result<(), Cancelled> {
        self.sleeper.sleep(duration)
    }
}
