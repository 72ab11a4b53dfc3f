//! Follow-up messages shown after the user answers a reminder.

use tracing::{error, info};

use crate::config::ReminderConfig;
use crate::dialog::{DialogGateway, ACKNOWLEDGE_LABEL, DIALOG_TITLE};
use crate::error::{Cancelled, CycleError, DialogError};
use crate::random::{choose, RandomSource};

/// What happened to a follow-up message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    Shown,
    /// Presentation failed; the failure was logged and swallowed.
    Failed,
}

/// The two outcome handlers. Holds nothing but a view of the configuration.
#[derive(Debug, Clone, Copy)]
pub struct Notifier<'a> {
    config: &'a ReminderConfig,
}

impl<'a> Notifier<'a> {
    pub fn new(config: &'a ReminderConfig) -> Self {
        Self { config }
    }

    /// Off-task branch: a random motivational message, dismiss-only, no timeout.
    ///
    /// # Errors
    ///
    /// Only [`Cancelled`]; every other failure is logged and reported as
    /// [`NotifyOutcome::Failed`].
    pub fn present_motivation<G, R>(
        &self,
        gateway: &mut G,
        random: &mut R,
    ) -> Result<NotifyOutcome, Cancelled>
    where
        G: DialogGateway + ?Sized,
        R: RandomSource + ?Sized,
    {
        let result = choose(random, self.config.pools().motivational_messages())
            .ok_or(CycleError::EmptyPool("motivational_messages"))
            .and_then(|message| {
                info!("Showing motivational message: {message}");
                gateway
                    .alert(message, DIALOG_TITLE, Some(ACKNOWLEDGE_LABEL), None)
                    .map_err(CycleError::from)
            });
        settle("motivational message", result)
    }

    /// On-task branch: the success message, dismissed after `working_timeout`.
    ///
    /// # Errors
    ///
    /// Only [`Cancelled`]; see [`Notifier::present_motivation`].
    pub fn present_success<G>(&self, gateway: &mut G) -> Result<NotifyOutcome, Cancelled>
    where
        G: DialogGateway + ?Sized,
    {
        let timeout = self.config.settings().working_timeout();
        info!(
            "Showing success message (auto-dismiss after {}s)",
            timeout.as_secs()
        );
        let result = gateway
            .alert(
                self.config.pools().success_message(),
                DIALOG_TITLE,
                None,
                Some(timeout),
            )
            .map_err(CycleError::from);
        settle("success message", result)
    }
}

fn settle(what: &str, result: Result<(), CycleError>) -> Result<NotifyOutcome, Cancelled> {
    match result {
        Ok(()) => Ok(NotifyOutcome::Shown),
        Err(CycleError::Dialog(DialogError::Cancelled)) => Err(Cancelled),
        Err(e) => {
            error!("Error showing {what}: {e}");
            Ok(NotifyOutcome::Failed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MessagePools, Settings};
    use crate::dialog::{DialogCall, ScriptedGateway};
    use crate::random::FixedSequence;
    use std::time::Duration;

    fn config() -> ReminderConfig {
        ReminderConfig::new(
            Settings::new(0, 5, 5, 10).unwrap(),
            MessagePools::new(
                vec!["Q".into()],
                vec!["M1".into(), "M2".into()],
                "S",
            )
            .unwrap(),
        )
    }

    #[test]
    fn motivation_is_dismiss_only_without_timeout() {
        let cfg = config();
        let mut gateway = ScriptedGateway::new();
        let mut random = FixedSequence::new([1]);

        let outcome = Notifier::new(&cfg)
            .present_motivation(&mut gateway, &mut random)
            .unwrap();

        assert_eq!(outcome, NotifyOutcome::Shown);
        assert_eq!(
            gateway.calls(),
            [DialogCall::Alert {
                text: "M2".into(),
                title: "Future Reminder".into(),
                button: Some("OK".into()),
                timeout: None,
            }]
        );
    }

    #[test]
    fn success_uses_working_timeout() {
        let cfg = config();
        let mut gateway = ScriptedGateway::new();

        let outcome = Notifier::new(&cfg).present_success(&mut gateway).unwrap();

        assert_eq!(outcome, NotifyOutcome::Shown);
        assert_eq!(
            gateway.calls(),
            [DialogCall::Alert {
                text: "S".into(),
                title: "Future Reminder".into(),
                button: None,
                timeout: Some(Duration::from_secs(10)),
            }]
        );
    }

    #[test]
    fn alert_failure_is_swallowed() {
        let cfg = config();
        let mut gateway =
            ScriptedGateway::new().fail_next_alert(DialogError::Failed("no display".into()));

        let outcome = Notifier::new(&cfg).present_success(&mut gateway).unwrap();
        assert_eq!(outcome, NotifyOutcome::Failed);
    }

    #[test]
    fn cancellation_propagates() {
        let cfg = config();
        let mut gateway = ScriptedGateway::new().fail_next_alert(DialogError::Cancelled);
        let mut random = FixedSequence::new([0]);

        let result = Notifier::new(&cfg).present_motivation(&mut gateway, &mut random);
        assert_eq!(result, Err(Cancelled));
    }

    #[test]
    fn presenting_twice_leaves_config_untouched() {
        let cfg = config();
        let before = cfg.clone();
        let mut gateway = ScriptedGateway::new();
        let mut random = FixedSequence::new([0, 1]);
        let notifier = Notifier::new(&cfg);

        for _ in 0..2 {
            notifier.present_motivation(&mut gateway, &mut random).unwrap();
            notifier.present_success(&mut gateway).unwrap();
        }

        assert_eq!(cfg, before);
        assert_eq!(gateway.alerts().len(), 4);
    }
}
