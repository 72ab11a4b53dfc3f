use std::collections::VecDeque;
use std::time::Duration;

use super::DialogGateway;
use crate::error::DialogError;

/// A dialog call as seen by a [`ScriptedGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogCall {
    Confirm {
        text: String,
        title: String,
        buttons: Vec<String>,
    },
    Alert {
        text: String,
        title: String,
        button: Option<String>,
        timeout: Option<Duration>,
    },
}

/// In-memory gateway that replays queued answers and records every call.
///
/// When the confirm script runs dry the gateway reports
/// [`DialogError::Cancelled`], which stops a running scheduler. Alerts
/// succeed unless a failure was queued with [`ScriptedGateway::fail_next_alert`].
#[derive(Debug, Default)]
pub struct ScriptedGateway {
    answers: VecDeque<Result<Option<String>, DialogError>>,
    alert_failures: VecDeque<DialogError>,
    calls: Vec<DialogCall>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a button press (or `None` for a dismissed dialog).
    pub fn answer(mut self, choice: Option<&str>) -> Self {
        self.answers.push_back(Ok(choice.map(str::to_string)));
        self
    }

    /// Queue a failing confirm call.
    pub fn fail(mut self, error: DialogError) -> Self {
        self.answers.push_back(Err(error));
        self
    }

    /// Make the next alert call fail.
    pub fn fail_next_alert(mut self, error: DialogError) -> Self {
        self.alert_failures.push_back(error);
        self
    }

    pub fn calls(&self) -> &[DialogCall] {
        &self.calls
    }

    /// Only the alert calls, in order.
    pub fn alerts(&self) -> Vec<&DialogCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call, DialogCall::Alert { .. }))
            .collect()
    }

    pub fn confirm_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DialogCall::Confirm { .. }))
            .count()
    }
}

impl DialogGateway for ScriptedGateway {
    fn confirm(
        &mut self,
        text: &str,
        title: &str,
        buttons: &[&str],
    ) -> Result<Option<String>, DialogError> {
        self.calls.push(DialogCall::Confirm {
            text: text.to_string(),
            title: title.to_string(),
            buttons: buttons.iter().map(|b| b.to_string()).collect(),
        });
        self.answers.pop_front().unwrap_or(Err(DialogError::Cancelled))
    }

    fn alert(
        &mut self,
        text: &str,
        title: &str,
        button: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<(), DialogError> {
        self.calls.push(DialogCall::Alert {
            text: text.to_string(),
            title: title.to_string(),
            button: button.map(str::to_string),
            timeout,
        });
        match self.alert_failures.pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
