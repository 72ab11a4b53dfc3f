//! The dialog seam.
//!
//! Rendering is not this crate's business: a [`DialogGateway`] shows a
//! blocking modal and hands back what the user picked. The CLI ships a
//! terminal implementation; [`ScriptedGateway`] replays canned answers.

mod scripted;

pub use scripted::{DialogCall, ScriptedGateway};

use std::time::Duration;

use crate::error::DialogError;

/// Title shown on every reminder dialog.
pub const DIALOG_TITLE: &str = "Future Reminder";

/// Button meaning "the user is off-task".
pub const WASTING_LABEL: &str = "Wasting";

/// Button meaning "the user is on-task".
pub const WORKING_LABEL: &str = "Working";

/// Buttons of the question dialog, in display order.
pub const QUESTION_BUTTONS: [&str; 2] = [WASTING_LABEL, WORKING_LABEL];

/// Dismiss button of the motivational alert.
pub const ACKNOWLEDGE_LABEL: &str = "OK";

/// Blocking modal dialogs.
///
/// Both calls suspend the caller until the dialog is gone. Implementations
/// that can observe shutdown return [`DialogError::Cancelled`] when it fires.
pub trait DialogGateway {
    /// Show `text` with one button per entry of `buttons`.
    ///
    /// Returns the chosen label, or `None` if the dialog was closed without
    /// picking a button.
    fn confirm(
        &mut self,
        text: &str,
        title: &str,
        buttons: &[&str],
    ) -> Result<Option<String>, DialogError>;

    /// Show an informational message.
    ///
    /// Returns when the user dismisses it or `timeout` elapses. `None` waits
    /// indefinitely.
    fn alert(
        &mut self,
        text: &str,
        title: &str,
        button: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<(), DialogError>;
}

impl<G: DialogGateway + ?Sized> DialogGateway for &mut G {
    fn confirm(
        &mut self,
        text: &str,
        title: &str,
        buttons: &[&str],
    ) -> Result<Option<String>, DialogError> {
        (**self).confirm(text, title, buttons)
    }

    fn alert(
        &mut self,
        text: &str,
        title: &str,
        button: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<(), DialogError> {
        (**self).alert(text, title, button, timeout)
    }
}

/// Body of the question dialog for `question`.
pub fn question_text(question: &str) -> String {
    format!("{question}\n\n{}Are you working or wasting time?", " ".repeat(10))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_text_appends_prompt() {
        assert_eq!(
            question_text("Q"),
            "Q\n\n          Are you working or wasting time?"
        );
    }

    #[test]
    fn buttons_are_off_task_then_on_task() {
        assert_eq!(QUESTION_BUTTONS, ["Wasting", "Working"]);
    }
}
