//! Terminal implementation of the dialog seam.
//!
//! Stdin is read on a background thread and handed over line by line, so
//! a dialog wait can time out and observe shutdown instead of blocking in
//! `read_line`.

use std::io::{self, BufRead, Stdout, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use nudger_core::{DialogError, DialogGateway, Shutdown};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

pub struct TerminalGateway<W = Stdout> {
    lines: Receiver<String>,
    out: W,
    shutdown: Shutdown,
}

impl TerminalGateway<Stdout> {
    /// Start the stdin reader thread and attach to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader thread cannot be spawned.
    pub fn spawn(shutdown: Shutdown) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || {
                for line in io::stdin().lock().lines() {
                    let Ok(line) = line else { break };
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            })?;
        Ok(Self::new(rx, io::stdout(), shutdown))
    }
}

impl<W: Write> TerminalGateway<W> {
    pub fn new(lines: Receiver<String>, out: W, shutdown: Shutdown) -> Self {
        Self {
            lines,
            out,
            shutdown,
        }
    }

    /// Throw away anything typed while no dialog was up.
    fn drain(&self) {
        while self.lines.try_recv().is_ok() {}
    }

    /// Wait for one line of input. `Ok(None)` means the deadline passed.
    fn next_line(&self, deadline: Option<Instant>) -> Result<Option<String>, DialogError> {
        loop {
            if self.shutdown.is_triggered() {
                return Err(DialogError::Cancelled);
            }
            let wait = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Ok(None);
                    }
                    (deadline - now).min(POLL_INTERVAL)
                }
                None => POLL_INTERVAL,
            };
            match self.lines.recv_timeout(wait) {
                Ok(line) => return Ok(Some(line)),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(DialogError::Unavailable("standard input closed".into()));
                }
            }
        }
    }

    fn render(&mut self, text: &str, title: &str, footer: &str) -> Result<(), DialogError> {
        let emit = |out: &mut W| -> io::Result<()> {
            writeln!(out)?;
            writeln!(out, "\x07=== {title} ===")?;
            writeln!(out, "{text}")?;
            writeln!(out)?;
            write!(out, "{footer}")?;
            out.flush()
        };
        emit(&mut self.out).map_err(|e| DialogError::Failed(e.to_string()))
    }
}

impl<W: Write> DialogGateway for TerminalGateway<W> {
    fn confirm(
        &mut self,
        text: &str,
        title: &str,
        buttons: &[&str],
    ) -> Result<Option<String>, DialogError> {
        self.drain();
        let options: Vec<String> = buttons
            .iter()
            .enumerate()
            .map(|(i, label)| format!("[{}] {label}", i + 1))
            .collect();
        self.render(text, title, &format!("  {}\n> ", options.join("   ")))?;

        let line = self.next_line(None)?;
        Ok(line.and_then(|line| parse_choice(&line, buttons)))
    }

    fn alert(
        &mut self,
        text: &str,
        title: &str,
        button: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<(), DialogError> {
        self.drain();
        let mut footer = match button {
            Some(label) => format!("Press Enter to dismiss [{label}]"),
            None => "Press Enter to dismiss".to_string(),
        };
        if let Some(timeout) = timeout {
            footer.push_str(&format!(" (closes in {}s)", timeout.as_secs()));
        }
        footer.push('\n');
        self.render(text, title, &footer)?;

        let deadline = timeout.map(|t| Instant::now() + t);
        self.next_line(deadline)?;
        Ok(())
    }
}

/// Map typed input to a button label: a 1-based index or the label itself.
fn parse_choice(input: &str, buttons: &[&str]) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(index) = input.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| buttons.get(i))
            .map(|label| label.to_string());
    }
    buttons
        .iter()
        .find(|label| label.eq_ignore_ascii_case(input))
        .map(|label| label.to_string())
}
