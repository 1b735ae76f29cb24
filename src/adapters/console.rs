use crate::core::Notifier;
use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Alerts on stderr, confirmations read from stdin.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier {
    assume_yes: bool,
}

impl ConsoleNotifier {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        eprintln!("⚠️  {}", message);
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        let mut stderr = std::io::stderr();
        let _ = write!(stderr, "{} [y/N] ", message);
        let _ = stderr.flush();

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Keeps every alert and confirmation prompt, answering prompts with a
/// fixed value. Used by tests and scripted runs.
#[derive(Debug)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
    confirmations: Mutex<Vec<String>>,
    answer: AtomicBool,
}

impl RecordingNotifier {
    pub fn answering(answer: bool) -> Self {
        Self {
            alerts: Mutex::new(Vec::new()),
            confirmations: Mutex::new(Vec::new()),
            answer: AtomicBool::new(answer),
        }
    }

    pub fn set_answer(&self, answer: bool) {
        self.answer.store(answer, Ordering::SeqCst);
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().map(|a| a.clone()).unwrap_or_default()
    }

    pub fn confirmations(&self) -> Vec<String> {
        self.confirmations
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::answering(true)
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(message.to_string());
        }
    }

    fn confirm(&self, message: &str) -> bool {
        if let Ok(mut confirmations) = self.confirmations.lock() {
            confirmations.push(message.to_string());
        }
        self.answer.load(Ordering::SeqCst)
    }
}
