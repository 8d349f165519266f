use std::io::{self, BufRead, Write};

use gallery_ui::{FormSubmission, Host, MemorySessionStore, SessionStore};
use tracing::warn;

/// Terminal stand-in for the browser. Prompts read a line from stdin unless
/// an answer was supplied up front; form submissions are queued for the
/// caller to send, since the host cannot block on the network.
#[derive(Debug, Default)]
pub struct TerminalHost {
    preset_answer: Option<String>,
    pub alerts: Vec<String>,
    pub submissions: Vec<FormSubmission>,
    scroll: i64,
    store: MemorySessionStore,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answer(answer: Option<String>) -> Self {
        Self {
            preset_answer: answer,
            ..Self::default()
        }
    }

    pub fn take_submissions(&mut self) -> Vec<FormSubmission> {
        std::mem::take(&mut self.submissions)
    }
}

impl Host for TerminalHost {
    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        if let Some(answer) = self.preset_answer.take() {
            return Some(answer);
        }
        print!("{message} [{default}] ");
        if io::stdout().flush().is_err() {
            return None;
        }
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            // EOF behaves like pressing cancel.
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(error) => {
                warn!(%error, "failed to read prompt answer");
                None
            }
        }
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
        self.alerts.push(message.to_string());
    }

    fn submit_form(&mut self, form: FormSubmission) {
        self.submissions.push(form);
    }

    fn scroll_y(&self) -> i64 {
        self.scroll
    }

    fn scroll_to(&mut self, y: i64) {
        self.scroll = y;
    }

    fn session(&mut self) -> &mut dyn SessionStore {
        &mut self.store
    }
}
