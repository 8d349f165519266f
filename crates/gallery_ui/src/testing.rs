//! Shared fixtures for component tests.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::{
    dispatcher::{Command, Component, UiContext},
    events::UiEvent,
    host::{FormSubmission, Host, MemorySessionStore, SessionStore},
    page::Page,
    timers::ManualTimers,
};

pub struct Harness<C: Component> {
    pub page: Page,
    pub host: RecordingHost,
    pub timers: ManualTimers,
    pub outbox: Vec<Command>,
    pub component: C,
}

impl<C: Component> Harness<C> {
    pub fn new(page: Page, component: C) -> Self {
        Self {
            page,
            host: RecordingHost::new(),
            timers: ManualTimers::new(),
            outbox: Vec::new(),
            component,
        }
    }

    pub fn send(&mut self, event: UiEvent) {
        let mut cx = UiContext::new(
            &mut self.page,
            &mut self.host,
            &mut self.timers,
            &mut self.outbox,
        );
        self.component.handle(&event, &mut cx);
    }

    /// Advances the virtual clock and delivers every timer that came due.
    /// Returns how many fired.
    pub fn advance(&mut self, by: Duration) -> usize {
        let fired = self.timers.advance(by);
        let count = fired.len();
        for id in fired {
            self.send(UiEvent::TimerFired(id));
        }
        count
    }

    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.outbox)
    }
}

/// Host that records every effect, with scripted prompt answers.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub prompt_answers: Vec<Option<String>>,
    pub prompts: Vec<(String, String)>,
    pub alerts: Vec<String>,
    pub submitted: Vec<FormSubmission>,
    pub scroll: i64,
    pub scroll_calls: Vec<i64>,
    pub store: MemorySessionStore,
    pub fixed_now: Option<DateTime<Utc>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering(answer: Option<&str>) -> Self {
        Self {
            prompt_answers: vec![answer.map(str::to_string)],
            ..Self::default()
        }
    }
}

impl Host for RecordingHost {
    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        self.prompts.push((message.to_string(), default.to_string()));
        if self.prompt_answers.is_empty() {
            None
        } else {
            self.prompt_answers.remove(0)
        }
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn submit_form(&mut self, form: FormSubmission) {
        self.submitted.push(form);
    }

    fn scroll_y(&self) -> i64 {
        self.scroll
    }

    fn scroll_to(&mut self, y: i64) {
        self.scroll = y;
        self.scroll_calls.push(y);
    }

    fn session(&mut self) -> &mut dyn SessionStore {
        &mut self.store
    }

    fn now(&self) -> DateTime<Utc> {
        self.fixed_now.unwrap_or_else(Utc::now)
    }
}
