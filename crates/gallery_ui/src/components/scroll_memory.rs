use tracing::debug;

use crate::{
    dispatcher::{Component, UiContext},
    events::{EventKind, UiEvent},
    format::parse_leading_int,
};

pub const SCROLL_KEY: &str = "scrollY";

/// Carries the scroll offset across a submit-triggered reload, once.
#[derive(Default)]
pub struct ScrollMemory;

impl ScrollMemory {
    pub fn new() -> Self {
        Self
    }
}

impl Component for ScrollMemory {
    fn name(&self) -> &'static str {
        "scroll_memory"
    }

    fn interests(&self) -> &'static [EventKind] {
        &[EventKind::FormSubmit, EventKind::PageLoaded]
    }

    fn handle(&mut self, event: &UiEvent, cx: &mut UiContext<'_>) {
        match event {
            UiEvent::FormSubmit { .. } => {
                let y = cx.host.scroll_y();
                cx.host.session().set(SCROLL_KEY, y.to_string());
                debug!(y, "saved scroll offset");
            }
            UiEvent::PageLoaded => {
                let Some(raw) = cx.host.session().get(SCROLL_KEY) else {
                    return;
                };
                // window.scrollTo(0, NaN) lands at the top.
                let y = parse_leading_int(&raw).unwrap_or(0);
                cx.host.scroll_to(y);
                cx.host.session().remove(SCROLL_KEY);
                debug!(y, "restored scroll offset");
            }
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "tests/scroll_memory_tests.rs"]
mod tests;
