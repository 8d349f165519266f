use shared::{
    domain::WallpaperId,
    protocol::{RenameForm, RENAME_PATH},
};
use tracing::{debug, info, warn};

use super::markup::{RENAME_BUTTON, WALLPAPER_CARD};
use crate::{
    dispatcher::{Component, UiContext},
    events::{EventKind, UiEvent},
    host::FormSubmission,
    page::NodeId,
};

pub const RENAME_PROMPT: &str = "Enter new name for wallpaper:";

/// Prompt-and-post rename for wallpaper cards.
#[derive(Default)]
pub struct RenameAction;

impl RenameAction {
    pub fn new() -> Self {
        Self
    }

    fn on_click(&self, target: NodeId, cx: &mut UiContext<'_>) {
        let page = &*cx.page;
        let Some(button) = page.closest_class(target, RENAME_BUTTON) else {
            return;
        };
        let wallpaper_id = page
            .attr(button, "data-wallpaper-id")
            .unwrap_or_default()
            .to_string();
        if WallpaperId::parse(&wallpaper_id).is_none() {
            // Submitted anyway; the backend rejects it.
            warn!(%wallpaper_id, "rename button has a non-numeric wallpaper id");
        }
        let Some(card) = page.closest_class(button, WALLPAPER_CARD) else {
            warn!(%wallpaper_id, "rename button outside a wallpaper card");
            return;
        };
        let current_name = page
            .first_by_tag(card, "h3")
            .map(|title| page.text(title).to_string())
            .unwrap_or_default();

        let Some(answer) = cx.host.prompt(RENAME_PROMPT, &current_name) else {
            debug!(%wallpaper_id, "rename cancelled");
            return;
        };
        let new_name = answer.trim();
        if new_name.is_empty() {
            debug!(%wallpaper_id, "rename ignored: blank name");
            return;
        }

        let form = RenameForm {
            wallpaper_id,
            new_name: new_name.to_string(),
        };
        info!(wallpaper_id = %form.wallpaper_id, "submitting rename");
        cx.host.submit_form(FormSubmission {
            action: RENAME_PATH.to_string(),
            fields: form.fields(),
        });
    }
}

impl Component for RenameAction {
    fn name(&self) -> &'static str {
        "rename_action"
    }

    fn interests(&self) -> &'static [EventKind] {
        &[EventKind::Click]
    }

    fn handle(&mut self, event: &UiEvent, cx: &mut UiContext<'_>) {
        if let UiEvent::Click { target } = event {
            self.on_click(*target, cx);
        }
    }
}

#[cfg(test)]
#[path = "tests/rename_tests.rs"]
mod tests;
