use std::collections::HashSet;

use tracing::debug;

use super::markup::{COMPACT_MODE, WALLPAPER_CARD, WALLPAPER_IMAGE};
use crate::{
    debounce::Debounce,
    dispatcher::{Component, UiContext},
    events::{EventKind, ImageOutcome, UiEvent},
    page::{NodeId, Page},
    settings::UiSettings,
};

/// Switches short cards into compact display once their image has a height.
pub struct CompactModeDetector {
    threshold: f64,
    resize: Debounce,
    awaiting_load: HashSet<NodeId>,
}

impl CompactModeDetector {
    pub fn new(settings: &UiSettings) -> Self {
        Self {
            threshold: settings.compact_threshold_px,
            resize: Debounce::new(settings.compact_debounce()),
            awaiting_load: HashSet::new(),
        }
    }

    fn check_all(&mut self, page: &mut Page) {
        for card in page.query_class(page.body(), WALLPAPER_CARD) {
            let Some(image) = page.first_by_class(card, WALLPAPER_IMAGE) else {
                continue;
            };
            let complete = page.image_state(image).is_some_and(|state| state.complete);
            if complete {
                self.apply(page, card, image);
            } else {
                self.awaiting_load.insert(image);
            }
        }
    }

    fn apply(&self, page: &mut Page, card: NodeId, image: NodeId) {
        let height = page.height(image);
        if height < self.threshold {
            page.add_class(card, COMPACT_MODE);
        } else {
            page.remove_class(card, COMPACT_MODE);
        }
    }

    fn on_image_loaded(&mut self, page: &mut Page, image: NodeId) {
        if !self.awaiting_load.remove(&image) {
            return;
        }
        if let Some(card) = page.closest_class(image, WALLPAPER_CARD) {
            self.apply(page, card, image);
        }
    }
}

impl Component for CompactModeDetector {
    fn name(&self) -> &'static str {
        "compact_mode"
    }

    fn interests(&self) -> &'static [EventKind] {
        &[
            EventKind::DomReady,
            EventKind::ImageSettled,
            EventKind::WindowResized,
            EventKind::TimerFired,
        ]
    }

    fn handle(&mut self, event: &UiEvent, cx: &mut UiContext<'_>) {
        match event {
            UiEvent::DomReady => self.check_all(cx.page),
            UiEvent::ImageSettled {
                image,
                outcome: ImageOutcome::Loaded,
            } => self.on_image_loaded(cx.page, *image),
            UiEvent::WindowResized => self.resize.trigger(cx.timers),
            UiEvent::TimerFired(id) => {
                if self.resize.take_fired(*id) {
                    debug!("resize settled; rechecking compact mode");
                    self.check_all(cx.page);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "tests/compact_mode_tests.rs"]
mod tests;
