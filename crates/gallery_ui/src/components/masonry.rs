//! Masonry grid: each card spans as many implicit grid rows as its image
//! container needs.
//!
//! The span is measured from `.wallpaper-image-container`, not the card: the
//! caption overlay is absolutely positioned and does not contribute height.

use std::collections::HashSet;

use tracing::debug;

use super::markup::{SPELL_GRID, WALLPAPER_CARD, WALLPAPER_IMAGE, WALLPAPER_IMAGE_CONTAINER};
use crate::{
    debounce::Debounce,
    dispatcher::{Component, UiContext},
    events::{EventKind, ImageOutcome, UiEvent},
    format::parse_leading_int,
    page::{NodeId, Page},
    settings::UiSettings,
    timers::{TimerId, Timers},
};

/// `ceil((container_height + gap) / (row_height + gap))`.
pub fn row_span(container_height: f64, gap: i64, row_height: i64) -> i64 {
    let gap = gap as f64;
    ((container_height + gap) / (row_height as f64 + gap)).ceil() as i64
}

struct Grid {
    root: NodeId,
    cards: Vec<NodeId>,
    images: Vec<NodeId>,
    settled: HashSet<NodeId>,
}

pub struct MasonryLayout {
    settings: UiSettings,
    grid: Option<Grid>,
    settle_timers: Vec<TimerId>,
    resize: Debounce,
}

macro_rules! layout_log {
    ($self:ident, $($arg:tt)+) => {
        if $self.settings.layout_verbose {
            debug!(target: "gallery_ui::masonry", $($arg)+);
        }
    };
}

impl MasonryLayout {
    pub fn new(settings: &UiSettings) -> Self {
        Self {
            resize: Debounce::new(settings.masonry_debounce()),
            settings: settings.clone(),
            grid: None,
            settle_timers: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.grid.is_some()
    }

    fn init(&mut self, cx: &mut UiContext<'_>) {
        let page = &*cx.page;
        let Some(root) = page.first_by_class(page.body(), SPELL_GRID) else {
            layout_log!(self, "grid not found");
            return;
        };
        let cards = page.query_class(root, WALLPAPER_CARD);
        if cards.is_empty() {
            layout_log!(self, "no cards found");
            return;
        }
        let images = page.query_class(root, WALLPAPER_IMAGE);
        layout_log!(self, cards = cards.len(), images = images.len(), "grid found");

        // Already-complete images count immediately, including ones that
        // finished with an error before we looked.
        let settled: HashSet<NodeId> = images
            .iter()
            .copied()
            .filter(|image| page.image_state(*image).is_some_and(|state| state.complete))
            .collect();

        self.grid = Some(Grid {
            root,
            cards,
            images,
            settled,
        });

        if self.images_total() == 0 {
            layout_log!(self, "no images; laying out immediately");
            self.resize_grid_items(cx.page);
        } else {
            self.maybe_schedule_settle(cx.timers);
        }
    }

    fn images_total(&self) -> usize {
        self.grid.as_ref().map_or(0, |grid| grid.images.len())
    }

    fn on_image_settled(&mut self, image: NodeId, outcome: ImageOutcome, timers: &mut dyn Timers) {
        let Some(grid) = self.grid.as_mut() else {
            return;
        };
        if !grid.images.contains(&image) || !grid.settled.insert(image) {
            return;
        }
        let loaded = grid.settled.len();
        let total = grid.images.len();
        layout_log!(self, ?outcome, loaded, total, "image settled");
        self.maybe_schedule_settle(timers);
    }

    fn maybe_schedule_settle(&mut self, timers: &mut dyn Timers) {
        let Some(grid) = self.grid.as_ref() else {
            return;
        };
        if grid.settled.len() != grid.images.len() {
            return;
        }
        layout_log!(self, "all images settled; scheduling layout passes");
        self.settle_timers = self
            .settings
            .masonry_settle_delays()
            .map(|delay| timers.schedule(delay))
            .collect();
    }

    fn resize_grid_items(&self, page: &mut Page) {
        let Some(grid) = self.grid.as_ref() else {
            return;
        };
        let gap = page
            .style(grid.root, "gap")
            .and_then(parse_leading_int)
            .filter(|v| *v > 0)
            .unwrap_or(self.settings.masonry_default_gap_px);
        let row_height = page
            .style(grid.root, "grid-auto-rows")
            .and_then(parse_leading_int)
            .filter(|v| *v > 0)
            .unwrap_or(self.settings.masonry_default_row_height_px);
        layout_log!(self, gap, row_height, "recalculating layout");

        for (index, card) in grid.cards.iter().enumerate() {
            let Some(container) = page.first_by_class(*card, WALLPAPER_IMAGE_CONTAINER) else {
                layout_log!(self, index, "card has no image container");
                continue;
            };
            let container_height = page.height(container);
            let span = row_span(container_height, gap, row_height);
            page.set_style(*card, "grid-row-end", &format!("span {span}"));
            layout_log!(self, index, container_height, span, "card laid out");
        }
    }
}

impl Component for MasonryLayout {
    fn name(&self) -> &'static str {
        "masonry_layout"
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
            UiEvent::DomReady => self.init(cx),
            UiEvent::ImageSettled { image, outcome } => {
                self.on_image_settled(*image, *outcome, cx.timers)
            }
            UiEvent::WindowResized if self.grid.is_some() => self.resize.trigger(cx.timers),
            UiEvent::TimerFired(id) => {
                if let Some(pos) = self.settle_timers.iter().position(|t| t == id) {
                    self.settle_timers.swap_remove(pos);
                    self.resize_grid_items(cx.page);
                } else if self.resize.take_fired(*id) {
                    layout_log!(self, "window resized; recalculating");
                    self.resize_grid_items(cx.page);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "tests/masonry_tests.rs"]
mod tests;
