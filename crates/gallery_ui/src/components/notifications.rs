use tracing::{debug, warn};

use super::markup::{
    MARK_ALL_READ, NOTIFICATION_BELL, NOTIFICATION_COUNT, NOTIFICATION_DROPDOWN,
    NOTIFICATION_ITEM, SHOW, UNREAD,
};
use crate::{
    dispatcher::{Component, UiContext},
    events::{EventKind, UiEvent},
    page::{NodeId, Page},
};

struct Elements {
    bell: NodeId,
    dropdown: NodeId,
    mark_all_read: Option<NodeId>,
}

/// Bell dropdown with outside-click dismissal and "mark all read".
#[derive(Default)]
pub struct NotificationPanel {
    elements: Option<Elements>,
}

impl NotificationPanel {
    pub fn new() -> Self {
        Self::default()
    }

    fn bind(&mut self, page: &Page) {
        let (Some(bell), Some(dropdown)) = (
            page.element_by_id(NOTIFICATION_BELL),
            page.element_by_id(NOTIFICATION_DROPDOWN),
        ) else {
            warn!("notification bell or dropdown missing; panel disabled");
            self.elements = None;
            return;
        };
        self.elements = Some(Elements {
            bell,
            dropdown,
            mark_all_read: page.first_by_class(page.body(), MARK_ALL_READ),
        });
    }

    fn on_click(&self, target: NodeId, page: &mut Page) {
        let Some(elements) = &self.elements else {
            return;
        };

        // Bell and mark-all-read stop propagation, so the outside-click rule
        // never sees their clicks.
        if page.contains(elements.bell, target) {
            let open = page.toggle_class(elements.dropdown, SHOW);
            debug!(open, "notification dropdown toggled");
            return;
        }
        if let Some(button) = elements.mark_all_read {
            if page.contains(button, target) {
                mark_all_read(page);
                return;
            }
        }

        if !page.contains(elements.dropdown, target) && target != elements.bell {
            page.remove_class(elements.dropdown, SHOW);
        }
    }
}

pub fn mark_all_read(page: &mut Page) {
    let unread: Vec<NodeId> = page
        .query_class(page.body(), NOTIFICATION_ITEM)
        .into_iter()
        .filter(|item| page.has_class(*item, UNREAD))
        .collect();
    for item in &unread {
        page.remove_class(*item, UNREAD);
    }
    if let Some(counter) = page.element_by_id(NOTIFICATION_COUNT) {
        page.set_text(counter, "0");
    }
    debug!(cleared = unread.len(), "notifications marked read");
}

impl Component for NotificationPanel {
    fn name(&self) -> &'static str {
        "notification_panel"
    }

    fn interests(&self) -> &'static [EventKind] {
        &[EventKind::DomReady, EventKind::Click]
    }

    fn handle(&mut self, event: &UiEvent, cx: &mut UiContext<'_>) {
        match event {
            UiEvent::DomReady => self.bind(cx.page),
            UiEvent::Click { target } => self.on_click(*target, cx.page),
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "tests/notifications_tests.rs"]
mod tests;
