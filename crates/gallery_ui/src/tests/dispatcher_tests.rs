use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::{testing::RecordingHost, timers::ManualTimers};

struct Recorder {
    name: &'static str,
    interests: &'static [EventKind],
    log: Rc<RefCell<Vec<(&'static str, EventKind)>>>,
}

impl Component for Recorder {
    fn name(&self) -> &'static str {
        self.name
    }

    fn interests(&self) -> &'static [EventKind] {
        self.interests
    }

    fn handle(&mut self, event: &UiEvent, _cx: &mut UiContext<'_>) {
        self.log.borrow_mut().push((self.name, event.kind()));
    }
}

#[test]
fn routes_only_to_interested_components_in_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut dispatcher = Dispatcher::new();
    dispatcher.register(Box::new(Recorder {
        name: "resize-a",
        interests: &[EventKind::WindowResized, EventKind::DomReady],
        log: log.clone(),
    }));
    dispatcher.register(Box::new(Recorder {
        name: "keys",
        interests: &[EventKind::KeyDown],
        log: log.clone(),
    }));
    dispatcher.register(Box::new(Recorder {
        name: "resize-b",
        interests: &[EventKind::WindowResized],
        log: log.clone(),
    }));

    let mut page = Page::new();
    let mut host = RecordingHost::new();
    let mut timers = ManualTimers::new();
    let mut outbox = Vec::new();
    let mut cx = UiContext::new(&mut page, &mut host, &mut timers, &mut outbox);

    assert_eq!(dispatcher.dispatch(&UiEvent::WindowResized, &mut cx), 2);
    assert_eq!(dispatcher.dispatch(&UiEvent::key("Escape"), &mut cx), 1);
    assert_eq!(dispatcher.dispatch(&UiEvent::PageLoaded, &mut cx), 0);

    assert_eq!(
        *log.borrow(),
        vec![
            ("resize-a", EventKind::WindowResized),
            ("resize-b", EventKind::WindowResized),
            ("keys", EventKind::KeyDown),
        ]
    );
    assert_eq!(
        dispatcher.component_names(),
        vec!["resize-a", "keys", "resize-b"]
    );
}
