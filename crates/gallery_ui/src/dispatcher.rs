//! Observer-style fan-out of [`UiEvent`]s to registered components.

use std::collections::HashMap;

use shared::{domain::WallpaperId, protocol::CreateCommentRequest};
use tracing::trace;

use crate::{
    events::{EventKind, RequestGeneration, UiEvent},
    host::Host,
    page::Page,
    timers::Timers,
};

/// Asynchronous work a component asks the runtime to perform. Results come
/// back as [`UiEvent::CommentsLoaded`] / [`UiEvent::CommentPosted`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchComments {
        wallpaper_id: WallpaperId,
        generation: RequestGeneration,
    },
    PostComment {
        request: CreateCommentRequest,
        generation: RequestGeneration,
    },
}

pub struct UiContext<'a> {
    pub page: &'a mut Page,
    pub host: &'a mut dyn Host,
    pub timers: &'a mut dyn Timers,
    pub outbox: &'a mut Vec<Command>,
}

impl<'a> UiContext<'a> {
    pub fn new(
        page: &'a mut Page,
        host: &'a mut dyn Host,
        timers: &'a mut dyn Timers,
        outbox: &'a mut Vec<Command>,
    ) -> Self {
        Self {
            page,
            host,
            timers,
            outbox,
        }
    }
}

pub trait Component {
    fn name(&self) -> &'static str;
    fn interests(&self) -> &'static [EventKind];
    fn handle(&mut self, event: &UiEvent, cx: &mut UiContext<'_>);
}

#[derive(Default)]
pub struct Dispatcher {
    components: Vec<Box<dyn Component>>,
    routes: HashMap<EventKind, Vec<usize>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, component: Box<dyn Component>) {
        let index = self.components.len();
        for kind in component.interests() {
            self.routes.entry(*kind).or_default().push(index);
        }
        self.components.push(component);
    }

    pub fn component_names(&self) -> Vec<&'static str> {
        self.components.iter().map(|c| c.name()).collect()
    }

    /// Delivers `event` to every interested component in registration order.
    /// Returns how many components saw it.
    pub fn dispatch(&mut self, event: &UiEvent, cx: &mut UiContext<'_>) -> usize {
        let Some(targets) = self.routes.get(&event.kind()) else {
            return 0;
        };
        for index in targets {
            let component = &mut self.components[*index];
            trace!(component = component.name(), kind = ?event.kind(), "dispatching ui event");
            component.handle(event, cx);
        }
        targets.len()
    }
}

#[cfg(test)]
#[path = "tests/dispatcher_tests.rs"]
mod tests;
