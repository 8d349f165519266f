//! Event loop that owns the page and drives the components.
//!
//! Requests and timers run as spawned tokio tasks and report back through a
//! single unbounded channel, so every component still sees one event at a
//! time. Must be driven from inside a tokio runtime.

use std::{collections::HashMap, sync::Arc, time::Duration};

use client_core::CommentsApi;
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tracing::{debug, info, trace};

use crate::{
    components::{
        CompactModeDetector, MasonryLayout, NotificationPanel, RenameAction, ScrollMemory,
        WallpaperModal,
    },
    dispatcher::{Command, Component, Dispatcher, UiContext},
    events::UiEvent,
    host::Host,
    page::Page,
    settings::UiSettings,
    timers::{TimerId, Timers},
};

/// Timers backed by `tokio::time::sleep`. A fired timer is delivered as
/// [`UiEvent::TimerFired`]; an aborted one never is.
struct TokioTimers {
    events: UnboundedSender<UiEvent>,
    next_id: u64,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

impl TokioTimers {
    fn new(events: UnboundedSender<UiEvent>) -> Self {
        Self {
            events,
            next_id: 0,
            tasks: HashMap::new(),
        }
    }

    /// Forgets a timer whose event reached the loop. `false` means it was
    /// cancelled after the sleep completed but before delivery.
    fn complete(&mut self, id: TimerId) -> bool {
        self.tasks.remove(&id).is_some()
    }
}

impl Timers for TokioTimers {
    fn schedule(&mut self, after: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let events = self.events.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = events.send(UiEvent::TimerFired(id));
        });
        self.tasks.insert(id, task);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(task) = self.tasks.remove(&id) {
            task.abort();
        }
    }
}

impl Drop for TokioTimers {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

pub struct UiRuntime<H: Host> {
    page: Page,
    host: H,
    dispatcher: Dispatcher,
    timers: TokioTimers,
    api: Arc<dyn CommentsApi>,
    events_tx: UnboundedSender<UiEvent>,
    events_rx: UnboundedReceiver<UiEvent>,
    in_flight: usize,
}

impl<H: Host> UiRuntime<H> {
    pub fn new(page: Page, host: H, api: Arc<dyn CommentsApi>, settings: &UiSettings) -> Self {
        let mut runtime = Self::empty(page, host, api);
        runtime.register(Box::new(NotificationPanel::new()));
        runtime.register(Box::new(RenameAction::new()));
        runtime.register(Box::new(ScrollMemory::new()));
        runtime.register(Box::new(CompactModeDetector::new(settings)));
        runtime.register(Box::new(WallpaperModal::new()));
        runtime.register(Box::new(MasonryLayout::new(settings)));
        info!(components = ?runtime.dispatcher.component_names(), "ui runtime ready");
        runtime
    }

    pub fn empty(page: Page, host: H, api: Arc<dyn CommentsApi>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            page,
            host,
            dispatcher: Dispatcher::new(),
            timers: TokioTimers::new(events_tx.clone()),
            api,
            events_tx,
            events_rx,
            in_flight: 0,
        }
    }

    pub fn register(&mut self, component: Box<dyn Component>) {
        self.dispatcher.register(component);
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// For events raised outside the loop.
    pub fn sender(&self) -> UnboundedSender<UiEvent> {
        self.events_tx.clone()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.tasks.len()
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight == 0 && self.timers.tasks.is_empty()
    }

    /// Delivers one event to the interested components, then starts any
    /// requests they queued. Returns how many components saw the event.
    pub fn dispatch(&mut self, event: UiEvent) -> usize {
        match &event {
            UiEvent::TimerFired(id) if !self.timers.complete(*id) => {
                trace!(timer = id.0, "dropping cancelled timer");
                return 0;
            }
            UiEvent::CommentsLoaded { .. } | UiEvent::CommentPosted { .. } => {
                self.in_flight = self.in_flight.saturating_sub(1);
            }
            _ => {}
        }

        let mut outbox = Vec::new();
        let delivered = {
            let mut cx = UiContext::new(
                &mut self.page,
                &mut self.host,
                &mut self.timers,
                &mut outbox,
            );
            self.dispatcher.dispatch(&event, &mut cx)
        };
        for command in outbox {
            self.spawn_command(command);
        }
        delivered
    }

    /// Pumps queued events until no request or timer is outstanding. Returns
    /// how many events were processed.
    pub async fn run_until_settled(&mut self) -> usize {
        let mut processed = 0;
        loop {
            let event = match self.events_rx.try_recv() {
                Ok(event) => event,
                Err(_) if self.is_idle() => break,
                Err(_) => match self.events_rx.recv().await {
                    Some(event) => event,
                    None => break,
                },
            };
            self.dispatch(event);
            processed += 1;
        }
        debug!(processed, "ui runtime settled");
        processed
    }

    fn spawn_command(&mut self, command: Command) {
        self.in_flight += 1;
        let api = Arc::clone(&self.api);
        let events = self.events_tx.clone();
        debug!(?command, in_flight = self.in_flight, "starting request");
        match command {
            Command::FetchComments {
                wallpaper_id,
                generation,
            } => {
                tokio::spawn(async move {
                    let result = api
                        .fetch_comments(wallpaper_id)
                        .await
                        .map_err(|err| err.to_string());
                    let _ = events.send(UiEvent::CommentsLoaded {
                        wallpaper_id,
                        generation,
                        result,
                    });
                });
            }
            Command::PostComment {
                request,
                generation,
            } => {
                tokio::spawn(async move {
                    let result = api
                        .post_comment(&request)
                        .await
                        .map(|_| ())
                        .map_err(|err| err.to_string());
                    let _ = events.send(UiEvent::CommentPosted {
                        wallpaper_id: request.wallpaper_id,
                        generation,
                        result,
                    });
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
