//! Headless model of the wallpaper gallery's page behaviours.
//!
//! Components react to [`UiEvent`]s by mutating a [`Page`], calling the
//! [`Host`] for browser services and queueing [`Command`]s for the network.
//! [`UiRuntime`] wires them to tokio timers and a [`client_core::CommentsApi`].

pub mod components;
pub mod debounce;
pub mod dispatcher;
pub mod events;
pub mod format;
pub mod host;
pub mod page;
pub mod runtime;
pub mod settings;
pub mod timers;

#[cfg(test)]
mod testing;

pub use dispatcher::{Command, Component, Dispatcher, UiContext};
pub use events::{EventKind, ImageOutcome, OpenWallpaper, RequestGeneration, UiEvent};
pub use host::{FormSubmission, Host, MemorySessionStore, SessionStore};
pub use page::{ElementBuilder, NodeId, Page};
pub use runtime::UiRuntime;
pub use settings::UiSettings;
pub use timers::{ManualTimers, TimerId, Timers};
