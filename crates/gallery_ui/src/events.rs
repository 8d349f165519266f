//! Interaction events fed into the dispatcher.

use shared::{domain::WallpaperId, protocol::Comment};

use crate::{page::NodeId, timers::TimerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOutcome {
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenWallpaper {
    pub wallpaper_id: WallpaperId,
    pub image_url: String,
    pub title: String,
    pub date: String,
}

/// Tags an in-flight comment request with the modal context it was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestGeneration(pub u64);

#[derive(Debug, Clone)]
pub enum UiEvent {
    DomReady,
    PageLoaded,
    Click {
        target: NodeId,
    },
    KeyDown {
        key: String,
    },
    Input {
        target: NodeId,
    },
    FormSubmit {
        form: NodeId,
    },
    ImageSettled {
        image: NodeId,
        outcome: ImageOutcome,
    },
    WindowResized,
    TimerFired(TimerId),
    OpenWallpaper(OpenWallpaper),
    CloseModal,
    CommentsLoaded {
        wallpaper_id: WallpaperId,
        generation: RequestGeneration,
        result: Result<Vec<Comment>, String>,
    },
    CommentPosted {
        wallpaper_id: WallpaperId,
        generation: RequestGeneration,
        result: Result<(), String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    DomReady,
    PageLoaded,
    Click,
    KeyDown,
    Input,
    FormSubmit,
    ImageSettled,
    WindowResized,
    TimerFired,
    OpenWallpaper,
    CloseModal,
    CommentsLoaded,
    CommentPosted,
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::DomReady => EventKind::DomReady,
            UiEvent::PageLoaded => EventKind::PageLoaded,
            UiEvent::Click { .. } => EventKind::Click,
            UiEvent::KeyDown { .. } => EventKind::KeyDown,
            UiEvent::Input { .. } => EventKind::Input,
            UiEvent::FormSubmit { .. } => EventKind::FormSubmit,
            UiEvent::ImageSettled { .. } => EventKind::ImageSettled,
            UiEvent::WindowResized => EventKind::WindowResized,
            UiEvent::TimerFired(_) => EventKind::TimerFired,
            UiEvent::OpenWallpaper(_) => EventKind::OpenWallpaper,
            UiEvent::CloseModal => EventKind::CloseModal,
            UiEvent::CommentsLoaded { .. } => EventKind::CommentsLoaded,
            UiEvent::CommentPosted { .. } => EventKind::CommentPosted,
        }
    }

    pub fn key(key: impl Into<String>) -> Self {
        UiEvent::KeyDown { key: key.into() }
    }
}
