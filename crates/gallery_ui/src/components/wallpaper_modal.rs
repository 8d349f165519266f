//! Lightbox with comments.
//!
//! `Closed -> Open(id) -> Closed`. Every transition bumps the request
//! generation; comment responses tagged with an older generation are dropped,
//! so a slow reply for a previous wallpaper can never overwrite the list of
//! the current one.

use chrono::{DateTime, Utc};
use shared::{
    domain::WallpaperId,
    protocol::{Comment, CreateCommentRequest, MAX_COMMENT_CHARS},
};
use tracing::{debug, error, info, warn};

use super::markup::{
    ACTIVE, CHAR_COUNT, COMMENTS_LIST, COMMENT_FORM, COMMENT_TEXT, MODAL_IMAGE,
    MODAL_IMAGE_DATE, MODAL_IMAGE_TITLE, WALLPAPER_MODAL,
};
use crate::{
    dispatcher::{Command, Component, UiContext},
    events::{EventKind, OpenWallpaper, RequestGeneration, UiEvent},
    format::{escape_html, time_ago},
    page::{NodeId, Page},
};

pub const NO_COMMENTS_HTML: &str = "<div class=\"no-comments\"><p>No comments yet. Be the first to comment! \u{2728}</p></div>";
pub const POST_FAILED_ALERT: &str = "Failed to post comment. Please try again.";
pub const CHAR_WARNING_THRESHOLD: usize = 450;
pub const CHAR_WARNING_COLOR: &str = "#ff6b81";

#[derive(Debug, Default)]
pub struct WallpaperModal {
    current: Option<WallpaperId>,
    generation: u64,
}

impl WallpaperModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_wallpaper_id(&self) -> Option<WallpaperId> {
        self.current
    }

    pub fn generation(&self) -> RequestGeneration {
        RequestGeneration(self.generation)
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    fn open(&mut self, request: &OpenWallpaper, cx: &mut UiContext<'_>) {
        let Some(modal) = cx.page.element_by_id(WALLPAPER_MODAL) else {
            warn!(wallpaper_id = %request.wallpaper_id, "wallpaper modal markup missing");
            return;
        };

        // Reopening without a close replaces the previous context outright.
        self.current = Some(request.wallpaper_id);
        self.generation += 1;

        let page = &mut *cx.page;
        if let Some(image) = page.element_by_id(MODAL_IMAGE) {
            page.set_attr(image, "src", &request.image_url);
            page.set_attr(image, "alt", &request.title);
        }
        if let Some(title) = page.element_by_id(MODAL_IMAGE_TITLE) {
            page.set_text(title, &request.title);
        }
        if let Some(date) = page.element_by_id(MODAL_IMAGE_DATE) {
            page.set_text(date, &request.date);
        }
        page.add_class(modal, ACTIVE);
        let body = page.body();
        page.set_style(body, "overflow", "hidden");

        debug!(wallpaper_id = %request.wallpaper_id, generation = self.generation, "modal opened");
        cx.outbox.push(Command::FetchComments {
            wallpaper_id: request.wallpaper_id,
            generation: self.generation(),
        });
    }

    fn close(&mut self, page: &mut Page) {
        if let Some(modal) = page.element_by_id(WALLPAPER_MODAL) {
            page.remove_class(modal, ACTIVE);
        }
        let body = page.body();
        page.set_style(body, "overflow", "");
        if self.current.take().is_some() {
            self.generation += 1;
            debug!(generation = self.generation, "modal closed");
        }

        if let Some(input) = page.element_by_id(COMMENT_TEXT) {
            page.set_value(input, "");
        }
        update_char_count(page);
    }

    fn submit(&mut self, cx: &mut UiContext<'_>) {
        let Some(input) = cx.page.element_by_id(COMMENT_TEXT) else {
            return;
        };
        let text = cx.page.value(input).trim().to_string();
        let Some(wallpaper_id) = self.current else {
            return;
        };
        if text.is_empty() {
            return;
        }

        debug!(%wallpaper_id, chars = text.chars().count(), "posting comment");
        cx.outbox.push(Command::PostComment {
            request: CreateCommentRequest { wallpaper_id, text },
            generation: self.generation(),
        });
    }

    fn is_stale(&self, generation: RequestGeneration) -> bool {
        generation != self.generation()
    }

    fn on_comments_loaded(
        &self,
        wallpaper_id: WallpaperId,
        generation: RequestGeneration,
        result: &Result<Vec<Comment>, String>,
        cx: &mut UiContext<'_>,
    ) {
        if self.is_stale(generation) {
            debug!(
                %wallpaper_id,
                stale = generation.0,
                current = self.generation,
                "discarding stale comment list"
            );
            return;
        }
        let Some(list) = cx.page.element_by_id(COMMENTS_LIST) else {
            warn!("comments list markup missing");
            return;
        };

        let html = match result {
            Ok(comments) if !comments.is_empty() => {
                let now = cx.host.now();
                comments
                    .iter()
                    .map(|comment| render_comment(comment, now))
                    .collect::<String>()
            }
            Ok(_) => NO_COMMENTS_HTML.to_string(),
            Err(reason) => {
                error!(%wallpaper_id, %reason, "error loading comments");
                NO_COMMENTS_HTML.to_string()
            }
        };
        cx.page.set_inner_html(list, html);
    }

    fn on_comment_posted(
        &self,
        wallpaper_id: WallpaperId,
        generation: RequestGeneration,
        result: &Result<(), String>,
        cx: &mut UiContext<'_>,
    ) {
        if let Err(reason) = result {
            // Reported even if the modal moved on: it is the user's own action.
            error!(%wallpaper_id, %reason, "error posting comment");
            cx.host.alert(POST_FAILED_ALERT);
            return;
        }
        if self.is_stale(generation) {
            // The input now belongs to the new context; only the list is refreshed.
            if self.current == Some(wallpaper_id) {
                debug!(%wallpaper_id, "comment posted before reopen; refreshing list");
                cx.outbox.push(Command::FetchComments {
                    wallpaper_id,
                    generation: self.generation(),
                });
            } else {
                debug!(%wallpaper_id, "comment posted after modal context changed");
            }
            return;
        }

        info!(%wallpaper_id, "comment posted");
        if let Some(input) = cx.page.element_by_id(COMMENT_TEXT) {
            cx.page.set_value(input, "");
        }
        update_char_count(cx.page);
        cx.outbox.push(Command::FetchComments {
            wallpaper_id,
            generation,
        });
    }
}

/// Refreshes `#charCount` from `#commentText`. Advisory only: input past the
/// limit is neither truncated nor blocked.
pub fn update_char_count(page: &mut Page) {
    let (Some(input), Some(counter)) = (
        page.element_by_id(COMMENT_TEXT),
        page.element_by_id(CHAR_COUNT),
    ) else {
        return;
    };
    let count = page.value(input).chars().count();
    page.set_text(counter, &format!("{count}/{MAX_COMMENT_CHARS}"));
    let color = if count > CHAR_WARNING_THRESHOLD {
        CHAR_WARNING_COLOR
    } else {
        ""
    };
    page.set_style(counter, "color", color);
}

pub fn render_comment(comment: &Comment, now: DateTime<Utc>) -> String {
    format!(
        "<div class=\"comment-item\" data-comment-id=\"{id}\">\
         <div class=\"comment-header\">\
         <span class=\"comment-author\">{author}</span>\
         <span class=\"comment-time\">{time}</span>\
         </div>\
         <div class=\"comment-body\">{body}</div>\
         </div>",
        id = comment.id,
        author = escape_html(&comment.username),
        time = time_ago(comment.created_at, now),
        body = escape_html(&comment.text),
    )
}

fn is_target(page: &Page, node: NodeId, id: &str) -> bool {
    page.element(node).id() == Some(id)
}

impl Component for WallpaperModal {
    fn name(&self) -> &'static str {
        "wallpaper_modal"
    }

    fn interests(&self) -> &'static [EventKind] {
        &[
            EventKind::OpenWallpaper,
            EventKind::CloseModal,
            EventKind::KeyDown,
            EventKind::Input,
            EventKind::FormSubmit,
            EventKind::CommentsLoaded,
            EventKind::CommentPosted,
        ]
    }

    fn handle(&mut self, event: &UiEvent, cx: &mut UiContext<'_>) {
        match event {
            UiEvent::OpenWallpaper(request) => self.open(request, cx),
            UiEvent::CloseModal => self.close(cx.page),
            UiEvent::KeyDown { key } if key == "Escape" => self.close(cx.page),
            UiEvent::Input { target } if is_target(cx.page, *target, COMMENT_TEXT) => {
                update_char_count(cx.page)
            }
            UiEvent::FormSubmit { form } if is_target(cx.page, *form, COMMENT_FORM) => {
                self.submit(cx)
            }
            UiEvent::CommentsLoaded {
                wallpaper_id,
                generation,
                result,
            } => self.on_comments_loaded(*wallpaper_id, *generation, result, cx),
            UiEvent::CommentPosted {
                wallpaper_id,
                generation,
                result,
            } => self.on_comment_posted(*wallpaper_id, *generation, result, cx),
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "tests/wallpaper_modal_tests.rs"]
mod tests;
