//! Headless page sessions: each builds the markup one page would serve,
//! feeds it the events a user would produce and reports what changed.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use client_core::{CommentsApi, GalleryClient};
use gallery_ui::{
    components::markup, ElementBuilder, ImageOutcome, NodeId, OpenWallpaper, Page, UiEvent,
    UiRuntime, UiSettings,
};
use shared::{domain::WallpaperId, protocol::RenameForm};
use tracing::info;

use crate::host::TerminalHost;

struct ModalPage {
    page: Page,
    list: NodeId,
    form: NodeId,
    input: NodeId,
}

fn modal_page() -> ModalPage {
    let mut page = Page::new();
    let body = page.body();
    let modal = ElementBuilder::new(&mut page, body, "div")
        .id(markup::WALLPAPER_MODAL)
        .build();
    for (tag, id) in [
        ("img", markup::MODAL_IMAGE),
        ("h2", markup::MODAL_IMAGE_TITLE),
        ("span", markup::MODAL_IMAGE_DATE),
    ] {
        ElementBuilder::new(&mut page, modal, tag).id(id).build();
    }
    let list = ElementBuilder::new(&mut page, modal, "div")
        .id(markup::COMMENTS_LIST)
        .build();
    let form = ElementBuilder::new(&mut page, modal, "form")
        .id(markup::COMMENT_FORM)
        .build();
    let input = ElementBuilder::new(&mut page, form, "textarea")
        .id(markup::COMMENT_TEXT)
        .build();
    ElementBuilder::new(&mut page, form, "span")
        .id(markup::CHAR_COUNT)
        .build();
    ModalPage {
        page,
        list,
        form,
        input,
    }
}

fn open_request(wallpaper_id: WallpaperId) -> UiEvent {
    UiEvent::OpenWallpaper(OpenWallpaper {
        wallpaper_id,
        image_url: format!("/uploads/{wallpaper_id}"),
        title: format!("Wallpaper {wallpaper_id}"),
        date: String::new(),
    })
}

/// Opens the modal for `wallpaper_id` and returns the rendered comment list.
pub async fn show_comments(
    api: Arc<dyn CommentsApi>,
    settings: &UiSettings,
    wallpaper_id: WallpaperId,
) -> String {
    let ModalPage { page, list, .. } = modal_page();
    let mut runtime = UiRuntime::new(page, TerminalHost::new(), api, settings);
    runtime.dispatch(open_request(wallpaper_id));
    runtime.run_until_settled().await;
    runtime.page().inner_html(list).to_string()
}

/// Submits `text` through the comment form and returns the refreshed list.
pub async fn post_comment(
    api: Arc<dyn CommentsApi>,
    settings: &UiSettings,
    wallpaper_id: WallpaperId,
    text: &str,
) -> Result<String> {
    let ModalPage {
        page,
        list,
        form,
        input,
    } = modal_page();
    let mut runtime = UiRuntime::new(page, TerminalHost::new(), api, settings);
    runtime.dispatch(open_request(wallpaper_id));
    runtime.run_until_settled().await;

    runtime.page_mut().set_value(input, text);
    runtime.dispatch(UiEvent::Input { target: input });
    runtime.dispatch(UiEvent::FormSubmit { form });
    runtime.run_until_settled().await;

    if let Some(alert) = runtime.host().alerts.first() {
        bail!("{alert}");
    }
    Ok(runtime.page().inner_html(list).to_string())
}

/// Clicks a card's rename button and sends the form the page would submit.
/// Returns the final location, or `None` when the rename was abandoned.
pub async fn rename(
    client: &GalleryClient,
    settings: &UiSettings,
    wallpaper_id: WallpaperId,
    current_name: &str,
    new_name: Option<String>,
) -> Result<Option<String>> {
    let mut page = Page::new();
    let body = page.body();
    let card = ElementBuilder::new(&mut page, body, "div")
        .class(markup::WALLPAPER_CARD)
        .build();
    ElementBuilder::new(&mut page, card, "h3")
        .text(current_name)
        .build();
    let button = ElementBuilder::new(&mut page, card, "button")
        .class(markup::RENAME_BUTTON)
        .attr("data-wallpaper-id", &wallpaper_id.to_string())
        .build();

    let api: Arc<dyn CommentsApi> = Arc::new(client_core::MissingCommentsApi);
    let host = TerminalHost::with_answer(new_name);
    let mut runtime = UiRuntime::new(page, host, api, settings);
    runtime.dispatch(UiEvent::Click { target: button });

    let Some(submission) = runtime.host_mut().take_submissions().pop() else {
        info!(%wallpaper_id, "rename abandoned");
        return Ok(None);
    };
    let form = RenameForm {
        wallpaper_id: submission
            .field("wallpaper_id")
            .context("rename form lacks wallpaper_id")?
            .to_string(),
        new_name: submission
            .field("new_name")
            .context("rename form lacks new_name")?
            .to_string(),
    };
    let location = client
        .rename_wallpaper(&form)
        .await
        .with_context(|| format!("failed to rename wallpaper {wallpaper_id}"))?;
    Ok(Some(location))
}

/// Lays out a masonry grid whose cards have the given container heights and
/// returns each card's `grid-row-end`.
pub async fn layout(
    settings: &UiSettings,
    container_heights: &[f64],
    gap: Option<&str>,
    row_height: Option<&str>,
) -> Vec<String> {
    let mut page = Page::new();
    let body = page.body();
    let mut grid = ElementBuilder::new(&mut page, body, "div").class(markup::SPELL_GRID);
    if let Some(gap) = gap {
        grid = grid.style("gap", gap);
    }
    if let Some(row_height) = row_height {
        grid = grid.style("grid-auto-rows", row_height);
    }
    let grid = grid.build();

    let mut cards = Vec::new();
    let mut images = Vec::new();
    for height in container_heights {
        let card = ElementBuilder::new(&mut page, grid, "div")
            .class(markup::WALLPAPER_CARD)
            .build();
        let container = ElementBuilder::new(&mut page, card, "div")
            .class(markup::WALLPAPER_IMAGE_CONTAINER)
            .height(*height)
            .build();
        let image = ElementBuilder::new(&mut page, container, "img")
            .class(markup::WALLPAPER_IMAGE)
            .height(*height)
            .build();
        cards.push(card);
        images.push(image);
    }

    let api: Arc<dyn CommentsApi> = Arc::new(client_core::MissingCommentsApi);
    let mut runtime = UiRuntime::new(page, TerminalHost::new(), api, settings);
    runtime.dispatch(UiEvent::DomReady);
    for image in images {
        runtime.dispatch(UiEvent::ImageSettled {
            image,
            outcome: ImageOutcome::Loaded,
        });
    }
    runtime.run_until_settled().await;

    cards
        .into_iter()
        .map(|card| {
            runtime
                .page()
                .style(card, "grid-row-end")
                .unwrap_or("auto")
                .to_string()
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
