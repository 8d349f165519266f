use std::time::Duration;

use super::*;
use crate::{
    page::{ElementBuilder, Page},
    testing::Harness,
};

fn card(page: &mut Page, image_height: f64, loaded: bool) -> (NodeId, NodeId) {
    let body = page.body();
    let card = ElementBuilder::new(page, body, "div")
        .class("wallpaper-card")
        .build();
    let mut image = ElementBuilder::new(page, card, "img")
        .class("wallpaper-image")
        .height(image_height);
    if loaded {
        image = image.loaded();
    }
    (card, image.build())
}

fn harness(page: Page) -> Harness<CompactModeDetector> {
    Harness::new(page, CompactModeDetector::new(&UiSettings::default()))
}

#[test]
fn short_images_get_compact_class() {
    let mut page = Page::new();
    let (short, _) = card(&mut page, 200.0, true);
    let (tall, _) = card(&mut page, 400.0, true);
    let mut h = harness(page);

    h.send(UiEvent::DomReady);
    assert!(h.page.has_class(short, "compact-mode"));
    assert!(!h.page.has_class(tall, "compact-mode"));

    // Re-applying with unchanged geometry changes nothing.
    h.send(UiEvent::WindowResized);
    h.advance(Duration::from_millis(250));
    assert!(h.page.has_class(short, "compact-mode"));
    assert!(!h.page.has_class(tall, "compact-mode"));
}

#[test]
fn pending_images_apply_on_load() {
    let mut page = Page::new();
    let (card_node, image) = card(&mut page, 120.0, false);
    let mut h = harness(page);

    h.send(UiEvent::DomReady);
    assert!(!h.page.has_class(card_node, "compact-mode"));

    h.send(UiEvent::ImageSettled {
        image,
        outcome: ImageOutcome::Failed,
    });
    assert!(!h.page.has_class(card_node, "compact-mode"));

    h.send(UiEvent::ImageSettled {
        image,
        outcome: ImageOutcome::Loaded,
    });
    assert!(h.page.has_class(card_node, "compact-mode"));
}

#[test]
fn resize_burst_recomputes_once_per_window() {
    let mut page = Page::new();
    let (card_node, image) = card(&mut page, 400.0, true);
    let mut h = harness(page);
    h.send(UiEvent::DomReady);
    assert!(!h.page.has_class(card_node, "compact-mode"));

    h.page.set_height(image, 200.0);
    for _ in 0..5 {
        h.send(UiEvent::WindowResized);
        assert_eq!(h.advance(Duration::from_millis(100)), 0);
    }
    assert!(!h.page.has_class(card_node, "compact-mode"));

    assert_eq!(h.advance(Duration::from_millis(150)), 1);
    assert!(h.page.has_class(card_node, "compact-mode"));
    assert_eq!(h.timers.pending(), 0);
}

#[test]
fn cards_without_images_are_ignored() {
    let mut page = Page::new();
    let body = page.body();
    let bare = ElementBuilder::new(&mut page, body, "div")
        .class("wallpaper-card")
        .build();
    let mut h = harness(page);
    h.send(UiEvent::DomReady);
    assert!(!h.page.has_class(bare, "compact-mode"));
}
