use super::*;
use crate::{host::SessionStore, page::Page, testing::Harness};

fn harness() -> Harness<ScrollMemory> {
    Harness::new(Page::new(), ScrollMemory::new())
}

#[test]
fn submit_then_load_restores_once() {
    let mut h = harness();
    let form = h.page.create_element("form");

    h.host.scroll = 842;
    h.send(UiEvent::FormSubmit { form });
    assert_eq!(h.host.store.get(SCROLL_KEY).as_deref(), Some("842"));

    // Reload lands at the top before restoration.
    h.host.scroll = 0;
    h.send(UiEvent::PageLoaded);
    assert_eq!(h.host.scroll, 842);
    assert_eq!(h.host.store.get(SCROLL_KEY), None);

    h.host.scroll = 0;
    h.send(UiEvent::PageLoaded);
    assert_eq!(h.host.scroll, 0);
    assert_eq!(h.host.scroll_calls, vec![842]);
}

#[test]
fn load_without_saved_offset_does_nothing() {
    let mut h = harness();
    h.send(UiEvent::PageLoaded);
    assert!(h.host.scroll_calls.is_empty());
}

#[test]
fn garbage_offset_scrolls_to_top_and_is_cleared() {
    let mut h = harness();
    h.host.store.set(SCROLL_KEY, "not-a-number".to_string());
    h.host.scroll = 300;
    h.send(UiEvent::PageLoaded);
    assert_eq!(h.host.scroll_calls, vec![0]);
    assert_eq!(h.host.store.get(SCROLL_KEY), None);
}
