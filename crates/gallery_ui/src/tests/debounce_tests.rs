use super::*;
use crate::timers::ManualTimers;

#[test]
fn burst_of_triggers_fires_once() {
    let mut timers = ManualTimers::new();
    let mut debounce = Debounce::new(Duration::from_millis(250));

    debounce.trigger(&mut timers);
    timers.advance(Duration::from_millis(100));
    debounce.trigger(&mut timers);
    timers.advance(Duration::from_millis(100));
    debounce.trigger(&mut timers);
    assert_eq!(timers.pending(), 1);

    assert!(timers.advance(Duration::from_millis(249)).is_empty());
    let fired = timers.advance(Duration::from_millis(1));
    assert_eq!(fired.len(), 1);
    assert!(debounce.take_fired(fired[0]));
    assert!(!debounce.take_fired(fired[0]));
    assert!(!debounce.is_pending());
}

#[test]
fn superseded_timer_is_rejected() {
    let mut timers = ManualTimers::new();
    let mut debounce = Debounce::new(Duration::from_millis(200));

    debounce.trigger(&mut timers);
    let stale = TimerId(1);
    debounce.trigger(&mut timers);
    assert!(!debounce.take_fired(stale));
}

#[test]
fn cancel_drops_pending_timer() {
    let mut timers = ManualTimers::new();
    let mut debounce = Debounce::new(Duration::from_millis(200));

    debounce.trigger(&mut timers);
    debounce.cancel(&mut timers);
    assert!(!debounce.is_pending());
    assert_eq!(timers.pending(), 0);
    assert!(timers.advance(Duration::from_secs(1)).is_empty());
}
