use super::*;

#[test]
fn fires_in_due_then_insertion_order() {
    let mut q = TimerQueue::new();
    let _ = q.schedule(TimeMs(50.0), "late");
    let _ = q.schedule(TimeMs(10.0), "first");
    let _ = q.schedule(TimeMs(10.0), "second");

    assert_eq!(q.next_due(), Some(TimeMs(10.0)));
    assert_eq!(q.pop_due(TimeMs(20.0)).map(|(_, p)| p), Some("first"));
    assert_eq!(q.pop_due(TimeMs(20.0)).map(|(_, p)| p), Some("second"));
    assert!(q.pop_due(TimeMs(20.0)).is_none());
    assert_eq!(q.len(), 1);
}

#[test]
fn cancelled_timers_never_fire() {
    let mut q = TimerQueue::new();
    let key = q.schedule(TimeMs(5.0), 1);
    let _ = q.schedule(TimeMs(6.0), 2);
    assert_eq!(key.due(), TimeMs(5.0));
    assert_eq!(q.cancel(key), Some(1));
    assert_eq!(q.cancel(key), None);
    assert_eq!(q.pop_due(TimeMs(100.0)).map(|(_, p)| p), Some(2));
    assert!(q.is_empty());
}
