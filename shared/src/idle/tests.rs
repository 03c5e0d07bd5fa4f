use super::*;
use crate::testing::ManualScheduler;

const T: Duration = Duration::from_secs(180);
const SECOND: Duration = Duration::from_secs(1);

fn monitor() -> (IdleMonitor<ManualScheduler>, ManualScheduler, Rc<Cell<u32>>) {
    let scheduler = ManualScheduler::new();
    let fired = Rc::new(Cell::new(0));
    let counter = fired.clone();
    let monitor = IdleMonitor::new(scheduler.clone(), T, move || {
        counter.set(counter.get() + 1)
    });
    (monitor, scheduler, fired)
}

#[test]
fn test_fires_after_quiet_interval() {
    let (monitor, clock, fired) = monitor();
    monitor.start();

    clock.advance(T - SECOND);
    assert_eq!(fired.get(), 0);
    clock.advance(SECOND);
    assert_eq!(fired.get(), 1);
    assert_eq!(monitor.state(), IdleState::Fired);
}

#[test]
fn test_fires_exactly_once_per_idle_period() {
    let (monitor, clock, fired) = monitor();
    monitor.start();
    clock.advance(T * 5);
    assert_eq!(fired.get(), 1);

    // 锁定期间的输入不会重新计时
    monitor.activity(ActivityEvent::KeyDown);
    clock.advance(T * 2);
    assert_eq!(fired.get(), 1);

    // 解锁后重新开始
    monitor.start();
    clock.advance(T);
    assert_eq!(fired.get(), 2);
}

#[test]
fn test_activity_rearms_countdown() {
    let (monitor, clock, fired) = monitor();
    monitor.start();

    for event in ActivityEvent::ALL {
        clock.advance(T - SECOND);
        monitor.activity(event);
    }
    assert_eq!(fired.get(), 0);

    clock.advance(T);
    assert_eq!(fired.get(), 1);
}

#[test]
fn test_only_one_countdown_pending() {
    let (monitor, clock, _) = monitor();
    monitor.start();
    for _ in 0..10 {
        monitor.activity(ActivityEvent::PointerMove);
    }
    assert_eq!(clock.pending(), 1);
    monitor.start();
    assert_eq!(clock.pending(), 1);
}

#[test]
fn test_stop_leaves_no_timer() {
    let (monitor, clock, fired) = monitor();
    monitor.start();
    monitor.stop();
    assert_eq!(clock.pending(), 0);

    monitor.activity(ActivityEvent::Click);
    assert_eq!(clock.pending(), 0);
    clock.advance(T * 3);
    assert_eq!(fired.get(), 0);
    assert_eq!(monitor.state(), IdleState::Stopped);
}

#[test]
fn test_set_timeout_restarts_countdown() {
    let (monitor, clock, fired) = monitor();
    monitor.start();
    clock.advance(SECOND * 30);
    monitor.set_timeout(SECOND * 60);
    clock.advance(SECOND * 59);
    assert_eq!(fired.get(), 0);
    clock.advance(SECOND);
    assert_eq!(fired.get(), 1);
}

#[test]
fn test_dropped_monitor_callback_is_inert() {
    let (monitor, clock, fired) = monitor();
    monitor.start();
    drop(monitor);
    clock.advance(T);
    assert_eq!(fired.get(), 0);
}

#[test]
fn test_keyboard_activity_listens_for_keydown() {
    assert_eq!(ActivityEvent::KeyDown.dom_name(), "keydown");
    let names: Vec<&str> = ActivityEvent::ALL.iter().map(|e| e.dom_name()).collect();
    assert!(!names.contains(&"keypress"));
    assert_eq!(names.len(), 6);
}
