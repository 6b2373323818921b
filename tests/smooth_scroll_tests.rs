// Host-side tests for the inertial scroller.

use sonic_planet::constants::{SCROLL_SETTLE_EPSILON, SMOOTH_SCROLL_LERP};
use sonic_planet::core::smooth_scroll::Direction;
use sonic_planet::core::{ScrollError, SmoothScroll};

fn scroller(content: f64, viewport: f64) -> SmoothScroll {
    let mut s = SmoothScroll::new(SMOOTH_SCROLL_LERP, SCROLL_SETTLE_EPSILON);
    s.update(content, viewport).unwrap();
    s
}

#[test]
fn limit_is_content_minus_viewport() {
    assert_eq!(scroller(3000.0, 800.0).limit(), 2200.0);
    assert_eq!(scroller(500.0, 800.0).limit(), 0.0);
}

#[test]
fn target_is_clamped_to_the_range() {
    let mut s = scroller(3000.0, 800.0);
    s.add_delta(-100.0);
    assert_eq!(s.target(), 0.0);
    s.add_delta(10_000.0);
    assert_eq!(s.target(), 2200.0);
    s.add_delta(f64::NAN);
    assert_eq!(s.target(), 2200.0);
}

#[test]
fn offset_eases_toward_the_target() {
    let mut s = scroller(3000.0, 800.0);
    s.add_delta(100.0);
    let ev = s.tick().expect("moved");
    assert!((ev.scroll - 10.0).abs() < 1e-9);
    assert_eq!(ev.direction, Direction::Down);
    assert_eq!(ev.limit, 2200.0);

    let mut last = ev.scroll;
    while let Some(ev) = s.tick() {
        assert!(ev.scroll > last);
        last = ev.scroll;
    }
    assert_eq!(s.scroll(), 100.0);
    assert!(s.tick().is_none());
}

#[test]
fn scroll_to_jumps_without_easing() {
    let mut s = scroller(3000.0, 800.0);
    s.scroll_to(1500.0);
    assert_eq!(s.scroll(), 1500.0);
    let ev = s.tick().expect("jump is reported");
    assert_eq!(ev.delta, 1500.0);
    s.scroll_to(0.0);
    assert_eq!(s.tick().map(|e| e.direction), Some(Direction::Up));
}

#[test]
fn stopped_scroller_ignores_input() {
    let mut s = scroller(3000.0, 800.0);
    s.add_delta(200.0);
    s.tick();
    s.stop();
    let frozen = s.scroll();
    assert_eq!(s.target(), frozen);
    s.add_delta(500.0);
    assert!(s.tick().is_none());
    assert_eq!(s.scroll(), frozen);

    s.start();
    s.add_delta(500.0);
    assert!(s.tick().is_some());
}

#[test]
fn shrinking_content_pulls_the_offset_back() {
    let mut s = scroller(3000.0, 800.0);
    s.scroll_to(2000.0);
    s.update(1800.0, 800.0).unwrap();
    assert_eq!(s.scroll(), 1000.0);
    assert_eq!(s.target(), 1000.0);
}

#[test]
fn destroyed_scroller_rejects_updates() {
    let mut s = scroller(3000.0, 800.0);
    s.destroy();
    assert!(s.is_destroyed());
    assert_eq!(s.update(3000.0, 800.0), Err(ScrollError::Destroyed));
    s.add_delta(100.0);
    assert!(s.tick().is_none());
}
