// Host-side tests for scroll-linked progress and the scroll timeline.

use sonic_planet::constants::*;
use sonic_planet::core::scroll_trigger::{progress_between, Edge};
use sonic_planet::core::{
    Camera, ElementBounds, Pose, Rect, SceneConfig, SceneVariant, ScrollBridge, ScrollError,
    ScrollerProxy, TriggerConfig, TriggerPosition,
};

const VIEWPORT_H: f64 = 800.0;

/// Story section 3000px tall, 200px into the content.
struct FakeScroller {
    top: f64,
    story: Option<ElementBounds>,
}

impl FakeScroller {
    fn laid_out() -> Self {
        Self {
            top: 0.0,
            story: Some(ElementBounds {
                top: 200.0,
                height: 3000.0,
            }),
        }
    }
}

impl ScrollerProxy for FakeScroller {
    fn scroll_top(&self) -> f64 {
        self.top
    }

    fn set_scroll_top(&mut self, value: f64) {
        self.top = value;
    }

    fn bounding_rect(&self) -> Rect {
        Rect {
            top: 0.0,
            left: 0.0,
            width: 1200.0,
            height: VIEWPORT_H,
        }
    }

    fn element_bounds(&self, selector: &str) -> Option<ElementBounds> {
        if selector == TRIGGER_SELECTOR {
            self.story
        } else {
            None
        }
    }
}

fn story_trigger(scrub_lag: Option<f32>) -> TriggerConfig {
    TriggerConfig {
        selector: TRIGGER_SELECTOR.to_string(),
        start: "top top".parse().unwrap(),
        end: "bottom bottom".parse().unwrap(),
        scrub_lag,
    }
}

#[test]
fn positions_parse_edges_percent_and_pixels() {
    let p: TriggerPosition = "center 25%".parse().unwrap();
    assert_eq!(p.element, Edge::Center);
    assert_eq!(p.viewport, Edge::Percent(25.0));
    let p: TriggerPosition = "100px  bottom".parse().unwrap();
    assert_eq!(p.element, Edge::Pixels(100.0));
    assert_eq!(p.viewport, Edge::Bottom);
}

#[test]
fn malformed_positions_are_rejected() {
    for bad in ["", "top", "top top top", "middle top", "top 10em"] {
        assert!(
            matches!(bad.parse::<TriggerPosition>(), Err(ScrollError::InvalidPosition(_))),
            "{:?}",
            bad
        );
    }
}

#[test]
fn story_range_spans_top_top_to_bottom_bottom() {
    let mut bridge = ScrollBridge::new(FakeScroller::laid_out());
    let id = bridge.add_trigger(story_trigger(None));
    assert_eq!(bridge.range(id), Some((200.0, 200.0 + 3000.0 - VIEWPORT_H)));
}

#[test]
fn progress_is_clamped_and_linear() {
    assert_eq!(progress_between(-50.0, 0.0, 100.0), 0.0);
    assert_eq!(progress_between(25.0, 0.0, 100.0), 0.25);
    assert_eq!(progress_between(500.0, 0.0, 100.0), 1.0);
    // collapsed range steps at the end
    assert_eq!(progress_between(9.0, 10.0, 10.0), 0.0);
    assert_eq!(progress_between(10.0, 10.0, 10.0), 1.0);
}

#[test]
fn unscrubbed_progress_follows_scroll_directly() {
    let mut bridge = ScrollBridge::new(FakeScroller::laid_out());
    let id = bridge.add_trigger(story_trigger(None));
    bridge.scroll_to(200.0 + 1100.0);
    bridge.update().unwrap();
    assert!((bridge.progress(id).unwrap() - 0.5).abs() < 1e-6);
}

#[test]
fn planet_timeline_spans_camera_dolly_then_rotation() {
    let timeline = SceneVariant::Planet.scroll_timeline(Pose {
        camera_position: Camera::for_scene(1.0).position,
        object_rotation_y: 0.0,
    });

    let start = timeline.sample(0.0);
    assert_eq!(start.camera_position.z, 50.0);
    assert_eq!(start.object_rotation_y, 0.0);

    let end = timeline.sample(1.0);
    assert!((end.camera_position.z - 5.0).abs() < 1e-5);
    assert!((end.object_rotation_y - std::f32::consts::PI).abs() < 1e-6);

    // the dolly finishes before the rotation starts
    let mid = timeline.sample(0.5);
    assert!((mid.camera_position.z - 5.0).abs() < 1e-5);
    assert_eq!(mid.object_rotation_y, 0.0);
}

#[test]
fn timeline_is_monotonic_in_progress() {
    let timeline = SceneVariant::Planet.scroll_timeline(Pose {
        camera_position: glam::Vec3::from(CAMERA_START),
        object_rotation_y: 0.0,
    });
    let mut prev = timeline.sample(0.0);
    for i in 1..=100 {
        let pose = timeline.sample(i as f32 / 100.0);
        assert!(pose.camera_position.z <= prev.camera_position.z);
        assert!(pose.object_rotation_y >= prev.object_rotation_y);
        prev = pose;
    }
}

#[test]
fn particles_timeline_only_moves_the_camera() {
    let timeline = SceneVariant::Particles.scroll_timeline(Pose {
        camera_position: glam::Vec3::from(CAMERA_START),
        object_rotation_y: 0.0,
    });
    let half = timeline.sample(0.5);
    assert!((half.camera_position.z - 27.5).abs() < 1e-4);
    assert_eq!(timeline.sample(1.0).object_rotation_y, 0.0);
    assert_eq!(timeline.sample(f32::NAN), timeline.sample(0.0));
}

#[test]
fn scrubbed_progress_converges_on_the_target() {
    let mut bridge = ScrollBridge::new(FakeScroller::laid_out());
    let id = bridge.add_trigger(story_trigger(Some(SCRUB_LAG_SEC)));
    let (_, end) = bridge.range(id).unwrap();
    bridge.scroll_to(end);
    bridge.update().unwrap();
    assert_eq!(bridge.target_progress(id).unwrap(), 1.0);
    assert_eq!(bridge.progress(id).unwrap(), 0.0);

    bridge.step(1.0 / 60.0);
    let first = bridge.progress(id).unwrap();
    assert!(first > 0.0 && first < 0.1);

    // roughly 63% after one lag period
    for _ in 1..60 {
        bridge.step(1.0 / 60.0);
    }
    let after_lag = bridge.progress(id).unwrap();
    assert!((after_lag - 0.632).abs() < 0.01, "{}", after_lag);

    for _ in 0..1_000 {
        bridge.step(1.0 / 60.0);
    }
    assert_eq!(bridge.progress(id).unwrap(), 1.0);
}

#[test]
fn trigger_added_mid_page_starts_at_current_progress() {
    let mut scroller = FakeScroller::laid_out();
    scroller.top = 10_000.0;
    let mut bridge = ScrollBridge::new(scroller);
    let id = bridge.add_trigger(story_trigger(Some(1.0)));
    assert_eq!(bridge.progress(id).unwrap(), 1.0);
}

#[test]
fn unmeasured_trigger_reports_not_laid_out() {
    let scroller = FakeScroller {
        top: 0.0,
        story: None,
    };
    let mut bridge = ScrollBridge::new(scroller);
    let id = bridge.add_trigger(story_trigger(None));
    assert_eq!(bridge.range(id), None);
    assert!(matches!(bridge.update(), Err(ScrollError::NotLaidOut(_))));
    assert_eq!(bridge.progress(id).unwrap(), 0.0);

    // measured once layout arrives
    bridge.proxy_mut().story = Some(ElementBounds {
        top: 0.0,
        height: 1800.0,
    });
    bridge.refresh().unwrap();
    assert_eq!(bridge.range(id), Some((0.0, 1000.0)));
}

#[test]
fn failed_refresh_keeps_the_previous_range() {
    let mut bridge = ScrollBridge::new(FakeScroller::laid_out());
    let id = bridge.add_trigger(story_trigger(None));
    let before = bridge.range(id);
    bridge.proxy_mut().story = None;
    assert!(bridge.refresh().is_err());
    assert_eq!(bridge.range(id), before);
}

#[test]
fn default_config_uses_story_section() {
    let config = SceneConfig::new(SceneVariant::default()).unwrap();
    assert_eq!(config.variant, SceneVariant::Planet);
    assert_eq!(config.trigger.selector, ".threejs__story");
    assert_eq!(config.trigger.scrub_lag, Some(1.0));
    assert_eq!("particles".parse::<SceneVariant>(), Ok(SceneVariant::Particles));
    assert!("cube".parse::<SceneVariant>().is_err());
}
