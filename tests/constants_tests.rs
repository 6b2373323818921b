// Host-side tests for constants and their relationships.

use sonic_planet::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_path_moves_toward_the_object() {
    assert!(CAMERA_START[2] > CAMERA_END[2]);
    assert!(CAMERA_END[2] > PLANET_RADIUS);
    assert!(CAMERA_NEAR > 0.0 && CAMERA_NEAR < CAMERA_FAR);
    assert!(CAMERA_START[2] < CAMERA_FAR);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn scroll_tuning_is_sane() {
    assert!(SMOOTH_SCROLL_LERP > 0.0 && SMOOTH_SCROLL_LERP <= 1.0);
    assert!(SCROLL_SETTLE_EPSILON > 0.0);
    assert!(SCRUB_LAG_SEC > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn audio_settings_are_valid_for_webaudio() {
    // AnalyserNode requires a power of two in [32, 32768]
    assert!(FFT_SIZE.is_power_of_two());
    assert!((32..=32768).contains(&FFT_SIZE));
    assert!(PLANET_HOVER_DIVISOR > 0.0 && PARTICLES_HOVER_DIVISOR > 0.0);
    assert!(PARTICLES_HOVER_DIVISOR < PLANET_HOVER_DIVISOR);
}

#[test]
fn selectors_are_class_selectors() {
    for sel in [
        CONTAINER_SELECTOR,
        SOUND_BUTTON_SELECTOR,
        SCROLLER_SELECTOR,
        TRIGGER_SELECTOR,
        SCROLLBAR_SELECTOR,
    ] {
        assert!(sel.starts_with('.'), "{}", sel);
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn pixel_ratio_and_msaa() {
    assert!(MAX_PIXEL_RATIO >= 1.0);
    assert!(MSAA_SAMPLES == 1 || MSAA_SAMPLES == 4);
}
