// Host-side tests for audio-level math and the sound button state.

use sonic_planet::constants::*;
use sonic_planet::core::{average_frequency, hover_state, SceneVariant, SoundCommand, SoundToggle};

#[test]
fn button_toggles_between_play_and_stop() {
    let mut toggle = SoundToggle::new();
    assert!(!toggle.is_on());
    assert_eq!(toggle.label(), SOUND_ON_LABEL);

    assert_eq!(toggle.toggle(), SoundCommand::Play);
    assert_eq!(toggle.label(), "Click to turn Sound Off");

    assert_eq!(toggle.toggle(), SoundCommand::Stop);
    assert!(!toggle.is_on());
    assert_eq!(toggle.label(), "Click to turn Sound On");
}

#[test]
fn average_of_analyser_bins() {
    assert_eq!(average_frequency(&[]), 0.0);
    assert_eq!(average_frequency(&[0; 1024]), 0.0);
    assert_eq!(average_frequency(&[255; 1024]), 255.0);
    assert_eq!(average_frequency(&[10, 20, 30, 40]), 25.0);
}

#[test]
fn hover_state_scales_by_variant() {
    let avg = 64.0;
    assert_eq!(hover_state(avg, SceneVariant::Planet.hover_divisor()), 0.5);
    assert_eq!(hover_state(avg, SceneVariant::Particles.hover_divisor()), 2.0);
    assert_eq!(hover_state(avg, 0.0), 0.0);
}

#[test]
fn silence_means_no_hover() {
    let avg = average_frequency(&[0; 16]);
    assert_eq!(hover_state(avg, PLANET_HOVER_DIVISOR), 0.0);
}
