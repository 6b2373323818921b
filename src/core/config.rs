//! Scene configuration.
//!
//! The variant is chosen once, when the scene is built. Defaults come from
//! `constants.rs`.

use glam::Vec3;
use rand::Rng;
use std::str::FromStr;

use super::error::ScrollError;
use super::geometry::{self, GeometryData};
use super::material::Material;
use super::scene::NodeKind;
use super::scroll_trigger::TriggerConfig;
use super::timeline::{Pose, Timeline, Track};
use crate::constants::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SceneVariant {
    /// Shader-lit sphere that turns half a revolution while scrolling.
    #[default]
    Planet,
    /// Additive point cloud; only the camera moves.
    Particles,
}

impl SceneVariant {
    pub fn object_name(self) -> &'static str {
        match self {
            SceneVariant::Planet => "planet",
            SceneVariant::Particles => "stars",
        }
    }

    pub fn node_kind(self) -> NodeKind {
        match self {
            SceneVariant::Planet => NodeKind::Mesh,
            SceneVariant::Particles => NodeKind::Points,
        }
    }

    pub fn material(self) -> Material {
        match self {
            SceneVariant::Planet => Material::planet(),
            SceneVariant::Particles => Material::particles(),
        }
    }

    pub fn geometry<R: Rng + ?Sized>(self, rng: &mut R) -> GeometryData {
        match self {
            SceneVariant::Planet => {
                geometry::sphere(PLANET_RADIUS, PLANET_SEGMENTS, PLANET_SEGMENTS, rng)
            }
            SceneVariant::Particles => geometry::particles(PARTICLE_COUNT, PARTICLE_SPREAD, rng),
        }
    }

    /// Divisor turning average analyser magnitude into `uHoverState`. The
    /// particle field is dimmer per point, so it reacts more strongly.
    pub fn hover_divisor(self) -> f32 {
        match self {
            SceneVariant::Planet => PLANET_HOVER_DIVISOR,
            SceneVariant::Particles => PARTICLES_HOVER_DIVISOR,
        }
    }

    /// Camera dolly toward the object; the planet additionally rotates.
    pub fn scroll_timeline(self, initial: Pose) -> Timeline {
        let timeline = Timeline::new(initial).to(Track::CameraPosition(Vec3::from(CAMERA_END)));
        match self {
            SceneVariant::Planet => timeline.to(Track::ObjectRotationY(PLANET_END_ROTATION_Y)),
            SceneVariant::Particles => timeline,
        }
    }
}

impl FromStr for SceneVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planet" => Ok(SceneVariant::Planet),
            "particles" | "stars" => Ok(SceneVariant::Particles),
            other => Err(format!("unknown scene variant '{}'", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AudioConfig {
    pub url: String,
    pub fft_size: u32,
    pub volume: f32,
    pub ref_distance: f64,
    pub looped: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            url: SOUND_URL.to_string(),
            fft_size: FFT_SIZE,
            volume: SOUND_VOLUME,
            ref_distance: SOUND_REF_DISTANCE,
            looped: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub variant: SceneVariant,
    pub container_selector: String,
    pub sound_button_selector: String,
    pub scroller_selector: String,
    pub scrollbar_selector: String,
    pub trigger: TriggerConfig,
    pub audio: AudioConfig,
    pub scroll_lerp: f64,
    pub max_pixel_ratio: f64,
}

impl SceneConfig {
    pub fn new(variant: SceneVariant) -> Result<Self, ScrollError> {
        Ok(Self {
            variant,
            container_selector: CONTAINER_SELECTOR.to_string(),
            sound_button_selector: SOUND_BUTTON_SELECTOR.to_string(),
            scroller_selector: SCROLLER_SELECTOR.to_string(),
            scrollbar_selector: SCROLLBAR_SELECTOR.to_string(),
            trigger: TriggerConfig {
                selector: TRIGGER_SELECTOR.to_string(),
                start: TRIGGER_START.parse()?,
                end: TRIGGER_END.parse()?,
                scrub_lag: Some(SCRUB_LAG_SEC),
            },
            audio: AudioConfig::default(),
            scroll_lerp: SMOOTH_SCROLL_LERP,
            max_pixel_ratio: MAX_PIXEL_RATIO,
        })
    }
}
