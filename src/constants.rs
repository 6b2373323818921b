// Scene tuning constants shared by the core logic and the web frontend.

// DOM
pub const CONTAINER_SELECTOR: &str = ".threejs__canvas__container";
pub const SOUND_BUTTON_SELECTOR: &str = ".Threejs__intro__sound";
pub const SCROLLER_SELECTOR: &str = ".threejs";
pub const TRIGGER_SELECTOR: &str = ".threejs__story";
pub const SCROLLBAR_SELECTOR: &str = ".c-scrollbar";

pub const SOUND_ON_LABEL: &str = "Click to turn Sound On";
pub const SOUND_OFF_LABEL: &str = "Click to turn Sound Off";

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_START: [f32; 3] = [0.0, 0.0, 50.0];
pub const CAMERA_END: [f32; 3] = [0.0, 0.0, 5.0]; // where the scroll timeline lands

// Renderer
pub const MAX_PIXEL_RATIO: f64 = 2.0;
pub const MSAA_SAMPLES: u32 = 4;

// Planet
pub const PLANET_RADIUS: f32 = 1.0;
pub const PLANET_SEGMENTS: u32 = 50;
pub const PLANET_END_ROTATION_Y: f32 = std::f32::consts::PI;

// Particle field
pub const PARTICLE_COUNT: usize = 100_000;
pub const PARTICLE_SPREAD: f32 = 10.0; // full edge length of the cube

// Palette (sRGB hex)
pub const COLOR_A: u32 = 0x31C48D;
pub const COLOR_B: u32 = 0x6C63FF;

// Audio
pub const SOUND_URL: &str = "sounds/sound.mp3";
pub const FFT_SIZE: u32 = 2048;
pub const SOUND_VOLUME: f32 = 1.0;
pub const SOUND_REF_DISTANCE: f64 = 1.0;
pub const PLANET_HOVER_DIVISOR: f32 = 128.0;
pub const PARTICLES_HOVER_DIVISOR: f32 = 32.0;

// Scroll
pub const SMOOTH_SCROLL_LERP: f64 = 0.1;
pub const SCROLL_SETTLE_EPSILON: f64 = 0.1; // px; below this the scroller snaps to target
pub const SCRUB_LAG_SEC: f32 = 1.0;
pub const TRIGGER_START: &str = "top top";
pub const TRIGGER_END: &str = "bottom bottom";
