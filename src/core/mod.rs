pub mod camera;
pub mod clock;
pub mod config;
pub mod error;
pub mod geometry;
pub mod material;
pub mod scene;
pub mod scroll_trigger;
pub mod smooth_scroll;
pub mod sound;
pub mod timeline;
pub mod viewport;

pub use camera::Camera;
pub use clock::Clock;
pub use config::{AudioConfig, SceneConfig, SceneVariant};
pub use error::ScrollError;
pub use geometry::{GeometryData, Topology, Vertex};
pub use material::{Blending, Material, MaterialMaps, TextureId, Uniforms};
pub use scene::{DisposeReport, GeometryId, Node, NodeKind, ResourceSink, Scene};
pub use scroll_trigger::{
    ElementBounds, Rect, ScrollBridge, ScrollerProxy, TriggerConfig, TriggerId, TriggerPosition,
};
pub use smooth_scroll::{ScrollEvent, SmoothScroll};
pub use sound::{average_frequency, hover_state, SoundCommand, SoundToggle};
pub use timeline::{Pose, Timeline, Track};
pub use viewport::Viewport;

// Shader bundled as a string constant
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
