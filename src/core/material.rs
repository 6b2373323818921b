use crate::constants::{COLOR_A, COLOR_B};

/// Handle to a texture owned by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Blending {
    Normal,
    Additive,
}

/// Values pushed into `scene.wgsl` every frame.
///
/// Mirrors the shader contract `uTime`, `uHoverState`, `uColor`, `uColor1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Uniforms {
    pub time: f32,
    pub hover_state: f32,
    pub color: [f32; 3],
    pub color1: [f32; 3],
}

impl Default for Uniforms {
    fn default() -> Self {
        Self {
            time: 0.0,
            hover_state: 0.0,
            color: srgb_hex_to_linear(COLOR_A),
            color1: srgb_hex_to_linear(COLOR_B),
        }
    }
}

/// Optional texture slots a material may carry. Only present slots are
/// released on teardown.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialMaps {
    pub map: Option<TextureId>,
    pub alpha_map: Option<TextureId>,
    pub bump_map: Option<TextureId>,
    pub normal_map: Option<TextureId>,
    pub env_map: Option<TextureId>,
}

impl MaterialMaps {
    pub fn present(&self) -> impl Iterator<Item = TextureId> + '_ {
        [
            self.map,
            self.alpha_map,
            self.bump_map,
            self.normal_map,
            self.env_map,
        ]
        .into_iter()
        .flatten()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub uniforms: Uniforms,
    pub blending: Blending,
    pub transparent: bool,
    pub depth_test: bool,
    pub depth_write: bool,
    pub double_sided: bool,
    pub maps: MaterialMaps,
}

impl Material {
    /// Opaque, double-sided, depth tested.
    pub fn planet() -> Self {
        Self {
            uniforms: Uniforms::default(),
            blending: Blending::Normal,
            transparent: false,
            depth_test: true,
            depth_write: true,
            double_sided: true,
            maps: MaterialMaps::default(),
        }
    }

    /// Additive and depth-less so overlapping particles accumulate brightness.
    pub fn particles() -> Self {
        Self {
            uniforms: Uniforms::default(),
            blending: Blending::Additive,
            transparent: true,
            depth_test: false,
            depth_write: false,
            double_sided: true,
            maps: MaterialMaps::default(),
        }
    }

    /// Hand every present texture to `release` and leave the slots empty.
    pub(crate) fn release_maps(&mut self, mut release: impl FnMut(TextureId)) -> usize {
        let ids: Vec<TextureId> = self.maps.present().collect();
        ids.iter().copied().for_each(&mut release);
        self.maps.clear();
        ids.len()
    }
}

/// Convert a `0xRRGGBB` sRGB color to linear RGB.
pub fn srgb_hex_to_linear(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xFF) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(16), channel(8), channel(0)]
}
