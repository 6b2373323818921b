use super::helpers::{create_color_texture, create_depth_texture};

/// Size-dependent attachments, rebuilt whenever the surface is resized.
pub struct RenderTargets {
    /// Multisampled color target resolved into the swapchain; `None` without MSAA.
    pub msaa: Option<(wgpu::Texture, wgpu::TextureView)>,
    pub depth_tex: wgpu::Texture,
    pub depth_view: wgpu::TextureView,
}

impl RenderTargets {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        sample_count: u32,
    ) -> Self {
        let msaa = (sample_count > 1)
            .then(|| create_color_texture(device, "msaa_color", width, height, format, sample_count));
        let (depth_tex, depth_view) = create_depth_texture(device, width, height, sample_count);
        Self {
            msaa,
            depth_tex,
            depth_view,
        }
    }

    pub fn destroy(&self) {
        if let Some((tex, _)) = &self.msaa {
            tex.destroy();
        }
        self.depth_tex.destroy();
    }
}
