use fnv::FnvHashMap;
use wgpu::util::DeviceExt;
use web_sys as web;

use crate::constants::MSAA_SAMPLES;
use crate::core::{
    Camera, GeometryData, GeometryId, Material, ResourceSink, Scene, TextureId, Topology, Viewport,
};

mod helpers;
mod targets;

use helpers::{make_scene_pipeline, PipelineKey};
use targets::RenderTargets;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    time: f32,
    hover_state: f32,
    point_mode: f32,
    _pad: f32,
    color: [f32; 4],
    color1: [f32; 4],
}

impl SceneUniforms {
    fn new(view_proj: glam::Mat4, model: glam::Mat4, topology: Topology, material: &Material) -> Self {
        let u = &material.uniforms;
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            time: u.time,
            hover_state: u.hover_state,
            point_mode: if topology == Topology::Points { 1.0 } else { 0.0 },
            _pad: 0.0,
            color: [u.color[0], u.color[1], u.color[2], 1.0],
            color1: [u.color1[0], u.color1[1], u.color1[2], 1.0],
        }
    }
}

/// Buffers for one uploaded geometry. Each geometry is drawn by a single
/// node, so the uniform buffer lives alongside the vertices.
struct GpuMesh {
    topology: Topology,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    index_buffer: Option<(wgpu::Buffer, u32)>,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl GpuMesh {
    fn destroy(&self) {
        self.vertex_buffer.destroy();
        if let Some((ib, _)) = &self.index_buffer {
            ib.destroy();
        }
        self.uniform_buffer.destroy();
    }
}

pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sample_count: u32,
    targets: RenderTargets,

    shader: wgpu::ShaderModule,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    pipelines: FnvHashMap<PipelineKey, wgpu::RenderPipeline>,

    meshes: FnvHashMap<GeometryId, GpuMesh>,
    next_geometry: u32,

    clear_color: wgpu::Color,
}

impl Renderer {
    pub async fn new(canvas: &web::HtmlCanvasElement, viewport: Viewport) -> anyhow::Result<Self> {
        let (width, height) = viewport.backing_size();
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU/WebGL adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    #[cfg(not(feature = "webgl"))]
                    required_limits: wgpu::Limits::default(),
                    #[cfg(feature = "webgl")]
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // transparent canvas so the page shows through
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sample_count = if adapter
            .get_texture_format_features(format)
            .flags
            .sample_count_supported(MSAA_SAMPLES)
        {
            MSAA_SAMPLES
        } else {
            1
        };
        let targets = RenderTargets::new(&device, format, width, height, sample_count);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        log::info!(
            "[render] surface {}x{} format={:?} msaa={}",
            width,
            height,
            format,
            sample_count
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            sample_count,
            targets,
            shader,
            bind_group_layout,
            pipeline_layout,
            pipelines: FnvHashMap::default(),
            meshes: FnvHashMap::default(),
            next_geometry: 0,
            clear_color: wgpu::Color::TRANSPARENT,
        })
    }

    /// Upload geometry once; the returned id is what scene nodes hold.
    pub fn upload(&mut self, geometry: &GeometryData) -> GeometryId {
        let id = GeometryId(self.next_geometry);
        self.next_geometry += 1;

        let vertices = geometry.vertices();
        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("scene_vertices"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = geometry.indices().map(|indices| {
            let buf = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("scene_indices"),
                    contents: bytemuck::cast_slice(indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
            (buf, indices.len() as u32)
        });
        let uniform_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        log::info!(
            "[render] uploaded {:?}: {} vertices, {} indices",
            id,
            vertices.len(),
            index_buffer.as_ref().map_or(0, |(_, n)| *n)
        );
        self.meshes.insert(
            id,
            GpuMesh {
                topology: geometry.topology(),
                vertex_buffer,
                vertex_count: vertices.len() as u32,
                index_buffer,
                uniform_buffer,
                bind_group,
            },
        );
        id
    }

    /// Resize the drawing buffer to the viewport's backing size.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        let (width, height) = viewport.backing_size();
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.targets.destroy();
        self.targets = RenderTargets::new(
            &self.device,
            self.config.format,
            width,
            height,
            self.sample_count,
        );
    }

    fn ensure_pipeline(&mut self, key: PipelineKey) {
        if self.pipelines.contains_key(&key) {
            return;
        }
        let pipeline = make_scene_pipeline(
            &self.device,
            &self.pipeline_layout,
            &self.shader,
            self.config.format,
            self.sample_count,
            key,
        );
        self.pipelines.insert(key, pipeline);
    }

    pub fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), wgpu::SurfaceError> {
        let view_proj = camera.view_projection();
        let drawables = scene.drawables();

        let mut keys = Vec::with_capacity(drawables.len());
        for d in &drawables {
            let Some(mesh) = self.meshes.get(&d.geometry) else {
                log::trace!("[render] {:?} has no GPU buffers, skipped", d.geometry);
                keys.push(None);
                continue;
            };
            let key = PipelineKey {
                topology: mesh.topology,
                blending: d.material.blending,
                depth_test: d.material.depth_test,
                depth_write: d.material.depth_write,
            };
            let uniforms = SceneUniforms::new(view_proj, d.world, mesh.topology, d.material);
            self.queue
                .write_buffer(&mesh.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
            keys.push(Some(key));
        }
        for key in keys.iter().flatten() {
            self.ensure_pipeline(*key);
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let (color_view, resolve_target) = match &self.targets.msaa {
                Some((_, msaa_view)) => (msaa_view, Some(&view)),
                None => (&view, None),
            };
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            for (d, key) in drawables.iter().zip(&keys) {
                let (Some(key), Some(mesh)) = (key, self.meshes.get(&d.geometry)) else {
                    continue;
                };
                let Some(pipeline) = self.pipelines.get(key) else {
                    continue;
                };
                rpass.set_pipeline(pipeline);
                rpass.set_bind_group(0, &mesh.bind_group, &[]);
                rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                match &mesh.index_buffer {
                    Some((ib, count)) => {
                        rpass.set_index_buffer(ib.slice(..), wgpu::IndexFormat::Uint32);
                        rpass.draw_indexed(0..*count, 0, 0..1);
                    }
                    None => rpass.draw(0..mesh.vertex_count, 0..1),
                }
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Reapply the surface configuration after a lost or outdated frame.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }
}

impl ResourceSink for Renderer {
    fn release_geometry(&mut self, id: GeometryId) {
        match self.meshes.remove(&id) {
            Some(mesh) => mesh.destroy(),
            None => log::debug!("[render] {:?} already released", id),
        }
    }

    fn release_texture(&mut self, id: TextureId) {
        // scene materials never allocate textures on the GPU
        log::debug!("[render] {:?} has no GPU allocation", id);
    }
}
