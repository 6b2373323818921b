//! One mounted scene: renderer, camera, scene graph, sound and the
//! scroll-driven timeline, plus the hooks an external driver calls.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::audio::PositionalAudio;
use crate::core::{
    hover_state, Camera, Clock, Node, NodeKind, Pose, Scene, SceneConfig, ScrollBridge,
    SoundCommand, SoundToggle, Timeline, TriggerId, Viewport,
};
use crate::dom::{self, Listener};
use crate::render::Renderer;
use crate::scroll::DomScroller;

const SOUND_NODE: &str = "sound";

#[derive(Default, Clone, Copy, Debug)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub down: bool,
}

pub struct Experience {
    config: SceneConfig,
    document: web::Document,
    container: web::HtmlElement,
    renderer: Renderer,
    camera: Camera,
    scene: Scene,
    audio: Rc<RefCell<PositionalAudio>>,
    sound_click: Option<Listener>,
    bridge: ScrollBridge<DomScroller>,
    trigger: TriggerId,
    timeline: Timeline,
    clock: Clock,
    mouse: MouseState,
}

impl Experience {
    pub async fn new(config: SceneConfig) -> anyhow::Result<Self> {
        let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
        let container = dom::query_html(&document, &config.container_selector)?;
        let button = dom::query_html(&document, &config.sound_button_selector)?;

        let (width, height) = dom::offset_size(&container);
        let viewport = Viewport::new(width, height, dom::device_pixel_ratio(), config.max_pixel_ratio);

        let canvas: web::HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
            .dyn_into()
            .map_err(|_| anyhow::anyhow!("canvas element is not a canvas"))?;
        set_css_size(&canvas, &viewport);
        container
            .append_child(&canvas)
            .map_err(|e| anyhow::anyhow!("append canvas: {:?}", e))?;

        let mut renderer = Renderer::new(&canvas, viewport).await?;
        let camera = Camera::for_scene(viewport.aspect());

        let variant = config.variant;
        let geometry = variant.geometry(&mut rand::thread_rng());
        let geometry_id = renderer.upload(&geometry);
        let mut object = Node::drawable(
            variant.object_name(),
            variant.node_kind(),
            geometry_id,
            variant.material(),
        );
        // sound follows the object through the graph
        object.add(Node::new(SOUND_NODE, NodeKind::PositionalAudio));
        let mut scene = Scene::new();
        scene.add(object);

        let audio = PositionalAudio::new(&config.audio)?;
        audio.load(&config.audio);
        let audio = Rc::new(RefCell::new(audio));
        let sound_click = wire_sound_button(&button, audio.clone());

        let scroller = DomScroller::new(&document, &config.scroller_selector, config.scroll_lerp)?;
        let mut bridge = ScrollBridge::new(scroller);
        let trigger = bridge.add_trigger(config.trigger.clone());
        let timeline = variant.scroll_timeline(Pose {
            camera_position: camera.position,
            object_rotation_y: 0.0,
        });

        log::info!(
            "[scene] {:?} mounted in {} ({}x{} @{}x)",
            variant,
            config.container_selector,
            width,
            height,
            viewport.pixel_ratio
        );

        Ok(Self {
            config,
            document,
            container,
            renderer,
            camera,
            scene,
            audio,
            sound_click: Some(sound_click),
            bridge,
            trigger,
            timeline,
            clock: Clock::new(),
            mouse: MouseState::default(),
        })
    }

    /// Once per display refresh.
    pub fn update(&mut self) {
        // layout may have changed since the last frame
        if let Err(e) = self.bridge.refresh() {
            log::warn!("[scroll] refresh failed, ignored: {}", e);
        }
        self.on_trigger_refresh();

        if self.bridge.proxy_mut().tick().is_some() {
            self.on_smooth_scroll();
        }

        let dt = self.clock.tick();
        self.bridge.step(dt);
        self.apply_scroll_pose();

        let elapsed = self.clock.elapsed();
        let average = self.audio.borrow_mut().average_frequency();
        let hover = hover_state(average, self.config.variant.hover_divisor());
        if let Some(material) = self
            .scene
            .find_mut(self.config.variant.object_name())
            .and_then(|n| n.material.as_mut())
        {
            material.uniforms.time = elapsed;
            material.uniforms.hover_state = hover;
        }

        self.sync_audio_space();

        match self.renderer.render(&self.scene, &self.camera) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[render] surface lost, reconfiguring");
                self.renderer.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }

    fn on_smooth_scroll(&mut self) {
        if let Err(e) = self.bridge.update() {
            log::warn!("[scroll] resync failed, ignored: {}", e);
        }
    }

    fn on_trigger_refresh(&mut self) {
        if let Err(e) = self.bridge.proxy_mut().update() {
            log::warn!("[scroll] smooth-scroll update failed, ignored: {}", e);
        }
    }

    fn apply_scroll_pose(&mut self) {
        let progress = match self.bridge.progress(self.trigger) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("[scroll] {}", e);
                return;
            }
        };
        let pose = self.timeline.sample(progress);
        self.camera.position = pose.camera_position;
        if let Some(object) = self.scene.find_mut(self.config.variant.object_name()) {
            object.rotation.y = pose.object_rotation_y;
        }
    }

    fn sync_audio_space(&self) {
        let audio = self.audio.borrow();
        audio.set_listener(self.camera.position, self.camera.forward());
        if let Some(pos) = self.scene.world_position_of(SOUND_NODE) {
            audio.set_source_position(pos);
        }
    }

    /// Call on every viewport resize.
    pub fn on_resize(&mut self) {
        let (width, height) = dom::offset_size(&self.container);
        let viewport = Viewport::new(
            width,
            height,
            dom::device_pixel_ratio(),
            self.config.max_pixel_ratio,
        );
        self.renderer.set_viewport(viewport);
        viewport.apply_to_camera(&mut self.camera);
        if let Ok(Some(canvas)) = self.container.query_selector("canvas") {
            if let Some(canvas) = canvas.dyn_ref::<web::HtmlCanvasElement>() {
                set_css_size(canvas, &viewport);
            }
        }
        log::debug!("[scene] resized to {}x{} @{}x", width, height, viewport.pixel_ratio);
    }

    /// Tear everything down. Meant to run once.
    pub fn destroy(&mut self) {
        dom::remove_first(&self.document, &self.config.scrollbar_selector);
        let scroller = self.bridge.proxy_mut();
        scroller.destroy();
        scroller.stop();

        if let Some(click) = self.sound_click.take() {
            click.detach();
        }
        self.audio.borrow_mut().stop();

        let report = self.scene.dispose(&mut self.renderer);
        log::info!(
            "[scene] disposed {} nodes, {} geometries, {} textures",
            report.nodes,
            report.geometries,
            report.textures
        );
    }

    pub fn on_mouse_down(&mut self, x: f32, y: f32) {
        self.mouse = MouseState { x, y, down: true };
    }

    pub fn on_mouse_up(&mut self, x: f32, y: f32) {
        self.mouse = MouseState { x, y, down: false };
    }

    pub fn on_mouse_move(&mut self, x: f32, y: f32) {
        self.mouse.x = x;
        self.mouse.y = y;
    }

    /// Programmatic scroll, applied without easing.
    pub fn scroll_to(&mut self, y: f64) {
        self.bridge.scroll_to(y);
    }
}

fn set_css_size(canvas: &web::HtmlCanvasElement, viewport: &Viewport) {
    let (w, h) = viewport.backing_size();
    canvas.set_width(w);
    canvas.set_height(h);
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", viewport.width));
    _ = style.set_property("height", &format!("{}px", viewport.height));
}

/// Flip playback on every click; no debouncing.
fn wire_sound_button(button: &web::HtmlElement, audio: Rc<RefCell<PositionalAudio>>) -> Listener {
    let mut toggle = SoundToggle::new();
    let label_target = button.clone();
    Listener::attach(button.as_ref(), "click", move |_| {
        match toggle.toggle() {
            SoundCommand::Play => audio.borrow_mut().play(),
            SoundCommand::Stop => audio.borrow_mut().stop(),
        }
        label_target.set_inner_html(toggle.label());
    })
}
