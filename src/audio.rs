use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use crate::core::{average_frequency, AudioConfig};

/// Filled in once the asset has been fetched and decoded.
#[derive(Default)]
struct LoadedSound {
    buffer: Option<web::AudioBuffer>,
    looped: bool,
}

/// Positional sound with an analyser tap.
///
/// Graph: `source -> gain (volume) -> panner -> destination`, with the
/// panner also feeding the analyser.
pub struct PositionalAudio {
    ctx: web::AudioContext,
    gain: web::GainNode,
    panner: web::PannerNode,
    analyser: web::AnalyserNode,
    bins: Vec<u8>,
    loaded: Rc<RefCell<LoadedSound>>,
    source: Option<web::AudioBufferSourceNode>,
}

fn js_err(label: &str, e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!("{} error: {:?}", label, e)
}

impl PositionalAudio {
    pub fn new(config: &AudioConfig) -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(|e| js_err("AudioContext", e))?;

        let gain = web::GainNode::new(&ctx).map_err(|e| js_err("GainNode", e))?;
        let panner = web::PannerNode::new(&ctx).map_err(|e| js_err("PannerNode", e))?;
        panner.set_panning_model(web::PanningModelType::Hrtf);
        panner.set_distance_model(web::DistanceModelType::Inverse);
        let analyser = web::AnalyserNode::new(&ctx).map_err(|e| js_err("AnalyserNode", e))?;
        analyser.set_fft_size(config.fft_size);

        _ = gain.connect_with_audio_node(&panner);
        _ = panner.connect_with_audio_node(&ctx.destination());
        _ = panner.connect_with_audio_node(&analyser);

        let bins = vec![0u8; analyser.frequency_bin_count() as usize];
        Ok(Self {
            ctx,
            gain,
            panner,
            analyser,
            bins,
            loaded: Rc::new(RefCell::new(LoadedSound::default())),
            source: None,
        })
    }

    /// Fetch and decode the asset in the background. Playback settings are
    /// applied when decoding completes; a failed load leaves the sound silent.
    pub fn load(&self, config: &AudioConfig) {
        let ctx = self.ctx.clone();
        let gain = self.gain.clone();
        let panner = self.panner.clone();
        let loaded = self.loaded.clone();
        let config = config.clone();
        spawn_local(async move {
            match fetch_and_decode(&ctx, &config.url).await {
                Ok(buffer) => {
                    gain.gain().set_value(config.volume);
                    panner.set_ref_distance(config.ref_distance);
                    let mut l = loaded.borrow_mut();
                    l.looped = config.looped;
                    l.buffer = Some(buffer);
                    log::info!("[audio] loaded {}", config.url);
                }
                Err(e) => log::error!("[audio] {} failed to load: {:#}", config.url, e),
            }
        });
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.borrow().buffer.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.source.is_some()
    }

    /// Start looping playback. Sources are one-shot, so each call builds a
    /// fresh one. Does nothing until the asset has loaded.
    pub fn play(&mut self) {
        if self.source.is_some() {
            log::warn!("[audio] already playing");
            return;
        }
        let loaded = self.loaded.borrow();
        let Some(buffer) = loaded.buffer.as_ref() else {
            log::warn!("[audio] play ignored: sound not loaded yet");
            return;
        };
        // autoplay policy keeps the context suspended until a user gesture
        _ = self.ctx.resume();
        let src = match web::AudioBufferSourceNode::new(&self.ctx) {
            Ok(s) => s,
            Err(e) => {
                log::error!("AudioBufferSourceNode error: {:?}", e);
                return;
            }
        };
        src.set_buffer(Some(buffer));
        src.set_loop(loaded.looped);
        _ = src.connect_with_audio_node(&self.gain);
        if let Err(e) = src.start() {
            log::error!("[audio] start failed: {:?}", e);
            return;
        }
        drop(loaded);
        self.source = Some(src);
    }

    pub fn stop(&mut self) {
        if let Some(src) = self.source.take() {
            _ = src.stop();
            _ = src.disconnect();
        }
    }

    /// Mean byte frequency magnitude; zero while nothing is playing.
    pub fn average_frequency(&mut self) -> f32 {
        let bins = self.analyser.frequency_bin_count() as usize;
        if self.bins.len() != bins {
            self.bins.resize(bins, 0);
        }
        self.analyser.get_byte_frequency_data(&mut self.bins);
        average_frequency(&self.bins)
    }

    pub fn set_source_position(&self, pos: Vec3) {
        self.panner.position_x().set_value(pos.x);
        self.panner.position_y().set_value(pos.y);
        self.panner.position_z().set_value(pos.z);
    }

    /// Keep the listener on the camera.
    pub fn set_listener(&self, eye: Vec3, forward: Vec3) {
        let listener = self.ctx.listener();
        listener.set_position(eye.x as f64, eye.y as f64, eye.z as f64);
        let _ = listener.set_orientation(
            forward.x as f64,
            forward.y as f64,
            forward.z as f64,
            0.0,
            1.0,
            0.0,
        );
    }
}

async fn fetch_and_decode(ctx: &web::AudioContext, url: &str) -> anyhow::Result<web::AudioBuffer> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| js_err("fetch", e))?
        .dyn_into()
        .map_err(|e| js_err("Response", e))?;
    if !resp.ok() {
        anyhow::bail!("HTTP {}", resp.status());
    }
    let bytes: js_sys::ArrayBuffer = JsFuture::from(resp.array_buffer().map_err(|e| js_err("body", e))?)
        .await
        .map_err(|e| js_err("body", e))?
        .dyn_into()
        .map_err(|e| js_err("ArrayBuffer", e))?;
    let decoded = JsFuture::from(
        ctx.decode_audio_data(&bytes)
            .map_err(|e| js_err("decodeAudioData", e))?,
    )
    .await
    .map_err(|e| js_err("decodeAudioData", e))?;
    decoded
        .dyn_into::<web::AudioBuffer>()
        .map_err(|e| js_err("AudioBuffer", e))
}
