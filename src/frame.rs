//! JS-facing handle and the optional requestAnimationFrame driver.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::core::{SceneConfig, SceneVariant};
use crate::dom::Listener;
use crate::experience::Experience;

struct Driver {
    running: Rc<Cell<bool>>,
    resize: Listener,
}

/// A mounted scene. Either drive it from JS (`update`, `onResize`) or let
/// `mount` run the loop.
#[wasm_bindgen]
pub struct SceneHandle {
    inner: Rc<RefCell<Experience>>,
    driver: Option<Driver>,
}

#[wasm_bindgen]
impl SceneHandle {
    pub fn update(&self) {
        self.inner.borrow_mut().update();
    }

    #[wasm_bindgen(js_name = onResize)]
    pub fn on_resize(&self) {
        self.inner.borrow_mut().on_resize();
    }

    pub fn destroy(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.running.set(false);
            driver.resize.detach();
        }
        self.inner.borrow_mut().destroy();
    }

    #[wasm_bindgen(js_name = onMouseDown)]
    pub fn on_mouse_down(&self, x: f32, y: f32) {
        self.inner.borrow_mut().on_mouse_down(x, y);
    }

    #[wasm_bindgen(js_name = onMouseUp)]
    pub fn on_mouse_up(&self, x: f32, y: f32) {
        self.inner.borrow_mut().on_mouse_up(x, y);
    }

    #[wasm_bindgen(js_name = onMouseMove)]
    pub fn on_mouse_move(&self, x: f32, y: f32) {
        self.inner.borrow_mut().on_mouse_move(x, y);
    }

    #[wasm_bindgen(js_name = scrollTo)]
    pub fn scroll_to(&self, y: f64) {
        self.inner.borrow_mut().scroll_to(y);
    }
}

fn config_for(variant: Option<String>) -> Result<SceneConfig, JsValue> {
    let variant = match variant.as_deref() {
        None => SceneVariant::default(),
        Some(v) => v.parse().map_err(|e: String| JsValue::from_str(&e))?,
    };
    SceneConfig::new(variant).map_err(|e| JsValue::from_str(&e.to_string()))
}

async fn build(variant: Option<String>) -> Result<Rc<RefCell<Experience>>, JsValue> {
    let config = config_for(variant)?;
    match Experience::new(config).await {
        Ok(exp) => Ok(Rc::new(RefCell::new(exp))),
        Err(e) => {
            log::error!("init error: {:?}", e);
            Err(JsValue::from_str(&format!("{:#}", e)))
        }
    }
}

/// Build a scene for an external driver. `variant` is `"planet"` (default)
/// or `"particles"`.
#[wasm_bindgen(js_name = createScene)]
pub async fn create_scene(variant: Option<String>) -> Result<SceneHandle, JsValue> {
    let inner = build(variant).await?;
    Ok(SceneHandle {
        inner,
        driver: None,
    })
}

/// Build a scene and drive it: one `update` per animation frame and
/// `onResize` on window resize, until `destroy`.
#[wasm_bindgen]
pub async fn mount(variant: Option<String>) -> Result<SceneHandle, JsValue> {
    let inner = build(variant).await?;
    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let resize_target = inner.clone();
    let resize = Listener::attach(window.as_ref(), "resize", move |_| {
        resize_target.borrow_mut().on_resize();
    });

    let running = Rc::new(Cell::new(true));
    start_loop(inner.clone(), running.clone());

    Ok(SceneHandle {
        inner,
        driver: Some(Driver { running, resize }),
    })
}

pub fn start_loop(experience: Rc<RefCell<Experience>>, running: Rc<Cell<bool>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !running.get() {
            // drop the closure to break the self-reference
            tick_clone.borrow_mut().take();
            return;
        }
        experience.borrow_mut().update();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
