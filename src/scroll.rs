//! DOM side of the smooth scroller: input listeners, the content transform
//! and the scrollbar indicator.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::SCROLL_SETTLE_EPSILON;
use crate::core::{ElementBounds, Rect, ScrollError, ScrollEvent, ScrollerProxy, SmoothScroll};
use crate::dom::{self, Listener};

const LINE_HEIGHT_PX: f64 = 40.0;
const SMOOTH_CLASS: &str = "has-scroll-smooth";

struct Scrollbar {
    bar: web::HtmlElement,
    thumb: web::HtmlElement,
}

impl Scrollbar {
    fn new(document: &web::Document) -> anyhow::Result<Self> {
        let create = |tag: &str, class: &str| -> anyhow::Result<web::HtmlElement> {
            let el = document
                .create_element(tag)
                .map_err(|e| anyhow::anyhow!("create {}: {:?}", tag, e))?;
            el.set_class_name(class);
            el.dyn_into::<web::HtmlElement>()
                .map_err(|_| anyhow::anyhow!("{} is not an HTML element", tag))
        };
        let bar = create("div", "c-scrollbar")?;
        let thumb = create("span", "c-scrollbar_thumb")?;
        _ = bar.append_child(&thumb);
        if let Some(body) = document.body() {
            _ = body.append_child(&bar);
        }
        Ok(Self { bar, thumb })
    }

    fn sync(&self, scroll: f64, limit: f64, viewport_height: f64) {
        let style = self.bar.style();
        if limit <= 0.0 {
            _ = style.set_property("display", "none");
            return;
        }
        _ = style.remove_property("display");
        let thumb_h = viewport_height * viewport_height / (limit + viewport_height);
        let y = scroll / limit * (viewport_height - thumb_h);
        let thumb = self.thumb.style();
        _ = thumb.set_property("height", &format!("{:.1}px", thumb_h));
        _ = thumb.set_property("transform", &format!("translate3d(0, {:.1}px, 0)", y));
    }
}

pub struct DomScroller {
    el: web::HtmlElement,
    state: Rc<RefCell<SmoothScroll>>,
    scrollbar: Option<Scrollbar>,
    listeners: Vec<Listener>,
}

fn wheel_delta(ev: &web::WheelEvent) -> f64 {
    match ev.delta_mode() {
        web::WheelEvent::DOM_DELTA_LINE => ev.delta_y() * LINE_HEIGHT_PX,
        web::WheelEvent::DOM_DELTA_PAGE => ev.delta_y() * dom::viewport_size().1,
        _ => ev.delta_y(),
    }
}

fn first_touch_y(ev: &web::TouchEvent) -> Option<f64> {
    ev.touches().get(0).map(|t| t.client_y() as f64)
}

impl DomScroller {
    pub fn new(document: &web::Document, selector: &str, lerp: f64) -> anyhow::Result<Self> {
        let el = dom::query_html(document, selector)?;
        _ = el.style().set_property("will-change", "transform");
        if let Some(root) = document.document_element() {
            _ = root.class_list().add_1(SMOOTH_CLASS);
        }

        let state = Rc::new(RefCell::new(SmoothScroll::new(lerp, SCROLL_SETTLE_EPSILON)));
        let target: &web::EventTarget = el.as_ref();
        let mut listeners = Vec::new();

        let wheel_state = state.clone();
        listeners.push(Listener::attach_active(target, "wheel", move |ev| {
            if let Some(wheel) = ev.dyn_ref::<web::WheelEvent>() {
                ev.prevent_default();
                wheel_state.borrow_mut().add_delta(wheel_delta(wheel));
            }
        }));

        let last_touch = Rc::new(Cell::new(None::<f64>));
        let touch_start = last_touch.clone();
        listeners.push(Listener::attach(target, "touchstart", move |ev| {
            if let Some(touch) = ev.dyn_ref::<web::TouchEvent>() {
                touch_start.set(first_touch_y(touch));
            }
        }));
        let touch_state = state.clone();
        listeners.push(Listener::attach_active(target, "touchmove", move |ev| {
            let Some(touch) = ev.dyn_ref::<web::TouchEvent>() else {
                return;
            };
            let (Some(prev), Some(y)) = (last_touch.get(), first_touch_y(touch)) else {
                return;
            };
            ev.prevent_default();
            touch_state.borrow_mut().add_delta(prev - y);
            last_touch.set(Some(y));
        }));

        let scrollbar = match Scrollbar::new(document) {
            Ok(s) => Some(s),
            Err(e) => {
                log::warn!("[scroll] no scrollbar: {:#}", e);
                None
            }
        };

        let mut scroller = Self {
            el,
            state,
            scrollbar,
            listeners,
        };
        if let Err(e) = scroller.update() {
            log::warn!("[scroll] initial update failed: {}", e);
        }
        Ok(scroller)
    }

    /// Recompute the scrollable range from the current layout.
    pub fn update(&mut self) -> Result<(), ScrollError> {
        let content = self.el.scroll_height() as f64;
        let (_, viewport_h) = dom::viewport_size();
        self.state.borrow_mut().update(content, viewport_h)
    }

    /// Ease toward the target and move the content. Returns the scroll
    /// event when the offset changed.
    pub fn tick(&mut self) -> Option<ScrollEvent> {
        let ev = self.state.borrow_mut().tick()?;
        _ = self
            .el
            .style()
            .set_property("transform", &format!("translate3d(0, {:.3}px, 0)", -ev.scroll));
        if let Some(bar) = &self.scrollbar {
            bar.sync(ev.scroll, ev.limit, dom::viewport_size().1);
        }
        log::trace!("[scroll] y={:.1} ({:?})", ev.scroll, ev.direction);
        Some(ev)
    }

    pub fn stop(&mut self) {
        self.state.borrow_mut().stop();
    }

    pub fn start(&mut self) {
        self.state.borrow_mut().start();
    }

    /// Detach input handling and restore the element. The scroller stays
    /// readable but no longer moves or accepts updates.
    pub fn destroy(&mut self) {
        for l in self.listeners.drain(..) {
            l.detach();
        }
        if let Some(bar) = self.scrollbar.take() {
            bar.bar.remove();
        }
        let style = self.el.style();
        _ = style.remove_property("transform");
        _ = style.remove_property("will-change");
        if let Some(root) = dom::window_document().and_then(|d| d.document_element()) {
            _ = root.class_list().remove_1(SMOOTH_CLASS);
        }
        self.state.borrow_mut().destroy();
    }
}

impl ScrollerProxy for DomScroller {
    fn scroll_top(&self) -> f64 {
        self.state.borrow().scroll()
    }

    fn set_scroll_top(&mut self, value: f64) {
        self.state.borrow_mut().scroll_to(value);
    }

    fn bounding_rect(&self) -> Rect {
        let (width, height) = dom::viewport_size();
        Rect {
            top: 0.0,
            left: 0.0,
            width,
            height,
        }
    }

    fn element_bounds(&self, selector: &str) -> Option<ElementBounds> {
        let el = self.el.query_selector(selector).ok()??;
        let rect = el.get_bounding_client_rect();
        if rect.width() == 0.0 && rect.height() == 0.0 {
            return None;
        }
        // both rects carry the same translation, so the difference is the
        // element's offset inside the content
        let origin = self.el.get_bounding_client_rect();
        Some(ElementBounds {
            top: rect.top() - origin.top(),
            height: rect.height(),
        })
    }
}
