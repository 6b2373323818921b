//! Scroll-linked progress for DOM sections.
//!
//! A [`ScrollBridge`] owns the scroller it measures against. There is no
//! process-wide registration: each bridge is its own context, so several
//! scenes can run side by side.

use std::fmt;
use std::str::FromStr;

use super::error::ScrollError;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// Vertical placement of an element inside the scroller's content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementBounds {
    pub top: f64,
    pub height: f64,
}

/// What a bridge needs from a scroll container.
pub trait ScrollerProxy {
    fn scroll_top(&self) -> f64;
    /// Programmatic scroll-to; applied without animation.
    fn set_scroll_top(&mut self, value: f64);
    /// Box the scroller presents to triggers, normally the viewport.
    fn bounding_rect(&self) -> Rect;
    /// Layout of the first element matching `selector`, in content
    /// coordinates. `None` when the element is missing or not rendered.
    fn element_bounds(&self, selector: &str) -> Option<ElementBounds>;
}

/// One side of a trigger position: an edge of the element or of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
    Percent(f64),
    Pixels(f64),
}

impl Edge {
    /// Distance of the edge from the top of a box of height `extent`.
    pub fn offset(self, extent: f64) -> f64 {
        match self {
            Edge::Top => 0.0,
            Edge::Center => extent * 0.5,
            Edge::Bottom => extent,
            Edge::Percent(p) => extent * p / 100.0,
            Edge::Pixels(px) => px,
        }
    }
}

impl FromStr for Edge {
    type Err = ScrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScrollError::InvalidPosition(s.to_string());
        match s {
            "top" => Ok(Edge::Top),
            "center" => Ok(Edge::Center),
            "bottom" => Ok(Edge::Bottom),
            _ => {
                if let Some(p) = s.strip_suffix('%') {
                    p.parse().map(Edge::Percent).map_err(|_| invalid())
                } else if let Some(px) = s.strip_suffix("px") {
                    px.parse().map(Edge::Pixels).map_err(|_| invalid())
                } else {
                    Err(invalid())
                }
            }
        }
    }
}

/// `"<element-edge> <viewport-edge>"`, e.g. `"top top"` fires when the top of
/// the element reaches the top of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerPosition {
    pub element: Edge,
    pub viewport: Edge,
}

impl TriggerPosition {
    /// Scroll offset at which this position is reached.
    pub fn resolve(&self, element: ElementBounds, viewport_height: f64) -> f64 {
        element.top + self.element.offset(element.height) - self.viewport.offset(viewport_height)
    }
}

impl FromStr for TriggerPosition {
    type Err = ScrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(element), Some(viewport), None) => Ok(Self {
                element: element
                    .parse()
                    .map_err(|_| ScrollError::InvalidPosition(s.to_string()))?,
                viewport: viewport
                    .parse()
                    .map_err(|_| ScrollError::InvalidPosition(s.to_string()))?,
            }),
            _ => Err(ScrollError::InvalidPosition(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TriggerConfig {
    pub selector: String,
    pub start: TriggerPosition,
    pub end: TriggerPosition,
    /// Seconds the displayed progress lags behind the scroll position.
    /// `None` links progress to scroll directly.
    pub scrub_lag: Option<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TriggerId(usize);

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trigger#{}", self.0)
    }
}

#[derive(Clone, Debug)]
struct TriggerState {
    config: TriggerConfig,
    range: Option<(f64, f64)>,
    target: f32,
    progress: f32,
}

impl TriggerState {
    fn measure<P: ScrollerProxy>(&mut self, proxy: &P) -> Result<(), ScrollError> {
        let bounds = proxy
            .element_bounds(&self.config.selector)
            .ok_or_else(|| ScrollError::NotLaidOut(self.config.selector.clone()))?;
        let viewport = proxy.bounding_rect().height;
        self.range = Some((
            self.config.start.resolve(bounds, viewport),
            self.config.end.resolve(bounds, viewport),
        ));
        Ok(())
    }
}

/// Linear progress of `scroll` through `[start, end]`, clamped to `[0, 1]`.
/// A collapsed range behaves as a step at `end`.
pub fn progress_between(scroll: f64, start: f64, end: f64) -> f32 {
    if end <= start {
        return if scroll >= end { 1.0 } else { 0.0 };
    }
    (((scroll - start) / (end - start)) as f32).clamp(0.0, 1.0)
}

pub struct ScrollBridge<P> {
    proxy: P,
    triggers: Vec<TriggerState>,
}

impl<P: ScrollerProxy> ScrollBridge<P> {
    pub fn new(proxy: P) -> Self {
        Self {
            proxy,
            triggers: Vec::new(),
        }
    }

    pub fn proxy(&self) -> &P {
        &self.proxy
    }

    pub fn proxy_mut(&mut self) -> &mut P {
        &mut self.proxy
    }

    /// Register a trigger. A trigger whose element is not laid out yet is
    /// kept and measured again on the next refresh.
    pub fn add_trigger(&mut self, config: TriggerConfig) -> TriggerId {
        let mut state = TriggerState {
            config,
            range: None,
            target: 0.0,
            progress: 0.0,
        };
        if let Err(e) = state.measure(&self.proxy) {
            log::debug!("[scroll] deferred measurement: {}", e);
        }
        let id = TriggerId(self.triggers.len());
        self.triggers.push(state);
        // seed progress so a trigger added mid-page does not animate from 0
        if let Some((start, end)) = self.triggers[id.0].range {
            let p = progress_between(self.proxy.scroll_top(), start, end);
            self.triggers[id.0].target = p;
            self.triggers[id.0].progress = p;
        }
        id
    }

    /// Re-measure every trigger against the current layout, then resync
    /// progress. Triggers that fail to measure keep their previous range;
    /// the first failure is returned after all triggers were attempted.
    pub fn refresh(&mut self) -> Result<(), ScrollError> {
        let mut first_err = None;
        for t in &mut self.triggers {
            if let Err(e) = t.measure(&self.proxy) {
                first_err.get_or_insert(e);
            }
        }
        let synced = self.update();
        match first_err {
            Some(e) => Err(e),
            None => synced,
        }
    }

    /// Recompute target progress from the scroller's current offset.
    pub fn update(&mut self) -> Result<(), ScrollError> {
        let scroll = self.proxy.scroll_top();
        let mut first_err = None;
        for t in &mut self.triggers {
            match t.range {
                Some((start, end)) => {
                    t.target = progress_between(scroll, start, end);
                    if t.config.scrub_lag.is_none() {
                        t.progress = t.target;
                    }
                }
                None => {
                    first_err.get_or_insert(ScrollError::NotLaidOut(t.config.selector.clone()));
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Move scrubbed progress toward its target.
    pub fn step(&mut self, dt_sec: f32) {
        for t in &mut self.triggers {
            match t.config.scrub_lag {
                Some(lag) if lag > 0.0 => {
                    let alpha = 1.0 - (-dt_sec.max(0.0) / lag).exp();
                    t.progress += (t.target - t.progress) * alpha;
                    if (t.target - t.progress).abs() < 1e-4 {
                        t.progress = t.target;
                    }
                }
                _ => t.progress = t.target,
            }
        }
    }

    pub fn scroll_to(&mut self, value: f64) {
        self.proxy.set_scroll_top(value);
    }

    /// Displayed (scrubbed) progress in `[0, 1]`.
    pub fn progress(&self, id: TriggerId) -> Result<f32, ScrollError> {
        self.triggers
            .get(id.0)
            .map(|t| t.progress)
            .ok_or(ScrollError::UnknownTrigger(id))
    }

    /// Progress the scroll position asks for, before scrubbing.
    pub fn target_progress(&self, id: TriggerId) -> Result<f32, ScrollError> {
        self.triggers
            .get(id.0)
            .map(|t| t.target)
            .ok_or(ScrollError::UnknownTrigger(id))
    }

    /// Scroll offsets where the trigger starts and ends, once measured.
    pub fn range(&self, id: TriggerId) -> Option<(f64, f64)> {
        self.triggers.get(id.0).and_then(|t| t.range)
    }
}
