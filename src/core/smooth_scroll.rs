//! Inertial virtual scrolling.
//!
//! Input moves a target offset; every tick the rendered offset eases toward
//! it. The DOM side only feeds deltas in and applies the resulting offset as a
//! transform.

use super::error::ScrollError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Emitted by [`SmoothScroll::tick`] whenever the rendered offset moved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollEvent {
    pub scroll: f64,
    pub limit: f64,
    pub delta: f64,
    pub direction: Direction,
}

#[derive(Clone, Debug)]
pub struct SmoothScroll {
    target: f64,
    current: f64,
    limit: f64,
    lerp: f64,
    settle_epsilon: f64,
    last_emitted: f64,
    stopped: bool,
    destroyed: bool,
}

impl SmoothScroll {
    pub fn new(lerp: f64, settle_epsilon: f64) -> Self {
        Self {
            target: 0.0,
            current: 0.0,
            limit: 0.0,
            lerp: lerp.clamp(0.0, 1.0),
            settle_epsilon,
            last_emitted: 0.0,
            stopped: false,
            destroyed: false,
        }
    }

    pub fn scroll(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Recompute the scrollable range from the content and viewport heights.
    pub fn update(&mut self, content_height: f64, viewport_height: f64) -> Result<(), ScrollError> {
        if self.destroyed {
            return Err(ScrollError::Destroyed);
        }
        self.limit = (content_height - viewport_height).max(0.0);
        self.target = self.target.clamp(0.0, self.limit);
        self.current = self.current.clamp(0.0, self.limit);
        Ok(())
    }

    /// Wheel or touch input, in pixels. Ignored while stopped.
    pub fn add_delta(&mut self, delta: f64) {
        if self.stopped || self.destroyed || !delta.is_finite() {
            return;
        }
        self.target = (self.target + delta).clamp(0.0, self.limit);
    }

    /// Jump straight to `value` without easing.
    pub fn scroll_to(&mut self, value: f64) {
        if self.destroyed || !value.is_finite() {
            return;
        }
        self.target = value.clamp(0.0, self.limit);
        self.current = self.target;
    }

    pub fn tick(&mut self) -> Option<ScrollEvent> {
        if self.destroyed {
            return None;
        }
        if !self.stopped {
            self.current += (self.target - self.current) * self.lerp;
            if (self.target - self.current).abs() < self.settle_epsilon {
                self.current = self.target;
            }
        }
        let delta = self.current - self.last_emitted;
        if delta == 0.0 {
            return None;
        }
        self.last_emitted = self.current;
        Some(ScrollEvent {
            scroll: self.current,
            limit: self.limit,
            delta,
            direction: if delta > 0.0 {
                Direction::Down
            } else {
                Direction::Up
            },
        })
    }

    pub fn start(&mut self) {
        self.stopped = false;
    }

    /// Freeze at the current offset; pending input is dropped.
    pub fn stop(&mut self) {
        self.stopped = true;
        self.target = self.current;
    }

    pub fn destroy(&mut self) {
        self.destroyed = true;
    }
}
