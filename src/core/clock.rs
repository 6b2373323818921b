use instant::Instant;

/// Frame clock: elapsed seconds since creation and the delta between ticks.
#[derive(Clone, Copy, Debug)]
pub struct Clock {
    start: Instant,
    last: Instant,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }

    /// Seconds since the previous tick.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;
        dt.as_secs_f32()
    }

    /// Seconds since creation, as of the last tick.
    pub fn elapsed(&self) -> f32 {
        (self.last - self.start).as_secs_f32()
    }
}
