//! Sequential tween timeline sampled by scroll progress.

use glam::Vec3;
use smallvec::SmallVec;

/// Default length of a tween in timeline units.
pub const DEFAULT_TWEEN_DURATION: f32 = 0.5;

/// Everything the scroll timeline animates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub camera_position: Vec3,
    pub object_rotation_y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Track {
    CameraPosition(Vec3),
    ObjectRotationY(f32),
}

#[derive(Clone, Copy, Debug)]
struct Tween {
    from: Track,
    to: Track,
    start: f32,
    duration: f32,
}

impl Tween {
    fn apply(&self, time: f32, pose: &mut Pose) {
        let k = if self.duration <= 0.0 {
            if time >= self.start {
                1.0
            } else {
                0.0
            }
        } else {
            ((time - self.start) / self.duration).clamp(0.0, 1.0)
        };
        match (self.from, self.to) {
            (Track::CameraPosition(a), Track::CameraPosition(b)) => {
                pose.camera_position = a.lerp(b, k);
            }
            (Track::ObjectRotationY(a), Track::ObjectRotationY(b)) => {
                pose.object_rotation_y = a + (b - a) * k;
            }
            _ => {}
        }
    }
}

/// Tweens run one after another, each linear in time.
#[derive(Clone, Debug)]
pub struct Timeline {
    initial: Pose,
    tweens: SmallVec<[Tween; 4]>,
    duration: f32,
}

impl Timeline {
    pub fn new(initial: Pose) -> Self {
        Self {
            initial,
            tweens: SmallVec::new(),
            duration: 0.0,
        }
    }

    /// Append a tween of default length toward `to`.
    pub fn to(self, to: Track) -> Self {
        self.to_with_duration(to, DEFAULT_TWEEN_DURATION)
    }

    /// Append a tween that starts where the timeline currently ends. The
    /// start value is whatever the timeline holds at that point.
    pub fn to_with_duration(mut self, to: Track, duration: f32) -> Self {
        let at = self.sample_time(self.duration);
        let from = match to {
            Track::CameraPosition(_) => Track::CameraPosition(at.camera_position),
            Track::ObjectRotationY(_) => Track::ObjectRotationY(at.object_rotation_y),
        };
        let duration = duration.max(0.0);
        self.tweens.push(Tween {
            from,
            to,
            start: self.duration,
            duration,
        });
        self.duration += duration;
        self
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn initial(&self) -> Pose {
        self.initial
    }

    /// Pose at `progress` in `[0, 1]` through the whole timeline.
    pub fn sample(&self, progress: f32) -> Pose {
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        if self.duration <= 0.0 {
            return self.sample_time(if p > 0.0 { f32::INFINITY } else { 0.0 });
        }
        self.sample_time(p * self.duration)
    }

    fn sample_time(&self, time: f32) -> Pose {
        let mut pose = self.initial;
        for tween in &self.tweens {
            tween.apply(time, &mut pose);
        }
        pose
    }
}
