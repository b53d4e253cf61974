use crate::constants::PITCH_LIMIT;
use glam::{Vec2, Vec3};

/// Yaw/pitch of a camera orbiting a tracked target.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
}

impl OrbitCamera {
    /// Accumulate a swipe delta in pixels. Dragging right turns the camera
    /// left around the target; dragging down lowers it. Pitch stays within
    /// `[-PITCH_LIMIT, PITCH_LIMIT]`.
    pub fn apply_swipe(&mut self, delta_px: Vec2, radians_per_px: f32) {
        if !(delta_px.x.is_finite() && delta_px.y.is_finite()) {
            return;
        }
        self.yaw -= delta_px.x * radians_per_px;
        self.pitch = (self.pitch - delta_px.y * radians_per_px).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Offset of the camera from its target on the orbit sphere.
    pub fn offset(&self, radius: f32, height: f32) -> Vec3 {
        let (sin_p, cos_p) = self.pitch.sin_cos();
        let (sin_y, cos_y) = self.yaw.sin_cos();
        Vec3::new(
            radius * cos_p * sin_y,
            radius * sin_p + height,
            radius * cos_p * cos_y,
        )
    }

    #[inline]
    pub fn eye(&self, target: Vec3, radius: f32, height: f32) -> Vec3 {
        target + self.offset(radius, height)
    }
}

/// Tracks the last camera-swipe touch point so moves become deltas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SwipeTracker {
    last: Option<Vec2>,
}

impl SwipeTracker {
    pub fn begin(&mut self, point: Vec2) {
        self.last = Some(point);
    }

    /// Delta since the previous point. A move without a preceding start
    /// only records the point.
    pub fn moved(&mut self, point: Vec2) -> Vec2 {
        let delta = self.last.map(|last| point - last).unwrap_or(Vec2::ZERO);
        self.last = Some(point);
        delta
    }

    pub fn last(&self) -> Option<Vec2> {
        self.last
    }
}
