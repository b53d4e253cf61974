//! Virtual analog stick: maps a touch point around the stick base to a
//! direction vector on the unit disk.

use glam::Vec2;

/// Normalized stick input. `vector` lies on the unit disk; `active` is true
/// while a touch (or held key) is driving it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct JoystickState {
    pub vector: Vec2,
    pub active: bool,
}

impl JoystickState {
    pub fn press(&mut self, vector: Vec2) {
        self.vector = clamp_to_unit_disk(vector);
        self.active = true;
    }

    pub fn release(&mut self) {
        self.vector = Vec2::ZERO;
        self.active = false;
    }
}

/// One mapped touch sample: the thumb displacement in pixels and the
/// resulting normalized stick vector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StickSample {
    pub offset_px: Vec2,
    pub vector: Vec2,
}

/// Map a touch point to a stick sample for a base centred at `center` with
/// the given `radius` (all in the same pixel space).
///
/// The thumb travels at most `radius` from the centre along the touch
/// direction, so the vector magnitude never exceeds 1.
pub fn map_touch(touch: Vec2, center: Vec2, radius: f32) -> StickSample {
    if !(radius.is_finite() && radius > 0.0) {
        return StickSample::default();
    }
    let d = touch - center;
    if !(d.x.is_finite() && d.y.is_finite()) {
        return StickSample::default();
    }
    let dist = d.x.hypot(d.y).min(radius);
    let angle = d.y.atan2(d.x);
    let offset_px = Vec2::new(dist * angle.cos(), dist * angle.sin());
    StickSample {
        offset_px,
        vector: clamp_to_unit_disk(offset_px / radius),
    }
}

/// Stick vector for held direction keys, in the same screen-space convention
/// as touch input (up is -y).
pub fn stick_from_keys(up: bool, down: bool, left: bool, right: bool) -> Vec2 {
    let axis = |neg: bool, pos: bool| match (neg, pos) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    };
    Vec2::new(axis(left, right), axis(up, down)).normalize_or_zero()
}

// Guards against cos/sin rounding pushing the magnitude a hair above 1.
#[inline]
fn clamp_to_unit_disk(v: Vec2) -> Vec2 {
    let len = v.length();
    if len > 1.0 {
        v / len
    } else {
        v
    }
}
