use crate::constants::{GLOW_TOGGLE_ID, SHADOW_TOGGLE_ID, SKYBOX_TOGGLE_ID, SUN_TOGGLE_ID};
use arena_core::{stick_from_keys, Toggle};
use glam::Vec2;

/// Centre of an element's client rect, for mapping joystick touches.
#[inline]
pub fn rect_center(left: f64, top: f64, width: f64, height: f64) -> Vec2 {
    Vec2::new((left + width / 2.0) as f32, (top + height / 2.0) as f32)
}

/// Joystick radius from the base's layout width.
#[inline]
pub fn stick_radius(offset_width: i32) -> f32 {
    offset_width as f32 / 2.0
}

/// CSS transform that keeps the thumb centred and shifts it by `offset` pixels.
pub fn thumb_transform(offset: Vec2) -> String {
    format!(
        "translate(calc(-50% + {}px), calc(-50% + {}px))",
        offset.x, offset.y
    )
}

/// Portrait when taller than wide; square counts as landscape.
#[inline]
pub fn is_portrait(inner_width: f64, inner_height: f64) -> bool {
    inner_height > inner_width
}

/// Which toggle a checkbox id drives.
pub fn toggle_for_id(id: &str) -> Option<Toggle> {
    match id {
        GLOW_TOGGLE_ID => Some(Toggle::Glow),
        SKYBOX_TOGGLE_ID => Some(Toggle::Skybox),
        SHADOW_TOGGLE_ID => Some(Toggle::Shadow),
        SUN_TOGGLE_ID => Some(Toggle::Sun),
        _ => None,
    }
}

/// One finger followed by its touch identifier. Other fingers on the screen
/// (the joystick thumb while swiping, or the reverse) are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrackedTouch {
    id: Option<i32>,
}

impl TrackedTouch {
    /// Claim the first newly placed finger if none is tracked yet.
    pub fn start<I>(&mut self, changed: I) -> Option<Vec2>
    where
        I: IntoIterator<Item = (i32, Vec2)>,
    {
        if self.id.is_some() {
            return None;
        }
        let (id, point) = changed.into_iter().next()?;
        self.id = Some(id);
        Some(point)
    }

    /// Position of the tracked finger among the changed touches.
    pub fn moved<I>(&self, changed: I) -> Option<Vec2>
    where
        I: IntoIterator<Item = (i32, Vec2)>,
    {
        let id = self.id?;
        changed
            .into_iter()
            .find_map(|(t, point)| (t == id).then_some(point))
    }

    /// Forget the tracked finger if it was lifted or cancelled. Returns
    /// whether it was.
    pub fn end<I>(&mut self, changed: I) -> bool
    where
        I: IntoIterator<Item = i32>,
    {
        match self.id {
            Some(id) if changed.into_iter().any(|t| t == id) => {
                self.id = None;
                true
            }
            _ => false,
        }
    }
}

/// Keys with a one-shot effect on keydown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Jump,
    TogglePause,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        " " | "Spacebar" => Some(KeyAction::Jump),
        "Escape" | "p" | "P" => Some(KeyAction::TogglePause),
        _ => None,
    }
}

/// Movement keys currently held, for the desktop stick fallback.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    /// Record a key transition. Returns false for keys that do not move.
    pub fn apply(&mut self, key: &str, pressed: bool) -> bool {
        let slot = match key {
            "w" | "W" | "ArrowUp" => &mut self.up,
            "s" | "S" | "ArrowDown" => &mut self.down,
            "a" | "A" | "ArrowLeft" => &mut self.left,
            "d" | "D" | "ArrowRight" => &mut self.right,
            _ => return false,
        };
        *slot = pressed;
        true
    }

    pub fn stick(&self) -> Vec2 {
        stick_from_keys(self.up, self.down, self.left, self.right)
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}
