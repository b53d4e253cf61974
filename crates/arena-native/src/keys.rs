use arena_core::{stick_from_keys, InputEvent, Toggle};
use glam::Vec2;
use winit::keyboard::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

fn direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::KeyW | KeyCode::ArrowUp => Some(Direction::Up),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(Direction::Down),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(Direction::Left),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(Direction::Right),
        _ => None,
    }
}

/// One-shot events fired on key press.
pub fn press_event(code: KeyCode) -> Option<InputEvent> {
    match code {
        KeyCode::Space => Some(InputEvent::Jump),
        KeyCode::Escape | KeyCode::KeyP => Some(InputEvent::TogglePause),
        KeyCode::Digit1 => Some(InputEvent::FlipToggle(Toggle::Glow)),
        KeyCode::Digit2 => Some(InputEvent::FlipToggle(Toggle::Skybox)),
        KeyCode::Digit3 => Some(InputEvent::FlipToggle(Toggle::Shadow)),
        KeyCode::Digit4 => Some(InputEvent::FlipToggle(Toggle::Sun)),
        _ => None,
    }
}

/// Held movement keys mapped onto the stick.
#[derive(Default, Debug)]
pub struct KeyStick {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl KeyStick {
    /// Track a movement key and return the resulting stick event, or `None`
    /// if `code` is not a movement key.
    pub fn update(&mut self, code: KeyCode, pressed: bool) -> Option<InputEvent> {
        let slot = match direction(code)? {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        };
        *slot = pressed;
        Some(if self.any() {
            InputEvent::StickMoved(self.vector())
        } else {
            InputEvent::StickReleased
        })
    }

    fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    fn vector(&self) -> Vec2 {
        stick_from_keys(self.up, self.down, self.left, self.right)
    }
}
