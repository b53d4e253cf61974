pub mod buttons;
pub mod keyboard;
pub mod touch;

use arena_core::InputQueue;
use std::cell::RefCell;
use std::rc::Rc;

/// Queue shared between DOM listeners and the frame loop.
pub type SharedQueue = Rc<RefCell<InputQueue>>;

pub use buttons::{wire_buttons, wire_toggles};
pub use keyboard::wire_keyboard;
pub use touch::{wire_joystick, wire_swipe};
