use super::SharedQueue;
use crate::input::{self, HeldKeys, KeyAction};
use arena_core::InputEvent;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Desktop fallback: WASD/arrows drive the stick, Space jumps, Escape/P
/// toggles pause. The pause menu follows via the frame loop.
pub fn wire_keyboard(window: &web::Window, queue: SharedQueue) {
    let held = Rc::new(Cell::new(HeldKeys::default()));

    {
        let held = held.clone();
        let queue = queue.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            let key = ev.key();
            if let Some(action) = input::key_action(&key) {
                if ev.repeat() {
                    return;
                }
                let event = match action {
                    KeyAction::Jump => InputEvent::Jump,
                    KeyAction::TogglePause => InputEvent::TogglePause,
                };
                queue.borrow_mut().push(event);
                ev.prevent_default();
                return;
            }
            let mut keys = held.get();
            if keys.apply(&key, true) {
                held.set(keys);
                queue.borrow_mut().push(InputEvent::StickMoved(keys.stick()));
                ev.prevent_default();
            }
        }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        let mut keys = held.get();
        if !keys.apply(&ev.key(), false) {
            return;
        }
        held.set(keys);
        let event = if keys.any() {
            InputEvent::StickMoved(keys.stick())
        } else {
            InputEvent::StickReleased
        };
        queue.borrow_mut().push(event);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
    closure.forget();
}
