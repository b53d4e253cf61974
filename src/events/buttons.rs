use super::SharedQueue;
use crate::constants::*;
use crate::dom;
use crate::input;
use crate::overlay;
use arena_core::{InputEvent, Toggle, VisualToggles};
use web_sys as web;

pub fn wire_buttons(document: &web::Document, queue: SharedQueue) {
    {
        let queue = queue.clone();
        dom::add_click_listener(document, JUMP_BTN_ID, move || {
            queue.borrow_mut().push(InputEvent::Jump);
        });
    }
    {
        let queue = queue.clone();
        let doc = document.clone();
        dom::add_click_listener(document, PAUSE_BTN_ID, move || {
            queue.borrow_mut().push(InputEvent::Pause);
            overlay::show_pause_menu(&doc);
        });
    }
    {
        let doc = document.clone();
        dom::add_click_listener(document, RESUME_BTN_ID, move || {
            queue.borrow_mut().push(InputEvent::Resume);
            overlay::hide_menus(&doc);
        });
    }
    {
        let doc = document.clone();
        dom::add_click_listener(document, SETTINGS_BTN_ID, move || overlay::open_settings(&doc));
    }
    if document.get_element_by_id(SETTINGS_BACK_ID).is_some() {
        let doc = document.clone();
        dom::add_click_listener(document, SETTINGS_BACK_ID, move || overlay::close_settings(&doc));
    }
}

/// Seed toggles from the checkboxes' initial state and queue every change.
/// Missing checkboxes keep the default (on).
pub fn wire_toggles(document: &web::Document, queue: SharedQueue) -> VisualToggles {
    let mut toggles = VisualToggles::default();
    for id in [GLOW_TOGGLE_ID, SKYBOX_TOGGLE_ID, SHADOW_TOGGLE_ID, SUN_TOGGLE_ID] {
        let Some(toggle) = input::toggle_for_id(id) else {
            continue;
        };
        if let Some(cb) = dom::checkbox(document, id) {
            toggles.set(toggle, cb.checked());
        }
        let queue = queue.clone();
        dom::add_change_listener(document, id, move |on| {
            queue.borrow_mut().push(InputEvent::SetToggle(toggle, on));
        });
    }
    log_toggles(&toggles);
    toggles
}

fn log_toggles(t: &VisualToggles) {
    let on: Vec<&str> = Toggle::ALL
        .iter()
        .filter(|&&k| t.get(k))
        .map(|k| k.name())
        .collect();
    log::info!("initial toggles on: [{}]", on.join(", "));
}
