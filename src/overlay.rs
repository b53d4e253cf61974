use crate::constants::*;
use crate::dom;
use crate::input;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn show_pause_menu(document: &web::Document) {
    dom::set_display(document, PAUSE_MENU_ID, "block");
}

/// Resuming closes whichever menu is open.
#[inline]
pub fn hide_menus(document: &web::Document) {
    dom::set_display(document, PAUSE_MENU_ID, "none");
    dom::set_display(document, SETTINGS_MENU_ID, "none");
}

#[inline]
pub fn open_settings(document: &web::Document) {
    dom::set_display(document, PAUSE_MENU_ID, "none");
    dom::set_display(document, SETTINGS_MENU_ID, "block");
}

#[inline]
pub fn close_settings(document: &web::Document) {
    dom::set_display(document, SETTINGS_MENU_ID, "none");
    dom::set_display(document, PAUSE_MENU_ID, "block");
}

/// Sync the menus with a pause state change that did not come from a button.
pub fn sync_paused(document: &web::Document, paused: bool) {
    if paused {
        show_pause_menu(document);
    } else {
        hide_menus(document);
    }
}

/// Show the rotate prompt in portrait, hide it in landscape.
pub fn check_orientation() {
    let Some(window) = web::window() else { return };
    let Some(document) = window.document() else { return };
    let Some(alert) = dom::html_element(&document, ROTATE_ALERT_ID) else {
        return;
    };
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let portrait = input::is_portrait(width, height);
    _ = alert
        .style()
        .set_property("display", if portrait { "flex" } else { "none" });
    if portrait {
        log::info!("portrait orientation; showing rotate prompt");
    }
}

/// Orientation check now and on every resize; tapping the prompt reloads.
pub fn wire_orientation(window: &web::Window, document: &web::Document) {
    check_orientation();
    let on_resize = Closure::wrap(Box::new(check_orientation) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
    on_resize.forget();

    dom::add_click_listener(document, ROTATE_ALERT_ID, || {
        if let Some(w) = web::window() {
            _ = w.location().reload();
        }
    });
}
