use super::SharedQueue;
use crate::constants::*;
use crate::dom;
use crate::input::{self, TrackedTouch};
use arena_core::{map_touch, InputEvent};
use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;
use web_sys as web;

/// Touches that changed in this event, as `(identifier, client point)`.
fn changed_touches(ev: &web::TouchEvent) -> Vec<(i32, Vec2)> {
    let list = ev.changed_touches();
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| {
            (
                t.identifier(),
                Vec2::new(t.client_x() as f32, t.client_y() as f32),
            )
        })
        .collect()
}

#[inline]
fn changed_ids(ev: &web::TouchEvent) -> impl Iterator<Item = i32> {
    changed_touches(ev).into_iter().map(|(id, _)| id)
}

#[derive(Clone, Copy, Default)]
struct StickGeometry {
    center: Vec2,
    radius: f32,
}

/// Joystick on `#joystick-base`: the thumb follows its own finger within the
/// base radius and every move is queued as a unit-disk vector.
pub fn wire_joystick(document: &web::Document, queue: SharedQueue) {
    let (Some(base), Some(thumb)) = (
        dom::html_element(document, JOYSTICK_BASE_ID),
        dom::html_element(document, JOYSTICK_THUMB_ID),
    ) else {
        log::warn!("joystick elements missing; touch movement disabled");
        return;
    };
    let geometry = Rc::new(Cell::new(StickGeometry::default()));
    let finger = Rc::new(Cell::new(TrackedTouch::default()));

    let move_thumb = {
        let thumb = thumb.clone();
        let queue = queue.clone();
        let geometry = geometry.clone();
        move |touch: Vec2| {
            let g = geometry.get();
            let sample = map_touch(touch, g.center, g.radius);
            _ = thumb
                .style()
                .set_property("transform", &input::thumb_transform(sample.offset_px));
            queue.borrow_mut().push(InputEvent::StickMoved(sample.vector));
        }
    };

    {
        let base_for_rect = base.clone();
        let geometry = geometry.clone();
        let finger = finger.clone();
        let move_thumb = move_thumb.clone();
        dom::add_touch_listener(&base, "touchstart", move |ev: web::TouchEvent| {
            ev.prevent_default();
            let mut tracked = finger.get();
            let Some(p) = tracked.start(changed_touches(&ev)) else {
                return;
            };
            finger.set(tracked);
            // the base may have moved since the last touch (resize, rotation)
            let rect = base_for_rect.get_bounding_client_rect();
            geometry.set(StickGeometry {
                center: input::rect_center(rect.left(), rect.top(), rect.width(), rect.height()),
                radius: input::stick_radius(base_for_rect.offset_width()),
            });
            move_thumb(p);
        });
    }
    {
        let finger = finger.clone();
        dom::add_touch_listener(&base, "touchmove", move |ev: web::TouchEvent| {
            ev.prevent_default();
            if let Some(p) = finger.get().moved(changed_touches(&ev)) {
                move_thumb(p);
            }
        });
    }

    let release = move |ev: web::TouchEvent| {
        let mut tracked = finger.get();
        if tracked.end(changed_ids(&ev)) {
            finger.set(tracked);
            _ = thumb.style().set_property("transform", THUMB_REST_TRANSFORM);
            queue.borrow_mut().push(InputEvent::StickReleased);
        }
    };
    dom::add_touch_listener(&base, "touchend", release.clone());
    dom::add_touch_listener(&base, "touchcancel", release);
}

/// Swipes on the canvas orbit the camera, following the finger that started
/// on the canvas.
pub fn wire_swipe(canvas: &web::HtmlCanvasElement, queue: SharedQueue) {
    let finger = Rc::new(Cell::new(TrackedTouch::default()));
    {
        let queue = queue.clone();
        let finger = finger.clone();
        dom::add_touch_listener(canvas, "touchstart", move |ev: web::TouchEvent| {
            let mut tracked = finger.get();
            if let Some(p) = tracked.start(changed_touches(&ev)) {
                finger.set(tracked);
                queue.borrow_mut().push(InputEvent::SwipeStart(p));
            }
        });
    }
    {
        let finger = finger.clone();
        dom::add_touch_listener(canvas, "touchmove", move |ev: web::TouchEvent| {
            ev.prevent_default();
            if let Some(p) = finger.get().moved(changed_touches(&ev)) {
                queue.borrow_mut().push(InputEvent::SwipeMove(p));
            }
        });
    }
    let lift = move |ev: web::TouchEvent| {
        let mut tracked = finger.get();
        if tracked.end(changed_ids(&ev)) {
            finger.set(tracked);
        }
    };
    dom::add_touch_listener(canvas, "touchend", lift.clone());
    dom::add_touch_listener(canvas, "touchcancel", lift);
}
