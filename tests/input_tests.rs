// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/constants.rs"]
mod constants;
#[path = "../src/input.rs"]
mod input;

use arena_core::{map_touch, Toggle};
use glam::Vec2;
use input::*;

#[test]
fn rect_center_is_midpoint() {
    let c = rect_center(20.0, 300.0, 120.0, 120.0);
    assert_eq!(c, Vec2::new(80.0, 360.0));
}

#[test]
fn stick_radius_is_half_the_base_width() {
    assert_eq!(stick_radius(120), 60.0);
    assert_eq!(stick_radius(0), 0.0);
}

#[test]
fn thumb_transform_keeps_centering() {
    assert_eq!(
        thumb_transform(Vec2::new(12.5, -3.0)),
        "translate(calc(-50% + 12.5px), calc(-50% + -3px))"
    );
    assert_eq!(
        thumb_transform(Vec2::ZERO),
        "translate(calc(-50% + 0px), calc(-50% + 0px))"
    );
}

#[test]
fn thumb_follows_clamped_touch() {
    // touch far outside the base pins the thumb to the rim
    let center = rect_center(0.0, 0.0, 100.0, 100.0);
    let sample = map_touch(Vec2::new(250.0, 50.0), center, stick_radius(100));
    assert!((sample.offset_px - Vec2::new(50.0, 0.0)).length() < 1e-4);
    assert_eq!(
        thumb_transform(sample.offset_px),
        "translate(calc(-50% + 50px), calc(-50% + 0px))"
    );
}

#[test]
fn portrait_only_when_taller() {
    assert!(is_portrait(390.0, 844.0));
    assert!(!is_portrait(844.0, 390.0));
    assert!(!is_portrait(500.0, 500.0));
}

#[test]
fn toggle_ids_map_to_toggles() {
    assert_eq!(toggle_for_id("glow-toggle"), Some(Toggle::Glow));
    assert_eq!(toggle_for_id("skybox-toggle"), Some(Toggle::Skybox));
    assert_eq!(toggle_for_id("shadow-toggle"), Some(Toggle::Shadow));
    assert_eq!(toggle_for_id("sun-toggle"), Some(Toggle::Sun));
    assert_eq!(toggle_for_id("jump-btn"), None);
    assert_eq!(
        toggle_for_id(constants::SHADOW_TOGGLE_ID),
        Some(Toggle::Shadow)
    );
}

#[test]
fn tracked_touch_follows_its_own_finger() {
    let mut stick = TrackedTouch::default();
    // finger 7 lands on the base
    assert_eq!(stick.start([(7, Vec2::new(40.0, 500.0))]), Some(Vec2::new(40.0, 500.0)));
    // a second finger on the base does not steal the stick
    assert_eq!(stick.start([(9, Vec2::new(60.0, 520.0))]), None);
    // moves from other fingers are ignored
    assert_eq!(stick.moved([(3, Vec2::new(700.0, 200.0))]), None);
    assert_eq!(
        stick.moved([(3, Vec2::new(710.0, 200.0)), (7, Vec2::new(45.0, 490.0))]),
        Some(Vec2::new(45.0, 490.0))
    );
    // lifting another finger leaves the stick held
    assert!(!stick.end([3]));
    assert!(stick.end([7]));
    assert_eq!(stick.moved([(7, Vec2::new(50.0, 480.0))]), None);
    assert!(!stick.end([7]));
}

#[test]
fn tracked_touch_restarts_after_cancel() {
    let mut swipe = TrackedTouch::default();
    swipe.start([(1, Vec2::new(300.0, 300.0))]);
    // touchcancel releases the same way touchend does
    assert!(swipe.end([1]));
    assert_eq!(swipe.start([(2, Vec2::new(10.0, 10.0))]), Some(Vec2::new(10.0, 10.0)));
    assert_eq!(swipe, {
        let mut t = TrackedTouch::default();
        t.start([(2, Vec2::ZERO)]);
        t
    });
}

#[test]
fn tracked_touch_ignores_empty_start() {
    let mut t = TrackedTouch::default();
    assert_eq!(t.start(std::iter::empty()), None);
    assert_eq!(t, TrackedTouch::default());
}

#[test]
fn key_actions() {
    assert_eq!(key_action(" "), Some(KeyAction::Jump));
    assert_eq!(key_action("Escape"), Some(KeyAction::TogglePause));
    assert_eq!(key_action("p"), Some(KeyAction::TogglePause));
    assert_eq!(key_action("P"), Some(KeyAction::TogglePause));
    assert_eq!(key_action("w"), None);
}

#[test]
fn held_keys_drive_the_stick() {
    let mut keys = HeldKeys::default();
    assert!(keys.apply("w", true));
    assert_eq!(keys.stick(), Vec2::new(0.0, -1.0));

    assert!(keys.apply("ArrowRight", true));
    let s = keys.stick();
    assert!((s.length() - 1.0).abs() < 1e-5);
    assert!(s.x > 0.0 && s.y < 0.0);

    assert!(keys.apply("W", false));
    assert_eq!(keys.stick(), Vec2::new(1.0, 0.0));
    assert!(keys.any());

    assert!(keys.apply("d", false));
    assert!(!keys.any());
    assert_eq!(keys.stick(), Vec2::ZERO);
}

#[test]
fn non_movement_keys_are_ignored() {
    let mut keys = HeldKeys::default();
    assert!(!keys.apply("q", true));
    assert!(!keys.apply(" ", true));
    assert_eq!(keys, HeldKeys::default());
}

#[test]
fn opposite_keys_cancel() {
    let mut keys = HeldKeys::default();
    keys.apply("a", true);
    keys.apply("d", true);
    assert!(keys.any());
    assert_eq!(keys.stick(), Vec2::ZERO);
}
