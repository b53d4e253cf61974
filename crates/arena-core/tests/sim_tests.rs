// Scenario tests for the per-frame update driven through the input queue.

use arena_core::*;
use glam::{Vec2, Vec3};
use rand::prelude::*;

const EPS: f32 = 1e-4;

fn advanced(outcome: FrameOutcome) -> SceneFrame {
    match outcome {
        FrameOutcome::Advanced(f) => f,
        FrameOutcome::Skipped => panic!("frame was skipped"),
    }
}

#[test]
fn idle_avatar_on_ground_does_not_move() {
    let mut sim = SimState::default();
    for _ in 0..30 {
        let f = advanced(sim.step([]));
        assert_eq!(f.player, Vec3::new(0.0, GROUND_HEIGHT, 0.0));
    }
    assert_eq!(sim.frames_advanced(), 30);
}

#[test]
fn idle_avatar_in_air_falls_by_gravity_until_grounded() {
    let mut sim = SimState::default();
    sim.avatar.position = Vec3::new(2.0, 3.0, -1.0);
    sim.avatar.grounded = false;

    let mut expected_y = 3.0f32;
    let mut v = 0.0f32;
    loop {
        let f = advanced(sim.step([]));
        v -= GRAVITY;
        expected_y += v;
        assert_eq!(f.player.x, 2.0);
        assert_eq!(f.player.z, -1.0);
        if expected_y <= GROUND_HEIGHT {
            assert_eq!(f.player.y, GROUND_HEIGHT);
            assert!(sim.avatar.grounded);
            break;
        }
        assert!((f.player.y - expected_y).abs() < EPS);
        assert!(!sim.avatar.grounded);
    }
}

#[test]
fn jump_then_next_frame_rises() {
    let mut sim = SimState::default();
    sim.apply(InputEvent::Jump);
    assert_eq!(sim.avatar.velocity_y, JUMP_IMPULSE);
    assert!(!sim.avatar.grounded);
    let f = advanced(sim.step([]));
    assert!(f.player.y > GROUND_HEIGHT);
}

#[test]
fn double_jump_is_rejected() {
    let mut sim = SimState::default();
    advanced(sim.step([InputEvent::Jump]));
    let before = sim.avatar;
    sim.apply(InputEvent::Jump);
    assert_eq!(sim.avatar, before);
}

#[test]
fn avatar_never_below_ground_under_random_input() {
    let mut rng = StdRng::seed_from_u64(1234);
    let mut sim = SimState::default();
    for _ in 0..5_000 {
        let mut events = Vec::new();
        if rng.gen_bool(0.05) {
            events.push(InputEvent::Jump);
        }
        if rng.gen_bool(0.2) {
            let v = Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
            events.push(InputEvent::StickMoved(v));
        }
        if rng.gen_bool(0.05) {
            events.push(InputEvent::StickReleased);
        }
        if rng.gen_bool(0.1) {
            let p = Vec2::new(rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0));
            events.push(InputEvent::SwipeMove(p));
        }
        let f = advanced(sim.step(events));
        assert!(f.player.y >= GROUND_HEIGHT);
        assert!(sim.orbit.pitch.abs() <= PITCH_LIMIT);
    }
}

#[test]
fn stick_forward_moves_away_from_camera() {
    let mut sim = SimState::default();
    let f = advanced(sim.step([InputEvent::StickMoved(Vec2::new(0.0, -1.0))]));
    // default camera looks down -Z
    assert!((f.player - Vec3::new(0.0, GROUND_HEIGHT, -MOVE_SPEED)).length() < EPS);
    let f = advanced(sim.step([]));
    assert!((f.player.z + 2.0 * MOVE_SPEED).abs() < EPS);
    let f = advanced(sim.step([InputEvent::StickReleased]));
    assert!((f.player.z + 2.0 * MOVE_SPEED).abs() < EPS);
}

#[test]
fn movement_follows_orbit_yaw() {
    for basis in [MovementBasis::CameraDirection, MovementBasis::YawTrig] {
        let params = SimParams {
            basis,
            ..SimParams::default()
        };
        let mut sim = SimState::new(params);
        // Turn the camera a quarter turn: swipe left by (pi/2)/0.003 px
        let px = std::f32::consts::FRAC_PI_2 / SWIPE_RADIANS_PER_PIXEL;
        advanced(sim.step([
            InputEvent::SwipeStart(Vec2::new(500.0, 300.0)),
            InputEvent::SwipeMove(Vec2::new(500.0 - px, 300.0)),
        ]));
        assert!((sim.orbit.yaw - std::f32::consts::FRAC_PI_2).abs() < EPS);
        let f = advanced(sim.step([InputEvent::StickMoved(Vec2::new(0.0, -1.0))]));
        // camera sits on +X looking toward -X, so forward is -X
        assert!(
            (f.player - Vec3::new(-MOVE_SPEED, GROUND_HEIGHT, 0.0)).length() < EPS,
            "{basis}: {:?}",
            f.player
        );
    }
}

#[test]
fn camera_stays_finite_at_pitch_clamp_away_from_origin() {
    for (start_y, end_y) in [(2000.0, 0.0), (0.0, 2000.0)] {
        let mut sim = SimState::default();
        sim.avatar.position = Vec3::new(30.0, GROUND_HEIGHT, 40.0);
        let f = advanced(sim.step([
            InputEvent::SwipeStart(Vec2::new(0.0, start_y)),
            InputEvent::SwipeMove(Vec2::new(0.0, end_y)),
        ]));
        assert_eq!(sim.orbit.pitch.abs(), PITCH_LIMIT);
        assert!(f.camera.view_matrix().is_finite());
        assert!(f.camera.view_proj(16.0 / 9.0).is_finite());
        assert!(sim.view_dir.is_finite());
    }
}

#[test]
fn both_bases_agree_at_extreme_pitch() {
    for pitch in [PITCH_LIMIT, -PITCH_LIMIT] {
        for yaw in [0.0f32, 0.8, 2.5, -1.3] {
            let mut sim = SimState::default();
            sim.avatar.position = Vec3::new(30.0, GROUND_HEIGHT, 40.0);
            sim.orbit = OrbitCamera { yaw, pitch };
            advanced(sim.step([]));
            let camera = MoveFrame::for_basis(MovementBasis::CameraDirection, sim.view_dir, yaw);
            let trig = MoveFrame::for_basis(MovementBasis::YawTrig, sim.view_dir, yaw);
            assert!(
                (camera.forward - trig.forward).length() < 1e-2,
                "pitch {pitch} yaw {yaw}: {:?} vs {:?}",
                camera.forward,
                trig.forward
            );
        }
    }
}

#[test]
fn camera_orbits_and_looks_at_player() {
    let mut sim = SimState::default();
    let mut rng = StdRng::seed_from_u64(99);
    sim.apply(InputEvent::SwipeStart(Vec2::new(400.0, 300.0)));
    for _ in 0..200 {
        let p = Vec2::new(rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0));
        let stick = Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
        let f = advanced(sim.step([InputEvent::SwipeMove(p), InputEvent::StickMoved(stick)]));
        assert_eq!(f.camera.target, f.player);
        let expected = f.player + sim.orbit.offset(ORBIT_RADIUS, ORBIT_HEIGHT);
        assert!((f.camera.eye - expected).length() < EPS);
        assert!((sim.view_dir - f.camera.forward()).length() < EPS);
    }
}

#[test]
fn paused_frames_are_skipped_and_state_frozen() {
    let mut sim = SimState::default();
    sim.avatar.position.y = 5.0;
    sim.avatar.grounded = false;
    advanced(sim.step([]));
    let avatar = sim.avatar;
    let sky = sim.sky_rotation;

    assert_eq!(sim.step([InputEvent::Pause]), FrameOutcome::Skipped);
    for _ in 0..10 {
        assert_eq!(sim.step([]), FrameOutcome::Skipped);
    }
    assert_eq!(sim.avatar, avatar);
    assert_eq!(sim.sky_rotation, sky);
    assert_eq!(sim.frames_advanced(), 1);

    let f = advanced(sim.step([InputEvent::Resume]));
    assert!(f.player.y < avatar.position.y);
    assert_eq!(sim.frames_advanced(), 2);
}

#[test]
fn events_while_paused_apply_in_order() {
    let mut sim = SimState::default();
    sim.step([InputEvent::Pause]);
    let out = sim.step([
        InputEvent::StickMoved(Vec2::new(1.0, 0.0)),
        InputEvent::StickReleased,
        InputEvent::SetToggle(Toggle::Sun, false),
        InputEvent::SetToggle(Toggle::Sun, true),
        InputEvent::SetToggle(Toggle::Skybox, false),
    ]);
    assert_eq!(out, FrameOutcome::Skipped);
    assert!(!sim.joystick.active);
    assert!(sim.toggles.sun);
    assert!(!sim.toggles.skybox);

    // resume and pause in the same frame: the last one wins
    assert_eq!(
        sim.step([InputEvent::Resume, InputEvent::Pause]),
        FrameOutcome::Skipped
    );
    assert!(matches!(
        sim.step([InputEvent::TogglePause]),
        FrameOutcome::Advanced(_)
    ));
}

#[test]
fn toggles_reach_render_flags() {
    let params = SimParams {
        variant: SceneVariant::Bloom,
        ..SimParams::default()
    };
    let mut sim = SimState::new(params);
    let f = advanced(sim.step([]));
    assert!(f.flags.bloom);
    assert!(f.flags.shadows && !f.flags.blob_shadow_visible);

    let f = advanced(sim.step([
        InputEvent::FlipToggle(Toggle::Glow),
        InputEvent::SetToggle(Toggle::Shadow, false),
    ]));
    assert!(!f.flags.bloom);
    assert_eq!(f.flags.player_emissive, 0.0);
    assert!(!f.flags.shadows && f.flags.blob_shadow_visible);
    assert!(f.flags.sky_visible && f.flags.sun_visible);
}

#[test]
fn sky_spins_each_advanced_frame() {
    let mut sim = SimState::default();
    for _ in 0..10 {
        sim.step([]);
    }
    assert!((sim.sky_rotation - 10.0 * SKY_SPIN_PER_FRAME).abs() < 1e-6);
}

#[test]
fn queue_drains_in_arrival_order() {
    let mut q = InputQueue::new();
    q.push(InputEvent::Jump);
    q.push(InputEvent::Pause);
    q.push(InputEvent::SetToggle(Toggle::Glow, false));
    assert_eq!(q.len(), 3);
    let drained: Vec<_> = q.drain().into_iter().collect();
    assert_eq!(
        drained,
        vec![
            InputEvent::Jump,
            InputEvent::Pause,
            InputEvent::SetToggle(Toggle::Glow, false)
        ]
    );
    assert!(q.is_empty());
}

#[test]
fn queued_jump_then_pause_still_jumps() {
    let mut sim = SimState::default();
    let mut q = InputQueue::new();
    q.push(InputEvent::Jump);
    q.push(InputEvent::Pause);
    assert_eq!(sim.step(q.drain()), FrameOutcome::Skipped);
    assert_eq!(sim.avatar.velocity_y, JUMP_IMPULSE);
    let f = advanced(sim.step([InputEvent::Resume]));
    assert!(f.player.y > GROUND_HEIGHT);
}
