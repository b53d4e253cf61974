//! Simulation state and the per-frame update.
//!
//! Everything the frame loop mutates lives in [`SimState`]; the only way in is
//! [`SimState::step`] with the events collected since the previous frame. The
//! result is a [`SceneFrame`] snapshot the renderers draw from, so the update
//! is testable without a DOM or a GPU.

use crate::avatar::{planar_step, Avatar, MoveFrame};
use crate::camera::Camera;
use crate::config::SimParams;
use crate::events::InputEvent;
use crate::joystick::JoystickState;
use crate::orbit::{OrbitCamera, SwipeTracker};
use crate::toggles::{RenderFlags, VisualToggles};
use glam::Vec3;

/// What the renderer needs for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneFrame {
    pub frame_index: u64,
    pub player: Vec3,
    pub camera: Camera,
    pub blob_shadow: Vec3,
    pub sky_rotation: f32,
    pub flags: RenderFlags,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// Paused: nothing advanced and nothing should be drawn.
    Skipped,
    Advanced(SceneFrame),
}

impl FrameOutcome {
    pub fn scene(&self) -> Option<&SceneFrame> {
        match self {
            FrameOutcome::Skipped => None,
            FrameOutcome::Advanced(frame) => Some(frame),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SimState {
    pub params: SimParams,
    pub avatar: Avatar,
    pub joystick: JoystickState,
    pub orbit: OrbitCamera,
    pub swipe: SwipeTracker,
    pub toggles: VisualToggles,
    pub paused: bool,
    pub sky_rotation: f32,
    /// Camera forward from the last advanced frame; the camera starts at the
    /// origin looking down -Z.
    pub view_dir: Vec3,
    frames: u64,
}

impl SimState {
    pub fn new(params: SimParams) -> Self {
        let avatar = Avatar {
            position: Vec3::new(0.0, params.ground_height, 0.0),
            ..Avatar::default()
        };
        Self {
            params,
            avatar,
            joystick: JoystickState::default(),
            orbit: OrbitCamera::default(),
            swipe: SwipeTracker::default(),
            toggles: VisualToggles::default(),
            paused: false,
            sky_rotation: 0.0,
            view_dir: Vec3::NEG_Z,
            frames: 0,
        }
    }

    pub fn with_toggles(mut self, toggles: VisualToggles) -> Self {
        self.toggles = toggles;
        self
    }

    /// Number of frames that actually advanced.
    pub fn frames_advanced(&self) -> u64 {
        self.frames
    }

    /// Apply one input event immediately. Events land even while paused;
    /// only the simulation advance waits for resume.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::StickMoved(v) => self.joystick.press(v),
            InputEvent::StickReleased => self.joystick.release(),
            InputEvent::SwipeStart(p) => self.swipe.begin(p),
            InputEvent::SwipeMove(p) => {
                let delta = self.swipe.moved(p);
                self.orbit.apply_swipe(delta, self.params.swipe_radians_per_px);
            }
            InputEvent::Jump => {
                if self.avatar.try_jump(self.params.jump_impulse) {
                    log::debug!("[sim] jump at y={:.2}", self.avatar.position.y);
                }
            }
            InputEvent::Pause => self.set_paused(true),
            InputEvent::Resume => self.set_paused(false),
            InputEvent::TogglePause => self.set_paused(!self.paused),
            InputEvent::SetToggle(t, on) => {
                if self.toggles.get(t) != on {
                    log::info!("[settings] {} {}", t.name(), if on { "on" } else { "off" });
                }
                self.toggles.set(t, on);
            }
            InputEvent::FlipToggle(t) => {
                let on = self.toggles.flip(t);
                log::info!("[settings] {} {}", t.name(), if on { "on" } else { "off" });
            }
        }
    }

    /// Apply this frame's events in order, then advance one frame unless
    /// paused.
    pub fn step<I>(&mut self, events: I) -> FrameOutcome
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for ev in events {
            self.apply(ev);
        }
        if self.paused {
            return FrameOutcome::Skipped;
        }
        FrameOutcome::Advanced(self.advance())
    }

    fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            log::info!("[sim] {}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
    }

    fn advance(&mut self) -> SceneFrame {
        let p = &self.params;

        if self.joystick.active {
            let basis = MoveFrame::for_basis(p.basis, self.view_dir, self.orbit.yaw);
            self.avatar
                .translate(planar_step(self.joystick.vector, basis, p.move_speed));
        }

        self.avatar.integrate_gravity(p.gravity, p.ground_height);

        let target = self.avatar.position;
        let eye = self.orbit.eye(target, p.orbit_radius, p.orbit_height);
        let camera = Camera::looking_at(eye, target);
        self.view_dir = camera.forward();

        self.sky_rotation = (self.sky_rotation + p.sky_spin_per_frame) % std::f32::consts::TAU;
        self.frames += 1;

        SceneFrame {
            frame_index: self.frames,
            player: target,
            camera,
            blob_shadow: self.avatar.blob_shadow_position(),
            sky_rotation: self.sky_rotation,
            flags: RenderFlags::from_toggles(self.toggles, p.variant),
        }
    }
}

impl Default for SimState {
    fn default() -> Self {
        Self::new(SimParams::default())
    }
}
