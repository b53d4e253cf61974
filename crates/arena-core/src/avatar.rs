use crate::config::MovementBasis;
use crate::constants::{BLOB_SHADOW_Y, GROUND_HEIGHT};
use glam::{Vec2, Vec3};

/// The controllable box: position, vertical velocity and whether it rests on
/// the floor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Avatar {
    pub position: Vec3,
    pub velocity_y: f32,
    pub grounded: bool,
}

impl Default for Avatar {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, GROUND_HEIGHT, 0.0),
            velocity_y: 0.0,
            grounded: true,
        }
    }
}

impl Avatar {
    /// Start a jump if resting on the floor. Returns whether it happened; an
    /// airborne avatar is left untouched.
    pub fn try_jump(&mut self, impulse: f32) -> bool {
        if !self.grounded {
            return false;
        }
        self.velocity_y = impulse;
        self.grounded = false;
        true
    }

    /// One frame of gravity. Landing at or below `ground` snaps back onto it.
    pub fn integrate_gravity(&mut self, gravity: f32, ground: f32) {
        self.velocity_y -= gravity;
        self.position.y += self.velocity_y;
        if self.position.y <= ground {
            self.position.y = ground;
            self.velocity_y = 0.0;
            self.grounded = true;
        }
    }

    #[inline]
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Where the blob shadow sits: on the floor directly under the avatar.
    #[inline]
    pub fn blob_shadow_position(&self) -> Vec3 {
        Vec3::new(self.position.x, BLOB_SHADOW_Y, self.position.z)
    }
}

/// Ground-plane forward/right vectors used to turn stick input into motion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveFrame {
    pub forward: Vec3,
    pub right: Vec3,
}

impl MoveFrame {
    /// Project a camera view direction onto the floor. Looking straight up or
    /// down leaves no horizontal component, and the frame collapses to zero.
    pub fn from_view_direction(view_dir: Vec3) -> Self {
        let forward = Vec3::new(view_dir.x, 0.0, view_dir.z).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        Self { forward, right }
    }

    /// Forward for a camera orbiting at `yaw` and looking back at its target.
    pub fn from_yaw(yaw: f32) -> Self {
        let (sin_y, cos_y) = yaw.sin_cos();
        Self {
            forward: Vec3::new(-sin_y, 0.0, -cos_y),
            right: Vec3::new(cos_y, 0.0, -sin_y),
        }
    }

    pub fn for_basis(basis: MovementBasis, view_dir: Vec3, yaw: f32) -> Self {
        match basis {
            MovementBasis::CameraDirection => Self::from_view_direction(view_dir),
            MovementBasis::YawTrig => Self::from_yaw(yaw),
        }
    }
}

/// World-space displacement for one frame of stick input. Any non-zero
/// deflection moves at full `speed`; stick up (-y) is forward.
pub fn planar_step(stick: Vec2, frame: MoveFrame, speed: f32) -> Vec3 {
    let dir = frame.forward * -stick.y + frame.right * stick.x;
    dir.normalize_or_zero() * speed
}
