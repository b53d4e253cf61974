use glam::Vec3;

// Shared scene/simulation tuning constants used by both web and native frontends.
// Motion constants are per display frame, not per second.

// Avatar motion
pub const MOVE_SPEED: f32 = 0.1; // world units per frame at any stick deflection
pub const GRAVITY: f32 = 0.01; // velocity lost per frame
pub const JUMP_IMPULSE: f32 = 0.25; // vertical velocity set by a jump
pub const GROUND_HEIGHT: f32 = 1.0; // avatar centre height when resting on the floor

// Orbit camera
pub const ORBIT_RADIUS: f32 = 10.0;
pub const ORBIT_HEIGHT: f32 = 5.0;
pub const SWIPE_RADIANS_PER_PIXEL: f32 = 0.003;
// Kept just short of straight up/down so the eye never lines up with the
// view up axis and the yaw stays recoverable from the view direction.
pub const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 1e-3;

// Camera projection
pub const CAMERA_FOVY_DEGREES: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Scene layout
pub const FLOOR_SIZE: f32 = 100.0;
pub const SKY_RADIUS: f32 = 550.0;
pub const SKY_SPIN_PER_FRAME: f32 = 0.0005; // radians about Y
pub const SUN_RADIUS: f32 = 10.0;
pub const SUN_POSITION: [f32; 3] = [30.0, 50.0, 30.0];
pub const LIGHT_POSITION: [f32; 3] = [10.0, 20.0, 10.0];
pub const PLAYER_SIZE: [f32; 3] = [1.0, 2.0, 1.0];
pub const BLOB_SHADOW_RADIUS: f32 = 0.8;
pub const BLOB_SHADOW_Y: f32 = 0.01; // lifted slightly to avoid z-fighting with the floor
pub const BLOB_SHADOW_OPACITY: f32 = 0.3;

// Materials (linear-ish RGB from the sRGB hex palette)
pub const PLAYER_COLOR: [f32; 3] = [0.2, 0.8, 1.0]; // 0x33ccff
pub const PLAYER_EMISSIVE: [f32; 3] = [0.0, 0.8, 1.0]; // 0x00ccff
pub const PLAYER_GLOW_INTENSITY: f32 = 1.5;
pub const FLOOR_COLOR: [f32; 3] = [0.267, 0.267, 0.267]; // 0x444444
pub const SUN_COLOR: [f32; 3] = [1.0, 0.8, 0.4]; // 0xffcc66

// Lights
pub const HEMI_SKY_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const HEMI_GROUND_COLOR: [f32; 3] = [0.267, 0.267, 0.267];
pub const HEMI_INTENSITY: f32 = 1.5;
pub const SUN_LIGHT_INTENSITY: f32 = 1.0;

// Post-processing defaults
pub const BLOOM_STRENGTH: f32 = 0.9;
pub const BLOOM_THRESHOLD: f32 = 0.8;

#[inline]
pub fn ground_start() -> Vec3 {
    Vec3::new(0.0, GROUND_HEIGHT, 0.0)
}

#[inline]
pub fn sun_position_vec3() -> Vec3 {
    Vec3::from(SUN_POSITION)
}

#[inline]
pub fn light_position_vec3() -> Vec3 {
    Vec3::from(LIGHT_POSITION)
}
