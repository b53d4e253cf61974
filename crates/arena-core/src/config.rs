use crate::constants::*;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown scene variant `{0}` (expected `basic` or `bloom`)")]
    UnknownVariant(String),
    #[error("unknown movement basis `{0}` (expected `camera` or `yaw`)")]
    UnknownBasis(String),
}

/// Which flavour of the scene is running. `Bloom` adds the bloom pass that
/// the glow toggle switches on and off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SceneVariant {
    #[default]
    Basic,
    Bloom,
}

impl FromStr for SceneVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "bloom" => Ok(Self::Bloom),
            other => Err(ConfigError::UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for SceneVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Basic => "basic",
            Self::Bloom => "bloom",
        })
    }
}

/// How stick input is oriented relative to the camera.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MovementBasis {
    /// Last frame's camera view direction projected onto the floor.
    #[default]
    CameraDirection,
    /// Forward/right straight from the orbit yaw.
    YawTrig,
}

impl FromStr for MovementBasis {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "camera" => Ok(Self::CameraDirection),
            "yaw" => Ok(Self::YawTrig),
            other => Err(ConfigError::UnknownBasis(other.to_string())),
        }
    }
}

impl fmt::Display for MovementBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CameraDirection => "camera",
            Self::YawTrig => "yaw",
        })
    }
}

/// Simulation tunables. `Default` mirrors the constants module.
#[derive(Clone, Debug, PartialEq)]
pub struct SimParams {
    pub variant: SceneVariant,
    pub basis: MovementBasis,
    pub move_speed: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub ground_height: f32,
    pub orbit_radius: f32,
    pub orbit_height: f32,
    pub swipe_radians_per_px: f32,
    pub sky_spin_per_frame: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            variant: SceneVariant::default(),
            basis: MovementBasis::default(),
            move_speed: MOVE_SPEED,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            ground_height: GROUND_HEIGHT,
            orbit_radius: ORBIT_RADIUS,
            orbit_height: ORBIT_HEIGHT,
            swipe_radians_per_px: SWIPE_RADIANS_PER_PIXEL,
            sky_spin_per_frame: SKY_SPIN_PER_FRAME,
        }
    }
}

impl SimParams {
    /// Apply `variant=` and `basis=` pairs from a URL query string such as
    /// `?variant=bloom&basis=yaw`. Unrelated keys are ignored; a known key
    /// with an unknown value is an error.
    pub fn with_query(mut self, query: &str) -> Result<Self, ConfigError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "variant" => self.variant = value.parse()?,
                "basis" => self.basis = value.parse()?,
                _ => {}
            }
        }
        Ok(self)
    }
}
