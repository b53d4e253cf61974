//! DOM element ids the page must provide. Only the canvas is required; the
//! rest are wired when present.
pub const CANVAS_ID: &str = "game";

pub const JOYSTICK_BASE_ID: &str = "joystick-base";
pub const JOYSTICK_THUMB_ID: &str = "joystick-thumb";

pub const JUMP_BTN_ID: &str = "jump-btn";
pub const PAUSE_BTN_ID: &str = "pause-btn";
pub const RESUME_BTN_ID: &str = "resume-btn";
pub const SETTINGS_BTN_ID: &str = "settings-btn";
pub const SETTINGS_BACK_ID: &str = "settings-back";

pub const PAUSE_MENU_ID: &str = "pause-menu";
pub const SETTINGS_MENU_ID: &str = "settings-menu";
pub const ROTATE_ALERT_ID: &str = "rotate-alert";

pub const GLOW_TOGGLE_ID: &str = "glow-toggle";
pub const SKYBOX_TOGGLE_ID: &str = "skybox-toggle";
pub const SHADOW_TOGGLE_ID: &str = "shadow-toggle";
pub const SUN_TOGGLE_ID: &str = "sun-toggle";

/// Thumb transform at rest: centred on the base.
pub const THUMB_REST_TRANSFORM: &str = "translate(-50%, -50%)";

// Debug frame-rate log cadence
pub const FPS_LOG_INTERVAL_SEC: f32 = 5.0;
