pub mod avatar;
pub mod camera;
pub mod config;
pub mod constants;
pub mod events;
pub mod joystick;
pub mod orbit;
pub mod state;
pub mod toggles;

pub use avatar::*;
pub use camera::*;
pub use config::*;
pub use constants::*;
pub use events::*;
pub use joystick::*;
pub use orbit::*;
pub use state::*;
pub use toggles::*;
