use crate::config::SceneVariant;
use crate::constants::PLAYER_GLOW_INTENSITY;

/// One of the settings-menu checkboxes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Toggle {
    Glow,
    Skybox,
    Shadow,
    Sun,
}

impl Toggle {
    pub const ALL: [Toggle; 4] = [Toggle::Glow, Toggle::Skybox, Toggle::Shadow, Toggle::Sun];

    pub fn name(self) -> &'static str {
        match self {
            Toggle::Glow => "glow",
            Toggle::Skybox => "skybox",
            Toggle::Shadow => "shadow",
            Toggle::Sun => "sun",
        }
    }
}

/// Checked state of the visual-effect checkboxes. All on until the page or
/// user says otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisualToggles {
    pub glow: bool,
    pub skybox: bool,
    pub shadow: bool,
    pub sun: bool,
}

impl Default for VisualToggles {
    fn default() -> Self {
        Self {
            glow: true,
            skybox: true,
            shadow: true,
            sun: true,
        }
    }
}

impl VisualToggles {
    pub fn set(&mut self, toggle: Toggle, on: bool) {
        *self.slot(toggle) = on;
    }

    pub fn get(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::Glow => self.glow,
            Toggle::Skybox => self.skybox,
            Toggle::Shadow => self.shadow,
            Toggle::Sun => self.sun,
        }
    }

    /// Flip one toggle and return its new state.
    pub fn flip(&mut self, toggle: Toggle) -> bool {
        let slot = self.slot(toggle);
        *slot = !*slot;
        *slot
    }

    fn slot(&mut self, toggle: Toggle) -> &mut bool {
        match toggle {
            Toggle::Glow => &mut self.glow,
            Toggle::Skybox => &mut self.skybox,
            Toggle::Shadow => &mut self.shadow,
            Toggle::Sun => &mut self.sun,
        }
    }
}

/// Per-object render switches derived from the toggles each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderFlags {
    pub player_emissive: f32,
    pub bloom: bool,
    pub sky_visible: bool,
    /// Light casts, player casts and floor receives the real shadow map.
    pub shadows: bool,
    pub blob_shadow_visible: bool,
    pub sun_visible: bool,
}

impl Default for RenderFlags {
    fn default() -> Self {
        Self::from_toggles(VisualToggles::default(), SceneVariant::default())
    }
}

impl RenderFlags {
    pub fn from_toggles(t: VisualToggles, variant: SceneVariant) -> Self {
        Self {
            player_emissive: if t.glow { PLAYER_GLOW_INTENSITY } else { 0.0 },
            bloom: t.glow && variant == SceneVariant::Bloom,
            sky_visible: t.skybox,
            shadows: t.shadow,
            blob_shadow_visible: !t.shadow,
            sun_visible: t.sun,
        }
    }
}
