/// Viewer configuration
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Orbit step applied by `A`/`D`, in degrees
pub const ORBIT_STEP_DEGREES: f64 = 5.0;

/// Roll step applied by `A`/`D`, in radians
pub const ROLL_STEP_RADIANS: f64 = 0.1;

/// Amount each view volume bound moves per zoom key press
pub const ZOOM_STEP: f64 = 0.1;

/// Which set of camera controls the viewer uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    /// Rotate eye and up about the world Y axis, no projection matrix.
    Orbit,
    /// Roll the up vector about the view axis, zoomable orthographic volume.
    #[default]
    Ortho,
}

impl Scheme {
    /// Signed angle in radians applied per rotate key press
    pub fn rotate_step(self) -> f64 {
        match self {
            Scheme::Orbit => ORBIT_STEP_DEGREES.to_radians(),
            Scheme::Ortho => ROLL_STEP_RADIANS,
        }
    }

    /// Uniform scale applied to the unit cube's corners
    pub fn mesh_scale(self) -> f32 {
        match self {
            Scheme::Orbit => 0.5,
            Scheme::Ortho => 1.0,
        }
    }

    pub fn has_view_volume(self) -> bool {
        matches!(self, Scheme::Ortho)
    }

    pub fn name(self) -> &'static str {
        match self {
            Scheme::Orbit => "orbit",
            Scheme::Ortho => "ortho",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orbit" => Ok(Scheme::Orbit),
            "ortho" => Ok(Scheme::Ortho),
            _ => Err(ConfigError::UnknownScheme(s.to_string())),
        }
    }
}

/// Top-level settings for a viewer front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub scheme: Scheme,
    /// Target frames per second for the fixed-tick render loop
    pub frame_rate: u32,
}

impl ViewerConfig {
    pub fn new(scheme: Scheme, frame_rate: u32) -> Result<Self, ConfigError> {
        let config = Self { scheme, frame_rate };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        Ok(())
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            scheme: Scheme::default(),
            frame_rate: 30,
        }
    }
}
