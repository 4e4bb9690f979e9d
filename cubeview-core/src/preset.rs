/// Named camera presets selectable by a single key
use nalgebra::{Point3, Vector3};

use crate::camera::CameraState;
use crate::config::Scheme;
use crate::error::CameraError;

/// A fixed `(eye, at, up)` triple bound to an uppercase key
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPreset {
    pub key: char,
    pub name: &'static str,
    eye: [f64; 3],
    at: [f64; 3],
    up: [f64; 3],
}

impl ViewPreset {
    /// A preset looking at the origin
    pub const fn new(key: char, name: &'static str, eye: [f64; 3], up: [f64; 3]) -> Self {
        Self {
            key,
            name,
            eye,
            at: [0.0; 3],
            up,
        }
    }

    pub fn eye(&self) -> Point3<f64> {
        Point3::from(self.eye)
    }

    pub fn at(&self) -> Point3<f64> {
        Point3::from(self.at)
    }

    pub fn up(&self) -> Vector3<f64> {
        Vector3::from(self.up)
    }

    /// Overwrite every field of `camera` with this preset
    pub fn apply(&self, camera: &mut CameraState) -> Result<(), CameraError> {
        camera.set(self.eye(), self.at(), self.up())
    }
}

pub const TOP: ViewPreset = ViewPreset::new('T', "top", [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]);
pub const LEFT: ViewPreset = ViewPreset::new('L', "left", [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
pub const FRONT: ViewPreset = ViewPreset::new('F', "front", [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
pub const ISOMETRIC: ViewPreset = ViewPreset::new('I', "isometric", [1.0, 1.0, 1.0], [0.0, 1.0, 0.0]);

/// The preset table for one control scheme
#[derive(Debug, Clone)]
pub struct ViewPresets {
    presets: Vec<ViewPreset>,
}

impl ViewPresets {
    pub fn for_scheme(scheme: Scheme) -> Self {
        let presets = match scheme {
            Scheme::Orbit => vec![TOP, LEFT, FRONT],
            Scheme::Ortho => vec![TOP, LEFT, FRONT, ISOMETRIC],
        };
        Self { presets }
    }

    /// Look up a preset by key, ignoring case
    pub fn get(&self, key: char) -> Option<&ViewPreset> {
        let key = key.to_ascii_uppercase();
        self.presets.iter().find(|preset| preset.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = char> + '_ {
        self.presets.iter().map(|preset| preset.key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ViewPreset> {
        self.presets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_tables() {
        let orbit: String = ViewPresets::for_scheme(Scheme::Orbit).keys().collect();
        assert_eq!(orbit, "TLF");
        let ortho: String = ViewPresets::for_scheme(Scheme::Ortho).keys().collect();
        assert_eq!(ortho, "TLFI");
    }

    #[test]
    fn test_lookup_ignores_case() {
        let presets = ViewPresets::for_scheme(Scheme::Ortho);
        assert_eq!(presets.get('t'), Some(&TOP));
        assert_eq!(presets.get('I'), Some(&ISOMETRIC));
        assert_eq!(presets.get('x'), None);
        assert_eq!(ViewPresets::for_scheme(Scheme::Orbit).get('i'), None);
    }

    #[test]
    fn test_presets_are_valid_cameras() {
        for preset in ViewPresets::for_scheme(Scheme::Ortho).iter() {
            let mut camera = CameraState::default();
            preset.apply(&mut camera).unwrap();
            assert_eq!(camera.eye(), preset.eye());
            assert_eq!(camera.at(), preset.at());
            assert_eq!(camera.up(), preset.up());
        }
    }
}
