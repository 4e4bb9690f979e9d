/// Keyboard dispatch onto the camera state
use crate::camera::CameraState;
use crate::config::Scheme;
use crate::preset::{ViewPreset, ViewPresets};
use crate::rotator::{self, RotationStep};
use crate::view_volume::{ViewVolume, ZoomDirection, ZoomOutcome};

/// What a recognized key asks the camera to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SelectView(char),
    Rotate(RotationStep),
    Zoom(ZoomDirection),
}

impl Command {
    /// Map a key press to a command, ignoring case
    ///
    /// Zoom keys only exist in the ortho scheme. Preset keys are resolved
    /// against the preset table by the controller.
    pub fn from_key(key: char, scheme: Scheme) -> Option<Self> {
        match key.to_ascii_uppercase() {
            'D' => Some(Command::Rotate(RotationStep::clockwise(scheme))),
            'A' => Some(Command::Rotate(RotationStep::counter_clockwise(scheme))),
            'W' if scheme.has_view_volume() => Some(Command::Zoom(ZoomDirection::In)),
            'S' if scheme.has_view_volume() => Some(Command::Zoom(ZoomDirection::Out)),
            k @ ('T' | 'L' | 'F' | 'I') => Some(Command::SelectView(k)),
            _ => None,
        }
    }
}

/// Result of handing one key to the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyOutcome {
    ViewSelected(ViewPreset),
    Rotated,
    Zoomed,
    ZoomClamped,
    /// The command would have produced a degenerate camera and was dropped.
    Rejected,
    Ignored,
}

impl KeyOutcome {
    /// Whether the camera or view volume changed
    pub fn changed(&self) -> bool {
        matches!(self, KeyOutcome::ViewSelected(_) | KeyOutcome::Rotated | KeyOutcome::Zoomed)
    }
}

/// Owns the camera and view volume for one viewer
///
/// The input handler borrows it mutably, the render driver immutably.
#[derive(Debug, Clone)]
pub struct CameraController {
    scheme: Scheme,
    camera: CameraState,
    volume: Option<ViewVolume>,
    presets: ViewPresets,
}

impl CameraController {
    pub fn new(scheme: Scheme) -> Self {
        Self {
            scheme,
            camera: CameraState::default(),
            volume: scheme.has_view_volume().then(ViewVolume::default),
            presets: ViewPresets::for_scheme(scheme),
        }
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn view_volume(&self) -> Option<&ViewVolume> {
        self.volume.as_ref()
    }

    pub fn presets(&self) -> &ViewPresets {
        &self.presets
    }

    pub fn handle_key(&mut self, key: char) -> KeyOutcome {
        match Command::from_key(key, self.scheme) {
            Some(command) => self.apply(command),
            None => KeyOutcome::Ignored,
        }
    }

    pub fn apply(&mut self, command: Command) -> KeyOutcome {
        match command {
            Command::SelectView(key) => self.select_view(key),
            Command::Rotate(step) => self.rotate(step),
            Command::Zoom(direction) => self.zoom(direction),
        }
    }

    /// Replace the whole camera with the preset bound to `key`
    pub fn select_view(&mut self, key: char) -> KeyOutcome {
        let Some(preset) = self.presets.get(key).copied() else {
            return KeyOutcome::Ignored;
        };
        match preset.apply(&mut self.camera) {
            Ok(()) => {
                log::debug!("selected {} view", preset.name);
                KeyOutcome::ViewSelected(preset)
            }
            Err(err) => {
                log::warn!("{} view rejected: {}", preset.name, err);
                KeyOutcome::Rejected
            }
        }
    }

    pub fn rotate(&mut self, step: RotationStep) -> KeyOutcome {
        match rotator::rotate(self.scheme, &mut self.camera, step) {
            Ok(()) => {
                log::trace!("rotated by {:.4} rad, up = {:?}", step.radians(), self.camera.up());
                KeyOutcome::Rotated
            }
            Err(err) => {
                log::warn!("rotation rejected: {}", err);
                KeyOutcome::Rejected
            }
        }
    }

    pub fn zoom(&mut self, direction: ZoomDirection) -> KeyOutcome {
        let Some(volume) = self.volume.as_mut() else {
            return KeyOutcome::Ignored;
        };
        match volume.zoom(direction) {
            ZoomOutcome::Applied => KeyOutcome::Zoomed,
            ZoomOutcome::Clamped => KeyOutcome::ZoomClamped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::{FRONT, ISOMETRIC, LEFT, TOP};
    use nalgebra::{Point3, Vector3};

    #[test]
    fn test_preset_keys_set_exact_values() {
        let mut controller = CameraController::new(Scheme::Ortho);
        for (key, preset) in [('T', TOP), ('L', LEFT), ('F', FRONT), ('I', ISOMETRIC)] {
            assert_eq!(controller.handle_key(key), KeyOutcome::ViewSelected(preset));
            assert_eq!(controller.camera().eye(), preset.eye());
            assert_eq!(controller.camera().at(), preset.at());
            assert_eq!(controller.camera().up(), preset.up());
        }

        controller.handle_key('t');
        assert_eq!(controller.camera().eye(), Point3::new(0.0, 1.0, 0.0));
        assert_eq!(controller.camera().at(), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(controller.camera().up(), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_orbit_scheme_key_set() {
        let mut controller = CameraController::new(Scheme::Orbit);
        let before = *controller.camera();
        assert_eq!(controller.handle_key('I'), KeyOutcome::Ignored);
        assert_eq!(controller.handle_key('W'), KeyOutcome::Ignored);
        assert_eq!(controller.handle_key('s'), KeyOutcome::Ignored);
        assert_eq!(controller.camera(), &before);
        assert!(controller.view_volume().is_none());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut controller = CameraController::new(Scheme::Ortho);
        let camera = *controller.camera();
        let volume = *controller.view_volume().unwrap();
        for key in ['x', 'Q', '1', ' ', 'é'] {
            assert_eq!(controller.handle_key(key), KeyOutcome::Ignored);
            assert!(!controller.handle_key(key).changed());
        }
        assert_eq!(controller.camera(), &camera);
        assert_eq!(controller.view_volume(), Some(&volume));
    }

    #[test]
    fn test_rotate_keys_by_scheme() {
        let mut orbit = CameraController::new(Scheme::Orbit);
        orbit.handle_key('F');
        assert_eq!(orbit.handle_key('d'), KeyOutcome::Rotated);
        assert!(orbit.camera().eye().x > 0.0);

        let mut ortho = CameraController::new(Scheme::Ortho);
        ortho.handle_key('F');
        assert_eq!(ortho.handle_key('A'), KeyOutcome::Rotated);
        assert_eq!(ortho.camera().eye(), FRONT.eye());
        assert!(ortho.camera().up() != FRONT.up());
    }

    #[test]
    fn test_zoom_keys() {
        let mut controller = CameraController::new(Scheme::Ortho);
        let original = *controller.view_volume().unwrap();
        assert_eq!(controller.handle_key('w'), KeyOutcome::Zoomed);
        assert!(controller.view_volume().unwrap().width() < original.width());
        assert_eq!(controller.handle_key('S'), KeyOutcome::Zoomed);
        assert_eq!(controller.view_volume(), Some(&original));

        let outcomes: Vec<_> = (0..21).map(|_| controller.handle_key('W')).collect();
        assert_eq!(outcomes.iter().filter(|o| **o == KeyOutcome::Zoomed).count(), 19);
        assert_eq!(outcomes.last(), Some(&KeyOutcome::ZoomClamped));
        let volume = controller.view_volume().unwrap();
        assert!(volume.left < volume.right);
    }

    #[test]
    fn test_command_mapping() {
        assert_eq!(
            Command::from_key('d', Scheme::Ortho),
            Some(Command::Rotate(RotationStep(0.1)))
        );
        assert_eq!(
            Command::from_key('A', Scheme::Ortho),
            Some(Command::Rotate(RotationStep(-0.1)))
        );
        assert_eq!(
            Command::from_key('w', Scheme::Ortho),
            Some(Command::Zoom(ZoomDirection::In))
        );
        assert_eq!(Command::from_key('w', Scheme::Orbit), None);
        assert_eq!(Command::from_key('l', Scheme::Orbit), Some(Command::SelectView('L')));
        assert_eq!(Command::from_key('q', Scheme::Orbit), None);
    }
}
