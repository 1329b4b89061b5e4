use log::trace;

use super::scene_camera::SceneCamera;
use crate::config::{CameraDefaults, ControllerSettings};
use crate::input::{keys, Modifiers, MouseButton, MouseButtons};

/// Smallest distance the camera may zoom in to
const MIN_ZOOM: f32 = 0.1;
/// Tilt limit in degrees
const MAX_TILT: f32 = 90.0;

/// A discrete camera change bound to a navigation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraAction {
    RotateUp,
    RotateDown,
    RotateLeft,
    RotateRight,
    PanUp,
    PanDown,
    PanLeft,
    PanRight,
    ZoomIn,
    ZoomOut,
    FrontView,
    SideView,
    TopView,
    /// Re-centres the pan and restores the default zoom
    ResetView,
}

impl CameraAction {
    /// Looks up the action bound to `key`. Keypad keys behave like their
    /// main-keyboard twins; shortcuts held with ctrl or alt are not navigation.
    pub fn from_key(key: u32, modifiers: Modifiers) -> Option<Self> {
        if !modifiers.shortcut_mask().is_empty() {
            return None;
        }
        let action = match keys::normalize(key) {
            keys::NUM_8 => Self::RotateUp,
            keys::NUM_2 => Self::RotateDown,
            keys::NUM_4 => Self::RotateLeft,
            keys::NUM_6 => Self::RotateRight,
            keys::UP => Self::PanUp,
            keys::DOWN => Self::PanDown,
            keys::LEFT => Self::PanLeft,
            keys::RIGHT => Self::PanRight,
            keys::PLUS => Self::ZoomIn,
            keys::MINUS => Self::ZoomOut,
            keys::NUM_1 => Self::FrontView,
            keys::NUM_7 => Self::SideView,
            keys::NUM_3 => Self::TopView,
            keys::PERIOD => Self::ResetView,
            _ => return None,
        };
        Some(action)
    }
}

/// Turns mouse drags, wheel clicks and navigation keys into camera changes.
///
/// - left drag rotates
/// - right drag, or shift + left drag, pans
/// - wheel zooms
/// - keys map through [`CameraAction`]
#[derive(Debug, Clone, Copy)]
pub struct CameraController {
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    pub key_rotate_step: f32,
    pub key_pan_step: f32,
    pub key_zoom_step: f32,
}

impl CameraController {
    pub fn new(settings: &ControllerSettings) -> Self {
        Self {
            rotate_speed: settings.rotate_speed,
            pan_speed: settings.pan_speed,
            zoom_speed: settings.zoom_speed,
            key_rotate_step: settings.key_rotate_step,
            key_pan_step: settings.key_pan_step,
            key_zoom_step: settings.key_zoom_step,
        }
    }

    /// Applies a mouse motion. Returns true if the camera changed.
    pub fn process_motion(
        &self,
        buttons: MouseButtons,
        modifiers: Modifiers,
        delta: (i32, i32),
        camera: &mut SceneCamera,
    ) -> bool {
        if delta == (0, 0) {
            return false;
        }
        let (dx, dy) = (delta.0 as f32, delta.1 as f32);

        let panning = buttons.contains(MouseButtons::RIGHT)
            || (buttons.contains(MouseButtons::LEFT) && modifiers.contains(Modifiers::SHIFT));

        if panning {
            // SHIFT + DRAG = PAN
            camera.pan_x += dx * self.pan_speed;
            camera.pan_y -= dy * self.pan_speed;
            trace!("Camera pan -> ({}, {})", camera.pan_x, camera.pan_y);
            true
        } else if buttons.contains(MouseButtons::LEFT) {
            // NORMAL DRAG = ROTATE
            camera.rot_y += dx * self.rotate_speed;
            tilt_by(camera, dy * self.rotate_speed);
            trace!("Camera rotation -> ({}, {})", camera.rot_x, camera.rot_y);
            true
        } else {
            false
        }
    }

    /// Applies a wheel "button" press. Returns true if the camera changed.
    pub fn process_button(&self, button: MouseButton, camera: &mut SceneCamera) -> bool {
        let step = match button {
            MouseButton::WheelUp => -self.zoom_speed,
            MouseButton::WheelDown => self.zoom_speed,
            _ => return false,
        };
        zoom_by(camera, step)
    }

    /// Applies a keyboard navigation action. `defaults` supplies the zoom
    /// restored by [`CameraAction::ResetView`]. Returns true if the camera changed.
    pub fn apply_action(
        &self,
        action: CameraAction,
        camera: &mut SceneCamera,
        defaults: &CameraDefaults,
    ) -> bool {
        let before = *camera;
        let (rotate, pan) = (self.key_rotate_step, self.key_pan_step);

        match action {
            CameraAction::RotateUp => tilt_by(camera, -rotate),
            CameraAction::RotateDown => tilt_by(camera, rotate),
            CameraAction::RotateLeft => camera.rot_y -= rotate,
            CameraAction::RotateRight => camera.rot_y += rotate,
            CameraAction::PanUp => camera.pan_y += pan,
            CameraAction::PanDown => camera.pan_y -= pan,
            CameraAction::PanLeft => camera.pan_x -= pan,
            CameraAction::PanRight => camera.pan_x += pan,
            CameraAction::ZoomIn => {
                zoom_by(camera, -self.key_zoom_step);
            }
            CameraAction::ZoomOut => {
                zoom_by(camera, self.key_zoom_step);
            }
            CameraAction::FrontView => (camera.rot_x, camera.rot_y) = (0.0, 0.0),
            CameraAction::SideView => (camera.rot_x, camera.rot_y) = (0.0, 90.0),
            CameraAction::TopView => (camera.rot_x, camera.rot_y) = (MAX_TILT, 0.0),
            CameraAction::ResetView => {
                camera.pan_x = 0.0;
                camera.pan_y = 0.0;
                camera.zoom = defaults.zoom;
            }
        }

        trace!("Camera {:?} -> {:?}", action, camera);
        *camera != before
    }
}

fn tilt_by(camera: &mut SceneCamera, degrees: f32) {
    camera.rot_x = (camera.rot_x + degrees).clamp(-MAX_TILT, MAX_TILT);
}

/// Returns true if the zoom changed.
fn zoom_by(camera: &mut SceneCamera, step: f32) -> bool {
    let zoom = (camera.zoom + step).max(MIN_ZOOM);
    let changed = zoom != camera.zoom;
    camera.zoom = zoom;
    changed
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(&ControllerSettings::default())
    }
}
