//! # Scene Configuration
//!
//! Startup values for the scene context: camera defaults, window metrics,
//! timer interval, background colour and camera controller speeds.
//!
//! ```
//! use mhcore::config::SceneConfig;
//!
//! let config = SceneConfig::default()
//!     .with_window(1024, 768)
//!     .with_clear_color([0.1, 0.1, 0.1, 1.0]);
//! assert_eq!(config.window.width, 1024);
//! ```

use log::{debug, info};

use crate::errors::{CoreError, Result};

/// Initial camera parameters, also used when the camera is reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraDefaults {
    /// Vertical field of view in degrees
    pub fov_angle: f32,
    /// Distance from the camera to the scene origin
    pub zoom: f32,
    /// Tilt around the x-axis in degrees
    pub rot_x: f32,
    /// Turn around the y-axis in degrees
    pub rot_y: f32,
    pub pan_x: f32,
    pub pan_y: f32,
}

impl Default for CameraDefaults {
    fn default() -> Self {
        Self {
            fov_angle: 25.0,
            zoom: 60.0,
            rot_x: 0.0,
            rot_y: 0.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

/// Initial window metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDefaults {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

impl Default for WindowDefaults {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fullscreen: false,
        }
    }
}

/// Sensitivity of the mouse-driven camera controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSettings {
    /// Degrees of rotation per pixel of drag
    pub rotate_speed: f32,
    /// Scene units of pan per pixel of drag
    pub pan_speed: f32,
    /// Zoom change per wheel notch
    pub zoom_speed: f32,
    /// Degrees of rotation per navigation key press
    pub key_rotate_step: f32,
    /// Scene units of pan per arrow key press
    pub key_pan_step: f32,
    /// Zoom change per `+`/`-` key press
    pub key_zoom_step: f32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            rotate_speed: 0.5,
            pan_speed: 0.05,
            zoom_speed: 1.0,
            key_rotate_step: 5.0,
            key_pan_step: 0.05,
            key_zoom_step: 0.65,
        }
    }
}

/// Everything needed to (re)initialise a [`Scene`](crate::gfx::scene::Scene).
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Expected number of objects, used to pre-size the object list
    pub capacity_hint: usize,
    pub camera: CameraDefaults,
    pub window: WindowDefaults,
    /// Delay in milliseconds before an armed timer fires
    pub timer_interval_ms: u32,
    /// Background clear colour (RGBA)
    pub clear_color: [f32; 4],
    pub controller: ControllerSettings,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            capacity_hint: 16,
            camera: CameraDefaults::default(),
            window: WindowDefaults::default(),
            timer_interval_ms: 20,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            controller: ControllerSettings::default(),
        }
    }
}

impl SceneConfig {
    pub fn with_capacity_hint(mut self, capacity_hint: usize) -> Self {
        self.capacity_hint = capacity_hint;
        self
    }

    pub fn with_camera(mut self, camera: CameraDefaults) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_window(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.window.fullscreen = fullscreen;
        self
    }

    pub fn with_timer_interval(mut self, millis: u32) -> Self {
        self.timer_interval_ms = millis;
        self
    }

    pub fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_controller(mut self, controller: ControllerSettings) -> Self {
        self.controller = controller;
        self
    }

    /// Applies the contents of a theme file.
    ///
    /// Recognised lines:
    /// - `version <text>` is logged
    /// - `color clear <r> <g> <b> <a>` sets the clear colour
    ///
    /// Blank and unrecognised lines are skipped. A malformed `color clear` line
    /// fails the whole call and leaves the config untouched.
    pub fn apply_theme(&mut self, theme: &str) -> Result<()> {
        let mut clear_color = self.clear_color;

        for line in theme.lines() {
            let words: Vec<&str> = line.split_whitespace().collect();
            match words.as_slice() {
                ["version", rest @ ..] => info!("Theme version {}", rest.join(" ")),
                ["color", "clear", components @ ..] => {
                    clear_color = parse_rgba(components)?;
                }
                [] => {}
                other => debug!("Ignoring theme line {:?}", other),
            }
        }

        self.clear_color = clear_color;
        Ok(())
    }
}

fn parse_rgba(components: &[&str]) -> Result<[f32; 4]> {
    if components.len() != 4 {
        return Err(CoreError::InvalidArgument {
            what: "color clear",
            reason: format!("expected 4 components, got {}", components.len()),
        });
    }

    let mut rgba = [0.0; 4];
    for (slot, text) in rgba.iter_mut().zip(components) {
        *slot = text.parse().map_err(|_| CoreError::InvalidArgument {
            what: "color clear",
            reason: format!("`{text}` is not a number"),
        })?;
    }
    Ok(rgba)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = SceneConfig::default()
            .with_capacity_hint(4)
            .with_window(320, 200)
            .with_fullscreen(true)
            .with_timer_interval(5);

        assert_eq!(config.capacity_hint, 4);
        assert_eq!(config.window.width, 320);
        assert_eq!(config.window.height, 200);
        assert!(config.window.fullscreen);
        assert_eq!(config.timer_interval_ms, 5);
        assert_eq!(config.camera, CameraDefaults::default());
    }

    #[test]
    fn theme_sets_clear_color() {
        let mut config = SceneConfig::default();
        config
            .apply_theme("version 1.0\n\ncolor clear 0.5 0.25 0.0 1.0\nfont default\n")
            .unwrap();
        assert_eq!(config.clear_color, [0.5, 0.25, 0.0, 1.0]);
    }

    #[test]
    fn malformed_theme_leaves_config_untouched() {
        let mut config = SceneConfig::default();
        let before = config.clone();

        assert!(config.apply_theme("color clear 1.0 0.0 x 1.0").is_err());
        assert!(config.apply_theme("color clear 1.0 0.0").is_err());
        assert_eq!(config, before);
    }
}
