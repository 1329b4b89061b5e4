//! Window, input and request-flag state held by the scene.

use log::trace;

use crate::input::{Modifiers, MouseButtons};

/// A request flag of depth one.
///
/// Any number of [`request`](Self::request) calls between two
/// [`take`](Self::take) calls collapse into a single pending request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coalesced {
    pending: bool,
}

impl Coalesced {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the flag pending. Returns true only on the idle -> pending transition.
    pub fn request(&mut self) -> bool {
        let transitioned = !self.pending;
        self.pending = true;
        if transitioned {
            trace!("request flag idle -> pending");
        }
        transitioned
    }

    /// Consumes the pending request. Returns true if there was one.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Window metrics in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

impl WindowState {
    /// Width over height, 1.0 for a collapsed window.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Last known state of the input devices.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub buttons: MouseButtons,
    /// Mouse position in window pixels
    pub mouse_window: (i32, i32),
    /// Mouse position unprojected into the 3D scene
    pub mouse_scene: [f64; 3],
    /// Mouse position unprojected into the GUI overlay
    pub mouse_gui: [f64; 3],
}
