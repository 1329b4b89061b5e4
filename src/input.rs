//! # Input Events
//!
//! Raw event parameters delivered by the windowing layer. The scene only
//! records them; translating platform events into these types is the job of
//! whoever owns the event loop.

use bitflags::bitflags;

bitflags! {
    /// Held modifier keys.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u32 {
        const SHIFT = 1 << 0;
        const CTRL  = 1 << 1;
        const ALT   = 1 << 2;
        const META  = 1 << 3;
    }
}

impl Modifiers {
    /// Reduces the state to the combinations used for keyboard shortcuts:
    /// `CTRL | ALT`, `CTRL`, `ALT` or nothing.
    pub fn shortcut_mask(self) -> Modifiers {
        self & (Modifiers::CTRL | Modifiers::ALT)
    }
}

bitflags! {
    /// Set of mouse buttons currently held down.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        const LEFT   = 1 << 0;
        const MIDDLE = 1 << 1;
        const RIGHT  = 1 << 2;
    }
}

/// A single mouse button, including the two wheel directions which the
/// windowing layer reports as button presses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
}

impl MouseButton {
    /// Maps the conventional 1-based button numbers (4 and 5 are the wheel).
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::Left),
            2 => Some(Self::Middle),
            3 => Some(Self::Right),
            4 => Some(Self::WheelUp),
            5 => Some(Self::WheelDown),
            _ => None,
        }
    }

    /// The held-button flag for this button; wheel "buttons" are never held.
    pub fn held_flag(self) -> MouseButtons {
        match self {
            Self::Left => MouseButtons::LEFT,
            Self::Middle => MouseButtons::MIDDLE,
            Self::Right => MouseButtons::RIGHT,
            Self::WheelUp | Self::WheelDown => MouseButtons::empty(),
        }
    }
}

/// Key codes as delivered by the windowing layer (SDL 1.2 numbering).
pub mod keys {
    pub const PLUS: u32 = 43;
    pub const MINUS: u32 = 45;
    pub const PERIOD: u32 = 46;
    pub const NUM_0: u32 = 48;
    pub const NUM_1: u32 = 49;
    pub const NUM_2: u32 = 50;
    pub const NUM_3: u32 = 51;
    pub const NUM_4: u32 = 52;
    pub const NUM_6: u32 = 54;
    pub const NUM_7: u32 = 55;
    pub const NUM_8: u32 = 56;
    pub const NUM_9: u32 = 57;
    pub const KP_0: u32 = 256;
    pub const KP_9: u32 = 265;
    pub const KP_PERIOD: u32 = 266;
    pub const KP_MINUS: u32 = 269;
    pub const KP_PLUS: u32 = 270;
    pub const UP: u32 = 273;
    pub const DOWN: u32 = 274;
    pub const RIGHT: u32 = 275;
    pub const LEFT: u32 = 276;

    /// Folds keypad keys onto their main-keyboard equivalents.
    pub fn normalize(key: u32) -> u32 {
        match key {
            KP_0..=KP_9 => NUM_0 + (key - KP_0),
            KP_PERIOD => PERIOD,
            KP_MINUS => MINUS,
            KP_PLUS => PLUS,
            other => other,
        }
    }
}

/// An event as delivered by the host's dispatch thread.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    MouseButtonDown {
        button: MouseButton,
        x: i32,
        y: i32,
    },
    MouseButtonUp {
        button: MouseButton,
        x: i32,
        y: i32,
    },
    MouseMotion {
        buttons: MouseButtons,
        x: i32,
        y: i32,
        xrel: i32,
        yrel: i32,
    },
    KeyDown {
        key: u32,
        character: Option<char>,
        modifiers: Modifiers,
    },
    KeyUp {
        key: u32,
        character: Option<char>,
        modifiers: Modifiers,
    },
    Resize {
        width: u32,
        height: u32,
    },
    Timer,
    ReloadTextures,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcut_mask_drops_shift_and_meta() {
        let held = Modifiers::SHIFT | Modifiers::CTRL | Modifiers::META;
        assert_eq!(held.shortcut_mask(), Modifiers::CTRL);
        assert_eq!(
            (Modifiers::CTRL | Modifiers::ALT).shortcut_mask(),
            Modifiers::CTRL | Modifiers::ALT
        );
        assert!(Modifiers::SHIFT.shortcut_mask().is_empty());
    }

    #[test]
    fn keypad_folds_onto_main_keys() {
        assert_eq!(keys::normalize(keys::KP_0 + 7), keys::NUM_7);
        assert_eq!(keys::normalize(keys::KP_9), keys::NUM_9);
        assert_eq!(keys::normalize(keys::KP_PLUS), keys::PLUS);
        assert_eq!(keys::normalize(keys::KP_MINUS), keys::MINUS);
        assert_eq!(keys::normalize(keys::KP_PERIOD), keys::PERIOD);
        assert_eq!(keys::normalize(keys::UP), keys::UP);
    }

    #[test]
    fn button_numbers() {
        assert_eq!(MouseButton::from_index(1), Some(MouseButton::Left));
        assert_eq!(MouseButton::from_index(5), Some(MouseButton::WheelDown));
        assert_eq!(MouseButton::from_index(0), None);
        assert!(MouseButton::WheelUp.held_flag().is_empty());
        assert_eq!(MouseButton::Right.held_flag(), MouseButtons::RIGHT);
    }
}
