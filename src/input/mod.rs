//! Pointer input: normalized events, the shared input context and the
//! pointer manager that ties devices to the event sink.

pub mod context;
pub mod handler;
pub mod keyboard;
pub mod manager;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;

use bitflags::bitflags;

use crate::geometry::Point;

bitflags! {
    /// Set of currently held mouse buttons
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct MouseButtons: u32 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const MIDDLE = 1 << 2;
        const BACK = 1 << 3;
        const FORWARD = 1 << 4;
        const TASK = 1 << 5;
    }
}

bitflags! {
    /// Keyboard modifier state
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
        const META = 1 << 3;
        const KEYPAD = 1 << 4;
        const GROUP_SWITCH = 1 << 5;
    }
}

/// The button whose state changed with an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MouseButton {
    #[default]
    None,
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Task,
}

// linux/input-event-codes.h
const BTN_LEFT: u32 = 0x110;
const BTN_RIGHT: u32 = 0x111;
const BTN_MIDDLE: u32 = 0x112;
const BTN_SIDE: u32 = 0x113;
const BTN_EXTRA: u32 = 0x114;
const BTN_FORWARD: u32 = 0x115;
const BTN_BACK: u32 = 0x116;
const BTN_TASK: u32 = 0x117;

impl MouseButton {
    /// Translate an evdev button code
    pub fn from_evdev(code: u32) -> Self {
        match code {
            BTN_LEFT => Self::Left,
            BTN_RIGHT => Self::Right,
            BTN_MIDDLE => Self::Middle,
            BTN_SIDE | BTN_BACK => Self::Back,
            BTN_EXTRA | BTN_FORWARD => Self::Forward,
            BTN_TASK => Self::Task,
            _ => Self::None,
        }
    }

    pub fn mask(self) -> MouseButtons {
        match self {
            Self::None => MouseButtons::empty(),
            Self::Left => MouseButtons::LEFT,
            Self::Right => MouseButtons::RIGHT,
            Self::Middle => MouseButtons::MIDDLE,
            Self::Back => MouseButtons::BACK,
            Self::Forward => MouseButtons::FORWARD,
            Self::Task => MouseButtons::TASK,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EventKind {
    #[default]
    Move,
    ButtonPress,
    ButtonRelease,
}

/// Device classes whose counts are published on the input context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceType {
    Pointer,
    Keyboard,
}

/// Normalized pointer motion or button event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub local: Point,
    pub global: Point,
    pub buttons: MouseButtons,
    pub button: MouseButton,
    pub kind: EventKind,
    pub modifiers: Modifiers,
}

/// Normalized wheel event; angle delta is in eighths of a degree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelEvent {
    pub local: Point,
    pub global: Point,
    pub pixel_delta: Point,
    pub angle_delta: Point,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Wheel(WheelEvent),
}

/// Consumer of normalized events (the window system)
pub trait EventSink {
    fn send(&mut self, event: InputEvent);
}

impl EventSink for Vec<InputEvent> {
    fn send(&mut self, event: InputEvent) {
        self.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evdev_codes_map_to_buttons() {
        assert_eq!(MouseButton::from_evdev(0x110), MouseButton::Left);
        assert_eq!(MouseButton::from_evdev(0x113), MouseButton::Back);
        assert_eq!(MouseButton::from_evdev(0x115), MouseButton::Forward);
        assert_eq!(MouseButton::from_evdev(0x1f0), MouseButton::None);
    }

    #[test]
    fn no_button_has_empty_mask() {
        assert!(MouseButton::None.mask().is_empty());
        assert_eq!(MouseButton::Middle.mask(), MouseButtons::MIDDLE);
    }
}
