//! Seams between the pointer manager and the platform: device handlers,
//! device discovery and the backend that creates both.

use smallvec::SmallVec;

use super::{EventKind, MouseButton, MouseButtons};
use crate::error::Result;
use crate::geometry::Point;

/// Raw events drained from one handler in one dispatch
pub type EventBatch = SmallVec<[RawPointerEvent; 16]>;

/// What a device handler reports before normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawPointerEvent {
    /// Relative delta or absolute position, with the button state after it
    Motion {
        x: i32,
        y: i32,
        absolute: bool,
        buttons: MouseButtons,
        button: MouseButton,
        kind: EventKind,
    },
    /// Wheel delta in eighths of a degree
    Wheel { delta: Point },
}

impl RawPointerEvent {
    pub fn relative(dx: i32, dy: i32, buttons: MouseButtons) -> Self {
        Self::Motion {
            x: dx,
            y: dy,
            absolute: false,
            buttons,
            button: MouseButton::None,
            kind: EventKind::Move,
        }
    }

    pub fn absolute(x: i32, y: i32, buttons: MouseButtons) -> Self {
        Self::Motion {
            x,
            y,
            absolute: true,
            buttons,
            button: MouseButton::None,
            kind: EventKind::Move,
        }
    }

    /// Button change without movement
    pub fn button(buttons: MouseButtons, button: MouseButton, pressed: bool) -> Self {
        Self::Motion {
            x: 0,
            y: 0,
            absolute: false,
            buttons,
            button,
            kind: if pressed {
                EventKind::ButtonPress
            } else {
                EventKind::ButtonRelease
            },
        }
    }
}

/// One open physical pointer device
pub trait PointerHandler {
    /// Append every pending event without blocking
    fn read_events(&mut self, events: &mut EventBatch) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryEvent {
    Added(String),
    Removed(String),
}

/// Enumerates pointer devices and reports hot-plug
pub trait DeviceDiscovery {
    /// Device nodes of pointer devices connected right now
    fn scan_connected_devices(&mut self) -> Result<Vec<String>>;

    /// Hot-plug notifications received since the last call
    fn poll_events(&mut self) -> Vec<DiscoveryEvent>;
}

/// Platform backend the manager opens devices through
pub trait PointerBackend {
    fn open_handler(&self, node: &str, spec: &str) -> Result<Box<dyn PointerHandler>>;

    fn create_discovery(&self) -> Result<Box<dyn DeviceDiscovery>>;
}
