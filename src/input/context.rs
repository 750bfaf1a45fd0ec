//! Input state shared between the keyboard path, the pointer manager and
//! the daemon.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use tracing::debug;

use super::{DeviceType, Modifiers};
use crate::geometry::Point;

#[derive(Debug, Default)]
pub struct InputContext {
    modifiers: Cell<Modifiers>,
    device_counts: RefCell<HashMap<DeviceType, usize>>,
    cursor_request: Cell<Option<Point>>,
}

impl InputContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Modifiers from the most recent key event
    pub fn keyboard_modifiers(&self) -> Modifiers {
        self.modifiers.get()
    }

    pub fn set_keyboard_modifiers(&self, modifiers: Modifiers) {
        self.modifiers.set(modifiers);
    }

    pub fn set_device_count(&self, device_type: DeviceType, count: usize) {
        debug!("{:?} device count: {}", device_type, count);
        self.device_counts.borrow_mut().insert(device_type, count);
    }

    pub fn device_count(&self, device_type: DeviceType) -> usize {
        self.device_counts
            .borrow()
            .get(&device_type)
            .copied()
            .unwrap_or(0)
    }

    /// Ask the pointer manager to move the cursor; the latest request wins
    pub fn request_cursor_position(&self, position: Point) {
        self.cursor_request.set(Some(position));
    }

    pub fn take_cursor_request(&self) -> Option<Point> {
        self.cursor_request.take()
    }
}
