//! Pointer manager
//!
//! Owns every open pointer device and folds their input into one virtual
//! cursor. The cursor is clamped to the display geometry and every motion,
//! button and wheel event is forwarded to the [`EventSink`] at the cursor
//! position plus the configured offset.

use std::env;
use std::rc::Rc;

use tracing::{debug, info, warn};

use super::context::InputContext;
use super::handler::{
    DeviceDiscovery, DiscoveryEvent, EventBatch, PointerBackend, PointerHandler, RawPointerEvent,
};
use super::registry::DeviceRegistry;
use super::{
    DeviceType, EventKind, EventSink, InputEvent, MouseButton, MouseButtons, PointerEvent,
    WheelEvent,
};
use crate::geometry::{DisplayGeometry, Point};
use crate::spec::{parse_specification, resolve_specification};

/// Environment variable that replaces the default specification
pub const POINTER_PARAMETERS_ENV: &str = "RAVEN_POINTER_PARAMETERS";

pub struct PointerManager<S: EventSink> {
    x: i32,
    y: i32,
    x_offset: i32,
    y_offset: i32,
    /// Specification without device nodes, handed to every handler
    spec: String,
    devices: DeviceRegistry<Box<dyn PointerHandler>>,
    backend: Box<dyn PointerBackend>,
    discovery: Option<Box<dyn DeviceDiscovery>>,
    geometry: Rc<dyn DisplayGeometry>,
    context: Rc<InputContext>,
    sink: S,
}

impl<S: EventSink> PointerManager<S> {
    /// Create a manager from `RAVEN_POINTER_PARAMETERS`, or `default_spec`
    /// when that is unset or empty.
    pub fn new(
        default_spec: &str,
        backend: Box<dyn PointerBackend>,
        geometry: Rc<dyn DisplayGeometry>,
        context: Rc<InputContext>,
        sink: S,
    ) -> Self {
        let spec = resolve_specification(env::var(POINTER_PARAMETERS_ENV).ok(), default_spec);
        Self::with_specification(&spec, backend, geometry, context, sink)
    }

    pub fn with_specification(
        specification: &str,
        backend: Box<dyn PointerBackend>,
        geometry: Rc<dyn DisplayGeometry>,
        context: Rc<InputContext>,
        sink: S,
    ) -> Self {
        let parsed = parse_specification(specification);

        let mut manager = Self {
            x: 0,
            y: 0,
            x_offset: 0,
            y_offset: 0,
            spec: parsed.spec,
            devices: DeviceRegistry::new(),
            backend,
            discovery: None,
            geometry,
            context,
            sink,
        };

        for arg in &parsed.args {
            if let Some(value) = arg.strip_prefix("xoffset=") {
                manager.x_offset = parse_offset(value);
            } else if let Some(value) = arg.strip_prefix("yoffset=") {
                manager.y_offset = parse_offset(value);
            }
        }

        for device in &parsed.devices {
            manager.add_device(device);
        }

        if parsed.devices.is_empty() {
            debug!("Using device discovery");
            match manager.backend.create_discovery() {
                Ok(mut discovery) => {
                    match discovery.scan_connected_devices() {
                        Ok(devices) => {
                            for device in &devices {
                                manager.add_device(device);
                            }
                        }
                        Err(err) => warn!("Failed to scan connected pointer devices: {}", err),
                    }
                    manager.discovery = Some(discovery);
                }
                Err(err) => warn!("Pointer hot-plug disabled: {}", err),
            }
        }

        info!(
            "Pointer manager ready with {} device(s), offset ({}, {})",
            manager.devices.count(),
            manager.x_offset,
            manager.y_offset
        );

        manager
    }

    pub fn add_device(&mut self, node: &str) {
        debug!("Adding pointer device at {}", node);

        match self.backend.open_handler(node, &self.spec) {
            Ok(handler) => {
                if self.devices.add(node, handler).is_some() {
                    debug!("Replaced existing handler for {}", node);
                }
                self.update_device_count();
            }
            Err(err) => warn!("Failed to open pointer device {}: {}", node, err),
        }
    }

    pub fn remove_device(&mut self, node: &str) {
        if self.devices.remove(node).is_some() {
            debug!("Removing pointer device at {}", node);
            self.update_device_count();
        }
    }

    /// Keep `position + offset` inside the native virtual display geometry
    pub fn clamp_position(&mut self) {
        let g = self.geometry.native_virtual_geometry();

        self.x = clamp_axis(self.x, self.x_offset, g.left, g.right);
        self.y = clamp_axis(self.y, self.y_offset, g.top, g.bottom);
    }

    pub fn handle_motion(
        &mut self,
        x: i32,
        y: i32,
        absolute: bool,
        buttons: MouseButtons,
        button: MouseButton,
        kind: EventKind,
    ) {
        if absolute {
            self.x = x;
            self.y = y;
        } else {
            self.x = self.x.saturating_add(x);
            self.y = self.y.saturating_add(y);
        }

        self.clamp_position();

        let pos = self.emitted_position();
        // Modifiers come from the last key event seen by the keyboard path
        self.sink.send(InputEvent::Pointer(PointerEvent {
            local: pos,
            global: pos,
            buttons,
            button,
            kind,
            modifiers: self.context.keyboard_modifiers(),
        }));
    }

    pub fn handle_wheel(&mut self, delta: Point) {
        let pos = self.emitted_position();
        self.sink.send(InputEvent::Wheel(WheelEvent {
            local: pos,
            global: pos,
            pixel_delta: Point::default(),
            angle_delta: delta,
            modifiers: self.context.keyboard_modifiers(),
        }));
    }

    /// Move the cursor to `position` as requested elsewhere in the system
    pub fn warp_cursor(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
        self.clamp_position();
    }

    /// Apply pending cursor requests, hot-plug notifications and device
    /// input. Returns the number of device events routed.
    pub fn dispatch_pending(&mut self) -> usize {
        if let Some(position) = self.context.take_cursor_request() {
            self.warp_cursor(position);
        }

        let notifications = self
            .discovery
            .as_mut()
            .map(|discovery| discovery.poll_events())
            .unwrap_or_default();
        for notification in notifications {
            match notification {
                DiscoveryEvent::Added(node) => self.add_device(&node),
                DiscoveryEvent::Removed(node) => self.remove_device(&node),
            }
        }

        let mut batch = EventBatch::new();
        for (node, handler) in self.devices.iter_mut() {
            if let Err(err) = handler.read_events(&mut batch) {
                warn!("Failed to read pointer device {}: {}", node, err);
            }
        }

        let routed = batch.len();
        for event in batch {
            match event {
                RawPointerEvent::Motion {
                    x,
                    y,
                    absolute,
                    buttons,
                    button,
                    kind,
                } => self.handle_motion(x, y, absolute, buttons, button, kind),
                RawPointerEvent::Wheel { delta } => self.handle_wheel(delta),
            }
        }
        routed
    }

    fn update_device_count(&self) {
        self.context
            .set_device_count(DeviceType::Pointer, self.devices.count());
    }

    fn emitted_position(&self) -> Point {
        self.position() + self.offset()
    }

    /// Virtual cursor position, without the offset
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn offset(&self) -> Point {
        Point::new(self.x_offset, self.y_offset)
    }

    pub fn device_count(&self) -> usize {
        self.devices.count()
    }

    pub fn has_device(&self, node: &str) -> bool {
        self.devices.contains(node)
    }

    pub fn device_nodes(&self) -> Vec<String> {
        self.devices.nodes().map(String::from).collect()
    }

    pub fn specification(&self) -> &str {
        &self.spec
    }

    pub fn uses_discovery(&self) -> bool {
        self.discovery.is_some()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Shared input state; feed keyboard modifiers and cursor requests here
    pub fn context(&self) -> &Rc<InputContext> {
        &self.context
    }
}

/// Per-axis clamp of `pos + offset` into `[min, max]`, computed in `i64`
fn clamp_axis(pos: i32, offset: i32, min: i32, max: i32) -> i32 {
    let (pos, offset) = (i64::from(pos), i64::from(offset));
    let clamped = if pos + offset < i64::from(min) {
        i64::from(min) - offset
    } else if pos + offset > i64::from(max) {
        i64::from(max) - offset
    } else {
        pos
    };
    clamped.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn parse_offset(value: &str) -> i32 {
    value.trim().parse().unwrap_or_else(|_| {
        warn!("Ignoring invalid pointer offset '{}'", value);
        0
    })
}
