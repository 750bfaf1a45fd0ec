//! Pointer handlers on top of libinput path contexts
//!
//! Every handler owns a libinput context holding exactly one device node,
//! so closing a device is just dropping its handler.

use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::OwnedFd;
use std::path::Path;
use std::rc::Rc;

use input::event::pointer::{Axis, ButtonState, PointerEvent as LibinputPointerEvent};
use input::event::Event;
use input::{DeviceCapability, Libinput, LibinputInterface};
use libc::{O_ACCMODE, O_RDONLY, O_RDWR, O_WRONLY};
use tracing::{debug, info};

use super::discovery::UdevDiscovery;
use super::{wheel_delta, HandlerOptions, MotionAccumulator};
use crate::error::{PointerError, Result};
use crate::geometry::{DisplayGeometry, Point};
use crate::input::handler::{
    DeviceDiscovery, EventBatch, PointerBackend, PointerHandler, RawPointerEvent,
};
use crate::input::{MouseButton, MouseButtons};

struct Interface;

impl LibinputInterface for Interface {
    fn open_restricted(&mut self, path: &Path, flags: i32) -> std::result::Result<OwnedFd, i32> {
        let mode = flags & O_ACCMODE;
        OpenOptions::new()
            .custom_flags(flags)
            .read(mode == O_RDONLY || mode == O_RDWR)
            .write(mode == O_WRONLY || mode == O_RDWR)
            .open(path)
            .map(OwnedFd::from)
            .map_err(|err| err.raw_os_error().unwrap_or(libc::EIO))
    }

    fn close_restricted(&mut self, fd: OwnedFd) {
        drop(File::from(fd));
    }
}

pub struct LibinputHandler {
    context: Libinput,
    options: HandlerOptions,
    geometry: Rc<dyn DisplayGeometry>,
    buttons: MouseButtons,
    motion: MotionAccumulator,
}

impl LibinputHandler {
    pub fn open(node: &str, options: HandlerOptions, geometry: Rc<dyn DisplayGeometry>) -> Result<Self> {
        let mut context = Libinput::new_from_path(Interface);
        let mut device = context
            .path_add_device(node)
            .ok_or_else(|| PointerError::DeviceOpen {
                node: node.to_string(),
                reason: "libinput could not open the device".into(),
            })?;

        if !device.has_capability(DeviceCapability::Pointer) {
            context.path_remove_device(device);
            return Err(PointerError::NotAPointer(node.to_string()));
        }

        if device.config_accel_is_available() {
            if let Err(err) = device.config_accel_set_speed(options.acceleration) {
                debug!("{}: acceleration not applied: {:?}", node, err);
            }
        }
        if device.config_scroll_has_natural_scroll() {
            if let Err(err) = device.config_scroll_set_natural_scroll_enabled(options.natural_scroll) {
                debug!("{}: natural scroll not applied: {:?}", node, err);
            }
        }
        if device.config_left_handed() {
            if let Err(err) = device.config_left_handed_set(options.left_handed) {
                debug!("{}: left-handed mode not applied: {:?}", node, err);
            }
        }

        info!("Opened pointer device {} ({})", node, device.name());

        Ok(Self {
            context,
            options,
            geometry,
            buttons: MouseButtons::empty(),
            motion: MotionAccumulator::default(),
        })
    }

    // PointerEvent::Axis is deprecated since libinput 1.19
    #[allow(deprecated)]
    fn translate(&mut self, event: LibinputPointerEvent, events: &mut EventBatch) {
        match event {
            LibinputPointerEvent::Motion(motion) => {
                let (dx, dy) = self.motion.push(motion.dx(), motion.dy());
                if dx != 0 || dy != 0 {
                    events.push(RawPointerEvent::relative(dx, dy, self.buttons));
                }
            }
            LibinputPointerEvent::MotionAbsolute(motion) => {
                let g = self.geometry.native_virtual_geometry();
                let x = g.left + motion.absolute_x_transformed(g.width()).round() as i32;
                let y = g.top + motion.absolute_y_transformed(g.height()).round() as i32;
                events.push(RawPointerEvent::absolute(x, y, self.buttons));
            }
            LibinputPointerEvent::Button(button_event) => {
                let button = MouseButton::from_evdev(button_event.button());
                if button == MouseButton::None {
                    return;
                }

                let pressed = button_event.button_state() == ButtonState::Pressed;
                self.buttons.set(button.mask(), pressed);
                events.push(RawPointerEvent::button(self.buttons, button, pressed));
            }
            LibinputPointerEvent::Axis(axis) => {
                let value = |a: Axis| if axis.has_axis(a) { axis.axis_value(a) } else { 0.0 };
                let delta = wheel_delta(
                    value(Axis::Horizontal),
                    value(Axis::Vertical),
                    self.options.scroll_factor,
                );
                if delta != Point::default() {
                    events.push(RawPointerEvent::Wheel { delta });
                }
            }
            _ => {}
        }
    }
}

impl PointerHandler for LibinputHandler {
    fn read_events(&mut self, events: &mut EventBatch) -> Result<()> {
        self.context.dispatch()?;

        while let Some(event) = self.context.next() {
            if let Event::Pointer(pointer_event) = event {
                self.translate(pointer_event, events);
            }
        }
        Ok(())
    }
}

/// Opens libinput handlers and udev discovery
pub struct LibinputBackend {
    defaults: HandlerOptions,
    geometry: Rc<dyn DisplayGeometry>,
}

impl LibinputBackend {
    pub fn new(defaults: HandlerOptions, geometry: Rc<dyn DisplayGeometry>) -> Self {
        Self { defaults, geometry }
    }
}

impl PointerBackend for LibinputBackend {
    fn open_handler(&self, node: &str, spec: &str) -> Result<Box<dyn PointerHandler>> {
        let options = self.defaults.clone().with_spec(spec);
        let handler = LibinputHandler::open(node, options, self.geometry.clone())?;
        Ok(Box::new(handler))
    }

    fn create_discovery(&self) -> Result<Box<dyn DeviceDiscovery>> {
        Ok(Box::new(UdevDiscovery::new()?))
    }
}
