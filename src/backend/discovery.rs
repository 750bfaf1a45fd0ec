//! Pointer device discovery through udev

use std::ffi::OsStr;

use tracing::debug;
use udev::{Device, EventType, MonitorBuilder, MonitorSocket};

use crate::error::{PointerError, Result};
use crate::input::handler::{DeviceDiscovery, DiscoveryEvent};

const POINTER_TAGS: [&str; 2] = ["ID_INPUT_MOUSE", "ID_INPUT_TOUCHPAD"];

/// Device node of an evdev mouse or touchpad, `None` for anything else
fn pointer_node(device: &Device) -> Option<String> {
    if !device.sysname().to_string_lossy().starts_with("event") {
        return None;
    }

    let tagged = POINTER_TAGS
        .iter()
        .any(|tag| device.property_value(*tag) == Some(OsStr::new("1")));
    if !tagged {
        return None;
    }

    device.devnode().map(|node| node.to_string_lossy().into_owned())
}

pub struct UdevDiscovery {
    monitor: MonitorSocket,
}

impl UdevDiscovery {
    pub fn new() -> Result<Self> {
        let monitor = MonitorBuilder::new()
            .and_then(|builder| builder.match_subsystem("input"))
            .and_then(|builder| builder.listen())
            .map_err(|err| PointerError::Discovery(format!("udev monitor: {}", err)))?;
        debug!("Listening for input device hot-plug");
        Ok(Self { monitor })
    }
}

impl DeviceDiscovery for UdevDiscovery {
    fn scan_connected_devices(&mut self) -> Result<Vec<String>> {
        let mut enumerator = udev::Enumerator::new()?;
        enumerator.match_subsystem("input")?;
        enumerator.match_sysname("event*")?;

        let devices: Vec<String> = enumerator
            .scan_devices()?
            .filter_map(|device| pointer_node(&device))
            .collect();
        debug!("Found {} connected pointer device(s)", devices.len());
        Ok(devices)
    }

    fn poll_events(&mut self) -> Vec<DiscoveryEvent> {
        self.monitor
            .iter()
            .filter_map(|event| {
                let node = pointer_node(&event.device())?;
                match event.event_type() {
                    EventType::Add => Some(DiscoveryEvent::Added(node)),
                    EventType::Remove => Some(DiscoveryEvent::Removed(node)),
                    _ => None,
                }
            })
            .collect()
    }
}
