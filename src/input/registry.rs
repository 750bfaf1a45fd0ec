//! Owned registry of open devices keyed by device node

use indexmap::IndexMap;

/// Devices owned by a manager; dropping an entry closes the device
#[derive(Debug)]
pub struct DeviceRegistry<H> {
    devices: IndexMap<String, H>,
}

impl<H> Default for DeviceRegistry<H> {
    fn default() -> Self {
        Self {
            devices: IndexMap::new(),
        }
    }
}

impl<H> DeviceRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a device, returning the one it replaced
    pub fn add(&mut self, node: impl Into<String>, handler: H) -> Option<H> {
        self.devices.insert(node.into(), handler)
    }

    pub fn remove(&mut self, node: &str) -> Option<H> {
        self.devices.shift_remove(node)
    }

    pub fn contains(&self, node: &str) -> bool {
        self.devices.contains_key(node)
    }

    pub fn count(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.devices.keys().map(String::as_str)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut H)> {
        self.devices.iter_mut().map(|(node, handler)| (node.as_str(), handler))
    }
}
