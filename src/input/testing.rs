//! In-memory backend for manager tests

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::rc::Rc;

use super::handler::{
    DeviceDiscovery, DiscoveryEvent, EventBatch, PointerBackend, PointerHandler, RawPointerEvent,
};
use crate::error::{PointerError, Result};

struct MockState {
    openable: HashSet<String>,
    connected: Vec<String>,
    discovery_available: bool,
    discovery_created: bool,
    hotplug: VecDeque<DiscoveryEvent>,
    pending: HashMap<String, Vec<RawPointerEvent>>,
    failing_reads: HashSet<String>,
    opened: Vec<(String, String)>,
}

#[derive(Clone)]
pub struct MockBackend {
    state: Rc<RefCell<MockState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState {
                openable: HashSet::new(),
                connected: Vec::new(),
                discovery_available: true,
                discovery_created: false,
                hotplug: VecDeque::new(),
                pending: HashMap::new(),
                failing_reads: HashSet::new(),
                opened: Vec::new(),
            })),
        }
    }

    pub fn boxed(&self) -> Box<dyn PointerBackend> {
        Box::new(self.clone())
    }

    /// Make `node` openable
    pub fn allow(&self, node: &str) {
        self.state.borrow_mut().openable.insert(node.to_string());
    }

    /// Openable and reported by the initial scan
    pub fn connect(&self, node: &str) {
        self.allow(node);
        self.state.borrow_mut().connected.push(node.to_string());
    }

    pub fn plug(&self, node: &str) {
        self.state
            .borrow_mut()
            .hotplug
            .push_back(DiscoveryEvent::Added(node.to_string()));
    }

    pub fn unplug(&self, node: &str) {
        self.state
            .borrow_mut()
            .hotplug
            .push_back(DiscoveryEvent::Removed(node.to_string()));
    }

    pub fn queue(&self, node: &str, event: RawPointerEvent) {
        self.state
            .borrow_mut()
            .pending
            .entry(node.to_string())
            .or_default()
            .push(event);
    }

    pub fn fail_reads(&self, node: &str) {
        self.state.borrow_mut().failing_reads.insert(node.to_string());
    }

    pub fn disable_discovery(&self) {
        self.state.borrow_mut().discovery_available = false;
    }

    pub fn discovery_created(&self) -> bool {
        self.state.borrow().discovery_created
    }

    /// `(node, spec)` for every successful open
    pub fn opened(&self) -> Vec<(String, String)> {
        self.state.borrow().opened.clone()
    }
}

impl PointerBackend for MockBackend {
    fn open_handler(&self, node: &str, spec: &str) -> Result<Box<dyn PointerHandler>> {
        let mut state = self.state.borrow_mut();
        if !state.openable.contains(node) {
            return Err(PointerError::DeviceOpen {
                node: node.to_string(),
                reason: "no such device".into(),
            });
        }

        state.opened.push((node.to_string(), spec.to_string()));
        Ok(Box::new(MockHandler {
            node: node.to_string(),
            state: self.state.clone(),
        }))
    }

    fn create_discovery(&self) -> Result<Box<dyn DeviceDiscovery>> {
        let mut state = self.state.borrow_mut();
        if !state.discovery_available {
            return Err(PointerError::Discovery("disabled".into()));
        }

        state.discovery_created = true;
        Ok(Box::new(MockDiscovery {
            state: self.state.clone(),
        }))
    }
}

struct MockHandler {
    node: String,
    state: Rc<RefCell<MockState>>,
}

impl PointerHandler for MockHandler {
    fn read_events(&mut self, events: &mut EventBatch) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.failing_reads.contains(&self.node) {
            return Err(io::Error::new(io::ErrorKind::Other, "device gone").into());
        }

        if let Some(pending) = state.pending.remove(&self.node) {
            events.extend(pending);
        }
        Ok(())
    }
}

struct MockDiscovery {
    state: Rc<RefCell<MockState>>,
}

impl DeviceDiscovery for MockDiscovery {
    fn scan_connected_devices(&mut self) -> Result<Vec<String>> {
        Ok(self.state.borrow().connected.clone())
    }

    fn poll_events(&mut self) -> Vec<DiscoveryEvent> {
        self.state.borrow_mut().hotplug.drain(..).collect()
    }
}
