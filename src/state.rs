//! Daemon state and event loop
//!
//! The daemon only reads pointer devices. Nothing here drives a
//! [`KeyboardHandler`](raven_pointer::input::keyboard::KeyboardHandler), so
//! emitted events carry empty modifiers unless an embedder feeds keys into
//! the shared [`InputContext`].

use std::rc::Rc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use calloop::signals::{Signal, Signals};
use calloop::timer::{TimeoutAction, Timer};
use calloop::EventLoop;
use tracing::{info, trace};

use raven_pointer::backend::{HandlerOptions, LibinputBackend};
use raven_pointer::config::Config;
use raven_pointer::geometry::StaticDisplay;
use raven_pointer::input::context::InputContext;
use raven_pointer::input::{DeviceType, EventSink, InputEvent};
use raven_pointer::PointerManager;

/// Event sink that traces every normalized event
pub struct LogSink;

impl EventSink for LogSink {
    fn send(&mut self, event: InputEvent) {
        trace!("{:?}", event);
    }
}

/// Main daemon state
pub struct PointerState {
    pub config: Config,
    pub manager: PointerManager<LogSink>,
    /// Shared with the manager; keyboard modifiers and cursor requests go here
    pub context: Rc<InputContext>,
    pub running: bool,
}

impl PointerState {
    pub fn new(config: Config) -> Result<Self> {
        let geometry = Rc::new(StaticDisplay::from_config(&config.display));
        let context = Rc::new(InputContext::new());
        let backend = LibinputBackend::new(HandlerOptions::from_config(&config.pointer), geometry.clone());

        let manager = PointerManager::new(
            &config.pointer.specification,
            Box::new(backend),
            geometry,
            context.clone(),
            LogSink,
        );

        Ok(Self {
            config,
            manager,
            context,
            running: true,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        let mut event_loop: EventLoop<'_, PointerState> =
            EventLoop::try_new().context("Failed to create event loop")?;
        let handle = event_loop.handle();
        let interval = Duration::from_millis(self.config.general.poll_interval_ms.max(1));

        handle
            .insert_source(Timer::from_duration(interval), move |_, _, state| {
                state.manager.dispatch_pending();
                TimeoutAction::ToDuration(interval)
            })
            .map_err(|e| anyhow!("Failed to insert dispatch timer: {:?}", e.error))?;

        let signals =
            Signals::new(&[Signal::SIGINT, Signal::SIGTERM]).context("Failed to watch signals")?;
        handle
            .insert_source(signals, |event, _, state| {
                info!("Received {:?}", event.signal());
                state.quit();
            })
            .map_err(|e| anyhow!("Failed to insert signal source: {:?}", e.error))?;

        info!(
            "Running with {} pointer device(s)",
            self.context.device_count(DeviceType::Pointer)
        );

        let signal = event_loop.get_signal();
        event_loop
            .run(None, self, |state| {
                if !state.running {
                    signal.stop();
                }
            })
            .context("Event loop error")?;

        Ok(())
    }

    pub fn quit(&mut self) {
        info!("Quit requested");
        self.running = false;
    }
}
