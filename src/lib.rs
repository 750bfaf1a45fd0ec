//! raven-pointer - pointer input manager for RavenDE
//!
//! Folds any number of mice and touchpads into one virtual cursor, clamps it
//! to the display geometry and hands normalized events to the window system.
//!
//! Keyboard modifiers attached to pointer events come from the shared
//! [`InputContext`](input::context::InputContext). A keyboard path publishes
//! them through [`KeyboardHandler`](input::keyboard::KeyboardHandler). The
//! bundled daemon has no keyboard path and runs pointer-only, so its events
//! carry empty modifiers.

pub mod backend;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod spec;

pub use error::{PointerError, Result};
pub use input::manager::{PointerManager, POINTER_PARAMETERS_ENV};
