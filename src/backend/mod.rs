//! Platform backend: libinput device handlers and udev device discovery
//!
//! The option parsing and event conversion helpers here are platform
//! independent; the handlers themselves need the `libinput` feature.

#[cfg(feature = "libinput")]
mod libinput;
#[cfg(feature = "libinput")]
mod discovery;

#[cfg(feature = "libinput")]
pub use self::libinput::{LibinputBackend, LibinputHandler};
#[cfg(feature = "libinput")]
pub use self::discovery::UdevDiscovery;

use tracing::debug;

use crate::config::PointerConfig;
use crate::geometry::Point;

/// Eighths of a degree per degree of wheel rotation (120 per 15 degree notch)
const ANGLE_UNITS_PER_DEGREE: f64 = 8.0;

/// Per-device settings, from config defaults overridden by the base spec
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerOptions {
    /// libinput acceleration speed in `[-1, 1]`
    pub acceleration: f64,
    pub natural_scroll: bool,
    pub left_handed: bool,
    pub scroll_factor: f64,
}

impl Default for HandlerOptions {
    fn default() -> Self {
        Self::from_config(&PointerConfig::default())
    }
}

impl HandlerOptions {
    pub fn from_config(config: &PointerConfig) -> Self {
        Self {
            acceleration: config.acceleration.clamp(-1.0, 1.0),
            natural_scroll: config.natural_scroll,
            left_handed: config.left_handed,
            scroll_factor: config.scroll_factor,
        }
    }

    /// Apply `accel=`, `natural`, `lefthanded` and `scroll=` tokens
    pub fn with_spec(mut self, spec: &str) -> Self {
        for arg in spec.split(':').filter(|arg| !arg.is_empty()) {
            let (key, value) = match arg.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (arg, None),
            };

            match key {
                "accel" => match value.and_then(|v| v.parse::<f64>().ok()) {
                    Some(speed) => self.acceleration = speed.clamp(-1.0, 1.0),
                    None => debug!("Ignoring malformed accel option '{}'", arg),
                },
                "scroll" => match value.and_then(|v| v.parse::<f64>().ok()) {
                    Some(factor) => self.scroll_factor = factor,
                    None => debug!("Ignoring malformed scroll option '{}'", arg),
                },
                "natural" => self.natural_scroll = parse_flag(value),
                "lefthanded" => self.left_handed = parse_flag(value),
                _ => {}
            }
        }
        self
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    !matches!(value, Some("0") | Some("false") | Some("off"))
}

/// Turns fractional motion deltas into integer steps without losing the
/// remainder.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionAccumulator {
    x: f64,
    y: f64,
}

impl MotionAccumulator {
    pub fn push(&mut self, dx: f64, dy: f64) -> (i32, i32) {
        self.x += dx;
        self.y += dy;
        let step_x = self.x.trunc();
        let step_y = self.y.trunc();
        self.x -= step_x;
        self.y -= step_y;
        (step_x as i32, step_y as i32)
    }
}

/// Convert wheel rotation in degrees into an angle delta. Positive values
/// mean up (away from the user) and left.
pub fn wheel_delta(horizontal_degrees: f64, vertical_degrees: f64, scroll_factor: f64) -> Point {
    let convert = |degrees: f64| (-degrees * ANGLE_UNITS_PER_DEGREE * scroll_factor).round() as i32;
    Point::new(convert(horizontal_degrees), convert(vertical_degrees))
}
