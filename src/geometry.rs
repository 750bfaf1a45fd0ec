//! Display geometry used for cursor clamping

use std::cell::Cell;
use std::ops::Add;

use tracing::warn;

use crate::config::DisplayConfig;

/// Integer point in display coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

/// Rectangle with inclusive bounds on both axes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Rectangle from origin and size; `right` is `x + width - 1`
    ///
    /// Sizes beyond `i32::MAX` are saturated, as are bounds past the
    /// coordinate range.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            left: x,
            top: y,
            right: x.saturating_add(span(width)).saturating_sub(1),
            bottom: y.saturating_add(span(height)).saturating_sub(1),
        }
    }

    pub const fn from_bounds(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> u32 {
        extent(self.left, self.right)
    }

    pub fn height(&self) -> u32 {
        extent(self.top, self.bottom)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn contains(&self, point: Point) -> bool {
        (self.left..=self.right).contains(&point.x) && (self.top..=self.bottom).contains(&point.y)
    }

    /// Scale the size from logical to native (device) pixels
    ///
    /// The origin is a position in the virtual desktop and stays put.
    pub fn to_native_pixels(&self, scale_factor: f64) -> Rect {
        if scale_factor == 1.0 {
            return *self;
        }

        // `as` saturates out-of-range floats
        let scale = |v: u32| (f64::from(v) * scale_factor).round() as u32;

        Rect::new(self.left, self.top, scale(self.width()), scale(self.height()))
    }
}

fn span(size: u32) -> i32 {
    i32::try_from(size).unwrap_or_else(|_| {
        warn!("Display size {} out of range, saturating to {}", size, i32::MAX);
        i32::MAX
    })
}

fn extent(low: i32, high: i32) -> u32 {
    u32::try_from((i64::from(high) - i64::from(low) + 1).max(0)).unwrap_or(u32::MAX)
}

/// Source of the current virtual display geometry
///
/// Read every time the cursor is clamped, never cached by the caller.
pub trait DisplayGeometry {
    /// Bounding rectangle of all active displays, in logical pixels
    fn virtual_geometry(&self) -> Rect;

    fn scale_factor(&self) -> f64 {
        1.0
    }

    fn native_virtual_geometry(&self) -> Rect {
        self.virtual_geometry().to_native_pixels(self.scale_factor())
    }
}

/// Geometry fixed by configuration, updatable when outputs change
#[derive(Debug)]
pub struct StaticDisplay {
    geometry: Cell<Rect>,
    scale_factor: Cell<f64>,
}

impl StaticDisplay {
    pub fn new(geometry: Rect, scale_factor: f64) -> Self {
        Self {
            geometry: Cell::new(geometry),
            scale_factor: Cell::new(scale_factor),
        }
    }

    pub fn from_config(config: &DisplayConfig) -> Self {
        Self::new(
            Rect::new(config.x, config.y, config.width, config.height),
            config.scale_factor,
        )
    }

    pub fn set_geometry(&self, geometry: Rect) {
        self.geometry.set(geometry);
    }

    pub fn set_scale_factor(&self, scale_factor: f64) {
        self.scale_factor.set(scale_factor);
    }
}

impl DisplayGeometry for StaticDisplay {
    fn virtual_geometry(&self) -> Rect {
        self.geometry.get()
    }

    fn scale_factor(&self) -> f64 {
        self.scale_factor.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_bounds_are_inclusive() {
        let rect = Rect::new(0, 0, 1920, 1080);

        assert_eq!(rect.right, 1919);
        assert_eq!(rect.bottom, 1079);
        assert_eq!(rect.width(), 1920);
        assert!(rect.contains(Point::new(1919, 1079)));
        assert!(!rect.contains(Point::new(1920, 0)));
    }

    #[test]
    fn native_pixels_keep_origin_and_scale_size() {
        let rect = Rect::new(100, 50, 1280, 720);
        let native = rect.to_native_pixels(1.5);

        assert_eq!(native.top_left(), Point::new(100, 50));
        assert_eq!(native.width(), 1920);
        assert_eq!(native.height(), 1080);
    }

    #[test]
    fn oversized_dimensions_saturate_instead_of_wrapping() {
        let rect = Rect::new(0, 0, u32::MAX, 10);

        assert_eq!(rect.right, i32::MAX - 1);
        assert_eq!(rect.width(), i32::MAX as u32);
        assert!(rect.contains(Point::new(1_000_000, 5)));

        let shifted = Rect::new(100, 0, u32::MAX, 10);
        assert_eq!(shifted.right, i32::MAX - 1);
        assert!(shifted.width() > 0);
    }

    #[test]
    fn point_addition_saturates() {
        assert_eq!(Point::new(i32::MAX, i32::MIN) + Point::new(1, -1), Point::new(i32::MAX, i32::MIN));
    }

    #[test]
    fn static_display_reads_latest_geometry() {
        let display = StaticDisplay::new(Rect::new(0, 0, 800, 600), 1.0);
        display.set_geometry(Rect::new(0, 0, 1024, 768));
        display.set_scale_factor(2.0);

        assert_eq!(display.native_virtual_geometry(), Rect::new(0, 0, 2048, 1536));
    }
}
