use core::num::NonZeroU32;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::util::event::EventError;

pub const DEFAULT_GRID_RESOLUTION: u32 = 40;

/// Where a batted ball landed, on a unit square independent of screen size.
///
/// `height` runs from 0 (ground ball) to 1 (highest fly ball arc) and is only
/// used when drawing. `grid_resolution` is the snap granularity the point was
/// captured with.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitLocation {
    x: f64,
    y: f64,
    height: f64,
    grid_resolution: NonZeroU32,
}

fn check_unit(axis: &'static str, value: f64) -> Result<f64, EventError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(EventError::CoordinateOutOfRange { axis, value })
    }
}

impl HitLocation {
    pub fn new(x: f64, y: f64, height: f64, grid_resolution: u32) -> Result<Self, EventError> {
        Ok(Self {
            x: check_unit("x", x)?,
            y: check_unit("y", y)?,
            height: check_unit("height", height)?,
            grid_resolution: NonZeroU32::new(grid_resolution).ok_or(EventError::ZeroGridResolution)?,
        })
    }

    /// Normalizes a tap on a `width` x `height` canvas, snapping it to the capture grid.
    pub fn from_pixels(px: f64, py: f64, width: f64, height: f64, arc: f64, grid_resolution: u32) -> Result<Self, EventError> {
        let grid = NonZeroU32::new(grid_resolution).ok_or(EventError::ZeroGridResolution)?;
        let snap = |axis: &'static str, pixel: f64, extent: f64| -> Result<f64, EventError> {
            let fraction = pixel / extent;
            if !fraction.is_finite() {
                return Err(EventError::CoordinateOutOfRange { axis, value: fraction });
            }
            let denominator = f64::from(grid.get());
            Ok(((fraction * denominator).round() / denominator).clamp(0.0, 1.0))
        };
        Self::new(snap("x", px, width)?, snap("y", py, height)?, arc.clamp(0.0, 1.0), grid.get())
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let x = value["x"].as_f64().context("Could not get hit location's x")?;
        let y = value["y"].as_f64().context("Could not get hit location's y")?;
        let height = value["height"].as_f64().unwrap_or(0.0);
        let grid_resolution = match value["gridResolution"].as_u64() {
            Some(n) => u32::try_from(n).context("Grid resolution was too large")?,
            None => DEFAULT_GRID_RESOLUTION,
        };
        Ok(Self::new(x, y, height, grid_resolution)?)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn grid_resolution(&self) -> u32 {
        self.grid_resolution.get()
    }

    pub fn to_pixels(&self, width: f64, height: f64) -> (f64, f64) {
        (self.x * width, self.y * height)
    }

    pub fn grid_cell(&self) -> (u32, u32) {
        let denominator = f64::from(self.grid_resolution.get());
        ((self.x * denominator).round() as u32, (self.y * denominator).round() as u32)
    }

    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(HitLocation::new(1.5, 0.0, 0.0, 40), Err(EventError::CoordinateOutOfRange { axis: "x", value: 1.5 }));
        assert_eq!(HitLocation::new(0.0, -0.1, 0.0, 40), Err(EventError::CoordinateOutOfRange { axis: "y", value: -0.1 }));
        assert!(HitLocation::new(0.0, 0.0, f64::NAN, 40).is_err());
        assert_eq!(HitLocation::new(0.5, 0.5, 0.5, 0), Err(EventError::ZeroGridResolution));
    }

    #[test]
    fn test_from_pixels_snaps_to_grid() {
        let location = HitLocation::from_pixels(101.0, 299.0, 400.0, 400.0, 0.4, 40).unwrap();
        assert_eq!(location.x(), 0.25);
        assert_eq!(location.y(), 0.75);
        assert_eq!(location.grid_cell(), (10, 30));
        assert_eq!(location.height(), 0.4);
    }

    #[test]
    fn test_pixels_are_independent_of_screen_size() {
        let small = HitLocation::from_pixels(80.0, 40.0, 320.0, 320.0, 0.0, 40).unwrap();
        let large = HitLocation::from_pixels(256.0, 128.0, 1024.0, 1024.0, 0.0, 40).unwrap();
        assert_eq!(small, large);
        assert_eq!(large.to_pixels(1024.0, 1024.0), (256.0, 128.0));
        assert_eq!(small.to_pixels(320.0, 320.0), (80.0, 40.0));
    }

    #[test]
    fn test_from_pixels_clamps_and_rejects_empty_canvas() {
        let location = HitLocation::from_pixels(500.0, -10.0, 400.0, 400.0, 2.0, 40).unwrap();
        assert_eq!((location.x(), location.y(), location.height()), (1.0, 0.0, 1.0));
        assert!(HitLocation::from_pixels(10.0, 10.0, 0.0, 400.0, 0.0, 40).is_err());
    }

    #[test]
    fn test_from_value_defaults() {
        let location = HitLocation::from_value(&json!({ "x": 0.5, "y": 0.5 })).unwrap();
        assert_eq!(location.height(), 0.0);
        assert_eq!(location.grid_resolution(), DEFAULT_GRID_RESOLUTION);
        assert!(HitLocation::from_value(&json!({ "y": 0.5 })).is_err());
    }
}
