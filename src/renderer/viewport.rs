//! Mapping between the logical playfield and physical canvas pixels

use crate::consts::{VIEW_HEIGHT, VIEW_WIDTH};

/// Logical view presented on a backing store of `dpr` pixels per unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    dpr: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(VIEW_WIDTH, VIEW_HEIGHT, 1.0)
    }
}

impl Viewport {
    /// Non-finite or non-positive ratios fall back to 1
    pub fn new(width: f32, height: f32, dpr: f64) -> Self {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        Self { width, height, dpr }
    }

    pub fn dpr(&self) -> f64 {
        self.dpr
    }

    /// Canvas backing-store size in physical pixels
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width as f64 * self.dpr).round().max(1.0) as u32,
            (self.height as f64 * self.dpr).round().max(1.0) as u32,
        )
    }

    /// Largest display size that fits the available box without distortion
    pub fn fit_within(&self, available_width: f32, available_height: f32) -> (f32, f32) {
        if available_width <= 0.0 || available_height <= 0.0 {
            return (self.width, self.height);
        }
        let scale = (available_width / self.width).min(available_height / self.height);
        (self.width * scale, self.height * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backing_size_follows_dpr() {
        assert_eq!(Viewport::new(320.0, 480.0, 1.0).backing_size(), (320, 480));
        assert_eq!(Viewport::new(320.0, 480.0, 2.0).backing_size(), (640, 960));
        assert_eq!(Viewport::new(320.0, 480.0, 1.5).backing_size(), (480, 720));
    }

    #[test]
    fn test_invalid_dpr_is_one() {
        for dpr in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert_eq!(Viewport::new(320.0, 480.0, dpr).dpr(), 1.0);
        }
    }

    #[test]
    fn test_fit_within_keeps_aspect() {
        let view = Viewport::default();
        assert_eq!(view.fit_within(1000.0, 960.0), (640.0, 960.0));
        assert_eq!(view.fit_within(160.0, 960.0), (160.0, 240.0));
        assert_eq!(view.fit_within(0.0, 100.0), (320.0, 480.0));
    }
}
