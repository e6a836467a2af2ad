//! Frame clock: converts animation-frame timestamps into reference-frame deltas
//!
//! Deltas are measured in frames of the 60 Hz reference rate and capped at
//! `MAX_FRAME_DELTA` so a backgrounded tab does not teleport the bird when it
//! comes back.

use crate::consts::{MAX_FRAME_DELTA, REFERENCE_FPS};

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the baseline; the next timestamp only re-establishes it
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn has_baseline(&self) -> bool {
        self.last.is_some()
    }

    /// Feed a timestamp in milliseconds. `None` while establishing the baseline.
    pub fn tick(&mut self, timestamp_ms: f64) -> Option<f32> {
        let last = self.last.replace(timestamp_ms)?;
        let frame_ms = 1000.0 / REFERENCE_FPS;
        let delta = (timestamp_ms - last) / frame_ms;
        if !delta.is_finite() || delta <= 0.0 {
            return Some(0.0);
        }
        Some((delta as f32).min(MAX_FRAME_DELTA))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_baseline() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(1000.0), None);
        assert!(clock.has_baseline());
    }

    #[test]
    fn test_reference_frame_is_one() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        let dt = clock.tick(1000.0 / 60.0).unwrap();
        assert!((dt - 1.0).abs() < 1e-5);
        let dt = clock.tick(1000.0 / 60.0 + 8.0).unwrap();
        assert!((dt - 0.48).abs() < 1e-4);
    }

    #[test]
    fn test_large_gap_is_clamped() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        assert_eq!(clock.tick(10_000.0), Some(3.0));
    }

    #[test]
    fn test_backwards_time_is_zero() {
        let mut clock = FrameClock::new();
        clock.tick(500.0);
        assert_eq!(clock.tick(400.0), Some(0.0));
        assert_eq!(clock.tick(f64::NAN), Some(0.0));
    }

    #[test]
    fn test_reset_requires_new_baseline() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        clock.tick(16.0);
        clock.reset();
        assert_eq!(clock.tick(5000.0), None);
        assert!(clock.tick(5016.0).is_some());
    }
}
