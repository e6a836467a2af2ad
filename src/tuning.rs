//! Data-driven game balance
//!
//! Balance values (physics, pipe layout, hitbox) come through [`Tuning`].
//! Defaults match `crate::consts`; a JSON override may set any subset of
//! fields. A few fixed ratios, such as the bird's spawn column and the tilt
//! threshold, are read from `crate::consts` directly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading or validating a tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Physics and layout values for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub view_width: f32,
    pub view_height: f32,

    pub gravity: f32,
    pub jump_velocity: f32,
    pub max_fall: f32,

    pub tilt_up: f32,
    pub tilt_down_max: f32,
    pub tilt_rate: f32,

    pub bird_sprite_height: f32,

    pub pipe_speed: f32,
    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub pipe_interval: f32,
    pub initial_pipes: usize,
    pub first_pipe_offset: f32,
    pub despawn_margin: f32,
    pub gap_margin_top: f32,
    pub gap_margin_bottom: f32,

    pub ground_height: f32,
    pub hit_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,

            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            max_fall: MAX_FALL,

            tilt_up: TILT_UP,
            tilt_down_max: TILT_DOWN_MAX,
            tilt_rate: TILT_RATE,

            bird_sprite_height: BIRD_SPRITE_HEIGHT,

            pipe_speed: PIPE_SPEED,
            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            pipe_interval: PIPE_INTERVAL,
            initial_pipes: INITIAL_PIPES,
            first_pipe_offset: FIRST_PIPE_OFFSET,
            despawn_margin: DESPAWN_MARGIN,
            gap_margin_top: GAP_MARGIN,
            gap_margin_bottom: GAP_MARGIN,

            ground_height: GROUND_HEIGHT,
            hit_margin: HIT_MARGIN,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Y coordinate of the top of the ground strip
    pub fn ground_y(&self) -> f32 {
        self.view_height - self.ground_height
    }

    /// Range of gap offsets a new pipe may take
    pub fn gap_range(&self) -> (f32, f32) {
        let min = self.gap_margin_top;
        let max = self.view_height - self.ground_height - self.pipe_gap - self.gap_margin_bottom;
        (min, max)
    }

    /// Where the bird starts each session
    pub fn bird_spawn(&self) -> (f32, f32) {
        (
            self.view_width * BIRD_SPAWN_X_FRACTION,
            self.view_height / 2.0,
        )
    }

    /// Check that the values describe a playable field
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.view_width <= 0.0 || self.view_height <= 0.0 {
            return Err(TuningError::Invalid("view size must be positive".into()));
        }
        if self.ground_height < 0.0 || self.ground_height >= self.view_height {
            return Err(TuningError::Invalid(format!(
                "ground height {} does not fit a view of height {}",
                self.ground_height, self.view_height
            )));
        }
        if self.max_fall <= 0.0 || self.gravity < 0.0 {
            return Err(TuningError::Invalid(
                "gravity must be non-negative and max fall positive".into(),
            ));
        }
        if self.jump_velocity >= 0.0 {
            return Err(TuningError::Invalid(format!(
                "jump velocity {} must point upward (negative)",
                self.jump_velocity
            )));
        }
        if self.tilt_rate < 0.0 || self.bird_sprite_height <= 0.0 {
            return Err(TuningError::Invalid(
                "tilt rate must be non-negative and sprite height positive".into(),
            ));
        }
        if self.pipe_speed <= 0.0 || self.pipe_width <= 0.0 || self.pipe_interval <= 0.0 {
            return Err(TuningError::Invalid(
                "pipe speed, width and interval must be positive".into(),
            ));
        }
        if self.pipe_gap <= 0.0 || self.gap_margin_top < 0.0 || self.gap_margin_bottom < 0.0 {
            return Err(TuningError::Invalid(
                "pipe gap must be positive and gap margins non-negative".into(),
            ));
        }
        let (min, max) = self.gap_range();
        if max < min {
            return Err(TuningError::Invalid(format!(
                "gap of {} with margins {}/{} does not fit above the ground",
                self.pipe_gap, self.gap_margin_top, self.gap_margin_bottom
            )));
        }
        if self.first_pipe_offset < 0.0 {
            return Err(TuningError::Invalid(
                "first pipe offset must be non-negative".into(),
            ));
        }
        if self.initial_pipes == 0 {
            return Err(TuningError::Invalid("at least one initial pipe is required".into()));
        }
        if self.hit_margin < 0.0 {
            return Err(TuningError::Invalid("hit margin must be non-negative".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.gap_range(), (60.0, 250.0));
        assert_eq!(tuning.ground_y(), 440.0);
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{ "pipe_speed": 3.0, "hit_margin": 4 }"#).unwrap();
        assert_eq!(tuning.pipe_speed, 3.0);
        assert_eq!(tuning.hit_margin, 4.0);
        assert_eq!(tuning.gravity, GRAVITY);
    }

    #[test]
    fn test_gap_that_cannot_fit_is_rejected() {
        let err = Tuning::from_json(r#"{ "pipe_gap": 400.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_sign_checks() {
        for json in [
            r#"{ "jump_velocity": 6.5 }"#,
            r#"{ "jump_velocity": 0 }"#,
            r#"{ "tilt_rate": -1 }"#,
            r#"{ "bird_sprite_height": 0 }"#,
            r#"{ "first_pipe_offset": -50 }"#,
        ] {
            let err = Tuning::from_json(json).unwrap_err();
            assert!(matches!(err, TuningError::Invalid(_)), "{} accepted", json);
        }
        assert!(Tuning::from_json(r#"{ "first_pipe_offset": 0 }"#).is_ok());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_fixed_gap_is_allowed() {
        // Margins chosen so min == max: every pipe gets the same gap
        let tuning = Tuning {
            gap_margin_top: 175.0,
            gap_margin_bottom: 135.0,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.gap_range(), (175.0, 175.0));
    }
}
