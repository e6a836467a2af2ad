//! The hen: vertical kinematics and tilt

use glam::Vec2;

use crate::consts::{BIRD_DEFAULT_HEIGHT, BIRD_DEFAULT_WIDTH, TILT_UP_THRESHOLD};
use crate::tuning::Tuning;

/// The player's bird
///
/// `pos` is the top-left corner in logical units. `angle` is in degrees,
/// positive meaning nose down.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel_y: f32,
    pub angle: f32,
}

impl Bird {
    pub fn new(tuning: &Tuning) -> Self {
        let (x, y) = tuning.bird_spawn();
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(BIRD_DEFAULT_WIDTH, BIRD_DEFAULT_HEIGHT),
            vel_y: 0.0,
            angle: 0.0,
        }
    }

    /// Back to the spawn pose. Size is kept.
    pub fn reset(&mut self, tuning: &Tuning) {
        let (x, y) = tuning.bird_spawn();
        self.pos = Vec2::new(x, y);
        self.vel_y = 0.0;
        self.angle = 0.0;
    }

    /// Size the bird from the sprite's natural aspect ratio so it is never stretched
    pub fn set_sprite_size(&mut self, natural_width: u32, natural_height: u32, target_height: f32) {
        if natural_width == 0 || natural_height == 0 || target_height <= 0.0 {
            return;
        }
        let aspect = natural_width as f32 / natural_height as f32;
        self.size = Vec2::new((target_height * aspect).round(), target_height);
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn apply_gravity(&mut self, gravity: f32, max_fall: f32, dt: f32) {
        self.vel_y = (self.vel_y + gravity * dt).min(max_fall);
    }

    pub fn integrate(&mut self, dt: f32) {
        self.pos.y += self.vel_y * dt;
    }

    /// Flap: overwrite the vertical velocity, no stacking
    pub fn jump(&mut self, impulse: f32) {
        self.vel_y = impulse;
    }

    /// Snap nose up while climbing, ease nose down while falling
    pub fn update_tilt(&mut self, tuning: &Tuning, dt: f32) {
        if self.vel_y < TILT_UP_THRESHOLD {
            self.angle = tuning.tilt_up;
        } else if self.vel_y > 0.0 && self.angle < tuning.tilt_down_max {
            self.angle = (self.angle + tuning.tilt_rate * dt).min(tuning.tilt_down_max);
        }
    }

    /// One simulation step: gravity, integration, tilt
    pub fn step(&mut self, tuning: &Tuning, dt: f32) {
        self.apply_gravity(tuning.gravity, tuning.max_fall, dt);
        self.integrate(dt);
        self.update_tilt(tuning, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spawn_pose() {
        let tuning = Tuning::default();
        let bird = Bird::new(&tuning);
        assert!((bird.pos.x - 89.6).abs() < 1e-4);
        assert_eq!(bird.pos.y, 240.0);
        assert_eq!(bird.size, Vec2::new(38.0, 28.0));
    }

    #[test]
    fn test_jump_overwrites_velocity() {
        let tuning = Tuning::default();
        let mut bird = Bird::new(&tuning);
        bird.vel_y = 7.9;
        bird.jump(tuning.jump_velocity);
        assert_eq!(bird.vel_y, -6.5);
        bird.jump(tuning.jump_velocity);
        assert_eq!(bird.vel_y, -6.5);
    }

    #[test]
    fn test_sprite_size_keeps_aspect() {
        let tuning = Tuning::default();
        let mut bird = Bird::new(&tuning);
        bird.set_sprite_size(200, 100, 38.0);
        assert_eq!(bird.size, Vec2::new(76.0, 38.0));

        // Broken image leaves the size alone
        bird.set_sprite_size(0, 100, 38.0);
        assert_eq!(bird.size, Vec2::new(76.0, 38.0));
    }

    #[test]
    fn test_reset_keeps_size() {
        let tuning = Tuning::default();
        let mut bird = Bird::new(&tuning);
        bird.set_sprite_size(100, 100, 38.0);
        bird.pos.y = 10.0;
        bird.vel_y = 3.0;
        bird.angle = 45.0;
        bird.reset(&tuning);
        assert_eq!(bird.pos.y, 240.0);
        assert_eq!(bird.vel_y, 0.0);
        assert_eq!(bird.angle, 0.0);
        assert_eq!(bird.size, Vec2::new(38.0, 38.0));
    }

    #[test]
    fn test_tilt_snaps_up_and_eases_down() {
        let tuning = Tuning::default();
        let mut bird = Bird::new(&tuning);

        bird.vel_y = -5.0;
        bird.update_tilt(&tuning, 1.0);
        assert_eq!(bird.angle, -20.0);

        // Gentle upward motion leaves the angle alone
        bird.vel_y = -0.5;
        bird.update_tilt(&tuning, 1.0);
        assert_eq!(bird.angle, -20.0);

        bird.vel_y = 2.0;
        bird.update_tilt(&tuning, 1.0);
        assert_eq!(bird.angle, -17.5);
    }

    #[test]
    fn test_tilt_never_passes_cap() {
        let tuning = Tuning::default();
        let mut bird = Bird::new(&tuning);
        bird.vel_y = 4.0;
        bird.angle = 69.0;
        bird.update_tilt(&tuning, 3.0);
        assert_eq!(bird.angle, 70.0);
        bird.update_tilt(&tuning, 3.0);
        assert_eq!(bird.angle, 70.0);
    }

    #[test]
    fn test_step_matches_frame_locked_physics() {
        let tuning = Tuning::default();
        let mut bird = Bird::new(&tuning);
        bird.step(&tuning, 1.0);
        assert!((bird.vel_y - 0.35).abs() < 1e-6);
        assert!((bird.pos.y - 240.35).abs() < 1e-4);
        assert_eq!(bird.angle, 2.5);
    }

    proptest! {
        #[test]
        fn prop_fall_speed_is_clamped(
            start in -20.0f32..20.0,
            ticks in 0usize..500,
            dt in 0.0f32..=3.0,
        ) {
            let tuning = Tuning::default();
            let mut bird = Bird::new(&tuning);
            bird.vel_y = start.min(tuning.max_fall);
            for _ in 0..ticks {
                bird.step(&tuning, dt);
                prop_assert!(bird.vel_y <= tuning.max_fall);
            }
        }

        #[test]
        fn prop_tilt_stays_in_range(vels in proptest::collection::vec(-10.0f32..10.0, 1..200)) {
            let tuning = Tuning::default();
            let mut bird = Bird::new(&tuning);
            for v in vels {
                bird.vel_y = v;
                bird.update_tilt(&tuning, 1.0);
                prop_assert!(bird.angle >= tuning.tilt_up);
                prop_assert!(bird.angle <= tuning.tilt_down_max);
            }
        }
    }
}
