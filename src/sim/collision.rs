//! Collision detection for the bird against pipes and the playfield bounds
//!
//! The ground and ceiling use the bird's exact box and clamp it back inside the
//! field. Pipe checks use a box inset by the hit margin on every side so that
//! near-misses are forgiven.

use glam::Vec2;

use super::bird::Bird;
use super::pipes::Pipe;
use crate::tuning::Tuning;

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crash {
    Ground,
    Ceiling,
    Pipe,
}

/// Axis-aligned box in logical units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Shrink by `margin` on all four sides
    pub fn inset(&self, margin: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(margin),
            max: self.max - Vec2::splat(margin),
        }
    }

    /// Open-interval overlap with the horizontal span `[left, right]`
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.max.x > left && self.min.x < right
    }
}

/// Check whether the bird touches a pipe in its inset box
pub fn bird_pipe_collision(hitbox: &Aabb, pipe: &Pipe, tuning: &Tuning) -> bool {
    if !hitbox.overlaps_x(pipe.x, pipe.right(tuning.pipe_width)) {
        return false;
    }
    hitbox.min.y < pipe.gap_y || hitbox.max.y > pipe.gap_y + tuning.pipe_gap
}

/// Run all checks in order ground, ceiling, pipes
///
/// Ground and ceiling hits clamp the bird to the boundary and zero its
/// velocity, so the final frame never shows it past the edge.
pub fn check(bird: &mut Bird, pipes: &[Pipe], tuning: &Tuning) -> Option<Crash> {
    let ground_y = tuning.ground_y();
    if bird.bottom() >= ground_y {
        bird.pos.y = ground_y - bird.height();
        bird.vel_y = 0.0;
        return Some(Crash::Ground);
    }

    if bird.pos.y <= 0.0 {
        bird.pos.y = 0.0;
        bird.vel_y = 0.0;
        return Some(Crash::Ceiling);
    }

    let hitbox = Aabb::from_pos_size(bird.pos, bird.size).inset(tuning.hit_margin);
    if pipes
        .iter()
        .any(|pipe| bird_pipe_collision(&hitbox, pipe, tuning))
    {
        return Some(Crash::Pipe);
    }

    None
}
