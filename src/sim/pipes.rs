//! Pipe pairs: procedural spawning, scrolling, scoring and recycling
//!
//! Spawning is driven by distance travelled, not by time: the field always
//! keeps one spawn interval of lookahead past the right edge, so pipe density
//! does not depend on frame rate.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::tuning::Tuning;

/// One pipe pair with its passable gap
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// Left edge
    pub x: f32,
    /// Top of the gap
    pub gap_y: f32,
    /// Already counted toward the score
    pub scored: bool,
}

impl Pipe {
    pub fn right(&self, width: f32) -> f32 {
        self.x + width
    }
}

/// Ordered pipe sequence, oldest (leftmost) first
#[derive(Debug, Clone)]
pub struct PipeField {
    pipes: Vec<Pipe>,
    rng: Pcg32,
}

impl PipeField {
    pub fn new(seed: u64) -> Self {
        Self {
            pipes: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn pipes_mut(&mut self) -> &mut [Pipe] {
        &mut self.pipes
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }

    pub fn clear(&mut self) {
        self.pipes.clear();
    }

    /// Spawn one pipe at `x` with a random gap that stays clear of the ceiling and ground
    pub fn spawn_at(&mut self, x: f32, tuning: &Tuning) {
        let (min, max) = tuning.gap_range();
        let span = (max - min).floor();
        let gap_y = if span >= 1.0 {
            min + self.rng.random_range(0..span as u32) as f32
        } else {
            min
        };
        self.pipes.push(Pipe {
            x,
            gap_y,
            scored: false,
        });
    }

    /// Start a fresh run: the first pipe sits a little further out to give the player room
    pub fn seed(&mut self, tuning: &Tuning) {
        self.pipes.clear();
        let mut x = tuning.view_width + tuning.first_pipe_offset;
        for _ in 0..tuning.initial_pipes {
            self.spawn_at(x, tuning);
            x += tuning.pipe_interval;
        }
        log::debug!("Seeded {} pipes", self.pipes.len());
    }

    /// Scroll pipes left by `dx`, returning how many the bird has just passed
    ///
    /// A pipe counts once its right edge is behind the bird's left edge.
    pub fn advance(&mut self, dx: f32, bird_x: f32, tuning: &Tuning) -> u32 {
        let width = tuning.pipe_width;
        let mut passed = 0;

        for pipe in &mut self.pipes {
            pipe.x -= dx;
            if !pipe.scored && pipe.right(width) < bird_x {
                pipe.scored = true;
                passed += 1;
            }
        }

        let margin = tuning.despawn_margin;
        self.pipes.retain(|p| p.right(width) >= -margin);

        if self.pipes.is_empty() {
            let x = tuning.view_width + tuning.first_pipe_offset;
            self.spawn_at(x, tuning);
        }
        // A long tick can scroll past more than one interval
        while tuning.pipe_interval > 0.0 {
            match self.pipes.last().map(|p| p.x) {
                Some(rightmost) if rightmost < tuning.view_width + tuning.pipe_interval => {
                    self.spawn_at(rightmost + tuning.pipe_interval, tuning);
                }
                _ => break,
            }
        }

        passed
    }

    /// First pipe whose right edge is not yet behind `x`
    pub fn next_after(&self, x: f32, tuning: &Tuning) -> Option<&Pipe> {
        self.pipes.iter().find(|p| p.right(tuning.pipe_width) >= x)
    }
}
