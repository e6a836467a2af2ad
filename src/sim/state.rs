//! Session state and the Idle / Running / Over machine
//!
//! A session owns the bird, the pipe field and the scrolling ground. Side
//! effects that live outside the simulation (audio, storage, clock) are
//! reported as [`GameEvent`]s for the driver to drain.

use super::bird::Bird;
use super::collision::Crash;
use super::pipes::PipeField;
use crate::best_score::BestScore;
use crate::consts::GROUND_TILE_WIDTH;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the start input
    Idle,
    /// Active gameplay
    Running,
    /// Run ended by a collision; final frame stays on screen
    Over,
}

/// Things that happened during a transition or tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Scored { score: u32 },
    Crashed { cause: Crash, score: u32 },
    NewBest { best: u32 },
}

/// Scrolling ground strip
#[derive(Debug, Clone, PartialEq)]
pub struct Ground {
    /// Offset of the first tile, in `(-tile_width, 0]`
    pub offset: f32,
    pub tile_width: f32,
}

impl Default for Ground {
    fn default() -> Self {
        Self {
            offset: 0.0,
            tile_width: GROUND_TILE_WIDTH,
        }
    }
}

impl Ground {
    pub fn scroll(&mut self, dx: f32) {
        self.offset -= dx;
        if self.tile_width > 0.0 {
            while self.offset <= -self.tile_width {
                self.offset += self.tile_width;
            }
        }
    }
}

/// One game: bird, pipes, score and phase
#[derive(Debug, Clone)]
pub struct Session {
    pub tuning: Tuning,
    pub phase: Phase,
    pub score: u32,
    pub best: BestScore,
    pub bird: Bird,
    pub pipes: PipeField,
    pub ground: Ground,
    events: Vec<GameEvent>,
}

impl Session {
    pub fn new(tuning: Tuning, seed: u64, best: BestScore) -> Self {
        Self {
            bird: Bird::new(&tuning),
            pipes: PipeField::new(seed),
            ground: Ground::default(),
            tuning,
            phase: Phase::Idle,
            score: 0,
            best,
            events: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Start or restart a run. Ignored while already running.
    pub fn start(&mut self) -> bool {
        match self.phase {
            Phase::Idle | Phase::Over => {}
            Phase::Running => return false,
        }

        self.score = 0;
        self.bird.reset(&self.tuning);
        self.pipes.seed(&self.tuning);
        self.ground.offset = 0.0;
        self.phase = Phase::Running;
        self.events.push(GameEvent::Started);
        log::info!("Run started (best {})", self.best.get());
        true
    }

    /// Flap. Only has an effect while running.
    pub fn jump(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.bird.jump(self.tuning.jump_velocity);
        true
    }

    /// Count pipes the bird just passed
    pub fn add_score(&mut self, passed: u32) {
        for _ in 0..passed {
            self.score += 1;
            self.events.push(GameEvent::Scored { score: self.score });
        }
    }

    /// End the run and fold the score into the best
    pub fn crash(&mut self, cause: Crash) {
        if self.phase != Phase::Running {
            return;
        }
        self.phase = Phase::Over;
        self.events.push(GameEvent::Crashed {
            cause,
            score: self.score,
        });
        log::info!("Run over: {:?} with score {}", cause, self.score);

        if self.best.record(self.score) {
            self.events.push(GameEvent::NewBest {
                best: self.best.get(),
            });
        }
    }

    /// Leave the game-over screen for the start screen
    pub fn return_to_menu(&mut self) -> bool {
        if self.phase != Phase::Over {
            return false;
        }
        self.bird.reset(&self.tuning);
        self.phase = Phase::Idle;
        true
    }

    /// Apply a newly loaded bird sprite's natural size
    pub fn set_bird_sprite(&mut self, natural_width: u32, natural_height: u32) {
        let target = self.tuning.bird_sprite_height;
        self.bird.set_sprite_size(natural_width, natural_height, target);
    }

    pub fn set_ground_tile_width(&mut self, width: u32) {
        if width > 0 {
            self.ground.tile_width = width as f32;
        }
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
