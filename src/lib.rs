//! Flappy Hen - a canvas arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipes, collisions, session state)
//! - `renderer`: Scene projection and the 2D canvas painter
//! - `persistence`: Key-value storage (LocalStorage on web)
//! - `tuning`: Data-driven game balance
//! - `app`: Frame driver tying the simulation to clock, input, audio and storage

pub mod app;
pub mod assets;
pub mod audio;
pub mod best_score;
pub mod clock;
pub mod input;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use app::{FrameStep, Game};
pub use best_score::BestScore;
pub use settings::{BackgroundFit, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical playfield size; the canvas is scaled uniformly to fit
    pub const VIEW_WIDTH: f32 = 320.0;
    pub const VIEW_HEIGHT: f32 = 480.0;

    /// Reference update rate the physics constants are tuned for
    pub const REFERENCE_FPS: f64 = 60.0;
    /// Largest delta (in reference frames) a single callback may simulate
    pub const MAX_FRAME_DELTA: f32 = 3.0;

    /// Bird physics, per reference frame
    pub const GRAVITY: f32 = 0.35;
    pub const JUMP_VELOCITY: f32 = -6.5;
    pub const MAX_FALL: f32 = 8.0;

    /// Bird tilt in degrees (negative = nose up)
    pub const TILT_UP: f32 = -20.0;
    pub const TILT_DOWN_MAX: f32 = 70.0;
    pub const TILT_RATE: f32 = 2.5;
    /// Upward speed beyond which the nose snaps up
    pub const TILT_UP_THRESHOLD: f32 = -1.0;

    /// Bird size before the sprite has loaded
    pub const BIRD_DEFAULT_WIDTH: f32 = 38.0;
    pub const BIRD_DEFAULT_HEIGHT: f32 = 28.0;
    /// Sprite height once the image aspect ratio is known
    pub const BIRD_SPRITE_HEIGHT: f32 = 38.0;
    /// Spawn x as a fraction of the view width
    pub const BIRD_SPAWN_X_FRACTION: f32 = 0.28;

    /// Pipe defaults
    pub const PIPE_SPEED: f32 = 2.0;
    pub const PIPE_WIDTH: f32 = 52.0;
    pub const PIPE_GAP: f32 = 130.0;
    pub const PIPE_INTERVAL: f32 = 200.0;
    pub const INITIAL_PIPES: usize = 4;
    /// Extra distance before the first pipe
    pub const FIRST_PIPE_OFFSET: f32 = 100.0;
    /// Pipes are dropped once this far past the left edge
    pub const DESPAWN_MARGIN: f32 = 10.0;
    /// Minimum clearance above and below a gap
    pub const GAP_MARGIN: f32 = 60.0;

    /// Ground strip at the bottom of the view
    pub const GROUND_HEIGHT: f32 = 40.0;
    /// Ground tile width before the ground sprite has loaded
    pub const GROUND_TILE_WIDTH: f32 = 320.0;

    /// Forgiving hitbox inset used for pipe checks
    pub const HIT_MARGIN: f32 = 6.0;
}
