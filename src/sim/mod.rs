//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Delta-scaled steps only, driven from outside
//! - Seeded RNG only
//! - Pipes kept in spawn order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod bird;
pub mod collision;
pub mod pipes;
pub mod state;
pub mod tick;

pub use bird::Bird;
pub use collision::{Aabb, Crash, bird_pipe_collision};
pub use pipes::{Pipe, PipeField};
pub use state::{GameEvent, Ground, Phase, Session};
pub use tick::{TickInput, TickOutcome, tick};
