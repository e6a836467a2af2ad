//! One simulation step
//!
//! Pipes scroll and score first, then the bird moves, then collisions are
//! checked so the frame painted afterwards already reflects any clamping.

use super::collision::{self, Crash};
use super::state::Session;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (key, tap or click since the last tick)
    pub jump: bool,
}

/// What a tick produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Pipes passed during this tick
    pub passed: u32,
    /// Set when this tick ended the run
    pub crash: Option<Crash>,
}

/// Advance a running session by `dt` reference frames
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) -> TickOutcome {
    if !session.is_running() {
        return TickOutcome::default();
    }

    if input.jump {
        session.jump();
    }

    let dx = session.tuning.pipe_speed * dt;
    let passed = session
        .pipes
        .advance(dx, session.bird.pos.x, &session.tuning);
    session.add_score(passed);

    session.bird.step(&session.tuning, dt);
    session.ground.scroll(dx);

    let crash = collision::check(&mut session.bird, session.pipes.pipes(), &session.tuning);
    if let Some(cause) = crash {
        session.crash(cause);
    }

    TickOutcome { passed, crash }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::best_score::BestScore;
    use crate::sim::state::{GameEvent, Phase};
    use crate::tuning::Tuning;

    fn running() -> Session {
        let mut s = Session::new(Tuning::default(), 12345, BestScore::default());
        s.start();
        s.drain_events();
        s
    }

    #[test]
    fn test_idle_does_not_tick() {
        let mut s = Session::new(Tuning::default(), 12345, BestScore::default());
        let before = s.bird.clone();
        let out = tick(&mut s, &TickInput { jump: true }, 1.0);
        assert_eq!(out, TickOutcome::default());
        assert_eq!(s.bird, before);
    }

    #[test]
    fn test_tick_moves_world() {
        let mut s = running();
        tick(&mut s, &TickInput::default(), 1.0);
        assert_eq!(s.pipes.pipes()[0].x, 418.0);
        assert_eq!(s.ground.offset, -2.0);
        assert!(s.bird.pos.y > 240.0);
    }

    #[test]
    fn test_dt_scales_motion() {
        let mut s = running();
        tick(&mut s, &TickInput::default(), 2.5);
        assert_eq!(s.pipes.pipes()[0].x, 415.0);
        assert_eq!(s.ground.offset, -5.0);
    }

    #[test]
    fn test_jump_input_applies_before_gravity() {
        let mut s = running();
        tick(&mut s, &TickInput { jump: true }, 1.0);
        assert!((s.bird.vel_y - (-6.5 + 0.35)).abs() < 1e-6);
        assert_eq!(s.bird.angle, -20.0);
    }

    #[test]
    fn test_falling_bird_hits_ground_without_score() {
        let mut s = running();
        let mut ticks = 0;
        while s.phase == Phase::Running {
            tick(&mut s, &TickInput::default(), 1.0);
            ticks += 1;
            assert!(ticks < 200, "bird never landed");
        }

        assert_eq!(s.phase, Phase::Over);
        assert_eq!(s.score, 0);
        assert_eq!(s.bird.bottom(), s.tuning.ground_y());
        assert_eq!(
            s.drain_events(),
            vec![GameEvent::Crashed {
                cause: Crash::Ground,
                score: 0
            }]
        );
    }

    #[test]
    fn test_over_session_is_frozen() {
        let mut s = running();
        s.crash(Crash::Pipe);
        let pipes_before = s.pipes.pipes().to_vec();
        tick(&mut s, &TickInput::default(), 1.0);
        assert_eq!(s.pipes.pipes(), &pipes_before[..]);
    }

    #[test]
    fn test_determinism() {
        let mut a = running();
        let mut b = running();
        for i in 0..120 {
            let input = TickInput { jump: i % 17 == 0 };
            tick(&mut a, &input, 1.0);
            tick(&mut b, &input, 1.0);
        }
        assert_eq!(a.bird, b.bird);
        assert_eq!(a.pipes.pipes(), b.pipes.pipes());
        assert_eq!(a.phase, b.phase);
    }
}
