//! Demo autopilot: tracks the centre of the next gap

use super::state::Session;

/// How far below the target the bird may sink before flapping
pub const AUTOPILOT_SLACK: f32 = 10.0;

/// Vertical point the autopilot steers toward
pub fn target_y(session: &Session) -> f32 {
    let tuning = &session.tuning;
    session
        .pipes
        .next_after(session.bird.pos.x, tuning)
        .map(|pipe| pipe.gap_y + tuning.pipe_gap / 2.0)
        .unwrap_or(tuning.ground_y() / 2.0)
}

/// Flap when the bird has sunk below the target and is not already climbing
pub fn should_jump(session: &Session) -> bool {
    if !session.is_running() {
        return false;
    }
    let bird = &session.bird;
    bird.center().y > target_y(session) + AUTOPILOT_SLACK && bird.vel_y >= 0.0
}
