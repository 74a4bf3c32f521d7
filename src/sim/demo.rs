//! Attract-mode paddle controller
//!
//! Heuristic autoplay used while the session is in demo mode: track a short
//! projection of the ball while it flies, drift home and relaunch while it
//! sits on the paddle. Runs every tick, whatever the phase.

use super::state::GameState;
use crate::consts::*;

/// Ignore tracking errors smaller than this to keep the paddle from jittering
const TRACK_DEADBAND: f32 = 5.0;
/// Deadband for the return-to-center drift
const CENTER_DEADBAND: f32 = 2.0;
/// Fraction of the tracking error covered per tick (capped at paddle speed)
const TRACK_GAIN: f32 = 0.1;
/// Fraction of the centering offset covered per tick
const CENTER_GAIN: f32 = 0.05;

/// Drive the paddle for one tick of demo play
pub fn drive(state: &mut GameState) {
    debug_assert!(state.is_demo);
    state.demo_timer += 1;

    if state.ball.moving() {
        // Steer toward where the ball will be a few frames out, proportional
        // to the error so the approach eases in
        let predicted_x = state.ball.pos.x + state.ball.vel.x * DEMO_LOOKAHEAD_TICKS;
        let diff = predicted_x - state.paddle.center_x();
        if diff.abs() > TRACK_DEADBAND {
            let travel = (diff.abs() * TRACK_GAIN).min(state.paddle.speed);
            state.paddle.set_x(state.paddle.x + travel.copysign(diff));
        }
    } else {
        // Ball is parked: ease back toward the middle of the field
        let home_x = FIELD_WIDTH / 2.0 - state.paddle.width / 2.0;
        let diff = home_x - state.paddle.x;
        if diff.abs() > CENTER_DEADBAND {
            state.paddle.set_x(state.paddle.x + diff * CENTER_GAIN);
        }
        state.ball.follow(&state.paddle);

        if state.demo_timer > DEMO_LAUNCH_TICKS && state.phase.running() {
            state.launch();
            state.demo_timer = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BallState;
    use glam::Vec2;

    fn demo_state() -> GameState {
        let mut state = GameState::new(9);
        state.is_demo = true;
        state.start();
        state
    }

    #[test]
    fn test_tracks_predicted_ball_position() {
        let mut state = demo_state();
        state.launch_at(0.0);
        state.ball.pos = Vec2::new(600.0, 300.0);
        state.ball.vel = Vec2::new(3.0, -5.0);
        let before = state.paddle.center_x();
        drive(&mut state);
        assert!(state.paddle.center_x() > before, "must move toward the ball");
        assert!(
            state.paddle.center_x() - before <= PADDLE_SPEED + 1e-4,
            "travel capped at paddle speed"
        );
    }

    #[test]
    fn test_deadband_suppresses_jitter() {
        let mut state = demo_state();
        state.launch_at(0.0);
        // Predicted x dead ahead of the paddle center
        state.ball.vel = Vec2::new(0.0, -6.0);
        state.ball.pos = Vec2::new(state.paddle.center_x() + 3.0, 300.0);
        let before = state.paddle.x;
        drive(&mut state);
        assert_eq!(state.paddle.x, before);
    }

    #[test]
    fn test_never_steered_off_field() {
        let mut state = demo_state();
        state.launch_at(0.0);
        // Prediction far off both sides of the screen
        for vel_x in [-500.0, 500.0] {
            state.ball.pos = Vec2::new(400.0, 300.0);
            state.ball.vel = Vec2::new(vel_x, -4.0);
            for _ in 0..600 {
                drive(&mut state);
                assert!(state.paddle.x >= 0.0);
                assert!(state.paddle.x <= FIELD_WIDTH - state.paddle.width);
            }
        }
    }

    #[test]
    fn test_idle_drift_recenters_and_pins_ball() {
        // Idle phase: the drift and pinning run without the auto-launch firing
        let mut state = GameState::new(9);
        state.is_demo = true;
        state.set_paddle_center(60.0);
        let home_x = FIELD_WIDTH / 2.0 - state.paddle.width / 2.0;
        for _ in 0..300 {
            drive(&mut state);
            assert_eq!(state.ball.pos.x, state.paddle.center_x());
        }
        assert!((state.paddle.x - home_x).abs() <= CENTER_DEADBAND + 1.0);
    }

    #[test]
    fn test_auto_launch_after_threshold() {
        let mut state = demo_state();
        for _ in 0..DEMO_LAUNCH_TICKS {
            drive(&mut state);
            assert_eq!(state.ball.state, BallState::Attached);
        }
        // Timer is now past the threshold; the next tick launches
        drive(&mut state);
        assert_eq!(state.ball.state, BallState::Free);
        assert_eq!(state.demo_timer, 0);
        assert!(state.ball.vel.y < 0.0);
    }

    #[test]
    fn test_no_launch_outside_running_phase() {
        let mut state = demo_state();
        state.phase = crate::sim::GamePhase::Lost;
        for _ in 0..(DEMO_LAUNCH_TICKS * 3) {
            drive(&mut state);
        }
        assert_eq!(state.ball.state, BallState::Attached);
    }
}
