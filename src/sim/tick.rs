//! Per-tick simulation step
//!
//! Advances ball physics and resolves collisions. Velocities are tuned in
//! pixels per tick at the fixed 60 Hz timestep, so the step takes no dt.

use super::collision::{Rect, overlaps};
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Advance the simulation by one tick. No-op unless the ball is in flight;
/// idle detection and demo control run in the session, not here.
pub fn step(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.tick_count += 1;

    // 1. Integrate
    state.ball.pos += state.ball.vel;

    // 2. Wall reflection (bottom edge is open)
    if state.ball.pos.x - state.ball.radius <= 0.0
        || state.ball.pos.x + state.ball.radius >= FIELD_WIDTH
    {
        state.ball.vel.x = -state.ball.vel.x;
    }
    if state.ball.pos.y - state.ball.radius <= 0.0 {
        state.ball.vel.y = -state.ball.vel.y;
    }

    // 3. Paddle reflection: outgoing angle depends on where along the paddle
    // the ball lands; center is straight up, edges deflect up to ±30°
    let paddle = &state.paddle;
    if state.ball.pos.y + state.ball.radius >= paddle.y
        && state.ball.pos.x >= paddle.x
        && state.ball.pos.x <= paddle.x + paddle.width
    {
        let hit_pos = (state.ball.pos.x - paddle.x) / paddle.width;
        let angle = (hit_pos - 0.5) * BOUNCE_SPREAD;
        state.ball.vel.x = angle.sin() * state.ball.speed;
        state.ball.vel.y = -(angle.cos() * state.ball.speed).abs();
    }

    // 4. Block scan in layout order; at most one block destroyed per tick
    let ball_box = Rect::around_ball(state.ball.pos, state.ball.radius);
    let mut destroyed = false;
    for block in state.blocks.iter_mut() {
        if block.visible && overlaps(&ball_box, &block.rect) {
            block.visible = false;
            destroyed = true;
            break;
        }
    }
    if destroyed {
        state.ball.vel.y = -state.ball.vel.y;
        state.score += BLOCK_SCORE;
    }

    // 5. Bottom loss
    if state.ball.pos.y > FIELD_HEIGHT {
        state.lives = state.lives.saturating_sub(1);
        if state.lives == 0 {
            state.game_over(false);
            log::info!("game over: out of lives, final score {}", state.score);
        } else {
            log::debug!("ball lost, {} lives left", state.lives);
            state.reset_ball();
        }
    }

    // 6. Win check; overrides a loss recorded earlier this tick
    if state.blocks.iter().all(|b| !b.visible) {
        state.game_over(true);
        log::info!("field cleared, final score {}", state.score);
    }

    debug_assert!(state.lives <= START_LIVES);
    debug_assert!(state.paddle.x >= 0.0 && state.paddle.x <= FIELD_WIDTH - state.paddle.width);
}
