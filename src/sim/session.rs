//! Session state machine
//!
//! Single writer over [`GameState`]: input events are dispatched into the
//! methods here, and `advance` runs once per fixed tick. The session also
//! owns the two wall-clock concerns - the idle timer that hands control to
//! the attract mode, and the deferred restart that keeps a demo round
//! looping. The restart is a stored deadline rather than a fire-and-forget
//! timer, so human input can cancel it before it goes off.

use glam::Vec2;
use serde::Serialize;

use super::collision::Rect;
use super::state::{GamePhase, GameState};
use super::{demo, tick};
use crate::consts::*;

/// One visible block, ready to draw
#[derive(Debug, Clone, Serialize)]
pub struct BlockView {
    pub rect: Rect,
    pub color: &'static str,
}

/// Terminal overlay contents
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Overlay {
    pub win: bool,
    pub final_score: u32,
}

/// Read-only drawable state handed to the presentation layer each tick
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub paddle: Rect,
    pub ball_pos: Vec2,
    pub ball_radius: f32,
    pub blocks: Vec<BlockView>,
    pub score: u32,
    pub lives: u8,
    /// Round underway, ball waiting on the paddle
    pub show_launch_prompt: bool,
    pub demo_active: bool,
    pub overlay: Option<Overlay>,
}

/// Owns the game state plus the wall-clock bookkeeping around it
pub struct Session {
    state: GameState,
    /// Timestamp of the last real human input event
    last_input_ms: f64,
    /// Deadline for the pending demo self-restart, if one is scheduled
    pending_restart_at: Option<f64>,
    /// Attract mode can be disabled from settings
    attract_enabled: bool,
}

impl Session {
    pub fn new(seed: u64, now_ms: f64) -> Self {
        log::info!("session created with seed {seed}");
        Self {
            state: GameState::new(seed),
            last_input_ms: now_ms,
            pending_restart_at: None,
            attract_enabled: true,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn set_attract_enabled(&mut self, enabled: bool) {
        self.attract_enabled = enabled;
    }

    /// Pointer-position sample. Counts as human input; the paddle centers
    /// under the pointer and an attached ball rides along.
    pub fn pointer_moved(&mut self, x: f32, now_ms: f64) {
        self.note_human_input(now_ms);
        self.state.set_paddle_center(x);
    }

    /// Discrete action trigger: starts a round from idle, launches an
    /// attached ball otherwise. Counts as human input.
    pub fn action_pressed(&mut self, now_ms: f64) {
        self.note_human_input(now_ms);
        match self.state.phase {
            GamePhase::Idle => {
                log::info!("round started");
                self.state.start();
            }
            GamePhase::Serve => self.state.launch(),
            // Terminal phases restart via the overlay's restart control
            _ => {}
        }
    }

    /// Explicit restart from the game-over overlay
    pub fn restart_requested(&mut self, now_ms: f64) {
        self.note_human_input(now_ms);
        log::info!("restart requested, final score was {}", self.state.score);
        self.state.restart();
    }

    /// Advance one fixed tick: idle detection, demo control, then physics
    pub fn advance(&mut self, now_ms: f64) {
        if !self.state.is_demo
            && self.attract_enabled
            && now_ms - self.last_input_ms > IDLE_TIMEOUT_MS
        {
            self.start_demo();
        }

        if self.state.is_demo {
            if self.state.phase.over() && self.pending_restart_at.is_none() {
                log::info!("demo round over, restart in {DEMO_RESTART_DELAY_MS} ms");
                self.pending_restart_at = Some(now_ms + DEMO_RESTART_DELAY_MS);
            }
            if self.pending_restart_at.is_some_and(|at| now_ms >= at) {
                self.pending_restart_at = None;
                self.state.restart();
                self.state.is_demo = true;
                self.state.start();
                log::info!("demo round restarted");
            }
            demo::drive(&mut self.state);
        }

        tick::step(&mut self.state);
    }

    /// Drawable state for the presentation adapter
    pub fn snapshot(&self) -> Snapshot {
        let state = &self.state;
        Snapshot {
            paddle: state.paddle.rect(),
            ball_pos: state.ball.pos,
            ball_radius: state.ball.radius,
            blocks: state
                .blocks
                .iter()
                .filter(|b| b.visible)
                .map(|b| BlockView {
                    rect: b.rect,
                    color: b.color(),
                })
                .collect(),
            score: state.score,
            lives: state.lives,
            show_launch_prompt: state.phase == GamePhase::Serve,
            demo_active: state.is_demo,
            overlay: match state.phase {
                GamePhase::Won => Some(Overlay {
                    win: true,
                    final_score: state.score,
                }),
                GamePhase::Lost => Some(Overlay {
                    win: false,
                    final_score: state.score,
                }),
                _ => None,
            },
        }
    }

    /// Record a human input event: resets the idle timer, cancels any
    /// pending demo restart, and hands control back from the attract mode
    /// without touching score or lives.
    fn note_human_input(&mut self, now_ms: f64) {
        self.last_input_ms = now_ms;
        self.pending_restart_at = None;
        if self.state.is_demo {
            self.state.is_demo = false;
            self.state.demo_timer = 0;
            log::info!("demo mode ended by player input");
        }
    }

    fn start_demo(&mut self) {
        log::info!("idle for {IDLE_TIMEOUT_MS} ms, starting demo mode");
        // A stale terminal screen gets a clean board before the demo plays
        if self.state.phase.over() {
            self.state.restart();
        }
        self.state.is_demo = true;
        self.state.demo_timer = 0;
        if !self.state.phase.running() {
            self.state.start();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BallState;

    const TICK_MS: f64 = 1000.0 / 60.0;

    /// Drive the session tick-by-tick from `start_ms` until `end_ms`
    fn run_until(session: &mut Session, start_ms: f64, end_ms: f64) -> f64 {
        let mut now = start_ms;
        while now < end_ms {
            now += TICK_MS;
            session.advance(now);
        }
        now
    }

    #[test]
    fn test_idle_timeout_enters_demo() {
        let mut session = Session::new(3, 0.0);
        run_until(&mut session, 0.0, IDLE_TIMEOUT_MS - 100.0);
        assert!(!session.state().is_demo);

        run_until(&mut session, IDLE_TIMEOUT_MS - 100.0, IDLE_TIMEOUT_MS + 100.0);
        assert!(session.state().is_demo);
        assert!(session.state().phase.running(), "demo auto-starts play");
    }

    #[test]
    fn test_input_resets_idle_timer() {
        let mut session = Session::new(3, 0.0);
        let now = run_until(&mut session, 0.0, 4000.0);
        session.pointer_moved(400.0, now);
        run_until(&mut session, now, now + 4000.0);
        assert!(!session.state().is_demo);
    }

    #[test]
    fn test_human_input_exits_demo_keeping_progress() {
        let mut session = Session::new(3, 0.0);
        let now = run_until(&mut session, 0.0, IDLE_TIMEOUT_MS + 2000.0);
        assert!(session.state().is_demo);
        session.state.score = 120;
        session.state.lives = 2;

        session.pointer_moved(200.0, now);
        assert!(!session.state().is_demo);
        assert_eq!(session.state().score, 120);
        assert_eq!(session.state().lives, 2);
    }

    #[test]
    fn test_demo_schedules_and_fires_restart() {
        let mut session = Session::new(3, 0.0);
        let now = run_until(&mut session, 0.0, IDLE_TIMEOUT_MS + 1000.0);
        assert!(session.state().is_demo);

        session.state.lives = 1;
        session.state.game_over(false);
        session.advance(now + TICK_MS);
        assert!(session.pending_restart_at.is_some());

        // Just before the deadline nothing fires
        let fire_at = session.pending_restart_at.unwrap();
        run_until(&mut session, now + TICK_MS, fire_at - 2.0 * TICK_MS);
        assert!(session.state().phase.over());

        // Past it, a fresh demo round is underway
        run_until(&mut session, fire_at - TICK_MS, fire_at + 2.0 * TICK_MS);
        assert!(session.state().is_demo);
        assert!(session.state().phase.running());
        assert_eq!(session.state().score, 0);
        assert_eq!(session.state().lives, START_LIVES);
    }

    #[test]
    fn test_human_input_cancels_pending_restart() {
        let mut session = Session::new(3, 0.0);
        let now = run_until(&mut session, 0.0, IDLE_TIMEOUT_MS + 1000.0);
        session.state.game_over(false);
        session.advance(now + TICK_MS);
        let fire_at = session.pending_restart_at.expect("restart scheduled");

        session.pointer_moved(100.0, now + 2.0 * TICK_MS);
        assert!(session.pending_restart_at.is_none());

        // The old deadline passes without a restart firing
        run_until(&mut session, now + 2.0 * TICK_MS, fire_at + 1000.0);
        assert!(session.state().phase.over());
    }

    #[test]
    fn test_action_starts_then_launches() {
        let mut session = Session::new(3, 0.0);
        assert_eq!(session.state().phase, GamePhase::Idle);

        session.action_pressed(10.0);
        assert_eq!(session.state().phase, GamePhase::Serve);
        assert_eq!(session.state().ball.state, BallState::Attached);

        session.action_pressed(20.0);
        assert_eq!(session.state().phase, GamePhase::Playing);
        assert!(session.state().ball.moving());
    }

    #[test]
    fn test_restart_from_overlay() {
        let mut session = Session::new(3, 0.0);
        session.action_pressed(10.0);
        session.action_pressed(20.0);
        session.state.score = 90;
        session.state.game_over(false);

        session.restart_requested(30.0);
        assert_eq!(session.state().phase, GamePhase::Idle);
        assert_eq!(session.state().score, 0);
        assert_eq!(session.state().lives, START_LIVES);
        assert_eq!(
            session.state().blocks_remaining(),
            BLOCK_ROWS * BLOCK_COLS
        );
    }

    #[test]
    fn test_attract_mode_can_be_disabled() {
        let mut session = Session::new(3, 0.0);
        session.set_attract_enabled(false);
        run_until(&mut session, 0.0, IDLE_TIMEOUT_MS * 3.0);
        assert!(!session.state().is_demo);
    }

    #[test]
    fn test_demo_from_stale_game_over_gets_fresh_board() {
        let mut session = Session::new(3, 0.0);
        session.action_pressed(10.0);
        session.action_pressed(20.0);
        session.state.score = 50;
        session.state.blocks[0].visible = false;
        session.state.lives = 1;
        session.state.game_over(false);

        // Player walks away from the overlay; demo takes over with a reset
        run_until(&mut session, 20.0, 20.0 + IDLE_TIMEOUT_MS + 1000.0);
        assert!(session.state().is_demo);
        assert!(session.state().phase.running());
        assert_eq!(session.state().score, 0);
        assert_eq!(session.state().lives, START_LIVES);
        assert_eq!(
            session.state().blocks_remaining(),
            BLOCK_ROWS * BLOCK_COLS
        );
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut session = Session::new(3, 0.0);
        let snap = session.snapshot();
        assert_eq!(snap.blocks.len(), BLOCK_ROWS * BLOCK_COLS);
        assert_eq!(snap.lives, START_LIVES);
        assert!(!snap.show_launch_prompt);
        assert!(snap.overlay.is_none());

        session.action_pressed(10.0);
        assert!(session.snapshot().show_launch_prompt);

        session.state.blocks[7].visible = false;
        session.state.score = 10;
        let snap = session.snapshot();
        assert_eq!(snap.blocks.len(), BLOCK_ROWS * BLOCK_COLS - 1);
        assert_eq!(snap.score, 10);

        session.state.game_over(false);
        let overlay = session.snapshot().overlay.expect("overlay shown");
        assert!(!overlay.win);
        assert_eq!(overlay.final_score, 10);
    }
}
