//! Game state and core simulation types
//!
//! Everything the tick function and the demo controller mutate lives here;
//! the session (`session.rs`) is the only writer on top of it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::layout;
use crate::clamp_paddle_x;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Never started (or restarted and waiting for a start action)
    Idle,
    /// Ball attached to paddle, waiting for launch input
    Serve,
    /// Ball in flight
    Playing,
    /// Round ended with every block destroyed
    Won,
    /// Round ended with the life pool exhausted
    Lost,
}

impl GamePhase {
    /// A round is underway (ball attached or in flight)
    #[inline]
    pub fn running(&self) -> bool {
        matches!(self, GamePhase::Serve | GamePhase::Playing)
    }

    /// The round has reached a terminal state
    #[inline]
    pub fn over(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Ball state - attached to paddle or free-moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    /// Position locked to the paddle center, velocity zero
    Attached,
    /// In flight
    Free,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge, clamped to [0, FIELD_WIDTH - width]
    pub x: f32,
    /// Top edge (fixed rail)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Maximum travel per tick under demo steering
    pub speed: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: FIELD_WIDTH / 2.0 - PADDLE_WIDTH / 2.0,
            y: PADDLE_Y,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
        }
    }
}

impl Paddle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Move the left edge, clamped to the playfield rail
    pub fn set_x(&mut self, x: f32) {
        self.x = clamp_paddle_x(x, self.width);
        debug_assert!(self.x >= 0.0 && self.x <= FIELD_WIDTH - self.width);
    }

    /// Center the paddle under a pointer x, clamped
    pub fn set_center_x(&mut self, center_x: f32) {
        self.set_x(center_x - self.width / 2.0);
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Speed magnitude while in flight, pixels per tick
    pub speed: f32,
    pub state: BallState,
}

impl Ball {
    pub fn new() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            speed: BALL_SPEED,
            state: BallState::Attached,
        }
    }

    #[inline]
    pub fn moving(&self) -> bool {
        self.state == BallState::Free
    }

    /// Re-attach to the paddle: rest position above the paddle center,
    /// velocity zero
    pub fn attach_to(&mut self, paddle: &Paddle) {
        self.pos = Vec2::new(paddle.center_x(), paddle.y - BALL_REST_OFFSET);
        self.vel = Vec2::ZERO;
        self.state = BallState::Attached;
    }

    /// Keep an attached ball pinned to the paddle center
    pub fn follow(&mut self, paddle: &Paddle) {
        if self.state == BallState::Attached {
            self.pos.x = paddle.center_x();
        }
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

/// A block in the grid; visibility flips false permanently on hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub rect: Rect,
    /// Grid row, used as the color tag (row mod palette length)
    pub row: usize,
    pub visible: bool,
}

impl Block {
    /// CSS color for this block's row
    pub fn color(&self) -> &'static str {
        layout::PALETTE[self.row % layout::PALETTE.len()]
    }
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u8,
    /// Attract mode is driving the paddle
    pub is_demo: bool,
    /// Frame counter the demo controller uses to pace its launches
    pub demo_timer: u32,
    /// Simulation tick counter
    pub tick_count: u64,
    pub paddle: Paddle,
    pub ball: Ball,
    pub blocks: Vec<Block>,
}

impl GameState {
    /// Create a fresh session state with the given seed
    pub fn new(seed: u64) -> Self {
        let paddle = Paddle::default();
        let mut ball = Ball::new();
        ball.attach_to(&paddle);

        let mut blocks = Vec::new();
        layout::build_grid(&mut blocks);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            lives: START_LIVES,
            is_demo: false,
            demo_timer: 0,
            tick_count: 0,
            paddle,
            ball,
            blocks,
        }
    }

    /// Begin a round: ball attached, waiting for the launch action
    pub fn start(&mut self) {
        self.phase = GamePhase::Serve;
        self.reset_ball();
    }

    /// Launch the attached ball at a uniform random angle within ±30° of
    /// vertical
    pub fn launch(&mut self) {
        let angle = (self.rng.random::<f32>() - 0.5) * BOUNCE_SPREAD;
        self.launch_at(angle);
    }

    /// Launch the attached ball at a fixed angle off vertical (0 = straight
    /// up). Deterministic variant used by the tests and scripted runs.
    pub fn launch_at(&mut self, angle: f32) {
        self.ball.vel = Vec2::new(
            angle.sin() * self.ball.speed,
            -angle.cos() * self.ball.speed,
        );
        self.ball.state = BallState::Free;
        self.phase = GamePhase::Playing;
    }

    /// Put the ball back on the paddle with zero velocity
    pub fn reset_ball(&mut self) {
        self.ball.attach_to(&self.paddle);
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Serve;
        }
    }

    /// Move the paddle under a pointer sample; an attached ball rides along
    pub fn set_paddle_center(&mut self, center_x: f32) {
        self.paddle.set_center_x(center_x);
        self.ball.follow(&self.paddle);
    }

    /// End the round; a win overrides a loss recorded earlier the same tick
    pub fn game_over(&mut self, win: bool) {
        self.phase = if win { GamePhase::Won } else { GamePhase::Lost };
        self.ball.vel = Vec2::ZERO;
    }

    /// Count of blocks still standing
    pub fn blocks_remaining(&self) -> usize {
        self.blocks.iter().filter(|b| b.visible).count()
    }

    /// Wholesale reset for a new round: score, lives, grid, ball. The RNG
    /// stream continues so consecutive demo rounds differ.
    pub fn restart(&mut self) {
        self.score = 0;
        self.lives = START_LIVES;
        self.phase = GamePhase::Idle;
        self.is_demo = false;
        self.demo_timer = 0;
        self.tick_count = 0;
        layout::build_grid(&mut self.blocks);
        self.reset_ball();
    }
}
