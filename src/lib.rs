//! Brickfall - a browser Breakout clone
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, session state)
//! - `settings`: Presentation preferences persisted in LocalStorage
//!
//! The simulation is driven by a fixed-rate tick plus discrete input events
//! and exposes a read-only [`sim::Snapshot`] each frame; everything drawn on
//! the canvas or written into the DOM lives in the platform entry point
//! (`main.rs`) behind that boundary.

pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; velocity constants are per-tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Playfield dimensions (logical pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults - rides a fixed rail near the bottom edge
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_Y: f32 = FIELD_HEIGHT - 40.0;
    /// Maximum paddle travel per tick under demo steering
    pub const PADDLE_SPEED: f32 = 8.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Ball speed magnitude while in flight, pixels per tick
    pub const BALL_SPEED: f32 = 6.0;
    /// Vertical gap between paddle top and an attached ball's center
    pub const BALL_REST_OFFSET: f32 = 20.0;

    /// Half-spread of launch and paddle-bounce angles (±30° off vertical)
    pub const BOUNCE_SPREAD: f32 = std::f32::consts::PI / 3.0;

    /// Block grid
    pub const BLOCK_ROWS: usize = 6;
    pub const BLOCK_COLS: usize = 10;
    pub const BLOCK_WIDTH: f32 = 70.0;
    pub const BLOCK_HEIGHT: f32 = 25.0;
    pub const BLOCK_PADDING: f32 = 5.0;
    pub const BLOCK_OFFSET_TOP: f32 = 80.0;
    pub const BLOCK_OFFSET_LEFT: f32 = 35.0;
    /// Points awarded per destroyed block
    pub const BLOCK_SCORE: u32 = 10;

    /// Lives at the start of a round
    pub const START_LIVES: u8 = 3;

    /// Idle time without human input before the attract mode takes over
    pub const IDLE_TIMEOUT_MS: f64 = 5000.0;
    /// Delay before a demo round restarts itself after game over
    pub const DEMO_RESTART_DELAY_MS: f64 = 3000.0;
    /// Ticks the demo controller waits before launching an attached ball
    pub const DEMO_LAUNCH_TICKS: u32 = 60;
    /// How many ticks ahead the demo controller projects the ball's x
    pub const DEMO_LOOKAHEAD_TICKS: f32 = 10.0;
}

/// Rightmost legal paddle x for the given paddle width
#[inline]
pub fn paddle_max_x(paddle_width: f32) -> f32 {
    consts::FIELD_WIDTH - paddle_width
}

/// Clamp a paddle x position to the playfield rail
#[inline]
pub fn clamp_paddle_x(x: f32, paddle_width: f32) -> f32 {
    x.clamp(0.0, paddle_max_x(paddle_width))
}
