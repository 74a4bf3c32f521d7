//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Fixed timestep only, velocities in pixels per tick
//! - Seeded RNG only
//! - No rendering or platform dependencies; callers feed input events and a
//!   monotonic clock in, and read a [`Snapshot`] out

pub mod collision;
pub mod demo;
pub mod layout;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps};
pub use session::{BlockView, Overlay, Session, Snapshot};
pub use state::{Ball, BallState, Block, GamePhase, GameState, Paddle};
pub use tick::step;
