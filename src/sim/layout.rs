//! Block grid generation
//!
//! One fixed 6x10 grid per round, row-major, colors cycling per row through
//! an 8-entry palette.

use super::collision::Rect;
use super::state::Block;
use crate::consts::*;

/// Per-row block colors, cycled by row index
pub const PALETTE: [&str; 8] = [
    "#ff6b6b", "#ee5a24", "#feca57", "#48dbfb", "#0abde3", "#00d2d3", "#54a0ff", "#5f27cd",
];

/// Fill `blocks` with a fresh grid, replacing any prior contents. Invoked at
/// session creation and on every restart.
pub fn build_grid(blocks: &mut Vec<Block>) {
    blocks.clear();
    for row in 0..BLOCK_ROWS {
        for col in 0..BLOCK_COLS {
            blocks.push(Block {
                rect: Rect::new(
                    col as f32 * (BLOCK_WIDTH + BLOCK_PADDING) + BLOCK_OFFSET_LEFT,
                    row as f32 * (BLOCK_HEIGHT + BLOCK_PADDING) + BLOCK_OFFSET_TOP,
                    BLOCK_WIDTH,
                    BLOCK_HEIGHT,
                ),
                row,
                visible: true,
            });
        }
    }
}
