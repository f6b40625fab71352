//! Bricks: grid layout and color-state progression
//!
//! A brick's color doubles as its hit counter. Each ball contact moves it one
//! step along blue → green → yellow → red, and a contact while red removes it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::scene::EntityId;
use crate::consts::*;

/// Brick color-state, in progression order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrickColor {
    Blue,
    Green,
    Yellow,
    Red,
}

impl BrickColor {
    /// Row colors from top to bottom
    pub const ROWS: [BrickColor; 4] = [
        BrickColor::Blue,
        BrickColor::Green,
        BrickColor::Yellow,
        BrickColor::Red,
    ];

    /// Next color, or `None` when the brick should be removed
    pub fn advance(self) -> Option<BrickColor> {
        match self {
            BrickColor::Blue => Some(BrickColor::Green),
            BrickColor::Green => Some(BrickColor::Yellow),
            BrickColor::Yellow => Some(BrickColor::Red),
            BrickColor::Red => None,
        }
    }

    /// Contacts left before removal (including the removing one)
    pub fn hits_remaining(self) -> u32 {
        match self {
            BrickColor::Blue => 4,
            BrickColor::Green => 3,
            BrickColor::Yellow => 2,
            BrickColor::Red => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BrickColor::Blue => "blue",
            BrickColor::Green => "green",
            BrickColor::Yellow => "yellow",
            BrickColor::Red => "red",
        }
    }
}

/// Outcome of a ball contact against a brick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickHit {
    /// Brick moved to a new color and stays in play
    Advanced(BrickColor),
    /// Brick was red and has left the active set
    Removed,
}

/// A brick in the active set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: EntityId,
    pub pos: Vec2,
    pub color: BrickColor,
}

impl Brick {
    pub fn size() -> Vec2 {
        Vec2::new(BRICK_WIDTH, BRICK_HEIGHT)
    }

    /// Apply one ball contact
    pub fn hit(&mut self) -> BrickHit {
        match self.color.advance() {
            Some(next) => {
                self.color = next;
                BrickHit::Advanced(next)
            }
            None => BrickHit::Removed,
        }
    }
}

/// Number of brick columns that fit in an arena of the given width
pub fn grid_columns(width: f32) -> u32 {
    let width = width.max(0.0) as i32;
    (width / BRICK_STRIDE) as u32
}

/// Lay out the full brick grid for an arena.
///
/// Ids are assigned in row-major order starting at `first_id`. The integer
/// arithmetic matches the scene's point grid, so the leftover width is split
/// with truncation.
pub fn brick_grid(arena: &Arena, first_id: u32) -> Vec<Brick> {
    let width = arena.width().max(0.0) as i32;
    let columns = grid_columns(arena.width()) as i32;
    let x_offset = (width - columns * BRICK_STRIDE) / 2 + arena.min.x as i32 + BRICK_EDGE_INSET;
    let top = arena.max.y as i32;

    let mut bricks = Vec::with_capacity((columns as usize) * BRICK_ROW_OFFSETS.len());
    let mut id = first_id;
    for (&row_offset, &color) in BRICK_ROW_OFFSETS.iter().zip(BrickColor::ROWS.iter()) {
        for column in 0..columns {
            bricks.push(Brick {
                id: EntityId(id),
                pos: Vec2::new(
                    (column * BRICK_STRIDE + x_offset) as f32,
                    (top - row_offset) as f32,
                ),
                color,
            });
            id += 1;
        }
    }
    bricks
}
