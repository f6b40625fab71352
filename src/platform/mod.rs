//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Pointer coordinates (screens are y-down, the scene is y-up)
//! - JavaScript host entry points (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod web;

use glam::Vec2;

use crate::sim::Arena;

/// Map a pointer position in a y-down viewport onto the arena.
///
/// Returns `None` for an empty viewport.
pub fn screen_to_scene(screen: Vec2, viewport: Vec2, arena: &Arena) -> Option<Vec2> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    let scale = Vec2::new(arena.width() / viewport.x, arena.height() / viewport.y);
    Some(Vec2::new(
        arena.min.x + screen.x * scale.x,
        arena.max.y - screen.y * scale.y,
    ))
}
