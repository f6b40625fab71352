//! Scrolling starfield
//!
//! Two copies of the starfield image are stacked vertically. Both slide down
//! by one image height every scroll period and then snap back up, so the
//! seam never shows.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Background {
    /// Image name looked up by the host
    pub texture: String,
    /// Height of one image tile in scene units
    pub tile_height: f32,
    pub scroll_secs: f32,
    /// Center of the first tile before scrolling starts
    pub origin: Vec2,
}

impl Background {
    pub fn new(tile_height: f32, origin: Vec2) -> Self {
        Self {
            texture: BACKGROUND_TEXTURE.to_string(),
            tile_height,
            scroll_secs: BACKGROUND_SCROLL_SECS,
            origin,
        }
    }

    /// Fraction of the current scroll cycle, in [0, 1)
    pub fn cycle(&self, elapsed: f32) -> f32 {
        if self.scroll_secs <= 0.0 {
            return 0.0;
        }
        (elapsed / self.scroll_secs).rem_euclid(1.0)
    }

    /// Tile centers at `elapsed` seconds
    pub fn tile_positions(&self, elapsed: f32) -> Vec<Vec2> {
        let shift = self.tile_height * self.cycle(elapsed);
        (0..BACKGROUND_TILES)
            .map(|i| self.origin + Vec2::new(0.0, self.tile_height * i as f32 - shift))
            .collect()
    }
}
