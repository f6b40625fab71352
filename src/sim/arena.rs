//! Arena geometry
//!
//! Scene space is y-up: `min` is the bottom-left corner, `max` the top-right.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The bounded play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub min: Vec2,
    pub max: Vec2,
}

impl Arena {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Arena of the given size centered on the origin
    pub fn centered(width: f32, height: f32) -> Self {
        let half = Vec2::new(width.abs(), height.abs()) / 2.0;
        Self::new(-half, half)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Axis-aligned rectangle described by its center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size / 2.0
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let d = (point - self.center).abs();
        let half = self.half_extents();
        d.x <= half.x && d.y <= half.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_arena() {
        let arena = Arena::centered(330.0, 600.0);
        assert_eq!(arena.min, Vec2::new(-165.0, -300.0));
        assert_eq!(arena.max, Vec2::new(165.0, 300.0));
        assert_eq!(arena.width(), 330.0);
        assert_eq!(arena.center(), Vec2::ZERO);
    }

    #[test]
    fn test_new_orders_corners() {
        let arena = Arena::new(Vec2::new(10.0, 20.0), Vec2::new(0.0, 0.0));
        assert_eq!(arena.min, Vec2::ZERO);
        assert_eq!(arena.max, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_arena_contains_edges() {
        let arena = Arena::centered(330.0, 600.0);
        assert!(arena.contains(Vec2::ZERO));
        assert!(arena.contains(arena.max));
        assert!(!arena.contains(Vec2::new(0.0, -300.5)));
    }

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 4.0));
        assert!(rect.contains(Vec2::new(0.0, 3.0)));
        assert!(rect.contains(Vec2::new(10.0, 7.0)));
        assert!(!rect.contains(Vec2::new(10.1, 5.0)));
        assert!(!rect.contains(Vec2::new(5.0, 7.5)));
    }
}
