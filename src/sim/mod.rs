//! Game rules
//!
//! All gameplay decisions live here. This module must stay engine-agnostic:
//! - No physics, rendering or platform dependencies
//! - Hosts talk to it only through `SceneHandler` and `SceneCommand`
//! - Brick layout is a pure function of arena geometry

pub mod arena;
pub mod brick;
pub mod controller;
pub mod scene;
pub mod state;

pub use arena::{Arena, Rect};
pub use brick::{Brick, BrickColor, BrickHit, brick_grid, grid_columns};
pub use controller::{GameController, SessionStats};
pub use scene::{Contact, EntityId, PointerEvent, PointerKind, SceneCommand, SceneHandler};
pub use state::{Ball, GameState, LoseZone, Paddle, Phase, PlayLabel, RoundOutcome};
