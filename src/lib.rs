//! Starfield Breakout - a minimal brick-breaker
//!
//! Core modules:
//! - `sim`: Engine-agnostic game rules (brick grid, color progression, rounds)
//! - `background`: Scrolling starfield layout
//! - `host`: Native rigid-body host that plays the rules headlessly
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Data-driven gameplay tunables

pub mod background;
#[cfg(feature = "physics")]
pub mod host;
pub mod platform;
pub mod settings;
pub mod sim;

pub use background::Background;
pub use settings::Settings;
pub use sim::{GameController, SceneHandler};

/// Game configuration constants
pub mod consts {
    /// Host step (60 Hz, one physics step per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Brick body size
    pub const BRICK_WIDTH: f32 = 50.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    /// Horizontal distance between brick centers
    pub const BRICK_STRIDE: i32 = 55;
    /// Half a brick plus the gap, from the grid's left edge to the first center
    pub const BRICK_EDGE_INSET: i32 = 25;
    /// Row distances below the arena top (blue, green, yellow, red)
    pub const BRICK_ROW_OFFSETS: [i32; 4] = [40, 65, 90, 115];

    pub const BALL_RADIUS: f32 = 10.0;

    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Paddle center height above the arena bottom
    pub const PADDLE_BOTTOM_OFFSET: f32 = 125.0;

    pub const LOSE_ZONE_HEIGHT: f32 = 50.0;

    /// Label sits this far below the arena center
    pub const LABEL_OFFSET_Y: f32 = 50.0;
    pub const LABEL_START_FONT_SIZE: f32 = 36.0;
    pub const LABEL_END_FONT_SIZE: f32 = 25.0;
    /// Average glyph width as a fraction of font size
    pub const LABEL_GLYPH_ASPECT: f32 = 0.6;
    pub const START_TEXT: &str = "Tap to start";
    pub const WIN_TEXT: &str = "Winner! Tap to play again";
    pub const LOSS_TEXT: &str = "GAME OVER! Tap to play again";

    /// Starfield image name, resolved by the host
    pub const BACKGROUND_TEXTURE: &str = "Stars";
    pub const BACKGROUND_TILES: u32 = 2;
    /// Seconds for a tile to scroll down its own height
    pub const BACKGROUND_SCROLL_SECS: f32 = 20.0;
    pub const BACKGROUND_Z: f32 = -1.0;
}
