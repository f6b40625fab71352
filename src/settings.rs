//! Gameplay settings
//!
//! Persisted in LocalStorage on the web. Native builds read an optional JSON
//! file named by `BREAKOUT_SETTINGS`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Gameplay tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Rules ===
    /// Paddle width as a fraction of arena width (0, 1]
    pub paddle_width_fraction: f32,
    /// Impulse given to the ball when the round starts
    pub launch_impulse: Vec2,
    /// Count a repeated ball/brick pair only once per contact batch
    pub dedupe_batch_contacts: bool,

    // === Host ===
    /// Velocity gained per unit of impulse in the native host
    pub impulse_to_velocity: f32,
    /// Arena size for the native host
    pub arena_width: f32,
    pub arena_height: f32,

    // === Demo ===
    /// Autopilot paddle speed (scene units per second)
    pub autopilot_speed: f32,
    /// Frames the headless demo runs for
    pub demo_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            paddle_width_fraction: 1.0,
            launch_impulse: Vec2::new(5.0, 5.0),
            dedupe_batch_contacts: false,

            impulse_to_velocity: 60.0,
            arena_width: 414.0,
            arena_height: 736.0,

            autopilot_speed: 600.0,
            demo_frames: 60 * 120,
        }
    }
}

impl Settings {
    /// Environment variable naming a native settings file
    pub const PATH_ENV: &'static str = "BREAKOUT_SETTINGS";

    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "starfield_breakout_settings";

    /// Parse settings JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Clamp values the rules cannot work with
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.paddle_width_fraction > 0.0 && self.paddle_width_fraction <= 1.0) {
            log::warn!(
                "paddle_width_fraction {} out of range, using {}",
                self.paddle_width_fraction,
                defaults.paddle_width_fraction
            );
            self.paddle_width_fraction = defaults.paddle_width_fraction;
        }
        if !(self.launch_impulse.x > 0.0 && self.launch_impulse.y > 0.0) {
            log::warn!(
                "launch_impulse {:?} must point up and right, using {:?}",
                self.launch_impulse,
                defaults.launch_impulse
            );
            self.launch_impulse = defaults.launch_impulse;
        }
        if !(self.impulse_to_velocity > 0.0) {
            log::warn!("impulse_to_velocity must be positive, using default");
            self.impulse_to_velocity = defaults.impulse_to_velocity;
        }
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            log::warn!("arena size must be positive, using default");
            self.arena_width = defaults.arena_width;
            self.arena_height = defaults.arena_height;
        }
        if !(self.autopilot_speed >= 0.0) {
            self.autopilot_speed = defaults.autopilot_speed;
        }
        self
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Stored settings unreadable ({}), using defaults", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the file named by `BREAKOUT_SETTINGS`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var(Self::PATH_ENV) {
            Ok(path) => Self::load_from_path(&path),
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &str) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read settings file {} ({}), using defaults", path, e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings file {} ({}), using defaults", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"dedupe_batch_contacts": true}"#).unwrap();
        assert!(settings.dedupe_batch_contacts);
        assert_eq!(settings.launch_impulse, Vec2::new(5.0, 5.0));
        assert_eq!(settings.paddle_width_fraction, 1.0);
    }

    #[test]
    fn test_out_of_range_values_are_replaced() {
        let settings =
            Settings::from_json(r#"{"paddle_width_fraction": 3.0, "launch_impulse": [-1.0, 2.0]}"#)
                .unwrap();
        assert_eq!(settings.paddle_width_fraction, 1.0);
        assert_eq!(settings.launch_impulse, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Settings::from_json("{not json").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_from_path("/nonexistent/breakout.json");
        assert_eq!(settings, Settings::default());
    }
}
