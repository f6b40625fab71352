//! WASM bridge for a JavaScript scene/physics engine
//!
//! The JS side owns rendering and physics. It calls these exports for the
//! lifecycle, pointer and contact callbacks, then applies the JSON command
//! list returned by `game_drain_commands()`.

use std::cell::RefCell;

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::Settings;
use crate::background::Background;
use crate::platform::screen_to_scene;
use crate::sim::{Arena, Contact, EntityId, GameController, PointerEvent, SceneHandler};

thread_local! {
    static GAME: RefCell<Option<GameController>> = RefCell::new(None);
}

fn with_game<R>(f: impl FnOnce(&mut GameController) -> R) -> Result<R, JsValue> {
    GAME.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(game) => Ok(f(game)),
            None => Err(JsValue::from_str("Game not initialized. Call game_init() first.")),
        }
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Activate the scene for an arena given in scene coordinates (y-up)
#[wasm_bindgen]
pub fn game_init(min_x: f32, min_y: f32, max_x: f32, max_y: f32) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let mut game = GameController::new(Settings::load());
    game.on_activate(Arena::new(Vec2::new(min_x, min_y), Vec2::new(max_x, max_y)));

    GAME.with(|cell| {
        *cell.borrow_mut() = Some(game);
    });
    log::info!("starfield-breakout: initialized");
}

/// Store new settings; they apply from the next `game_init()`
#[wasm_bindgen]
pub fn game_configure(json: &str) -> Result<(), JsValue> {
    let settings = Settings::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    settings.save();
    Ok(())
}

#[wasm_bindgen]
pub fn game_pointer_down(x: f32, y: f32) -> Result<(), JsValue> {
    with_game(|g| g.on_pointer(PointerEvent::down(Vec2::new(x, y))))
}

#[wasm_bindgen]
pub fn game_pointer_move(x: f32, y: f32) -> Result<(), JsValue> {
    with_game(|g| g.on_pointer(PointerEvent::moved(Vec2::new(x, y))))
}

/// Pointer down in y-down viewport pixels
#[wasm_bindgen]
pub fn game_pointer_down_screen(
    x: f32,
    y: f32,
    viewport_w: f32,
    viewport_h: f32,
) -> Result<(), JsValue> {
    with_game(|g| {
        let Some(arena) = g.state().map(|s| s.arena) else {
            return;
        };
        if let Some(pos) = screen_to_scene(Vec2::new(x, y), Vec2::new(viewport_w, viewport_h), &arena) {
            g.on_pointer(PointerEvent::down(pos));
        }
    })
}

/// Pointer drag in y-down viewport pixels
#[wasm_bindgen]
pub fn game_pointer_move_screen(
    x: f32,
    y: f32,
    viewport_w: f32,
    viewport_h: f32,
) -> Result<(), JsValue> {
    with_game(|g| {
        let Some(arena) = g.state().map(|s| s.arena) else {
            return;
        };
        if let Some(pos) = screen_to_scene(Vec2::new(x, y), Vec2::new(viewport_w, viewport_h), &arena) {
            g.on_pointer(PointerEvent::moved(pos));
        }
    })
}

/// A single contact notification
#[wasm_bindgen]
pub fn game_contact(a: u32, b: u32) -> Result<(), JsValue> {
    with_game(|g| g.on_contact(&[Contact::new(EntityId(a), EntityId(b))]))
}

/// A batch of contacts, as `[{"a": 1, "b": 2}, ...]`
#[wasm_bindgen]
pub fn game_contacts(json: &str) -> Result<(), JsValue> {
    let contacts: Vec<Contact> =
        serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    with_game(|g| g.on_contact(&contacts))
}

/// Pending scene commands as a JSON array
#[wasm_bindgen]
pub fn game_drain_commands() -> Result<String, JsValue> {
    let commands = with_game(|g| g.drain_commands())?;
    to_json(&commands)
}

/// Starfield tile centers for the given time, as a JSON array of `[x, y]`
#[wasm_bindgen]
pub fn game_background_tiles(elapsed: f32, tile_height: f32) -> Result<String, JsValue> {
    let origin = with_game(|g| g.state().map(|s| s.arena.center()))?.unwrap_or(Vec2::ZERO);
    to_json(&Background::new(tile_height, origin).tile_positions(elapsed))
}

#[wasm_bindgen]
pub fn game_stats() -> Result<String, JsValue> {
    let stats = with_game(|g| g.stats().clone())?;
    to_json(&stats)
}
