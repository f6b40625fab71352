//! The boundary between game rules and the host engine
//!
//! The host reports lifecycle, pointer and contact events through
//! [`SceneHandler`]. The rules answer with [`SceneCommand`]s that the host
//! applies to its own scene graph and physics world.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::brick::BrickColor;

/// Identifier for every entity the rules ask the host to create.
///
/// Ids increase monotonically and are never reused, so a contact naming a
/// despawned entity can never be mistaken for a live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

/// Pointer event phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Down,
    Moved,
}

/// One pointer/touch sample in scene coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pos: Vec2,
}

impl PointerEvent {
    pub fn down(pos: Vec2) -> Self {
        Self {
            kind: PointerKind::Down,
            pos,
        }
    }

    pub fn moved(pos: Vec2) -> Self {
        Self {
            kind: PointerKind::Moved,
            pos,
        }
    }
}

/// Two tracked bodies started touching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contact {
    pub a: EntityId,
    pub b: EntityId,
}

impl Contact {
    pub fn new(a: EntityId, b: EntityId) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn involves(&self, id: EntityId) -> bool {
        self.a == id || self.b == id
    }

    /// The body opposite `id`, if `id` takes part in this contact
    pub fn other(&self, id: EntityId) -> Option<EntityId> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }

    /// Order-independent key for the pair
    pub fn key(&self) -> (EntityId, EntityId) {
        (self.a.min(self.b), self.a.max(self.b))
    }
}

/// Instructions for the host's scene graph and physics world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneCommand {
    /// Edge loop around the arena
    SpawnBoundary { id: EntityId, min: Vec2, max: Vec2 },
    /// Named image tiled and scrolled behind everything else
    SpawnBackground {
        texture: String,
        tiles: u32,
        scroll_secs: f32,
        z: f32,
    },
    /// Static sensor along the bottom edge
    SpawnLoseZone { id: EntityId, center: Vec2, size: Vec2 },
    /// `position` is the center of the text; hosts anchor the label
    /// vertically centered rather than on its baseline.
    SpawnLabel {
        id: EntityId,
        text: String,
        font_size: f32,
        position: Vec2,
    },
    UpdateLabel {
        id: EntityId,
        text: String,
        font_size: f32,
        visible: bool,
    },
    /// Kinetic ball, unaffected by forces until launched
    SpawnBall { id: EntityId, position: Vec2, radius: f32 },
    /// Non-dynamic paddle body
    SpawnPaddle { id: EntityId, position: Vec2, size: Vec2 },
    /// Non-dynamic brick body
    SpawnBrick {
        id: EntityId,
        position: Vec2,
        size: Vec2,
        color: BrickColor,
    },
    SetBrickColor { id: EntityId, color: BrickColor },
    MovePaddle { id: EntityId, x: f32 },
    /// Make the ball dynamic and apply an impulse
    LaunchBall { id: EntityId, impulse: Vec2 },
    Despawn { id: EntityId },
}

/// Callback surface a host engine drives
pub trait SceneHandler {
    /// The scene became active
    fn on_activate(&mut self, arena: Arena);

    /// A pointer went down or moved
    fn on_pointer(&mut self, event: PointerEvent);

    /// Contacts reported by one physics notification, in delivery order
    fn on_contact(&mut self, contacts: &[Contact]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_other() {
        let contact = Contact::new(EntityId(3), EntityId(7));
        assert_eq!(contact.other(EntityId(3)), Some(EntityId(7)));
        assert_eq!(contact.other(EntityId(7)), Some(EntityId(3)));
        assert_eq!(contact.other(EntityId(5)), None);
        assert_eq!(contact.key(), Contact::new(EntityId(7), EntityId(3)).key());
    }

    #[test]
    fn test_command_json_shape() {
        let cmd = SceneCommand::SetBrickColor {
            id: EntityId(12),
            color: BrickColor::Yellow,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert_eq!(json, r#"{"type":"set_brick_color","id":12,"color":"yellow"}"#);

        let contacts: Vec<Contact> = serde_json::from_str(r#"[{"a":1,"b":2}]"#).unwrap();
        assert_eq!(contacts, vec![Contact::new(EntityId(1), EntityId(2))]);
    }
}
