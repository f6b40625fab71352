//! Game state and core rule types
//!
//! Everything the controller mutates lives here. Entities are rebuilt on
//! every renew; only the boundary, lose zone and label survive a round.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, Rect};
use super::brick::{Brick, BrickHit, brick_grid};
use super::scene::EntityId;
use crate::consts::*;

/// Round phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Label visible, ball waiting at center
    Idle,
    /// Ball launched, round in progress
    Active,
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Won,
    Lost,
}

impl RoundOutcome {
    pub fn label_text(&self) -> &'static str {
        match self {
            RoundOutcome::Won => WIN_TEXT,
            RoundOutcome::Lost => LOSS_TEXT,
        }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    /// False while the ball is kinetic (ignores forces and impulses)
    pub launched: bool,
}

impl Ball {
    pub fn new(id: EntityId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            radius: BALL_RADIUS,
            launched: false,
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Paddle {
    pub fn new(id: EntityId, arena: &Arena, width_fraction: f32) -> Self {
        Self {
            id,
            pos: Vec2::new(arena.center().x, arena.min.y + PADDLE_BOTTOM_OFFSET),
            size: Vec2::new(arena.width() * width_fraction, PADDLE_HEIGHT),
        }
    }
}

/// Sensor strip along the bottom edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoseZone {
    pub id: EntityId,
    pub rect: Rect,
}

impl LoseZone {
    pub fn new(id: EntityId, arena: &Arena) -> Self {
        Self {
            id,
            rect: Rect::new(
                Vec2::new(arena.center().x, arena.min.y + LOSE_ZONE_HEIGHT / 2.0),
                Vec2::new(arena.width(), LOSE_ZONE_HEIGHT),
            ),
        }
    }
}

/// The "Tap to start" label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayLabel {
    pub id: EntityId,
    pub text: String,
    pub font_size: f32,
    pub pos: Vec2,
    pub visible: bool,
}

impl PlayLabel {
    pub fn new(id: EntityId, arena: &Arena) -> Self {
        Self {
            id,
            text: START_TEXT.to_string(),
            font_size: LABEL_START_FONT_SIZE,
            pos: arena.center() - Vec2::new(0.0, LABEL_OFFSET_Y),
            visible: true,
        }
    }

    /// Approximate text bounds used for tap hit-testing.
    ///
    /// `pos` is the vertical middle of the text, not its baseline.
    pub fn hit_region(&self) -> Rect {
        let chars = self.text.chars().count() as f32;
        Rect::new(
            self.pos,
            Vec2::new(chars * self.font_size * LABEL_GLYPH_ASPECT, self.font_size),
        )
    }

    pub fn hit(&self, point: Vec2) -> bool {
        self.hit_region().contains(point)
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub arena: Arena,
    pub phase: Phase,
    pub boundary: EntityId,
    pub lose_zone: LoseZone,
    pub label: PlayLabel,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Active bricks (removed bricks are dropped)
    pub bricks: Vec<Brick>,
    /// Bricks laid out at the start of the round
    pub total_bricks: usize,
    pub bricks_removed: usize,
    paddle_width_fraction: f32,
    next_id: u32,
}

impl GameState {
    /// Build the scene furniture and a fresh idle round
    pub fn new(arena: Arena, paddle_width_fraction: f32) -> Self {
        let mut next_id = 1;
        let mut alloc = || {
            let id = EntityId(next_id);
            next_id += 1;
            id
        };

        let boundary = alloc();
        let lose_zone = LoseZone::new(alloc(), &arena);
        let label = PlayLabel::new(alloc(), &arena);
        let ball = Ball::new(alloc(), arena.center());
        let paddle = Paddle::new(alloc(), &arena, paddle_width_fraction);

        let mut state = Self {
            arena,
            phase: Phase::Idle,
            boundary,
            lose_zone,
            label,
            ball,
            paddle,
            bricks: Vec::new(),
            total_bricks: 0,
            bricks_removed: 0,
            paddle_width_fraction,
            next_id,
        };
        state.lay_bricks();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    fn lay_bricks(&mut self) {
        self.bricks = brick_grid(&self.arena, self.next_id);
        self.next_id += self.bricks.len() as u32;
        self.total_bricks = self.bricks.len();
        self.bricks_removed = 0;
    }

    /// Rebuild ball, paddle and bricks for a new idle round.
    ///
    /// Returns the ids of the entities that left the scene.
    pub fn renew(&mut self) -> Vec<EntityId> {
        let mut retired = Vec::with_capacity(self.bricks.len() + 2);
        retired.push(self.ball.id);
        retired.push(self.paddle.id);
        retired.extend(self.bricks.iter().map(|b| b.id));

        let ball_id = self.next_entity_id();
        self.ball = Ball::new(ball_id, self.arena.center());
        let paddle_id = self.next_entity_id();
        self.paddle = Paddle::new(paddle_id, &self.arena, self.paddle_width_fraction);
        self.lay_bricks();
        self.phase = Phase::Idle;

        retired
    }

    /// Idle → Active. Returns false if a round is already running.
    pub fn launch(&mut self) -> bool {
        if self.phase == Phase::Active {
            return false;
        }
        self.phase = Phase::Active;
        self.ball.launched = true;
        self.label.visible = false;
        true
    }

    pub fn move_paddle(&mut self, x: f32) {
        self.paddle.pos.x = x;
    }

    pub fn brick(&self, id: EntityId) -> Option<&Brick> {
        self.bricks.iter().find(|b| b.id == id)
    }

    /// Apply a ball contact to a live brick
    pub fn hit_brick(&mut self, id: EntityId) -> Option<BrickHit> {
        let index = self.bricks.iter().position(|b| b.id == id)?;
        let hit = self.bricks[index].hit();
        if hit == BrickHit::Removed {
            self.bricks.remove(index);
            self.bricks_removed += 1;
        }
        Some(hit)
    }

    /// True once every brick of the round has been removed.
    ///
    /// A round that started without bricks never counts as cleared.
    pub fn cleared(&self) -> bool {
        self.total_bricks > 0 && self.bricks_removed == self.total_bricks
    }

    /// Close the round and show the outcome on the label
    pub fn finish_round(&mut self, outcome: RoundOutcome) {
        self.phase = Phase::Idle;
        self.label.text = outcome.label_text().to_string();
        self.label.font_size = LABEL_END_FONT_SIZE;
        self.label.visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BrickColor;

    fn state_330() -> GameState {
        GameState::new(Arena::centered(330.0, 600.0), 0.25)
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = state_330();
        assert_eq!(state.phase, Phase::Idle);
        assert!(!state.ball.launched);
        assert!(state.label.visible);
        assert_eq!(state.bricks.len(), 24);
        assert_eq!(state.total_bricks, 24);
        assert_eq!(state.bricks_removed, 0);
        assert_eq!(state.ball.pos, Vec2::ZERO);
        assert_eq!(state.paddle.pos, Vec2::new(0.0, -300.0 + PADDLE_BOTTOM_OFFSET));
        assert_eq!(state.lose_zone.rect.center.y, -275.0);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut state = state_330();
        let mut ids = vec![
            state.boundary,
            state.lose_zone.id,
            state.label.id,
            state.ball.id,
            state.paddle.id,
        ];
        ids.extend(state.bricks.iter().map(|b| b.id));
        state.renew();
        ids.push(state.ball.id);
        ids.push(state.paddle.id);
        ids.extend(state.bricks.iter().map(|b| b.id));

        let count = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn test_launch_only_from_idle() {
        let mut state = state_330();
        assert!(state.launch());
        assert_eq!(state.phase, Phase::Active);
        assert!(!state.label.visible);
        assert!(!state.launch());
    }

    #[test]
    fn test_hit_brick_four_times_removes_it() {
        let mut state = state_330();
        let id = state.bricks[0].id;
        for _ in 0..3 {
            assert!(matches!(state.hit_brick(id), Some(BrickHit::Advanced(_))));
        }
        assert_eq!(state.hit_brick(id), Some(BrickHit::Removed));
        assert_eq!(state.bricks_removed, 1);
        assert!(state.brick(id).is_none());
        assert_eq!(state.hit_brick(id), None);
    }

    #[test]
    fn test_renew_restores_grid() {
        let mut state = state_330();
        state.launch();
        let blue = state.bricks[0].id;
        let red = state.bricks.last().unwrap().id;
        assert_eq!(state.hit_brick(blue), Some(BrickHit::Advanced(BrickColor::Green)));
        assert_eq!(state.hit_brick(red), Some(BrickHit::Removed));
        state.finish_round(RoundOutcome::Lost);
        let retired = state.renew();

        // ball + paddle + the 23 bricks still standing
        assert_eq!(retired.len(), 25);
        assert!(retired.contains(&blue));
        assert!(!retired.contains(&red));
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.bricks.len(), 24);
        assert_eq!(state.bricks_removed, 0);
        assert_eq!(state.label.text, LOSS_TEXT);
        assert!(!state.ball.launched);
    }

    #[test]
    fn test_label_hit_region() {
        let state = state_330();
        assert!(state.label.hit(state.label.pos));
        assert!(state.label.hit(state.label.pos + Vec2::new(100.0, 10.0)));
        assert!(!state.label.hit(state.label.pos + Vec2::new(0.0, 40.0)));
    }

    #[test]
    fn test_empty_grid_is_never_cleared() {
        let state = GameState::new(Arena::centered(40.0, 300.0), 0.25);
        assert!(state.bricks.is_empty());
        assert!(!state.cleared());
    }
}
