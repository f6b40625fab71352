//! Game controller
//!
//! Wires host callbacks into [`GameState`] mutations and queues the matching
//! [`SceneCommand`]s for the host to apply.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::brick::{Brick, BrickHit};
use super::scene::{Contact, PointerEvent, PointerKind, SceneCommand, SceneHandler};
use super::state::{GameState, Phase, RoundOutcome};
use crate::Settings;
use crate::consts::*;

/// In-memory tally for the current session (never persisted)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub rounds_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub bricks_removed: u64,
}

impl SessionStats {
    fn record(&mut self, outcome: RoundOutcome, bricks_removed: usize) {
        self.rounds_played += 1;
        self.bricks_removed += bricks_removed as u64;
        match outcome {
            RoundOutcome::Won => self.wins += 1,
            RoundOutcome::Lost => self.losses += 1,
        }
    }
}

/// Owns the game state and drives it from host callbacks
#[derive(Debug)]
pub struct GameController {
    settings: Settings,
    state: Option<GameState>,
    outbox: Vec<SceneCommand>,
    stats: SessionStats,
}

impl GameController {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            state: None,
            outbox: Vec::new(),
            stats: SessionStats::default(),
        }
    }

    /// Current state, `None` until the scene has been activated
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn phase(&self) -> Option<Phase> {
        self.state.as_ref().map(|s| s.phase)
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Take every command queued since the last drain
    pub fn drain_commands(&mut self) -> Vec<SceneCommand> {
        std::mem::take(&mut self.outbox)
    }

    fn spawn_round(outbox: &mut Vec<SceneCommand>, state: &GameState) {
        outbox.push(SceneCommand::SpawnBall {
            id: state.ball.id,
            position: state.ball.pos,
            radius: state.ball.radius,
        });
        outbox.push(SceneCommand::SpawnPaddle {
            id: state.paddle.id,
            position: state.paddle.pos,
            size: state.paddle.size,
        });
        outbox.extend(state.bricks.iter().map(|b| SceneCommand::SpawnBrick {
            id: b.id,
            position: b.pos,
            size: Brick::size(),
            color: b.color,
        }));

        if state.total_bricks == 0 {
            log::warn!(
                "Arena is {} wide, narrower than one brick column; round can only end in a loss",
                state.arena.width()
            );
        }
    }

    /// Replace ball, paddle and bricks with a fresh idle round
    fn renew(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        for id in state.renew() {
            self.outbox.push(SceneCommand::Despawn { id });
        }
        Self::spawn_round(&mut self.outbox, state);
        log::debug!("Renewed round with {} bricks", state.total_bricks);
    }

    fn start_round(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if !state.launch() {
            return;
        }
        self.outbox.push(SceneCommand::UpdateLabel {
            id: state.label.id,
            text: state.label.text.clone(),
            font_size: state.label.font_size,
            visible: false,
        });
        self.outbox.push(SceneCommand::LaunchBall {
            id: state.ball.id,
            impulse: self.settings.launch_impulse,
        });
        log::info!("Round started ({} bricks)", state.total_bricks);
    }

    fn game_over(&mut self, outcome: RoundOutcome) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let removed = state.bricks_removed;
        state.finish_round(outcome);
        self.outbox.push(SceneCommand::UpdateLabel {
            id: state.label.id,
            text: state.label.text.clone(),
            font_size: state.label.font_size,
            visible: true,
        });
        self.stats.record(outcome, removed);
        log::info!(
            "Round over: {:?} after removing {} bricks (session: {} won, {} lost)",
            outcome,
            removed,
            self.stats.wins,
            self.stats.losses
        );
        self.renew();
    }

    /// Resolve one contact. Returns the round outcome if it ended the round.
    fn resolve(&mut self, contact: &Contact) -> Option<RoundOutcome> {
        let state = self.state.as_mut()?;
        if state.phase != Phase::Active {
            log::debug!("Ignoring contact {:?} outside an active round", contact);
            return None;
        }

        if let Some(other) = contact.other(state.ball.id) {
            match state.hit_brick(other) {
                Some(BrickHit::Advanced(color)) => {
                    log::debug!(
                        "Brick {:?} now {} ({} hits left)",
                        other,
                        color.as_str(),
                        color.hits_remaining()
                    );
                    self.outbox.push(SceneCommand::SetBrickColor { id: other, color });
                }
                Some(BrickHit::Removed) => {
                    log::debug!(
                        "Brick {:?} removed ({}/{})",
                        other,
                        state.bricks_removed,
                        state.total_bricks
                    );
                    self.outbox.push(SceneCommand::Despawn { id: other });
                    if state.cleared() {
                        return Some(RoundOutcome::Won);
                    }
                }
                None => {}
            }
        }

        if contact.involves(state.lose_zone.id) {
            return Some(RoundOutcome::Lost);
        }
        None
    }
}

impl SceneHandler for GameController {
    fn on_activate(&mut self, arena: Arena) {
        if self.state.is_some() {
            log::warn!("Scene activated twice; keeping the existing state");
            return;
        }

        let state = GameState::new(arena, self.settings.paddle_width_fraction);
        self.outbox.push(SceneCommand::SpawnBoundary {
            id: state.boundary,
            min: arena.min,
            max: arena.max,
        });
        self.outbox.push(SceneCommand::SpawnBackground {
            texture: BACKGROUND_TEXTURE.to_string(),
            tiles: BACKGROUND_TILES,
            scroll_secs: BACKGROUND_SCROLL_SECS,
            z: BACKGROUND_Z,
        });
        self.outbox.push(SceneCommand::SpawnLoseZone {
            id: state.lose_zone.id,
            center: state.lose_zone.rect.center,
            size: state.lose_zone.rect.size,
        });
        self.outbox.push(SceneCommand::SpawnLabel {
            id: state.label.id,
            text: state.label.text.clone(),
            font_size: state.label.font_size,
            position: state.label.pos,
        });
        Self::spawn_round(&mut self.outbox, &state);

        log::info!(
            "Scene active: arena {}x{}, {} bricks",
            arena.width(),
            arena.height(),
            state.total_bricks
        );
        self.state = Some(state);
    }

    fn on_pointer(&mut self, event: PointerEvent) {
        let Some(state) = self.state.as_mut() else {
            log::debug!("Pointer event before activation ignored");
            return;
        };

        let tapped_label =
            event.kind == PointerKind::Down && state.phase == Phase::Idle && state.label.hit(event.pos);
        state.move_paddle(event.pos.x);
        let paddle = state.paddle.id;

        if tapped_label {
            self.start_round();
        }
        self.outbox.push(SceneCommand::MovePaddle {
            id: paddle,
            x: event.pos.x,
        });
    }

    fn on_contact(&mut self, contacts: &[Contact]) {
        let mut seen = HashSet::new();
        for contact in contacts {
            if self.settings.dedupe_batch_contacts && !seen.insert(contact.key()) {
                log::debug!("Skipping repeated contact {:?} in batch", contact);
                continue;
            }
            if let Some(outcome) = self.resolve(contact) {
                self.game_over(outcome);
            }
        }
    }
}
