//! Demo autopilot
//!
//! Plays the game through the same pointer events a player would send:
//! taps the label after a short pause, then chases the ball with the paddle.

use glam::Vec2;

use crate::sim::{GameState, Phase, PointerEvent};

/// Frames spent idle before tapping the label
pub const SERVE_DELAY_FRAMES: u32 = 60;

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Maximum paddle speed (scene units per second)
    pub speed: f32,
    idle_frames: u32,
}

impl Autopilot {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            idle_frames: 0,
        }
    }

    /// Pointer event for this frame, if the autopilot wants to act
    pub fn next_event(
        &mut self,
        state: &GameState,
        ball_pos: Option<Vec2>,
        dt: f32,
    ) -> Option<PointerEvent> {
        match state.phase {
            Phase::Idle => {
                self.idle_frames += 1;
                if self.idle_frames < SERVE_DELAY_FRAMES {
                    return None;
                }
                self.idle_frames = 0;
                Some(PointerEvent::down(state.label.pos))
            }
            Phase::Active => {
                let target = ball_pos?.x;
                let paddle = state.paddle.pos;
                let max_step = self.speed * dt;
                let step = (target - paddle.x).clamp(-max_step, max_step);
                if step.abs() <= f32::EPSILON {
                    return None;
                }
                Some(PointerEvent::moved(Vec2::new(paddle.x + step, paddle.y)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Arena, PointerKind};

    #[test]
    fn test_taps_label_after_delay() {
        let state = GameState::new(Arena::centered(330.0, 600.0), 0.25);
        let mut pilot = Autopilot::new(600.0);
        for _ in 0..SERVE_DELAY_FRAMES - 1 {
            assert!(pilot.next_event(&state, None, 1.0 / 60.0).is_none());
        }
        let event = pilot.next_event(&state, None, 1.0 / 60.0).unwrap();
        assert_eq!(event.kind, PointerKind::Down);
        assert!(state.label.hit(event.pos));
    }

    #[test]
    fn test_chases_ball_with_bounded_speed() {
        let mut state = GameState::new(Arena::centered(330.0, 600.0), 0.25);
        state.launch();
        let mut pilot = Autopilot::new(60.0);

        let event = pilot
            .next_event(&state, Some(Vec2::new(100.0, 0.0)), 0.5)
            .unwrap();
        assert_eq!(event.kind, PointerKind::Moved);
        assert_eq!(event.pos, Vec2::new(30.0, state.paddle.pos.y));

        let event = pilot
            .next_event(&state, Some(Vec2::new(-10.0, 0.0)), 0.5)
            .unwrap();
        assert_eq!(event.pos.x, -10.0);
    }

    #[test]
    fn test_stays_put_when_aligned() {
        let mut state = GameState::new(Arena::centered(330.0, 600.0), 0.25);
        state.launch();
        let mut pilot = Autopilot::new(60.0);
        assert!(pilot.next_event(&state, Some(Vec2::new(0.0, 50.0)), 0.5).is_none());
    }
}
