//! Native host
//!
//! Drives a `GameController` with a Rapier2D world, the way a browser or
//! mobile engine would: commands flow to the world, contacts and pointer
//! events flow back through `SceneHandler`.

pub mod autopilot;
pub mod physics;

pub use autopilot::Autopilot;
pub use physics::PhysicsHost;

use crate::Settings;
use crate::consts::SIM_DT;
use crate::sim::{Arena, GameController, PointerEvent, SceneHandler, SessionStats};

/// A controller wired to a physics host
pub struct Session {
    controller: GameController,
    host: PhysicsHost,
    autopilot: Option<Autopilot>,
    frames: u64,
}

impl Session {
    /// Activate the scene in an arena sized from settings
    pub fn new(settings: Settings) -> Self {
        let arena = Arena::centered(settings.arena_width, settings.arena_height);
        let host = PhysicsHost::new(&settings);
        let mut session = Self {
            controller: GameController::new(settings),
            host,
            autopilot: None,
            frames: 0,
        };
        session.controller.on_activate(arena);
        session.flush();
        session
    }

    /// Let the autopilot play
    pub fn with_autopilot(mut self) -> Self {
        let speed = self.controller.settings().autopilot_speed;
        self.autopilot = Some(Autopilot::new(speed));
        self
    }

    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    pub fn host(&self) -> &PhysicsHost {
        &self.host
    }

    pub fn stats(&self) -> &SessionStats {
        self.controller.stats()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn flush(&mut self) {
        let commands = self.controller.drain_commands();
        self.host.apply(commands);
    }

    /// Deliver a player pointer event
    pub fn pointer(&mut self, event: PointerEvent) {
        self.controller.on_pointer(event);
        self.flush();
    }

    /// One frame: autopilot input, one physics step, contact resolution
    pub fn frame(&mut self) {
        let event = match (self.autopilot.as_mut(), self.controller.state()) {
            (Some(pilot), Some(state)) => {
                let ball = self.host.position(state.ball.id);
                pilot.next_event(state, ball, SIM_DT)
            }
            _ => None,
        };
        if let Some(event) = event {
            self.pointer(event);
        }

        let contacts = self.host.step();
        if !contacts.is_empty() {
            self.controller.on_contact(&contacts);
            self.flush();
        }
        self.frames += 1;
    }

    pub fn run(&mut self, frames: u32) {
        for _ in 0..frames {
            self.frame();
        }
    }
}
