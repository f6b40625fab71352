//! Rapier2D-backed scene host
//!
//! Plays the part of the host engine for native builds: it turns
//! `SceneCommand`s into rigid bodies, steps the world and reports the
//! contacts that started during each step.

use std::collections::HashMap;
use std::sync::Mutex;

use glam::Vec2;
use rapier2d::prelude::*;

use crate::Settings;
use crate::consts::SIM_DT;
use crate::sim::{Contact, EntityId, SceneCommand};

fn to_vector(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

fn to_vec2(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Collects collision starts from inside the pipeline step
struct ContactCollector {
    started: Mutex<Vec<(ColliderHandle, ColliderHandle)>>,
}

impl ContactCollector {
    fn new() -> Self {
        Self {
            started: Mutex::new(Vec::new()),
        }
    }

    fn drain(&self) -> Vec<(ColliderHandle, ColliderHandle)> {
        self.started
            .lock()
            .map(|mut started| std::mem::take(&mut *started))
            .unwrap_or_default()
    }
}

impl EventHandler for ContactCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        if let CollisionEvent::Started(h1, h2, _) = event {
            if let Ok(mut started) = self.started.lock() {
                started.push((h1, h2));
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

/// Headless physics world standing in for the host engine
pub struct PhysicsHost {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    collector: ContactCollector,
    entities: HashMap<EntityId, RigidBodyHandle>,
    impulse_to_velocity: f32,
    elapsed: f32,
}

impl PhysicsHost {
    pub fn new(settings: &Settings) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = SIM_DT;

        Self {
            gravity: vector![0.0, 0.0],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            collector: ContactCollector::new(),
            entities: HashMap::new(),
            impulse_to_velocity: settings.impulse_to_velocity,
            elapsed: 0.0,
        }
    }

    /// Seconds simulated so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Number of live bodies (boundary, lose zone, ball, paddle, bricks)
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn position(&self, id: EntityId) -> Option<Vec2> {
        let handle = self.entities.get(&id)?;
        self.bodies.get(*handle).map(|rb| to_vec2(rb.translation()))
    }

    pub fn velocity(&self, id: EntityId) -> Option<Vec2> {
        let handle = self.entities.get(&id)?;
        self.bodies.get(*handle).map(|rb| to_vec2(rb.linvel()))
    }

    pub fn is_dynamic(&self, id: EntityId) -> bool {
        self.entities
            .get(&id)
            .and_then(|h| self.bodies.get(*h))
            .is_some_and(|rb| rb.is_dynamic())
    }

    fn insert(&mut self, id: EntityId, body: RigidBodyBuilder, collider: ColliderBuilder) {
        self.remove(id);
        let handle = self.bodies.insert(body.user_data(id.0 as u128).build());
        let collider = collider.active_events(ActiveEvents::COLLISION_EVENTS).build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        self.entities.insert(id, handle);
    }

    fn remove(&mut self, id: EntityId) {
        if let Some(handle) = self.entities.remove(&id) {
            self.bodies.remove(
                handle,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            );
        }
    }

    fn body_mut(&mut self, id: EntityId) -> Option<&mut RigidBody> {
        let handle = self.entities.get(&id)?;
        self.bodies.get_mut(*handle)
    }

    /// Apply scene commands in order
    pub fn apply(&mut self, commands: impl IntoIterator<Item = SceneCommand>) {
        for command in commands {
            self.apply_one(command);
        }
    }

    fn apply_one(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::SpawnBoundary { id, min, max } => {
                let loop_points = vec![
                    point![min.x, min.y],
                    point![max.x, min.y],
                    point![max.x, max.y],
                    point![min.x, max.y],
                    point![min.x, min.y],
                ];
                self.insert(
                    id,
                    RigidBodyBuilder::fixed(),
                    ColliderBuilder::polyline(loop_points, None)
                        .friction(0.0)
                        .restitution(1.0),
                );
            }
            SceneCommand::SpawnLoseZone { id, center, size } => {
                self.insert(
                    id,
                    RigidBodyBuilder::fixed().translation(to_vector(center)),
                    ColliderBuilder::cuboid(size.x / 2.0, size.y / 2.0).sensor(true),
                );
            }
            SceneCommand::SpawnBall {
                id,
                position,
                radius,
            } => {
                // Kinematic until launched: ignores forces and impulses
                self.insert(
                    id,
                    RigidBodyBuilder::kinematic_position_based()
                        .translation(to_vector(position))
                        .gravity_scale(0.0)
                        .linear_damping(0.0)
                        .angular_damping(0.0)
                        .lock_rotations()
                        .ccd_enabled(true),
                    ColliderBuilder::ball(radius)
                        .friction(0.0)
                        .friction_combine_rule(CoefficientCombineRule::Min)
                        .restitution(1.0)
                        .restitution_combine_rule(CoefficientCombineRule::Max),
                );
            }
            SceneCommand::SpawnPaddle { id, position, size } => {
                self.insert(
                    id,
                    RigidBodyBuilder::kinematic_position_based().translation(to_vector(position)),
                    ColliderBuilder::cuboid(size.x / 2.0, size.y / 2.0),
                );
            }
            SceneCommand::SpawnBrick {
                id, position, size, ..
            } => {
                self.insert(
                    id,
                    RigidBodyBuilder::fixed().translation(to_vector(position)),
                    ColliderBuilder::cuboid(size.x / 2.0, size.y / 2.0),
                );
            }
            SceneCommand::MovePaddle { id, x } => {
                if let Some(rb) = self.body_mut(id) {
                    let y = rb.translation().y;
                    rb.set_next_kinematic_translation(vector![x, y]);
                }
            }
            SceneCommand::LaunchBall { id, impulse } => {
                let velocity = to_vector(impulse * self.impulse_to_velocity);
                match self.body_mut(id) {
                    Some(rb) => {
                        rb.set_body_type(RigidBodyType::Dynamic, true);
                        rb.set_linvel(velocity, true);
                    }
                    None => log::warn!("Launch for unknown ball {:?}", id),
                }
            }
            SceneCommand::Despawn { id } => self.remove(id),
            SceneCommand::SetBrickColor { id, color } => {
                log::trace!("Brick {:?} -> {}", id, color.as_str());
            }
            SceneCommand::SpawnBackground { .. }
            | SceneCommand::SpawnLabel { .. }
            | SceneCommand::UpdateLabel { .. } => {
                // Nothing to draw headless
            }
        }
    }

    fn collider_entity(&self, handle: ColliderHandle) -> Option<EntityId> {
        let body = self.colliders.get(handle)?.parent()?;
        self.bodies.get(body).map(|rb| EntityId(rb.user_data as u32))
    }

    /// Advance one fixed step and return the contacts it started
    pub fn step(&mut self) -> Vec<Contact> {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.collector,
        );
        self.elapsed += self.integration_parameters.dt;

        self.collector
            .drain()
            .into_iter()
            .filter_map(|(h1, h2)| {
                Some(Contact::new(
                    self.collider_entity(h1)?,
                    self.collider_entity(h2)?,
                ))
            })
            .collect()
    }
}
