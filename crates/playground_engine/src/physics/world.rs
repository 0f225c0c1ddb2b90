//! Physics world
//!
//! Owns the rapier pipeline and every set it steps. The floor is a fixed
//! half-space through the origin with a +Y normal; everything else is a
//! dynamic body added through [`PhysicsWorld::add_body`].

use crate::core::PhysicsConfig;
use crate::foundation::math::{vec3_from_array, Transform, Vec3};
use crate::physics::contact::{Impact, ImpactCollector};
use crate::physics::{BodyDesc, BodyHandle, ContactMaterial, PhysicsError};
use rapier3d::prelude::*;

/// Slack when comparing accumulated time against the fixed step
const STEP_EPSILON: f64 = 1e-9;

/// Outcome of one [`PhysicsWorld::step`] call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Fixed steps simulated during the call
    pub sub_steps: u32,
    /// Contacts that started during those steps
    pub impacts: Vec<Impact>,
}

/// Rigid-body world with a static floor
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    impact_collector: ImpactCollector,
    material: ContactMaterial,
    floor: BodyHandle,
    accumulator: f64,
    time: f64,
    total_steps: u64,
}

impl PhysicsWorld {
    /// Create a world with gravity, the default contact material and the floor
    pub fn new(config: &PhysicsConfig) -> Self {
        let material = ContactMaterial::new(config.friction, config.restitution);

        let mut rigid_body_set = RigidBodySet::new();
        let mut collider_set = ColliderSet::new();

        let floor_handle = rigid_body_set.insert(RigidBodyBuilder::fixed().build());
        let floor_collider = material.apply(ColliderBuilder::halfspace(Vector::y_axis())).build();
        collider_set.insert_with_parent(floor_collider, floor_handle, &mut rigid_body_set);

        let gravity = vec3_from_array(config.gravity);
        log::info!(
            "Physics world created: gravity=({:.2}, {:.2}, {:.2}), friction={}, restitution={}",
            gravity.x,
            gravity.y,
            gravity.z,
            material.friction,
            material.restitution
        );

        Self {
            gravity,
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set,
            collider_set,
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            impact_collector: ImpactCollector::default(),
            material,
            floor: BodyHandle(floor_handle),
            accumulator: 0.0,
            time: 0.0,
            total_steps: 0,
        }
    }

    /// Insert a dynamic body with the world's contact material
    pub fn add_body(&mut self, desc: &BodyDesc) -> Result<BodyHandle, PhysicsError> {
        desc.validate()?;

        let body = RigidBodyBuilder::dynamic()
            .translation(desc.position)
            .rotation(desc.rotation.scaled_axis())
            .build();
        let handle = self.rigid_body_set.insert(body);

        let collider = self
            .material
            .apply(desc.shape.collider_builder())
            .mass(desc.mass)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);

        log::debug!("Added body {:?} ({:?}) at {:?}", handle, desc.shape, desc.position);
        Ok(BodyHandle(handle))
    }

    /// Advance the simulation by whole fixed steps.
    ///
    /// `time_since_last` is added to an accumulator; fixed steps of `fixed_dt`
    /// are taken while it holds at least one step, up to `max_sub_steps`.
    /// Whatever is left beyond a partial step is dropped so a slow frame
    /// cannot snowball into more work on the next one.
    ///
    /// A `time_since_last` of exactly zero means the caller has no frame time
    /// yet; one fixed step is taken and `fixed_dt` is added to [`Self::time`].
    pub fn step(&mut self, fixed_dt: f64, time_since_last: f64, max_sub_steps: u32) -> StepReport {
        if !time_since_last.is_finite() || time_since_last < 0.0 {
            log::warn!("Ignoring invalid frame delta {}", time_since_last);
            return StepReport::default();
        }
        if !(fixed_dt.is_finite() && fixed_dt > 0.0) {
            log::warn!("Ignoring invalid fixed timestep {}", fixed_dt);
            return StepReport::default();
        }

        if time_since_last == 0.0 {
            self.internal_step(fixed_dt);
            self.time += fixed_dt;
            return StepReport {
                sub_steps: 1,
                impacts: self.impact_collector.drain(),
            };
        }

        self.accumulator += time_since_last;
        let mut sub_steps = 0;
        while self.accumulator + STEP_EPSILON >= fixed_dt && sub_steps < max_sub_steps {
            self.internal_step(fixed_dt);
            self.accumulator -= fixed_dt;
            sub_steps += 1;
        }
        self.accumulator = self.accumulator.max(0.0) % fixed_dt;
        // A remainder within rounding of a whole step is itself a whole step
        // that was dropped, not a partial one
        if self.accumulator + STEP_EPSILON >= fixed_dt {
            self.accumulator = 0.0;
        }
        self.time += time_since_last;

        if sub_steps == max_sub_steps && sub_steps > 0 {
            log::trace!("Sub-step limit reached, dropped leftover time");
        }

        StepReport {
            sub_steps,
            impacts: self.impact_collector.drain(),
        }
    }

    fn internal_step(&mut self, dt: f64) {
        self.integration_parameters.dt = dt as Real;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &self.impact_collector,
        );
        self.total_steps += 1;
    }

    /// Current position and orientation of a body
    pub fn body_transform(&self, handle: BodyHandle) -> Option<Transform> {
        self.rigid_body_set
            .get(handle.0)
            .map(|body| Transform::from_position_rotation(*body.translation(), *body.rotation()))
    }

    /// Linear velocity of a body
    pub fn body_velocity(&self, handle: BodyHandle) -> Option<Vec3> {
        self.rigid_body_set.get(handle.0).map(|body| *body.linvel())
    }

    /// Whether the handle refers to a body in this world
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.rigid_body_set.contains(handle.0)
    }

    /// The static floor body
    pub fn floor_handle(&self) -> BodyHandle {
        self.floor
    }

    /// Number of bodies, floor included
    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    /// Simulated wall-clock time fed through [`PhysicsWorld::step`]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Fixed steps taken since creation
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Gravity vector
    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// Contact material applied to every collider
    pub fn material(&self) -> ContactMaterial {
        self.material
    }
}
