use crate::collision::{BodyProxy, CollisionDetector, Contact, ContactSolver, ImpulseContactSolver};
use crate::core::{NodeHandle, SimulationConfig, Storage};
use crate::forces::{apply_accumulated_forces, apply_field_forces, apply_gravity, FieldContext};
use crate::integration::{Integrator, SymplecticEulerIntegrator};
use crate::scene::Scene;

use tracing::{debug, trace};

/// Advances a scene's bodies one frame at a time.
///
/// The engine is owned by the caller and holds no scene state of its own
/// besides elapsed simulation time; everything persistent lives in the
/// scene's [`PhysicsWorld`](crate::core::PhysicsWorld).
pub struct PhysicsEngine {
    /// Configuration for the simulation
    config: SimulationConfig,

    /// Advances positions from velocities
    integrator: Box<dyn Integrator>,

    /// Finds this step's contacts
    detector: CollisionDetector,

    /// Resolves contacts
    solver: Box<dyn ContactSolver>,

    /// The total elapsed simulation time
    elapsed: f32,
}

impl Default for PhysicsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsEngine {
    /// Creates a new engine with default settings
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::default())
    }

    /// Creates a new engine with the given configuration
    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            integrator: Box::new(SymplecticEulerIntegrator::new(
                config.resting_linear_threshold,
                config.resting_angular_threshold,
            )),
            detector: CollisionDetector::default(),
            solver: Box::new(ImpulseContactSolver::new(
                config.correction_factor,
                config.enable_friction,
            )),
            config,
            elapsed: 0.0,
        }
    }

    /// Returns a reference to the simulation configuration
    pub fn get_config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replaces the configuration, rebuilding the default integrator and solver
    pub fn set_config(&mut self, config: SimulationConfig) {
        let detector = std::mem::take(&mut self.detector);
        let elapsed = self.elapsed;
        *self = Self::with_config(config);
        self.detector = detector;
        self.elapsed = elapsed;
    }

    /// Replaces the integrator
    pub fn set_integrator(&mut self, integrator: Box<dyn Integrator>) {
        self.integrator = integrator;
    }

    /// Replaces the contact solver
    pub fn set_contact_solver(&mut self, solver: Box<dyn ContactSolver>) {
        self.solver = solver;
    }

    /// Returns the collision detector, to swap its broad phase or filter
    pub fn collision_detector_mut(&mut self) -> &mut CollisionDetector {
        &mut self.detector
    }

    /// Returns the simulation time accumulated so far
    pub fn get_elapsed_time(&self) -> f32 {
        self.elapsed
    }

    /// Runs one simulation step. Skipped entirely when `delta_time` or the
    /// world speed is not positive.
    pub fn simulate(&mut self, scene: &mut Scene, delta_time: f32) {
        let speed = scene.physics_world().get_speed();
        if !(delta_time > 0.0) || !(speed > 0.0) {
            trace!(delta_time, speed, "step skipped");
            return;
        }
        let dt = delta_time * speed;
        self.elapsed += dt;

        scene.physics_world_mut().events_mut().clear();

        let bodies = scene.body_nodes();
        let fields = scene.field_nodes();
        let gravity = scene.physics_world().get_gravity();

        apply_accumulated_forces(scene, &bodies, dt);
        apply_gravity(scene, &bodies, gravity, dt);
        apply_field_forces(
            scene,
            &bodies,
            &fields,
            &FieldContext {
                dt,
                elapsed: self.elapsed,
                velocity_match_factor: self.config.velocity_match_factor,
                turbulence_speed_factor: self.config.turbulence_speed_factor,
            },
        );

        self.integrate(scene, &bodies, dt);
        self.solve_joints(scene, dt);

        let contacts = self.detect_collisions(scene, &bodies);
        self.solver.resolve(&contacts, scene);
        scene.physics_world_mut().track_contacts(&contacts);
    }

    /// Clears contact tracking so pairs touching now report a fresh begin
    pub fn reset(&mut self, scene: &mut Scene) {
        debug!("contact tracking reset");
        scene.physics_world_mut().reset_contacts();
    }

    fn integrate(&mut self, scene: &mut Scene, bodies: &[NodeHandle], dt: f32) {
        for &handle in bodies {
            let Ok(mut transform) = scene.world_transform(handle) else {
                continue;
            };
            let Ok(body) = scene.body_mut(handle) else {
                continue;
            };
            if !body.is_simulated() {
                continue;
            }
            self.integrator.integrate(body, &mut transform, dt);
            let _ = scene.set_world_transform(handle, transform);
        }
    }

    fn solve_joints(&mut self, scene: &mut Scene, dt: f32) {
        let mut joints = scene.physics_world_mut().take_joints();
        for (_, joint) in joints.iter_mut() {
            joint.reset_reaction();
        }
        for (_, joint) in joints.iter_mut() {
            joint.solve(scene, dt, self.config.correction_factor);
        }
        scene.physics_world_mut().restore_joints(joints);
    }

    fn detect_collisions(&mut self, scene: &Scene, bodies: &[NodeHandle]) -> Vec<Contact> {
        let proxies: Vec<BodyProxy<'_>> = bodies
            .iter()
            .filter_map(|&handle| {
                let body = scene.body(handle).ok()?;
                let transform = scene.world_transform(handle).ok()?;
                Some(BodyProxy::new(handle, body, &transform))
            })
            .collect();

        let contacts = self.detector.detect(&proxies);
        trace!(bodies = proxies.len(), contacts = contacts.len(), "collisions detected");
        contacts
    }
}
