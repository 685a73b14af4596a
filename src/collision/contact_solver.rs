use crate::collision::{penetration_depth, Contact};
use crate::core::NodeHandle;
use crate::math::{Vector2, EPSILON};
use crate::scene::Scene;
use crate::shapes::ShapeGeometry;

/// Trait for contact resolution strategies
pub trait ContactSolver {
    /// Resolves the given contacts by writing velocities and positions back
    /// into the scene
    fn resolve(&mut self, contacts: &[Contact], scene: &mut Scene);
}

/// Single-pass impulse solver with Baumgarte positional correction
#[derive(Debug, Clone)]
pub struct ImpulseContactSolver {
    /// Fraction of the penetration removed per step
    correction_factor: f32,

    /// Whether a tangential friction impulse is applied
    friction: bool,
}

impl Default for ImpulseContactSolver {
    fn default() -> Self {
        Self::new(0.8, true)
    }
}

impl ImpulseContactSolver {
    /// Creates a new impulse solver
    pub fn new(correction_factor: f32, friction: bool) -> Self {
        Self {
            correction_factor,
            friction,
        }
    }

    /// Resolves a single contact
    pub fn resolve_contact(&self, contact: &Contact, scene: &mut Scene) {
        if !contact.is_resolvable() {
            return;
        }

        // Gather immutable data first
        let (Some(a), Some(b)) = (scene.body_state(contact.body_a), scene.body_state(contact.body_b)) else {
            return;
        };

        let inverse_mass_sum = a.inverse_mass + b.inverse_mass;
        if inverse_mass_sum <= 0.0 {
            return;
        }

        let normal = contact.normal;
        let relative_velocity = a.velocity - b.velocity;
        let normal_speed = relative_velocity.dot(&normal);

        // Already separating
        if normal_speed > 0.0 {
            return;
        }

        let restitution = a.restitution.min(b.restitution);
        let impulse = -(1.0 + restitution) * normal_speed / inverse_mass_sum;

        let mut velocity_a = a.velocity + normal * (impulse * a.inverse_mass);
        let mut velocity_b = b.velocity - normal * (impulse * b.inverse_mass);

        if self.friction {
            let tangent_velocity = relative_velocity - normal * normal_speed;
            if let Some(tangent) = tangent_velocity.try_normalize() {
                let coefficient = (a.friction * b.friction).max(0.0).sqrt();
                let limit = coefficient * impulse.abs();
                let friction_impulse =
                    (-relative_velocity.dot(&tangent) / inverse_mass_sum).clamp(-limit, limit);
                velocity_a += tangent * (friction_impulse * a.inverse_mass);
                velocity_b -= tangent * (friction_impulse * b.inverse_mass);
            }
        }

        scene.set_body_velocity(a.handle, velocity_a, a.angular_velocity);
        scene.set_body_velocity(b.handle, velocity_b, b.angular_velocity);

        // Positional correction from the current overlap
        let (Some(geometry_a), Some(geometry_b)) =
            (current_geometry(scene, a.handle), current_geometry(scene, b.handle))
        else {
            return;
        };
        let depth = penetration_depth(&geometry_a, &geometry_b);
        if depth > EPSILON {
            let correction: Vector2 = normal * (depth * self.correction_factor / inverse_mass_sum);
            scene.nudge_body(a.handle, correction * a.inverse_mass, 0.0);
            scene.nudge_body(b.handle, -correction * b.inverse_mass, 0.0);
        }
    }
}

impl ContactSolver for ImpulseContactSolver {
    fn resolve(&mut self, contacts: &[Contact], scene: &mut Scene) {
        for contact in contacts {
            self.resolve_contact(contact, scene);
        }
    }
}

fn current_geometry(scene: &Scene, handle: NodeHandle) -> Option<ShapeGeometry> {
    let body = scene.body(handle).ok()?;
    let transform = scene.world_transform(handle).ok()?;
    Some(body.get_shape().geometry(&transform))
}
