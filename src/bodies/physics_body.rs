use crate::bodies::{BodyFlags, Material};
use crate::core::NodeHandle;
use crate::math::{Vector2, EPSILON};
use crate::shapes::BodyShape;

use tracing::warn;

/// A simulated body. Its position and rotation live on the scene node it is
/// attached to; the body only keeps a non-owning handle back to that node.
#[derive(Debug, Clone)]
pub struct PhysicsBody {
    /// The body's collision outline
    shape: BodyShape,

    /// The body's mass
    mass: f32,

    /// Mass per unit of area
    density: f32,

    /// Area enclosed by the shape (cached)
    area: f32,

    /// Coefficient of friction
    friction: f32,

    /// Coefficient of restitution, 0-1
    restitution: f32,

    /// Fraction of linear velocity removed per second
    linear_damping: f32,

    /// Fraction of angular velocity removed per second
    angular_damping: f32,

    /// The body's linear velocity
    velocity: Vector2,

    /// The body's angular velocity (radians per second)
    angular_velocity: f32,

    /// Force accumulated since the last step
    force: Vector2,

    /// Torque accumulated since the last step
    torque: f32,

    /// The body's flags
    flags: BodyFlags,

    /// Categories this body belongs to
    category_bit_mask: u32,

    /// Categories this body physically collides with
    collision_bit_mask: u32,

    /// Categories this body reports contacts with
    contact_test_bit_mask: u32,

    /// Field categories that act on this body
    field_bit_mask: u32,

    /// Electric charge, used by electric and magnetic fields
    charge: f32,

    /// The node this body is attached to, if any
    node: Option<NodeHandle>,
}

impl PhysicsBody {
    /// Creates a new body with the given shape and the default material.
    /// Edge shapes start out static, everything else dynamic.
    pub fn new(shape: BodyShape) -> Self {
        let material = Material::default();
        let area = shape.area();

        let mut flags = BodyFlags::AFFECTED_BY_GRAVITY | BodyFlags::ALLOWS_ROTATION;
        if !matches!(shape, BodyShape::Edge { .. } | BodyShape::EdgeLoop { .. }) {
            flags.insert(BodyFlags::DYNAMIC);
        }

        Self {
            shape,
            mass: material.density * area,
            density: material.density,
            area,
            friction: material.friction,
            restitution: material.restitution,
            linear_damping: 0.1,
            angular_damping: 0.1,
            velocity: Vector2::ZERO,
            angular_velocity: 0.0,
            force: Vector2::ZERO,
            torque: 0.0,
            flags,
            category_bit_mask: u32::MAX,
            collision_bit_mask: u32::MAX,
            contact_test_bit_mask: 0,
            field_bit_mask: u32::MAX,
            charge: 0.0,
            node: None,
        }
    }

    /// Creates a circular body centered on its node
    pub fn circle(radius: f32) -> Self {
        Self::new(BodyShape::Circle { radius })
    }

    /// Creates a circular body offset from its node
    pub fn circle_with_center(radius: f32, center: Vector2) -> Self {
        Self::new(BodyShape::CircleWithCenter { radius, center })
    }

    /// Creates a rectangular body centered on its node
    pub fn rectangle(size: Vector2) -> Self {
        Self::new(BodyShape::Rectangle { size })
    }

    /// Creates a rectangular body offset from its node
    pub fn rectangle_with_center(size: Vector2, center: Vector2) -> Self {
        Self::new(BodyShape::RectangleWithCenter { size, center })
    }

    /// Creates a static single-segment edge body
    pub fn edge(from: Vector2, to: Vector2) -> Self {
        Self::new(BodyShape::Edge { from, to })
    }

    /// Creates a static closed edge chain
    pub fn edge_loop(points: Vec<Vector2>) -> Self {
        Self::new(BodyShape::EdgeLoop { points })
    }

    /// Creates a body with an outline the narrow phase cannot test exactly
    pub fn complex(area: f32) -> Self {
        Self::new(BodyShape::Complex { area })
    }

    /// Returns the body's shape
    pub fn get_shape(&self) -> &BodyShape {
        &self.shape
    }

    /// Returns the area enclosed by the body's shape
    pub fn get_area(&self) -> f32 {
        self.area
    }

    /// Returns the body's mass
    pub fn get_mass(&self) -> f32 {
        self.mass
    }

    /// Sets the body's mass and recomputes its density
    pub fn set_mass(&mut self, mass: f32) {
        if !(mass > 0.0) {
            warn!(mass, "ignoring non-positive body mass");
            return;
        }
        self.mass = mass;
        if self.area > EPSILON {
            self.density = mass / self.area;
        }
    }

    /// Returns the body's density
    pub fn get_density(&self) -> f32 {
        self.density
    }

    /// Sets the body's density and recomputes its mass
    pub fn set_density(&mut self, density: f32) {
        if !(density > 0.0) {
            warn!(density, "ignoring non-positive body density");
            return;
        }
        self.density = density;
        self.mass = density * self.area;
    }

    /// Applies density, friction and restitution from a material
    pub fn set_material(&mut self, material: Material) {
        self.set_density(material.density);
        self.set_friction(material.friction);
        self.set_restitution(material.restitution);
    }

    /// Returns the body's friction coefficient
    pub fn get_friction(&self) -> f32 {
        self.friction
    }

    /// Sets the body's friction coefficient
    pub fn set_friction(&mut self, friction: f32) {
        self.friction = friction.max(0.0);
    }

    /// Returns the body's restitution
    pub fn get_restitution(&self) -> f32 {
        self.restitution
    }

    /// Sets the body's restitution, clamped to [0, 1]
    pub fn set_restitution(&mut self, restitution: f32) {
        self.restitution = restitution.clamp(0.0, 1.0);
    }

    /// Returns the body's linear damping
    pub fn get_linear_damping(&self) -> f32 {
        self.linear_damping
    }

    /// Sets the body's linear damping
    pub fn set_linear_damping(&mut self, damping: f32) {
        self.linear_damping = damping.max(0.0);
    }

    /// Returns the body's angular damping
    pub fn get_angular_damping(&self) -> f32 {
        self.angular_damping
    }

    /// Sets the body's angular damping
    pub fn set_angular_damping(&mut self, damping: f32) {
        self.angular_damping = damping.max(0.0);
    }

    /// Returns the body's linear velocity
    pub fn get_velocity(&self) -> Vector2 {
        self.velocity
    }

    /// Sets the body's linear velocity
    pub fn set_velocity(&mut self, velocity: Vector2) {
        self.velocity = velocity;
    }

    /// Returns the body's angular velocity
    pub fn get_angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    /// Sets the body's angular velocity
    pub fn set_angular_velocity(&mut self, angular_velocity: f32) {
        self.angular_velocity = angular_velocity;
    }

    /// Returns the force accumulated since the last step
    pub fn get_force(&self) -> Vector2 {
        self.force
    }

    /// Returns the torque accumulated since the last step
    pub fn get_torque(&self) -> f32 {
        self.torque
    }

    /// Returns the body's flags
    pub fn get_flags(&self) -> BodyFlags {
        self.flags
    }

    /// Returns whether the simulation moves this body
    pub fn is_dynamic(&self) -> bool {
        self.flags.contains(BodyFlags::DYNAMIC)
    }

    /// Sets whether the simulation moves this body
    pub fn set_dynamic(&mut self, dynamic: bool) {
        self.flags.set(BodyFlags::DYNAMIC, dynamic);
    }

    /// Returns whether the body is affected by gravity
    pub fn is_affected_by_gravity(&self) -> bool {
        self.flags.contains(BodyFlags::AFFECTED_BY_GRAVITY)
    }

    /// Sets whether the body is affected by gravity
    pub fn set_affected_by_gravity(&mut self, affected: bool) {
        self.flags.set(BodyFlags::AFFECTED_BY_GRAVITY, affected);
    }

    /// Returns whether the body may rotate
    pub fn allows_rotation(&self) -> bool {
        self.flags.contains(BodyFlags::ALLOWS_ROTATION)
    }

    /// Sets whether the body may rotate
    pub fn set_allows_rotation(&mut self, allows: bool) {
        self.flags.set(BodyFlags::ALLOWS_ROTATION, allows);
    }

    /// Returns whether the body is pinned in place
    pub fn is_pinned(&self) -> bool {
        self.flags.contains(BodyFlags::PINNED)
    }

    /// Sets whether the body is pinned in place
    pub fn set_pinned(&mut self, pinned: bool) {
        self.flags.set(BodyFlags::PINNED, pinned);
    }

    /// Returns whether the body came to rest during the last step
    pub fn is_resting(&self) -> bool {
        self.flags.contains(BodyFlags::RESTING)
    }

    pub(crate) fn set_resting(&mut self, resting: bool) {
        self.flags.set(BodyFlags::RESTING, resting);
    }

    /// Returns whether the simulation integrates this body (dynamic and not pinned)
    pub fn is_simulated(&self) -> bool {
        self.is_dynamic() && !self.is_pinned()
    }

    /// Returns the categories this body belongs to
    pub fn get_category_bit_mask(&self) -> u32 {
        self.category_bit_mask
    }

    /// Sets the categories this body belongs to
    pub fn set_category_bit_mask(&mut self, mask: u32) {
        self.category_bit_mask = mask;
    }

    /// Returns the categories this body collides with
    pub fn get_collision_bit_mask(&self) -> u32 {
        self.collision_bit_mask
    }

    /// Sets the categories this body collides with
    pub fn set_collision_bit_mask(&mut self, mask: u32) {
        self.collision_bit_mask = mask;
    }

    /// Returns the categories this body reports contacts with
    pub fn get_contact_test_bit_mask(&self) -> u32 {
        self.contact_test_bit_mask
    }

    /// Sets the categories this body reports contacts with
    pub fn set_contact_test_bit_mask(&mut self, mask: u32) {
        self.contact_test_bit_mask = mask;
    }

    /// Returns the field categories that act on this body
    pub fn get_field_bit_mask(&self) -> u32 {
        self.field_bit_mask
    }

    /// Sets the field categories that act on this body
    pub fn set_field_bit_mask(&mut self, mask: u32) {
        self.field_bit_mask = mask;
    }

    /// Returns the body's electric charge
    pub fn get_charge(&self) -> f32 {
        self.charge
    }

    /// Sets the body's electric charge
    pub fn set_charge(&mut self, charge: f32) {
        self.charge = charge;
    }

    /// Returns the node this body is attached to
    pub fn get_node(&self) -> Option<NodeHandle> {
        self.node
    }

    pub(crate) fn set_node(&mut self, node: Option<NodeHandle>) {
        self.node = node;
    }

    /// Returns the inverse mass; zero for static, pinned or massless bodies
    pub fn get_inverse_mass(&self) -> f32 {
        if self.is_simulated() && self.mass > EPSILON {
            1.0 / self.mass
        } else {
            0.0
        }
    }

    /// Returns the moment of inertia about the node origin
    pub fn get_moment_of_inertia(&self) -> f32 {
        self.shape.moment_of_inertia(self.mass)
    }

    /// Returns the inverse moment of inertia; zero when the body cannot turn
    pub fn get_inverse_inertia(&self) -> f32 {
        if !self.allows_rotation() || self.get_inverse_mass() == 0.0 {
            return 0.0;
        }
        let inertia = self.get_moment_of_inertia();
        if inertia > EPSILON {
            1.0 / inertia
        } else {
            0.0
        }
    }

    /// Accumulates a force, applied at the center, for the next step
    pub fn apply_force(&mut self, force: Vector2) {
        if self.is_dynamic() {
            self.force += force;
        }
    }

    /// Accumulates a torque for the next step
    pub fn apply_torque(&mut self, torque: f32) {
        if self.is_dynamic() {
            self.torque += torque;
        }
    }

    /// Applies an impulse immediately (instantaneous change in velocity)
    pub fn apply_impulse(&mut self, impulse: Vector2) {
        self.velocity += impulse * self.get_inverse_mass();
    }

    /// Applies an angular impulse immediately
    pub fn apply_angular_impulse(&mut self, impulse: f32) {
        self.angular_velocity += impulse * self.get_inverse_inertia();
    }

    /// Takes the accumulated force and torque, leaving both zeroed
    pub(crate) fn take_accumulated(&mut self) -> (Vector2, f32) {
        let accumulated = (self.force, self.torque);
        self.force = Vector2::ZERO;
        self.torque = 0.0;
        accumulated
    }
}
