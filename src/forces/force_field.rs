use std::fmt;
use std::sync::Arc;

use crate::forces::noise::{frequency_for_smoothness, noise_vector};
use crate::forces::FieldEvaluator;
use crate::math::{Transform, Vector2, EPSILON};

/// Defines the type of force field
#[derive(Clone)]
pub enum ForceFieldType {
    /// Pulls bodies toward the field, proportional to mass
    RadialGravity,

    /// Constant directional pull, proportional to mass
    LinearGravity { direction: Vector2 },

    /// Opposes velocity, proportional to speed and mass
    Drag,

    /// Pushes bodies tangentially around the field, proportional to mass
    Vortex,

    /// Pushes charged bodies along the displacement from the field
    Electric,

    /// Lorentz force from a magnetic field along the z axis
    Magnetic,

    /// Hooke's-law pull toward the field
    Spring,

    /// Pulls velocities toward a target velocity
    VelocityMatch { target: Vector2 },

    /// Velocities sampled from a texture. Not supported; applies no force.
    VelocityTexture,

    /// Smooth pseudo-random force
    Noise { smoothness: f32, animation_speed: f32 },

    /// Two-octave noise that grows with the body's speed
    Turbulence { smoothness: f32, animation_speed: f32 },

    /// Force computed by user code
    Custom(Arc<dyn FieldEvaluator>),
}

impl fmt::Debug for ForceFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForceFieldType::RadialGravity => write!(f, "RadialGravity"),
            ForceFieldType::LinearGravity { direction } => {
                f.debug_struct("LinearGravity").field("direction", direction).finish()
            }
            ForceFieldType::Drag => write!(f, "Drag"),
            ForceFieldType::Vortex => write!(f, "Vortex"),
            ForceFieldType::Electric => write!(f, "Electric"),
            ForceFieldType::Magnetic => write!(f, "Magnetic"),
            ForceFieldType::Spring => write!(f, "Spring"),
            ForceFieldType::VelocityMatch { target } => {
                f.debug_struct("VelocityMatch").field("target", target).finish()
            }
            ForceFieldType::VelocityTexture => write!(f, "VelocityTexture"),
            ForceFieldType::Noise { smoothness, animation_speed } => f
                .debug_struct("Noise")
                .field("smoothness", smoothness)
                .field("animation_speed", animation_speed)
                .finish(),
            ForceFieldType::Turbulence { smoothness, animation_speed } => f
                .debug_struct("Turbulence")
                .field("smoothness", smoothness)
                .field("animation_speed", animation_speed)
                .finish(),
            ForceFieldType::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// The area a field acts in, in the field node's local space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FieldRegion {
    /// No limit
    #[default]
    Everywhere,

    /// A disc around the field node
    Circle { radius: f32 },

    /// A rectangle centered on the field node
    Rectangle { size: Vector2 },
}

impl FieldRegion {
    /// Returns whether a point in the field's local space is inside the region
    pub fn contains(&self, local_point: Vector2) -> bool {
        match self {
            FieldRegion::Everywhere => true,
            FieldRegion::Circle { radius } => local_point.length_squared() <= radius * radius,
            FieldRegion::Rectangle { size } => {
                local_point.x.abs() <= size.x * 0.5 && local_point.y.abs() <= size.y * 0.5
            }
        }
    }
}

/// What a field needs to know about one body to compute its force
#[derive(Debug, Clone, Copy)]
pub struct FieldSample {
    /// The body's position in scene space
    pub position: Vector2,

    /// The body's velocity
    pub velocity: Vector2,

    /// The body's mass
    pub mass: f32,

    /// The body's electric charge
    pub charge: f32,
}

/// Step-wide inputs shared by every field evaluation
#[derive(Debug, Clone, Copy)]
pub struct FieldContext {
    /// The step length
    pub dt: f32,

    /// Simulation time elapsed so far, drives noise animation
    pub elapsed: f32,

    /// Gain of velocity-match fields
    pub velocity_match_factor: f32,

    /// Per-unit-speed amplification of turbulence
    pub turbulence_speed_factor: f32,
}

/// A force source attached to a scene node
#[derive(Debug, Clone)]
pub struct ForceField {
    /// The type of force field
    field_type: ForceFieldType,

    /// Whether the field is active
    enabled: bool,

    /// Whether this field overrides overlapping non-exclusive fields
    exclusive: bool,

    /// Categories this field belongs to; matched against body field masks
    category_bit_mask: u32,

    /// The strength of the force field
    strength: f32,

    /// The falloff exponent (0 = none, 1 = linear, 2 = inverse square)
    falloff: f32,

    /// Distances below this are clamped to it
    minimum_radius: f32,

    /// Where the field acts
    region: FieldRegion,
}

impl ForceField {
    /// Creates an enabled, non-exclusive field of unit strength acting everywhere
    pub fn new(field_type: ForceFieldType) -> Self {
        Self {
            field_type,
            enabled: true,
            exclusive: false,
            category_bit_mask: u32::MAX,
            strength: 1.0,
            falloff: 0.0,
            minimum_radius: 0.0,
            region: FieldRegion::Everywhere,
        }
    }

    /// Creates a field pulling bodies toward its node
    pub fn radial_gravity(strength: f32) -> Self {
        Self::new(ForceFieldType::RadialGravity).with_strength(strength)
    }

    /// Creates a field pulling bodies along `direction`
    pub fn linear_gravity(direction: Vector2) -> Self {
        Self::new(ForceFieldType::LinearGravity { direction })
    }

    /// Creates a drag field
    pub fn drag(strength: f32) -> Self {
        Self::new(ForceFieldType::Drag).with_strength(strength)
    }

    /// Creates a vortex field
    pub fn vortex(strength: f32) -> Self {
        Self::new(ForceFieldType::Vortex).with_strength(strength)
    }

    /// Creates an electric field
    pub fn electric(strength: f32) -> Self {
        Self::new(ForceFieldType::Electric).with_strength(strength)
    }

    /// Creates a magnetic field
    pub fn magnetic(strength: f32) -> Self {
        Self::new(ForceFieldType::Magnetic).with_strength(strength)
    }

    /// Creates a spring field with spring constant `strength`
    pub fn spring(strength: f32) -> Self {
        Self::new(ForceFieldType::Spring).with_strength(strength)
    }

    /// Creates a field matching body velocities to `target`
    pub fn velocity_match(target: Vector2) -> Self {
        Self::new(ForceFieldType::VelocityMatch { target })
    }

    /// Creates a texture-driven velocity field, which applies no force
    pub fn velocity_texture() -> Self {
        Self::new(ForceFieldType::VelocityTexture)
    }

    /// Creates a noise field
    pub fn noise(smoothness: f32, animation_speed: f32) -> Self {
        Self::new(ForceFieldType::Noise { smoothness, animation_speed })
    }

    /// Creates a turbulence field
    pub fn turbulence(smoothness: f32, animation_speed: f32) -> Self {
        Self::new(ForceFieldType::Turbulence { smoothness, animation_speed })
    }

    /// Creates a field whose force comes from `evaluator`
    pub fn custom(evaluator: impl FieldEvaluator + 'static) -> Self {
        Self::new(ForceFieldType::Custom(Arc::new(evaluator)))
    }

    /// Sets the strength
    pub fn with_strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    /// Sets the falloff exponent
    pub fn with_falloff(mut self, falloff: f32) -> Self {
        self.set_falloff(falloff);
        self
    }

    /// Sets the minimum radius
    pub fn with_minimum_radius(mut self, minimum_radius: f32) -> Self {
        self.set_minimum_radius(minimum_radius);
        self
    }

    /// Sets the region
    pub fn with_region(mut self, region: FieldRegion) -> Self {
        self.region = region;
        self
    }

    /// Sets the category bit mask
    pub fn with_category_bit_mask(mut self, mask: u32) -> Self {
        self.category_bit_mask = mask;
        self
    }

    /// Marks the field exclusive
    pub fn with_exclusive(mut self, exclusive: bool) -> Self {
        self.exclusive = exclusive;
        self
    }

    /// Gets the type of force field
    pub fn get_field_type(&self) -> &ForceFieldType {
        &self.field_type
    }

    /// Sets the type of force field
    pub fn set_field_type(&mut self, field_type: ForceFieldType) {
        self.field_type = field_type;
    }

    /// Returns whether the field is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Sets whether the field is enabled
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns whether the field is exclusive
    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }

    /// Sets whether the field is exclusive
    pub fn set_exclusive(&mut self, exclusive: bool) {
        self.exclusive = exclusive;
    }

    /// Gets the category bit mask
    pub fn get_category_bit_mask(&self) -> u32 {
        self.category_bit_mask
    }

    /// Sets the category bit mask
    pub fn set_category_bit_mask(&mut self, mask: u32) {
        self.category_bit_mask = mask;
    }

    /// Gets the strength
    pub fn get_strength(&self) -> f32 {
        self.strength
    }

    /// Sets the strength
    pub fn set_strength(&mut self, strength: f32) {
        self.strength = strength;
    }

    /// Gets the falloff exponent
    pub fn get_falloff(&self) -> f32 {
        self.falloff
    }

    /// Sets the falloff exponent (clamped to >= 0)
    pub fn set_falloff(&mut self, falloff: f32) {
        self.falloff = falloff.max(0.0);
    }

    /// Gets the minimum radius
    pub fn get_minimum_radius(&self) -> f32 {
        self.minimum_radius
    }

    /// Sets the minimum radius (clamped to >= 0)
    pub fn set_minimum_radius(&mut self, minimum_radius: f32) {
        self.minimum_radius = minimum_radius.max(0.0);
    }

    /// Gets the region
    pub fn get_region(&self) -> FieldRegion {
        self.region
    }

    /// Sets the region
    pub fn set_region(&mut self, region: FieldRegion) {
        self.region = region;
    }

    /// Returns whether a body with `field_bit_mask` at scene-space `position`
    /// is affected by this field placed at `field_transform`
    pub fn affects(&self, field_transform: &Transform, field_bit_mask: u32, position: Vector2) -> bool {
        self.enabled
            && field_bit_mask & self.category_bit_mask != 0
            && self.region.contains(field_transform.inverse_transform_point(position))
    }

    /// Returns the falloff multiplier at `distance` from the field
    pub fn falloff_factor(&self, distance: f32) -> f32 {
        let distance = distance.max(self.minimum_radius);
        if self.falloff == 0.0 || distance <= self.minimum_radius {
            return 1.0;
        }
        // Without a minimum radius, measure falloff against unit distance
        let reference = if self.minimum_radius > EPSILON { self.minimum_radius } else { 1.0 };
        (reference / distance.max(EPSILON)).powf(self.falloff)
    }

    /// Computes the force this field exerts on a body, with the field at
    /// `field_position`
    pub fn force_on(&self, field_position: Vector2, sample: &FieldSample, context: &FieldContext) -> Vector2 {
        let displacement = sample.position - field_position;
        let raw_distance = displacement.length();
        let strength = self.strength * self.falloff_factor(raw_distance);
        let direction = displacement.try_normalize();

        match &self.field_type {
            ForceFieldType::RadialGravity => direction
                .map_or(Vector2::ZERO, |direction| -direction * (strength * sample.mass)),
            ForceFieldType::LinearGravity { direction } => *direction * (strength * sample.mass),
            ForceFieldType::Drag => -sample.velocity * (strength * sample.mass),
            ForceFieldType::Vortex => direction.map_or(Vector2::ZERO, |direction| {
                direction.perpendicular() * (strength * sample.mass)
            }),
            ForceFieldType::Electric => direction
                .map_or(Vector2::ZERO, |direction| direction * (strength * sample.charge)),
            ForceFieldType::Magnetic => {
                // v x B with B = (0, 0, strength)
                Vector2::new(sample.velocity.y * strength, -sample.velocity.x * strength)
                    * sample.charge
            }
            ForceFieldType::Spring => -displacement * strength,
            ForceFieldType::VelocityMatch { target } => {
                (*target - sample.velocity) * (strength * context.velocity_match_factor * sample.mass)
            }
            ForceFieldType::VelocityTexture => Vector2::ZERO,
            ForceFieldType::Noise { smoothness, animation_speed } => {
                let frequency = frequency_for_smoothness(*smoothness);
                let time = context.elapsed * animation_speed;
                noise_vector(sample.position, frequency, time) * (strength * sample.mass)
            }
            ForceFieldType::Turbulence { smoothness, animation_speed } => {
                let frequency = frequency_for_smoothness(*smoothness);
                let time = context.elapsed * animation_speed;
                let layered = noise_vector(sample.position, frequency, time)
                    + noise_vector(sample.position, frequency * 2.0, time) * 0.5;
                let amplification = 1.0 + context.turbulence_speed_factor * sample.velocity.length();
                layered * (strength * sample.mass * amplification)
            }
            ForceFieldType::Custom(evaluator) => evaluator.evaluate(
                sample.position,
                sample.velocity,
                sample.mass,
                sample.charge,
                context.dt,
            ),
        }
    }
}
