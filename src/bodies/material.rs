/// Surface and bulk properties applied to a body in one go
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Bounciness in [0, 1]
    pub restitution: f32,

    /// Coulomb friction coefficient
    pub friction: f32,

    /// Mass per unit of area
    pub density: f32,
}

impl Material {
    pub fn new(density: f32, friction: f32, restitution: f32) -> Self {
        Self {
            density,
            friction,
            restitution,
        }
    }

    /// Slippery with some bounce
    pub fn ice() -> Self {
        Self::new(0.9, 0.05, 0.4)
    }

    /// Grippy and bouncy
    pub fn rubber() -> Self {
        Self::new(1.2, 0.8, 0.7)
    }

    pub fn wood() -> Self {
        Self::new(0.7, 0.6, 0.2)
    }

    /// Dense
    pub fn metal() -> Self {
        Self::new(7.8, 0.4, 0.5)
    }

    pub fn concrete() -> Self {
        Self::new(2.4, 0.9, 0.1)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(1.0, 0.2, 0.2)
    }
}
