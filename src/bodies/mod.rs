mod physics_body;
mod material;

pub use self::physics_body::PhysicsBody;
pub use self::material::Material;
pub use self::body_flags::BodyFlags;

/// Flags for controlling body behavior
pub mod body_flags {
    use bitflags::bitflags;

    bitflags! {
        /// Flags for controlling the behavior of physics bodies
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct BodyFlags: u32 {
            /// Body is moved by the simulation
            const DYNAMIC = 0x01;

            /// Body is affected by the world's gravity
            const AFFECTED_BY_GRAVITY = 0x02;

            /// Body may rotate
            const ALLOWS_ROTATION = 0x04;

            /// Body is held in place while still counting as dynamic
            const PINNED = 0x08;

            /// Body moved slower than the resting threshold during the last step
            const RESTING = 0x10;
        }
    }
}
