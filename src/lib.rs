//! Asteroid Field - simulation core of a small multiplayer space demo
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, world state)
//! - `protocol`: Command messages exchanged through the relay
//! - `relay`: In-process event fan-out
//! - `render`: Renderer boundary and scene bookkeeping
//! - `game`: Frame driver tying the pieces together
//! - `settings`: Data-driven configuration

pub mod error;
pub mod game;
pub mod protocol;
pub mod relay;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use game::Game;
pub use settings::Settings;

/// Vector type used by every simulation body (double precision)
pub type Vector3 = glam::DVec3;

/// Game configuration constants
pub mod consts {
    /// World dimensions (spawn bounds, centered on origin)
    pub const WORLD_WIDTH: f64 = 500.0;
    pub const WORLD_HEIGHT: f64 = 500.0;

    /// Ship defaults
    pub const SHIP_RADIUS: f64 = 10.0;
    pub const SHIP_MASS: f64 = 100.0;
    /// Thrust added to velocity per frame while accelerating
    pub const SHIP_ACCELERATION_SPEED: f64 = 0.02;
    /// Yaw rate while turning (degrees per frame)
    pub const SHIP_TURN_DEGREES: f64 = 3.0;

    /// Asteroid field
    pub const ASTEROID_COUNT: usize = 10;
    pub const ASTEROID_MIN_RADIUS: f64 = 30.0;
    pub const ASTEROID_MAX_RADIUS: f64 = 50.0;
    /// Spin scale around the pitch axis
    pub const ASTEROID_ROTATION: f64 = 0.02;
    /// Initial tilt scale (degrees)
    pub const ASTEROID_TILT_DEGREES: f64 = 180.0;
    /// Mass per unit of radius
    pub const ASTEROID_DENSITY: f64 = 100.0;

    /// Impulse scale applied to both bodies on impact
    pub const COLLISION_REDUCTION_FACTOR: f64 = 0.8;

    /// Candidate draws per asteroid before placement is abandoned
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 500;
}

/// Convert degrees to radians
#[inline]
pub fn to_radian(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_radian() {
        assert!((to_radian(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert!((to_radian(3.0) - 0.052_359_877_559_829_89).abs() < 1e-12);
        assert_eq!(to_radian(0.0), 0.0);
    }
}
