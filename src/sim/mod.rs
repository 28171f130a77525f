//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - One fixed-order update per frame
//! - Seeded RNG only
//! - Stable iteration order (creation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod generator;
pub mod kinematics;
pub mod state;
pub mod tick;

pub use collision::{collide, perform_collision, test_collision, test_intersect};
pub use generator::{generate_asteroid, populate_asteroids, scaled_rnd};
pub use kinematics::{update_controls, update_position, update_rotation};
pub use state::{Asteroid, Body, GameWorld, Movable, ObjectKind, Ship};
pub use tick::{
    ASTEROID_PIPELINE, AsteroidStep, SHIP_PIPELINE, ShipStep, create_world, handle_command, tick,
};
