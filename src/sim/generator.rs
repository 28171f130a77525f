//! Procedural asteroid field
//!
//! Candidates are drawn from a seeded RNG and rejected while they overlap
//! anything already in the world.

use rand::Rng;

use super::collision::test_intersect;
use super::state::{Asteroid, Body, GameWorld, ObjectKind};
use crate::consts::*;
use crate::error::{Result, SimError};
use crate::{Vector3, to_radian};

/// Random value in `[-scale/2, scale/2)`
#[inline]
pub fn scaled_rnd<R: Rng>(rng: &mut R, scale: f64) -> f64 {
    rng.random::<f64>() * scale - scale / 2.0
}

fn random_position<R: Rng>(rng: &mut R, width: f64, height: f64) -> Vector3 {
    Vector3::new(scaled_rnd(rng, width), scaled_rnd(rng, height), 0.0)
}

/// Spin around the pitch axis only
fn random_rotation<R: Rng>(rng: &mut R) -> Vector3 {
    Vector3::new(0.0, scaled_rnd(rng, ASTEROID_ROTATION), 0.0)
}

fn random_tilt<R: Rng>(rng: &mut R) -> Vector3 {
    let tilt = to_radian(ASTEROID_TILT_DEGREES);
    Vector3::new(
        scaled_rnd(rng, tilt),
        scaled_rnd(rng, tilt),
        scaled_rnd(rng, tilt),
    )
}

/// Generate one stationary asteroid somewhere inside `width` x `height`.
///
/// The radius is `MIN + scaled_rnd(MAX - MIN)`, which lands in `[20, 40)`
/// rather than `[30, 50)`. Kept as-is so existing fields reproduce.
pub fn generate_asteroid<R: Rng>(rng: &mut R, id: u32, width: f64, height: f64) -> Asteroid {
    let radius = ASTEROID_MIN_RADIUS + scaled_rnd(rng, ASTEROID_MAX_RADIUS - ASTEROID_MIN_RADIUS);
    let mass = radius * ASTEROID_DENSITY;

    Asteroid {
        body: Body {
            id,
            kind: ObjectKind::Asteroid,
            position: random_position(rng, width, height),
            rotation: random_tilt(rng),
            radius,
            mass,
            velocity: Vector3::ZERO,
            velocity_axial: random_rotation(rng),
        },
    }
}

/// Append `count` asteroids that overlap neither each other nor any ship.
///
/// Each slot gets at most `max_attempts` candidates before placement fails.
pub fn populate_asteroids<R: Rng>(
    world: &mut GameWorld,
    rng: &mut R,
    count: usize,
    max_attempts: u32,
) -> Result<()> {
    let (width, height) = (world.width, world.height);

    for placed in 0..count {
        let mut accepted = None;

        for attempt in 1..=max_attempts {
            // ID is only committed once the candidate is accepted
            let candidate = generate_asteroid(rng, 0, width, height);
            let overlaps = world
                .bodies()
                .any(|other| test_intersect(&candidate.body, other));

            if !overlaps {
                if attempt > max_attempts / 2 {
                    log::warn!("Asteroid #{} needed {} attempts to place", placed, attempt);
                }
                accepted = Some(candidate);
                break;
            }
        }

        let Some(mut asteroid) = accepted else {
            return Err(SimError::PlacementFailed {
                placed,
                attempts: max_attempts,
            });
        };
        asteroid.body.id = world.next_entity_id();
        world.asteroids.push(asteroid);
    }

    log::info!("Placed {} asteroids", count);
    Ok(())
}
