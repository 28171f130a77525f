//! Per-frame simulation update
//!
//! One call to [`tick`] runs two passes in a fixed order: every ship, then
//! every asteroid. Each pass walks its step table below. The ship table
//! rotates before moving while the asteroid table moves before rotating.
//! Neither step reads the other's output, so both orders are kept as-is.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::collide;
use super::generator::populate_asteroids;
use super::kinematics::{update_controls, update_position, update_rotation};
use super::state::{Asteroid, GameWorld, Ship};
use crate::Vector3;
use crate::error::Result;
use crate::protocol::{Command, CommandState};

/// Named steps of the ship pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipStep {
    Controls,
    Collisions,
    Rotation,
    Position,
}

/// Named steps of the asteroid pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsteroidStep {
    Collisions,
    Position,
    Rotation,
}

pub const SHIP_PIPELINE: [ShipStep; 4] = [
    ShipStep::Controls,
    ShipStep::Collisions,
    ShipStep::Rotation,
    ShipStep::Position,
];

pub const ASTEROID_PIPELINE: [AsteroidStep; 3] = [
    AsteroidStep::Collisions,
    AsteroidStep::Position,
    AsteroidStep::Rotation,
];

/// Build the starting world and fill it with a seeded asteroid field
pub fn create_world(
    width: f64,
    height: f64,
    seed: u64,
    asteroid_count: usize,
    max_attempts: u32,
) -> Result<GameWorld> {
    let mut world = GameWorld::new(width, height);
    let mut rng = Pcg32::seed_from_u64(seed);
    populate_asteroids(&mut world, &mut rng, asteroid_count, max_attempts)?;
    log::info!(
        "World ready: seed={}, {} ships, {} asteroids",
        seed,
        world.ships.len(),
        world.asteroids.len()
    );
    Ok(world)
}

/// Apply a control command to the controllable ship (index 0)
pub fn handle_command(world: &mut GameWorld, command: Command, state: CommandState) {
    let Some(ship) = world.ships.first_mut() else {
        return;
    };
    let held = state.is_started();
    match command {
        Command::Accelerate => ship.acceleration = held,
        Command::TurnLeft => ship.turning_left = held,
        Command::TurnRight => ship.turning_right = held,
    }
}

/// Advance the world by one frame
pub fn tick(world: &mut GameWorld) {
    world.time_ticks += 1;
    log::trace!("tick {}", world.time_ticks);

    ship_pass(&mut world.ships, &mut world.asteroids);
    asteroid_pass(&mut world.asteroids);
}

fn ship_pass(ships: &mut [Ship], asteroids: &mut [Asteroid]) {
    for ship in ships.iter_mut() {
        for step in SHIP_PIPELINE {
            match step {
                ShipStep::Controls => update_controls(ship),
                ShipStep::Collisions => {
                    for asteroid in asteroids.iter_mut() {
                        collide(&mut ship.body, &mut asteroid.body);
                    }
                }
                ShipStep::Rotation => update_rotation(ship),
                ShipStep::Position => update_position(ship),
            }
        }
    }
}

/// Sweep every asteroid against every other one, then move them.
///
/// Velocities are live: a change made by a ship hit, or by an earlier
/// asteroid in this sweep, is seen by later tests. Positions are not: the
/// sweep reads start-of-pass positions, and the integrated placements are
/// committed only once every asteroid has been tested.
fn asteroid_pass(asteroids: &mut [Asteroid]) {
    let mut staged: Vec<(Vector3, Vector3)> = Vec::with_capacity(asteroids.len());

    for i in 0..asteroids.len() {
        let mut next = asteroids[i].clone();
        for step in ASTEROID_PIPELINE {
            match step {
                AsteroidStep::Collisions => {
                    sweep(asteroids, i);
                    next.body.velocity = asteroids[i].body.velocity;
                }
                AsteroidStep::Position => update_position(&mut next),
                AsteroidStep::Rotation => update_rotation(&mut next),
            }
        }
        staged.push((next.body.position, next.body.rotation));
    }

    for (asteroid, (position, rotation)) in asteroids.iter_mut().zip(staged) {
        asteroid.body.position = position;
        asteroid.body.rotation = rotation;
    }
}

fn sweep(asteroids: &mut [Asteroid], mover: usize) {
    for other in 0..asteroids.len() {
        if other == mover {
            continue;
        }
        let (a, b) = pair_mut(asteroids, mover, other);
        collide(&mut a.body, &mut b.body);
    }
}

/// Two distinct mutable elements of one slice
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = items.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Body, ObjectKind};

    fn rock(world: &mut GameWorld, pos: Vector3, vel: Vector3, radius: f64) -> usize {
        let id = world.next_entity_id();
        world.asteroids.push(Asteroid {
            body: Body {
                id,
                kind: ObjectKind::Asteroid,
                position: pos,
                rotation: Vector3::ZERO,
                radius,
                mass: radius * ASTEROID_DENSITY,
                velocity: vel,
                velocity_axial: Vector3::new(0.0, 0.01, 0.0),
            },
        });
        world.asteroids.len() - 1
    }

    #[test]
    fn test_accelerate_moves_ship_same_tick() {
        let mut world = GameWorld::default();
        handle_command(&mut world, Command::Accelerate, CommandState::Start);
        tick(&mut world);

        let ship = &world.ships[0].body;
        assert!((ship.velocity - Vector3::new(0.02, 0.0, 0.0)).length() < 1e-12);
        assert!((ship.position - Vector3::new(0.02, 0.0, 0.0)).length() < 1e-12);
        assert_eq!(world.time_ticks, 1);
    }

    #[test]
    fn test_accelerate_toggle() {
        let mut world = GameWorld::default();
        handle_command(&mut world, Command::Accelerate, CommandState::Start);
        handle_command(&mut world, Command::Accelerate, CommandState::Stop);
        assert!(!world.ships[0].acceleration);

        tick(&mut world);
        assert_eq!(world.ships[0].body.velocity, Vector3::ZERO);
        assert_eq!(world.ships[0].body.position, Vector3::ZERO);
    }

    #[test]
    fn test_turn_left_rotates_ship() {
        let mut world = GameWorld::default();
        handle_command(&mut world, Command::TurnLeft, CommandState::Start);
        tick(&mut world);
        tick(&mut world);
        assert!((world.ships[0].body.rotation.z - 2.0 * crate::to_radian(3.0)).abs() < 1e-12);

        handle_command(&mut world, Command::TurnLeft, CommandState::Stop);
        handle_command(&mut world, Command::TurnRight, CommandState::Start);
        tick(&mut world);
        assert!((world.ships[0].body.rotation.z - crate::to_radian(3.0)).abs() < 1e-12);
        // Ships only ever yaw
        assert_eq!(world.ships[0].body.rotation.x, 0.0);
        assert_eq!(world.ships[0].body.rotation.y, 0.0);
    }

    #[test]
    fn test_commands_only_touch_first_ship() {
        let mut world = GameWorld::default();
        world.spawn_ship();
        handle_command(&mut world, Command::TurnRight, CommandState::Start);
        assert!(world.ships[0].turning_right);
        assert!(!world.ships[1].turning_right);
    }

    #[test]
    fn test_command_without_ships_is_noop() {
        let mut world = GameWorld::empty(500.0, 500.0);
        handle_command(&mut world, Command::Accelerate, CommandState::Start);
        tick(&mut world);
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_ship_hits_asteroid() {
        let mut world = GameWorld::default();
        world.ships[0].body.velocity = Vector3::new(5.0, 0.0, 0.0);
        let idx = rock(&mut world, Vector3::new(33.0, 0.0, 0.0), Vector3::ZERO, 20.0);

        tick(&mut world);

        let ship = &world.ships[0].body;
        let asteroid = &world.asteroids[idx].body;
        assert!(ship.velocity.x < 5.0, "ship loses forward speed");
        assert!(asteroid.velocity.x > 0.0, "asteroid is pushed along +x");
        // The ship-induced velocity already moves the asteroid this frame
        assert!((asteroid.position.x - (33.0 + asteroid.velocity.x)).abs() < 1e-12);
        assert_eq!(world.asteroids.len(), 1, "impacts never remove entities");
    }

    #[test]
    fn test_stationary_asteroids_only_spin() {
        let mut world = GameWorld::default();
        rock(&mut world, Vector3::new(100.0, 100.0, 0.0), Vector3::ZERO, 30.0);
        rock(&mut world, Vector3::new(-100.0, 100.0, 0.0), Vector3::ZERO, 30.0);

        tick(&mut world);

        for a in &world.asteroids {
            assert_eq!(a.body.velocity, Vector3::ZERO);
            assert!((a.body.rotation.y - 0.01).abs() < 1e-12);
        }
        assert_eq!(world.asteroids[0].body.position, Vector3::new(100.0, 100.0, 0.0));
    }

    #[test]
    fn test_asteroid_sweep_uses_start_of_pass_positions() {
        let mut world = GameWorld::empty(500.0, 500.0);
        // a0 flees a1 fast enough that, had a0's move been committed before
        // a1's turn, a1 could no longer reach it
        let a0 = rock(&mut world, Vector3::new(0.0, 0.0, 0.0), Vector3::new(-50.0, 0.0, 0.0), 20.0);
        let a1 = rock(&mut world, Vector3::new(45.0, 0.0, 0.0), Vector3::new(-6.0, 0.0, 0.0), 20.0);

        tick(&mut world);

        // a1 still hits a0 at its old position: n = (1,0,0), p = 0.022
        let (v0, v1) = (world.asteroids[a0].body.velocity.x, world.asteroids[a1].body.velocity.x);
        assert!((v0 - (-14.8)).abs() < 1e-9);
        assert!((v1 - (-41.2)).abs() < 1e-9);
        // a0 already moved with the velocity it had on its own turn
        assert!((world.asteroids[a0].body.position.x - (-50.0)).abs() < 1e-9);
        assert!((world.asteroids[a1].body.position.x - 3.8).abs() < 1e-9);
    }

    #[test]
    fn test_head_on_asteroids_bounce() {
        let mut world = GameWorld::empty(500.0, 500.0);
        let left = rock(
            &mut world,
            Vector3::new(-22.0, 0.0, 0.0),
            Vector3::new(5.0, 0.0, 0.0),
            20.0,
        );
        let right = rock(
            &mut world,
            Vector3::new(22.0, 0.0, 0.0),
            Vector3::new(-5.0, 0.0, 0.0),
            20.0,
        );

        tick(&mut world);

        // Equal masses swap 80% of the closing speed
        assert!((world.asteroids[left].body.velocity.x - (-3.0)).abs() < 1e-9);
        assert!((world.asteroids[right].body.velocity.x - 3.0).abs() < 1e-9);
        assert!((world.asteroids[left].body.position.x - (-25.0)).abs() < 1e-9);
        assert!((world.asteroids[right].body.position.x - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_create_world_is_seeded() {
        let w1 = create_world(500.0, 500.0, 1234, ASTEROID_COUNT, MAX_PLACEMENT_ATTEMPTS).unwrap();
        let w2 = create_world(500.0, 500.0, 1234, ASTEROID_COUNT, MAX_PLACEMENT_ATTEMPTS).unwrap();
        assert_eq!(w1.ships.len(), 1);
        assert_eq!(w1.asteroids.len(), ASTEROID_COUNT);
        assert_eq!(w1.asteroids, w2.asteroids);
    }

    #[test]
    fn test_determinism() {
        let mut w1 = create_world(500.0, 500.0, 99999, 10, 500).unwrap();
        let mut w2 = create_world(500.0, 500.0, 99999, 10, 500).unwrap();

        handle_command(&mut w1, Command::Accelerate, CommandState::Start);
        handle_command(&mut w2, Command::Accelerate, CommandState::Start);
        for _ in 0..600 {
            tick(&mut w1);
            tick(&mut w2);
        }

        assert_eq!(w1.time_ticks, 600);
        assert_eq!(w1.ships, w2.ships);
        assert_eq!(w1.asteroids, w2.asteroids);
    }

    #[test]
    fn test_pair_mut() {
        let mut v = [1, 2, 3];
        let (a, b) = pair_mut(&mut v, 2, 0);
        std::mem::swap(a, b);
        assert_eq!(v, [3, 2, 1]);
    }
}
