//! World state and entity model
//!
//! Ships and asteroids share an embedded [`Body`] carrying everything the
//! physics touches. Each body owns its vectors by value, so no two entities
//! can ever alias the same position or velocity.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Vector3;
use crate::consts::*;
use crate::error::SimError;

/// Discriminator for world objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectKind {
    Ship,
    Asteroid,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Ship => "SHIP",
            ObjectKind::Asteroid => "ASTEROID",
        }
    }
}

impl FromStr for ObjectKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SHIP" => Ok(ObjectKind::Ship),
            "ASTEROID" => Ok(ObjectKind::Asteroid),
            other => Err(SimError::InvalidKind(other.to_string())),
        }
    }
}

/// Physical state shared by every movable world object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Stable for the object's lifetime, never reused within a world
    pub id: u32,
    pub kind: ObjectKind,
    pub position: Vector3,
    /// Euler-like angles per axis (ships only ever change z)
    pub rotation: Vector3,
    /// Collision sphere radius, also the render shape parameter
    pub radius: f64,
    pub mass: f64,
    /// Linear delta per frame
    pub velocity: Vector3,
    /// Angular delta per frame
    pub velocity_axial: Vector3,
}

/// Anything the kinematics and collision passes can move
pub trait Movable {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;
}

/// A player-controlled ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    #[serde(flatten)]
    pub body: Body,
    /// Control holds set by command handling, read once per frame
    pub acceleration: bool,
    pub turning_left: bool,
    pub turning_right: bool,
}

impl Ship {
    /// A stationary ship at the origin
    pub fn new(id: u32) -> Self {
        Self {
            body: Body {
                id,
                kind: ObjectKind::Ship,
                position: Vector3::ZERO,
                rotation: Vector3::ZERO,
                radius: SHIP_RADIUS,
                mass: SHIP_MASS,
                velocity: Vector3::ZERO,
                velocity_axial: Vector3::ZERO,
            },
            acceleration: false,
            turning_left: false,
            turning_right: false,
        }
    }
}

impl Movable for Ship {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// A procedurally generated asteroid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    #[serde(flatten)]
    pub body: Body,
}

impl Movable for Asteroid {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// The simulated world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameWorld {
    /// Spawn/viewport extents, centered on the origin
    pub width: f64,
    pub height: f64,
    /// Ships in creation order (index 0 is the controllable one)
    pub ships: Vec<Ship>,
    /// Asteroids in creation order
    pub asteroids: Vec<Asteroid>,
    /// Simulation tick counter
    #[serde(default)]
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl GameWorld {
    /// Create a world with no entities
    pub fn empty(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ships: Vec::new(),
            asteroids: Vec::new(),
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Create the starting world: one ship at the origin, no asteroids yet
    pub fn new(width: f64, height: f64) -> Self {
        let mut world = Self::empty(width, height);
        world.spawn_ship();
        log::info!("Created {}x{} world", width, height);
        world
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a stationary ship at the origin, returning its ID
    pub fn spawn_ship(&mut self) -> u32 {
        let id = self.next_entity_id();
        self.ships.push(Ship::new(id));
        id
    }

    /// All bodies, ships first
    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.ships
            .iter()
            .map(|s| &s.body)
            .chain(self.asteroids.iter().map(|a| &a.body))
    }

    pub fn entity_count(&self) -> usize {
        self.ships.len() + self.asteroids.len()
    }
}

impl Default for GameWorld {
    fn default() -> Self {
        Self::new(WORLD_WIDTH, WORLD_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_world() {
        let world = GameWorld::default();
        assert_eq!(world.width, 500.0);
        assert_eq!(world.height, 500.0);
        assert_eq!(world.ships.len(), 1);
        assert!(world.asteroids.is_empty());

        let ship = &world.ships[0];
        assert_eq!(ship.body.kind, ObjectKind::Ship);
        assert_eq!(ship.body.position, Vector3::ZERO);
        assert_eq!(ship.body.radius, 10.0);
        assert_eq!(ship.body.mass, 100.0);
        assert!(!ship.acceleration && !ship.turning_left && !ship.turning_right);
    }

    #[test]
    fn test_ids_are_unique_and_monotonic() {
        let mut world = GameWorld::default();
        let first = world.ships[0].body.id;
        let second = world.spawn_ship();
        let third = world.next_entity_id();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_object_kind_parse() {
        assert_eq!("SHIP".parse::<ObjectKind>().unwrap(), ObjectKind::Ship);
        assert_eq!(
            ObjectKind::Asteroid.as_str().parse::<ObjectKind>().unwrap(),
            ObjectKind::Asteroid
        );
        assert!(matches!(
            "COMET".parse::<ObjectKind>(),
            Err(SimError::InvalidKind(ref s)) if s == "COMET"
        ));
    }

    #[test]
    fn test_ship_serializes_flat() {
        let ship = Ship::new(7);
        let json = serde_json::to_value(&ship).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["kind"], "SHIP");
        assert_eq!(json["acceleration"], false);
    }
}
