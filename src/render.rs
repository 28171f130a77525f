//! Renderer boundary
//!
//! The simulation never draws anything itself. A [`Renderer`] is handed the
//! world once per frame; [`SceneIndex`] is the bookkeeping every renderer
//! needs, keeping one scene node per entity ID and refreshing its transform.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Vector3;
use crate::error::Result;
use crate::sim::{Body, GameWorld, ObjectKind};

/// Consumer of world snapshots
pub trait Renderer {
    /// Sync scene state with the world (called after every update)
    fn update_scene(&mut self, world: &GameWorld) -> Result<()>;
    /// Draw the current scene
    fn render(&mut self);
    /// Viewport changed
    fn resize(&mut self, width: u32, height: u32);
    /// Current viewport size as `(width, height)`
    fn viewport(&self) -> (u32, u32);
    /// Release any render/device resources
    fn destroy(&mut self);
    /// Pointer click in viewport coordinates
    fn mouse_click(&mut self, _x: f64, _y: f64) {}
}

/// Geometry built for an entity when first seen
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Open triangle pointing along +x
    ShipOutline { vertices: [Vector3; 3] },
    /// Low-poly sphere
    Sphere { radius: f64, segments: u32 },
}

impl Shape {
    fn for_kind(kind: ObjectKind, radius: f64) -> Self {
        match kind {
            ObjectKind::Ship => Shape::ShipOutline {
                vertices: [
                    Vector3::new(-radius, radius, 0.0),
                    Vector3::new(radius, 0.0, 0.0),
                    Vector3::new(-radius, -radius, 0.0),
                ],
            },
            ObjectKind::Asteroid => Shape::Sphere { radius, segments: 6 },
        }
    }
}

/// One renderable entity
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub kind: ObjectKind,
    pub shape: Shape,
    pub position: Vector3,
    pub rotation: Vector3,
}

/// Entity as carried in a serialized world snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub id: u32,
    /// Kind tag, checked on arrival
    pub kind: String,
    pub position: Vector3,
    pub rotation: Vector3,
    pub radius: f64,
}

impl From<&Body> for SnapshotEntry {
    fn from(body: &Body) -> Self {
        Self {
            id: body.id,
            kind: body.kind.as_str().to_string(),
            position: body.position,
            rotation: body.rotation,
            radius: body.radius,
        }
    }
}

/// Serialize every body of the world for an out-of-process renderer
pub fn snapshot(world: &GameWorld) -> String {
    let entries: Vec<SnapshotEntry> = world.bodies().map(SnapshotEntry::from).collect();
    // Plain numbers and strings always serialize
    serde_json::to_string(&entries).unwrap_or_default()
}

/// Scene nodes memoized by entity ID
#[derive(Debug, Default)]
pub struct SceneIndex {
    nodes: BTreeMap<u32, SceneNode>,
}

impl SceneIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create nodes for unseen bodies, then copy every transform
    pub fn update_scene<'a>(&mut self, bodies: impl IntoIterator<Item = &'a Body>) {
        for body in bodies {
            self.upsert(body.id, body.kind, body.radius, body.position, body.rotation);
        }
    }

    /// Same as [`update_scene`](Self::update_scene), fed from [`snapshot`] JSON.
    ///
    /// An unknown kind tag aborts with `SimError::InvalidKind`.
    pub fn apply_snapshot(&mut self, json: &str) -> Result<()> {
        let entries: Vec<SnapshotEntry> =
            serde_json::from_str(json).map_err(crate::error::SimError::Protocol)?;
        for entry in entries {
            let kind = entry.kind.parse::<ObjectKind>()?;
            self.upsert(entry.id, kind, entry.radius, entry.position, entry.rotation);
        }
        Ok(())
    }

    fn upsert(
        &mut self,
        id: u32,
        kind: ObjectKind,
        radius: f64,
        position: Vector3,
        rotation: Vector3,
    ) {
        let node = self.nodes.entry(id).or_insert_with(|| {
            log::debug!("Scene node created for {} {}", kind.as_str(), id);
            SceneNode {
                kind,
                shape: Shape::for_kind(kind, radius),
                position,
                rotation,
            }
        });
        node.position = position;
        node.rotation = rotation;
    }

    pub fn get(&self, id: u32) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

/// Renderer with no output device, for native runs and tests
#[derive(Debug)]
pub struct HeadlessRenderer {
    pub scene: SceneIndex,
    pub width: u32,
    pub height: u32,
    pub frames_rendered: u64,
    destroyed: bool,
}

impl HeadlessRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            scene: SceneIndex::new(),
            width,
            height,
            frames_rendered: 0,
            destroyed: false,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl Renderer for HeadlessRenderer {
    fn update_scene(&mut self, world: &GameWorld) -> Result<()> {
        self.scene.update_scene(world.bodies());
        Ok(())
    }

    fn render(&mut self) {
        if self.destroyed {
            return;
        }
        self.frames_rendered += 1;
        log::debug!(
            "Frame {}: {} nodes at {}x{}",
            self.frames_rendered,
            self.scene.len(),
            self.width,
            self.height
        );
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn destroy(&mut self) {
        if !self.destroyed {
            self.scene.clear();
            self.destroyed = true;
            log::info!("Renderer destroyed after {} frames", self.frames_rendered);
        }
    }

    fn mouse_click(&mut self, x: f64, y: f64) {
        log::debug!("Click at ({}, {})", x, y);
    }
}
