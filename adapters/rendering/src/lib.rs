#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Garden Defence adapters.
//!
//! The simulation core never draws anything. Backends implement [`Renderer`]
//! and receive creation, movement, destruction and effect notifications;
//! [`SceneSync`] derives those notifications by diffing successive world
//! snapshots, so backends stay free of simulation knowledge.

use std::collections::{BTreeMap, BTreeSet};

use garden_defence_core::{
    BlockId, BlockKind, BlockView, EffectKind, Event, PlantId, PlantKind, PlantView, Position,
    ProjectileId, ProjectileView, ZombieId, ZombieKind, ZombieView,
};
use glam::Vec2;

/// RGBA color used when presenting entities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Presentation color for a plant kind.
#[must_use]
pub const fn plant_color(kind: PlantKind) -> Color {
    match kind {
        PlantKind::Peashooter => Color::from_rgb_u8(0x4c, 0xaf, 0x50),
        PlantKind::Sunflower => Color::from_rgb_u8(0xff, 0xd7, 0x00),
        PlantKind::WallNut => Color::from_rgb_u8(0x8b, 0x45, 0x13),
        PlantKind::CherryBomb => Color::from_rgb_u8(0xff, 0x00, 0x00),
    }
}

/// Presentation color for a zombie kind.
#[must_use]
pub const fn zombie_color(kind: ZombieKind) -> Color {
    match kind {
        ZombieKind::Walker => Color::from_rgb_u8(0x80, 0x80, 0x80),
        ZombieKind::Miner => Color::from_rgb_u8(0x65, 0x43, 0x21),
        ZombieKind::Bomber => Color::from_rgb_u8(0xff, 0x45, 0x00),
    }
}

/// Presentation color for a block kind.
#[must_use]
pub const fn block_color(kind: BlockKind) -> Color {
    match kind {
        BlockKind::Dirt => Color::from_rgb_u8(0x8b, 0x45, 0x13),
        BlockKind::Stone => Color::from_rgb_u8(0x80, 0x80, 0x80),
        BlockKind::Iron => Color::from_rgb_u8(0xc0, 0xc0, 0xc0),
    }
}

/// Presentation color for a projectile.
#[must_use]
pub const fn projectile_color() -> Color {
    Color::from_rgb_u8(0x32, 0xcd, 0x32)
}

/// Identifier of an entity within the rendered scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SceneEntityId {
    /// A plant placed in the garden.
    Plant(PlantId),
    /// A zombie assaulting the garden.
    Zombie(ZombieId),
    /// A projectile in flight.
    Projectile(ProjectileId),
    /// A terrain block.
    Block(BlockId),
}

/// Description of an entity entering the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntityDescriptor {
    /// Scene identifier of the entity.
    pub id: SceneEntityId,
    /// Fill color derived from the catalog.
    pub color: Color,
    /// Initial ground-plane position.
    pub position: Vec2,
}

/// Rendering backend notified of scene changes.
pub trait Renderer {
    /// An entity entered the scene.
    fn entity_created(&mut self, descriptor: EntityDescriptor);

    /// An entity left the scene.
    fn entity_destroyed(&mut self, id: SceneEntityId);

    /// An entity moved or rotated.
    fn entity_moved(&mut self, id: SceneEntityId, position: Vec2, altitude: f32, rotation: f32);

    /// A cosmetic effect should be shown.
    fn visual_effect(&mut self, kind: EffectKind, position: Vec2);
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ScenePose {
    position: Vec2,
    altitude: f32,
    rotation: f32,
    color: Color,
}

/// Diffs world snapshots into [`Renderer`] notifications.
#[derive(Debug, Default)]
pub struct SceneSync {
    known: BTreeSet<SceneEntityId>,
    scratch: BTreeMap<SceneEntityId, ScenePose>,
}

impl SceneSync {
    /// Creates a new scene synchroniser with no known entities.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forwards one frame's worth of changes to the renderer.
    ///
    /// Entities present in the views but unknown to the scene produce
    /// `entity_created`; known entities missing from the views produce
    /// `entity_destroyed`; every live entity produces `entity_moved`.
    /// Effect events pass straight through.
    pub fn sync<R: Renderer>(
        &mut self,
        plants: &PlantView,
        zombies: &ZombieView,
        projectiles: &ProjectileView,
        blocks: &BlockView,
        events: &[Event],
        renderer: &mut R,
    ) {
        self.scratch.clear();

        for plant in plants.iter() {
            let _ = self.scratch.insert(
                SceneEntityId::Plant(plant.id),
                ScenePose {
                    position: to_vec2(plant.cell.center()),
                    altitude: 0.0,
                    rotation: 0.0,
                    color: plant_color(plant.kind),
                },
            );
        }
        for zombie in zombies.iter() {
            let _ = self.scratch.insert(
                SceneEntityId::Zombie(zombie.id),
                ScenePose {
                    position: to_vec2(zombie.position),
                    altitude: zombie.altitude,
                    rotation: zombie.heading,
                    color: zombie_color(zombie.kind),
                },
            );
        }
        for projectile in projectiles.iter() {
            let _ = self.scratch.insert(
                SceneEntityId::Projectile(projectile.id),
                ScenePose {
                    position: to_vec2(projectile.position),
                    altitude: projectile.altitude,
                    rotation: 0.0,
                    color: projectile_color(),
                },
            );
        }
        for block in blocks.iter() {
            let _ = self.scratch.insert(
                SceneEntityId::Block(block.id),
                ScenePose {
                    position: to_vec2(block.cell.center()),
                    altitude: 0.0,
                    rotation: 0.0,
                    color: block_color(block.kind),
                },
            );
        }

        let departed: Vec<SceneEntityId> = self
            .known
            .iter()
            .filter(|id| !self.scratch.contains_key(id))
            .copied()
            .collect();
        for id in departed {
            let _ = self.known.remove(&id);
            renderer.entity_destroyed(id);
        }

        for (id, pose) in &self.scratch {
            if self.known.insert(*id) {
                renderer.entity_created(EntityDescriptor {
                    id: *id,
                    color: pose.color,
                    position: pose.position,
                });
            }
            renderer.entity_moved(*id, pose.position, pose.altitude, pose.rotation);
        }

        for event in events {
            if let Event::EffectTriggered { kind, at } = event {
                renderer.visual_effect(*kind, to_vec2(*at));
            }
        }
    }
}

fn to_vec2(position: Position) -> Vec2 {
    Vec2::new(position.x(), position.z())
}

/// Notification captured by the [`RecordingRenderer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderCall {
    /// `entity_created` was invoked.
    Created(EntityDescriptor),
    /// `entity_destroyed` was invoked.
    Destroyed(SceneEntityId),
    /// `entity_moved` was invoked.
    Moved {
        /// Entity that moved.
        id: SceneEntityId,
        /// Ground-plane position.
        position: Vec2,
        /// Height above the ground plane.
        altitude: f32,
        /// Facing angle in radians.
        rotation: f32,
    },
    /// `visual_effect` was invoked.
    Effect {
        /// Category of the effect.
        kind: EffectKind,
        /// Position of the effect.
        position: Vec2,
    },
}

/// Backend that records every notification, for tests and headless runs.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    /// Creates an empty recording backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications captured so far, in invocation order.
    #[must_use]
    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    /// Drops the captured notifications.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn entity_created(&mut self, descriptor: EntityDescriptor) {
        self.calls.push(RenderCall::Created(descriptor));
    }

    fn entity_destroyed(&mut self, id: SceneEntityId) {
        self.calls.push(RenderCall::Destroyed(id));
    }

    fn entity_moved(&mut self, id: SceneEntityId, position: Vec2, altitude: f32, rotation: f32) {
        self.calls.push(RenderCall::Moved {
            id,
            position,
            altitude,
            rotation,
        });
    }

    fn visual_effect(&mut self, kind: EffectKind, position: Vec2) {
        self.calls.push(RenderCall::Effect { kind, position });
    }
}
