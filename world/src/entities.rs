//! Internal entity records owned by the authoritative world.

use std::collections::VecDeque;
use std::time::Duration;

use garden_defence_core::{
    BlockId, BlockKind, CellCoord, PathStep, PlantId, PlantKind, Position, ProjectileId, ZombieId,
    ZombieKind, ZombieLoadout,
};

#[derive(Clone, Debug)]
pub(crate) struct Plant {
    pub(crate) id: PlantId,
    pub(crate) kind: PlantKind,
    pub(crate) cell: CellCoord,
    pub(crate) health: f32,
    pub(crate) max_health: f32,
    /// Remaining cannon cooldown; zero means ready.
    pub(crate) cooldown: Duration,
    /// Accumulated time toward the next production cycle.
    pub(crate) production: Duration,
    /// Time since placement, armed fuse plants detonate when this passes
    /// their delay.
    pub(crate) fuse: Duration,
}

impl Plant {
    pub(crate) fn new(id: PlantId, kind: PlantKind, cell: CellCoord) -> Self {
        let health = kind.stats().health;
        Self {
            id,
            kind,
            cell,
            health,
            max_health: health,
            cooldown: Duration::ZERO,
            production: Duration::ZERO,
            fuse: Duration::ZERO,
        }
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct JumpState {
    pub(crate) from: Position,
    pub(crate) to: Position,
    /// Interpolation progress in `0.0..1.0`.
    pub(crate) progress: f32,
}

#[derive(Clone, Debug)]
pub(crate) struct Zombie {
    pub(crate) id: ZombieId,
    pub(crate) kind: ZombieKind,
    pub(crate) position: Position,
    pub(crate) heading: f32,
    pub(crate) health: f32,
    pub(crate) max_health: f32,
    pub(crate) speed: f32,
    pub(crate) damage: f32,
    pub(crate) armor: f32,
    pub(crate) regeneration: f32,
    pub(crate) breaks_blocks: bool,
    pub(crate) path: VecDeque<PathStep>,
    pub(crate) path_needed: bool,
    /// Counts down; a replan is requested when it reaches zero.
    pub(crate) replan_cooldown: Duration,
    pub(crate) stuck: Duration,
    pub(crate) last_position: Position,
    pub(crate) jump: Option<JumpState>,
    pub(crate) attack_cell: Option<CellCoord>,
    pub(crate) eat_timer: Duration,
    pub(crate) chew_timer: Duration,
    pub(crate) upgrade_timer: Duration,
    pub(crate) reached_base: bool,
}

impl Zombie {
    pub(crate) fn spawn(id: ZombieId, kind: ZombieKind, loadout: ZombieLoadout, at: Position) -> Self {
        Self {
            id,
            kind,
            position: at,
            heading: 0.0,
            health: loadout.health,
            max_health: loadout.health,
            speed: loadout.speed,
            damage: loadout.damage,
            armor: loadout.armor,
            regeneration: loadout.regeneration,
            breaks_blocks: loadout.breaks_blocks,
            path: VecDeque::new(),
            path_needed: true,
            replan_cooldown: Duration::ZERO,
            stuck: Duration::ZERO,
            last_position: at,
            jump: None,
            attack_cell: None,
            eat_timer: Duration::ZERO,
            chew_timer: Duration::ZERO,
            upgrade_timer: Duration::ZERO,
            reached_base: false,
        }
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Latches the path request so the event fires once per need.
    pub(crate) fn mark_path_needed(&mut self) -> bool {
        let was_needed = self.path_needed;
        self.path_needed = true;
        !was_needed
    }

    pub(crate) fn assign_path(&mut self, path: Vec<PathStep>, replan_cooldown: Duration) -> bool {
        if path.is_empty() {
            return false;
        }

        self.path = path.into();
        self.path_needed = false;
        self.replan_cooldown = replan_cooldown;
        self.stuck = Duration::ZERO;
        true
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) position: Position,
    pub(crate) altitude: f32,
    /// Unit direction toward the predicted impact point, fixed at fire time.
    pub(crate) direction: (f32, f32),
    pub(crate) damage: f32,
    pub(crate) destroyed: bool,
}

impl Projectile {
    pub(crate) fn launch(id: ProjectileId, from: Position, toward: Position, damage: f32) -> Self {
        let dx = toward.x() - from.x();
        let dz = toward.z() - from.z();
        let length = (dx * dx + dz * dz).sqrt().max(f32::EPSILON);
        Self {
            id,
            position: from,
            altitude: 1.0,
            direction: (dx / length, dz / length),
            damage,
            destroyed: false,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Block {
    pub(crate) id: BlockId,
    pub(crate) kind: BlockKind,
    pub(crate) cell: CellCoord,
    pub(crate) durability: f32,
}

impl Block {
    pub(crate) fn new(id: BlockId, kind: BlockKind, cell: CellCoord) -> Self {
        Self {
            id,
            kind,
            cell,
            durability: kind.stats().durability,
        }
    }
}
