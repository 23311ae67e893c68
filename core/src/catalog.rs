//! Static unit catalogs and session settings.
//!
//! Everything in this module is pure data: the simulation derives behaviour
//! from capability blocks (`cannon`, `economy`, `fuse`) instead of matching
//! on display names, and adapters may override [`GameSettings`] before a
//! session starts.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Closed set of plant kinds available for placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlantKind {
    /// Single-target shooter that fires projectiles at zombies in range.
    Peashooter,
    /// Economy plant that periodically produces sun.
    Sunflower,
    /// Durable wall that blocks paths and taunts zombies into attacking it.
    WallNut,
    /// Fuse plant that detonates after a delay or when a zombie comes close.
    CherryBomb,
}

impl PlantKind {
    /// Every plant kind in catalog order, matching the selection indices
    /// presented to players.
    pub const ALL: [PlantKind; 4] = [
        PlantKind::Peashooter,
        PlantKind::Sunflower,
        PlantKind::WallNut,
        PlantKind::CherryBomb,
    ];

    /// Display name used by presentation adapters.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Peashooter => "peashooter",
            Self::Sunflower => "sunflower",
            Self::WallNut => "wall-nut",
            Self::CherryBomb => "cherry bomb",
        }
    }

    /// Catalog stats for the kind.
    #[must_use]
    pub const fn stats(self) -> &'static PlantStats {
        match self {
            Self::Peashooter => &PEASHOOTER,
            Self::Sunflower => &SUNFLOWER,
            Self::WallNut => &WALL_NUT,
            Self::CherryBomb => &CHERRY_BOMB,
        }
    }

    /// Reports whether zombies must path around this plant.
    #[must_use]
    pub const fn blocks_path(self) -> bool {
        self.stats().blocks_path
    }
}

/// Catalog entry describing one plant kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlantStats {
    /// Sun cost deducted on placement.
    pub cost: u32,
    /// Hit points the plant starts with.
    pub health: f32,
    /// Projectile attack capability, if the kind has one.
    pub cannon: Option<CannonSpec>,
    /// Sun production capability, if the kind has one.
    pub economy: Option<EconomySpec>,
    /// Detonation capability, if the kind has one.
    pub fuse: Option<FuseSpec>,
    /// Extra attack-priority weight the plant projects at zombies.
    pub taunt_level: u32,
    /// Whether the plant is a pathfinding obstacle.
    pub blocks_path: bool,
}

/// Projectile attack parameters for cannon-capable plants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CannonSpec {
    /// Damage dealt per projectile before armor mitigation.
    pub damage: f32,
    /// Targeting radius in cells.
    pub range: f32,
    /// Shots per second.
    pub fire_rate: f32,
}

impl CannonSpec {
    /// Cooldown between shots derived from the fire rate.
    #[must_use]
    pub fn fire_period(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.fire_rate)
    }
}

/// Sun production parameters for economy plants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EconomySpec {
    /// Sun granted per production cycle.
    pub sun_production: u32,
    /// Time between production cycles.
    pub interval: Duration,
}

/// Detonation parameters for fuse plants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FuseSpec {
    /// Damage dealt to every zombie inside the blast radius.
    pub damage: f32,
    /// Blast radius in cells.
    pub range: f32,
    /// Delay before the plant detonates on its own.
    pub delay: Duration,
}

const PEASHOOTER: PlantStats = PlantStats {
    cost: 100,
    health: 150.0,
    cannon: Some(CannonSpec {
        damage: 20.0,
        range: 3.0,
        fire_rate: 1.5,
    }),
    economy: None,
    fuse: None,
    taunt_level: 0,
    blocks_path: false,
};

const SUNFLOWER: PlantStats = PlantStats {
    cost: 50,
    health: 100.0,
    cannon: None,
    economy: Some(EconomySpec {
        sun_production: 25,
        interval: Duration::from_secs(3),
    }),
    fuse: None,
    taunt_level: 0,
    blocks_path: false,
};

const WALL_NUT: PlantStats = PlantStats {
    cost: 50,
    health: 500.0,
    cannon: None,
    economy: None,
    fuse: None,
    taunt_level: 10,
    blocks_path: true,
};

const CHERRY_BOMB: PlantStats = PlantStats {
    cost: 150,
    health: 80.0,
    cannon: None,
    economy: None,
    fuse: Some(FuseSpec {
        damage: 100.0,
        range: 2.0,
        delay: Duration::from_secs(3),
    }),
    taunt_level: 0,
    blocks_path: true,
};

/// Closed set of zombie kinds the wave director can spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZombieKind {
    /// Baseline zombie.
    Walker,
    /// Slow, sturdy digger.
    Miner,
    /// Fast, fragile zombie carrying a heavy payload.
    Bomber,
}

impl ZombieKind {
    /// Every zombie kind in catalog order.
    pub const ALL: [ZombieKind; 3] = [ZombieKind::Walker, ZombieKind::Miner, ZombieKind::Bomber];

    /// Display name used by presentation adapters.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Walker => "walker",
            Self::Miner => "miner",
            Self::Bomber => "bomber",
        }
    }

    /// Catalog base stats for the kind, before wave scaling.
    #[must_use]
    pub const fn stats(self) -> &'static ZombieStats {
        match self {
            Self::Walker => &WALKER,
            Self::Miner => &MINER,
            Self::Bomber => &BOMBER,
        }
    }
}

/// Catalog entry describing one zombie kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZombieStats {
    /// Hit points before wave scaling.
    pub health: f32,
    /// Movement speed in cells per second before wave scaling.
    pub speed: f32,
    /// Damage dealt per bite, and to the base on contact.
    pub damage: f32,
    /// Threat weight plants add when scoring this kind as a target.
    pub threat_bonus: f32,
}

const WALKER: ZombieStats = ZombieStats {
    health: 60.0,
    speed: 0.5,
    damage: 10.0,
    threat_bonus: 10.0,
};

const MINER: ZombieStats = ZombieStats {
    health: 80.0,
    speed: 0.3,
    damage: 15.0,
    threat_bonus: 20.0,
};

const BOMBER: ZombieStats = ZombieStats {
    health: 40.0,
    speed: 0.8,
    damage: 50.0,
    threat_bonus: 40.0,
};

/// Closed set of terrain block kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    /// Cheap earthen block.
    Dirt,
    /// Mid-tier stone block.
    Stone,
    /// Expensive iron block that zombies cannot jump over.
    Iron,
}

impl BlockKind {
    /// Every block kind in catalog order.
    pub const ALL: [BlockKind; 3] = [BlockKind::Dirt, BlockKind::Stone, BlockKind::Iron];

    /// Display name used by presentation adapters.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dirt => "dirt",
            Self::Stone => "stone",
            Self::Iron => "iron",
        }
    }

    /// Catalog stats for the kind.
    #[must_use]
    pub const fn stats(self) -> &'static BlockStats {
        match self {
            Self::Dirt => &DIRT,
            Self::Stone => &STONE,
            Self::Iron => &IRON,
        }
    }

    /// Reports whether a zombie may vault over this block.
    #[must_use]
    pub const fn jumpable(self) -> bool {
        !matches!(self, Self::Iron)
    }
}

/// Catalog entry describing one block kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockStats {
    /// Material cost deducted on placement.
    pub cost: u32,
    /// Hit points of the block against chewing zombies.
    pub durability: f32,
}

const DIRT: BlockStats = BlockStats {
    cost: 1,
    durability: 50.0,
};

const STONE: BlockStats = BlockStats {
    cost: 3,
    durability: 100.0,
};

const IRON: BlockStats = BlockStats {
    cost: 5,
    durability: 200.0,
};

/// Session-wide tuning values loaded once at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Sun the player starts with.
    pub initial_sun: u32,
    /// Building materials the player starts with.
    pub initial_materials: u32,
    /// Hit points of the base.
    pub base_health: f32,
    /// Length of the day phase.
    pub day_duration: Duration,
    /// Length of the night phase.
    pub night_duration: Duration,
    /// Reserved pacing knob carried from the original catalog.
    pub wave_interval: Duration,
    /// Surviving past this wave wins the session.
    pub max_waves: u32,
    /// Side length of the square world in cells.
    pub world_size: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            initial_sun: 200,
            initial_materials: 50,
            base_health: 100.0,
            day_duration: Duration::from_secs(15),
            night_duration: Duration::from_secs(20),
            wave_interval: Duration::from_secs(10),
            max_waves: 10,
            world_size: 20,
        }
    }
}

/// Presentation label for the difficulty tier a wave belongs to.
#[must_use]
pub const fn difficulty_label(wave: u32) -> &'static str {
    match wave {
        0..=3 => "normal",
        4..=6 => "hard",
        7..=9 => "expert",
        _ => "nightmare",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_costs_match_reference_data() {
        assert_eq!(PlantKind::Peashooter.stats().cost, 100);
        assert_eq!(PlantKind::Sunflower.stats().cost, 50);
        assert_eq!(PlantKind::WallNut.stats().cost, 50);
        assert_eq!(PlantKind::CherryBomb.stats().cost, 150);
        assert_eq!(BlockKind::Dirt.stats().cost, 1);
        assert_eq!(BlockKind::Stone.stats().cost, 3);
        assert_eq!(BlockKind::Iron.stats().cost, 5);
    }

    #[test]
    fn only_wall_and_fuse_plants_block_paths() {
        assert!(!PlantKind::Peashooter.blocks_path());
        assert!(!PlantKind::Sunflower.blocks_path());
        assert!(PlantKind::WallNut.blocks_path());
        assert!(PlantKind::CherryBomb.blocks_path());
    }

    #[test]
    fn iron_blocks_cannot_be_jumped() {
        assert!(BlockKind::Dirt.jumpable());
        assert!(BlockKind::Stone.jumpable());
        assert!(!BlockKind::Iron.jumpable());
    }

    #[test]
    fn fire_period_is_inverse_of_fire_rate() {
        let cannon = PlantKind::Peashooter
            .stats()
            .cannon
            .expect("peashooter has a cannon");
        let period = cannon.fire_period().as_secs_f32();
        assert!((period - 1.0 / 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn difficulty_labels_cover_all_tiers() {
        assert_eq!(difficulty_label(1), "normal");
        assert_eq!(difficulty_label(4), "hard");
        assert_eq!(difficulty_label(9), "expert");
        assert_eq!(difficulty_label(10), "nightmare");
    }
}
