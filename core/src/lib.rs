#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Garden Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

mod catalog;

pub use catalog::{
    difficulty_label, BlockKind, BlockStats, CannonSpec, EconomySpec, FuseSpec, GameSettings,
    PlantKind, PlantStats, ZombieKind, ZombieStats,
};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Garden Defence.";

/// Horizontal speed of every projectile in cells per second.
pub const PROJECTILE_SPEED: f32 = 8.0;

/// Unique identifier assigned to a plant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlantId(u32);

impl PlantId {
    /// Creates a new plant identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a zombie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZombieId(u32);

impl ZombieId {
    /// Creates a new zombie identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a terrain block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(u32);

impl BlockId {
    /// Creates a new block identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell.
///
/// Both axes run over `[-size/2, size/2)` with the base at the origin, so
/// coordinates are signed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: i32,
    z: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Signed column index of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Signed row index of the cell.
    #[must_use]
    pub const fn z(&self) -> i32 {
        self.z
    }

    /// Returns the cell displaced by the provided deltas.
    #[must_use]
    pub const fn offset(&self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// Continuous position at the centre of the cell.
    #[must_use]
    pub const fn center(&self) -> Position {
        Position {
            x: self.x as f32,
            z: self.z as f32,
        }
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub const fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.x.abs_diff(other.x) + self.z.abs_diff(other.z)
    }
}

/// Continuous ground-plane position expressed in cell units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f32,
    z: f32,
}

impl Position {
    /// Creates a new position from explicit coordinates.
    #[must_use]
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Coordinate along the x axis.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Coordinate along the z axis.
    #[must_use]
    pub const fn z(&self) -> f32 {
        self.z
    }

    /// Euclidean distance to another position.
    #[must_use]
    pub fn distance_to(&self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Grid cell containing the position.
    #[must_use]
    pub fn cell(&self) -> CellCoord {
        CellCoord::new(self.x.floor() as i32, self.z.floor() as i32)
    }
}

/// Single waypoint within a zombie path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathStep {
    /// Cell the zombie should walk to.
    pub cell: CellCoord,
    /// Whether reaching this cell requires vaulting over an obstacle.
    pub jump: bool,
}

impl PathStep {
    /// Creates a plain walking step toward the provided cell.
    #[must_use]
    pub const fn walk(cell: CellCoord) -> Self {
        Self { cell, jump: false }
    }

    /// Creates a jump step over an obstacle on the provided cell.
    #[must_use]
    pub const fn vault(cell: CellCoord) -> Self {
        Self { cell, jump: true }
    }
}

/// Which cell slot a placement request targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementSlot {
    /// Place the currently selected plant.
    Plant,
    /// Place the currently selected block.
    Block,
}

/// Current catalog selection held by the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    /// Nothing is selected.
    #[default]
    None,
    /// A plant catalog entry is selected.
    Plant(usize),
    /// A block catalog entry is selected.
    Block(usize),
}

/// Phase of the day/night cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Daytime: preparation, ambient sun, no spawns.
    Day,
    /// Night: the active wave assaults the base.
    Night,
}

/// Simulation speed multiplier selected by the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameSpeed {
    /// Real-time simulation.
    #[default]
    Normal,
    /// Double-speed simulation.
    Double,
}

impl GameSpeed {
    /// Scale factor applied to tick deltas.
    #[must_use]
    pub const fn factor(self) -> f32 {
        match self {
            Self::Normal => 1.0,
            Self::Double => 2.0,
        }
    }

    /// The other speed setting.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Double,
            Self::Double => Self::Normal,
        }
    }
}

/// Terminal result of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Every wave was survived.
    Won {
        /// Number of waves cleared.
        waves: u32,
    },
    /// The base was destroyed.
    Lost {
        /// Wave that was being fought when the base fell.
        final_wave: u32,
    },
}

/// Reasons a placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// No catalog entry is selected for the requested slot.
    InvalidSelection,
    /// The requested cell lies outside the world grid.
    InvalidPosition,
    /// The relevant cell slot already holds an entity.
    Occupied,
    /// The resource ledger cannot cover the catalog cost.
    InsufficientResources,
}

impl PlacementError {
    /// Whether presentation layers should surface the rejection to the
    /// player. Out-of-grid clicks are ignored silently.
    #[must_use]
    pub const fn user_visible(self) -> bool {
        !matches!(self, Self::InvalidPosition)
    }
}

/// Origin of a sun grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SunSource {
    /// Ambient daytime drip.
    Sky,
    /// Production by an economy plant.
    Plant(PlantId),
}

/// Cosmetic effect categories forwarded to renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Flash at a cannon muzzle when it fires.
    MuzzleFlash,
    /// Expanding ring where a fuse plant detonated.
    Explosion,
    /// Sparkle above an economy plant that produced sun.
    SunSparkle,
    /// Brief tint on a zombie that took damage.
    DamageFlash,
    /// Aura on zombies buffed by a milestone wave.
    Empowerment,
}

/// Fully-scaled stat block attached to a spawn command by the wave director.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZombieLoadout {
    /// Hit points after wave scaling.
    pub health: f32,
    /// Movement speed after wave scaling, in cells per second.
    pub speed: f32,
    /// Damage per bite and per base contact after wave scaling.
    pub damage: f32,
    /// Fraction of incoming projectile damage absorbed, `0.0..1.0`.
    pub armor: f32,
    /// Hit points regenerated per second, zero when absent.
    pub regeneration: f32,
    /// Whether the zombie chews through obstructing blocks.
    pub breaks_blocks: bool,
}

impl ZombieLoadout {
    /// Builds the unscaled loadout for a kind straight from the catalog.
    #[must_use]
    pub fn base(kind: ZombieKind) -> Self {
        let stats = kind.stats();
        Self {
            health: stats.health,
            speed: stats.speed,
            damage: stats.damage,
            armor: 0.0,
            regeneration: 0.0,
            breaks_blocks: false,
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Wall-clock duration elapsed since the previous tick, before
        /// game-speed scaling.
        dt: Duration,
    },
    /// Selects a plant catalog entry, clearing any block selection.
    SelectPlant {
        /// Index into [`PlantKind::ALL`].
        index: usize,
    },
    /// Selects a block catalog entry, clearing any plant selection.
    SelectBlock {
        /// Index into [`BlockKind::ALL`].
        index: usize,
    },
    /// Clears the current selection.
    ClearSelection,
    /// Attempts to place the current selection at a cell.
    Place {
        /// Target cell for the placement.
        cell: CellCoord,
        /// Which slot (and therefore which selection) to place.
        slot: PlacementSlot,
    },
    /// Toggles the pause flag.
    TogglePause,
    /// Toggles between normal and double speed.
    ToggleSpeed,
    /// Tears down the session and rebuilds the initial state.
    Restart,
    /// Spawns a zombie with the provided loadout at a boundary position.
    SpawnZombie {
        /// Kind of zombie to spawn.
        kind: ZombieKind,
        /// Fully-scaled stats computed by the wave director.
        loadout: ZombieLoadout,
        /// World position the zombie enters at.
        at: Position,
    },
    /// Applies a one-time buff to every currently alive zombie.
    EmpowerZombies {
        /// Multiplier applied to current and maximum health.
        health_factor: f32,
        /// Multiplier applied to speed.
        speed_factor: f32,
    },
    /// Replaces a zombie's path with freshly planned waypoints.
    SetZombiePath {
        /// Identifier of the zombie receiving the path.
        zombie: ZombieId,
        /// Ordered waypoints toward the base.
        path: Vec<PathStep>,
    },
    /// Assigns or clears a zombie's plant attack target.
    SetZombieTarget {
        /// Identifier of the zombie receiving the target.
        zombie: ZombieId,
        /// Cell holding the plant to attack, or `None` to resume pathing.
        cell: Option<CellCoord>,
    },
    /// Requests that a ready cannon plant fire at a zombie.
    FireProjectile {
        /// Plant doing the firing.
        plant: PlantId,
        /// Zombie the shot is aimed at.
        target: ZombieId,
    },
    /// Requests that a fuse plant detonate immediately.
    Detonate {
        /// Plant to detonate.
        plant: PlantId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Simulated time that elapsed, after game-speed scaling.
        dt: Duration,
    },
    /// Announces a day/night transition.
    PhaseChanged {
        /// Phase that became active.
        phase: Phase,
        /// Wave counter at the moment of the transition.
        wave: u32,
    },
    /// Confirms that a night was survived and the wave counter advanced.
    WaveCompleted {
        /// Wave that was cleared.
        wave: u32,
    },
    /// The session ended in victory.
    GameWon {
        /// Number of waves survived.
        waves: u32,
    },
    /// The session ended in defeat.
    GameLost {
        /// Wave that was being fought when the base fell.
        final_wave: u32,
    },
    /// The world was torn down and rebuilt from its configuration.
    WorldReset,
    /// Sun was added to the ledger.
    SunGranted {
        /// Amount granted.
        amount: u32,
        /// Ledger total after the grant.
        total: u32,
        /// Where the sun came from.
        source: SunSource,
    },
    /// Confirms that a plant was placed.
    PlantPlaced {
        /// Identifier assigned to the plant.
        plant: PlantId,
        /// Catalog kind of the plant.
        kind: PlantKind,
        /// Cell the plant occupies.
        cell: CellCoord,
    },
    /// Confirms that a plant was destroyed and its cell cleared.
    PlantDestroyed {
        /// Identifier of the removed plant.
        plant: PlantId,
        /// Catalog kind of the plant.
        kind: PlantKind,
        /// Cell the plant occupied.
        cell: CellCoord,
    },
    /// Confirms that a block was placed.
    BlockPlaced {
        /// Identifier assigned to the block.
        block: BlockId,
        /// Catalog kind of the block.
        kind: BlockKind,
        /// Cell the block occupies.
        cell: CellCoord,
    },
    /// Confirms that a block was chewed through and removed.
    BlockBroken {
        /// Identifier of the removed block.
        block: BlockId,
        /// Cell the block occupied.
        cell: CellCoord,
    },
    /// Reports that a placement request was rejected.
    PlacementRejected {
        /// Slot the request targeted.
        slot: PlacementSlot,
        /// Cell the request targeted.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a zombie entered the world.
    ZombieSpawned {
        /// Identifier assigned to the zombie.
        zombie: ZombieId,
        /// Catalog kind of the zombie.
        kind: ZombieKind,
        /// Position the zombie entered at.
        at: Position,
    },
    /// Confirms that a zombie died away from the base.
    ZombieDied {
        /// Identifier of the dead zombie.
        zombie: ZombieId,
        /// Materials awarded for the kill.
        reward: u32,
    },
    /// Confirms that a zombie struck the base and was consumed.
    ZombieReachedBase {
        /// Identifier of the zombie.
        zombie: ZombieId,
        /// Damage dealt to the base.
        damage: f32,
        /// Base hit points remaining after the strike.
        base_health: f32,
    },
    /// Indicates that the world awaits a fresh path for a zombie.
    ZombiePathNeeded {
        /// Identifier of the zombie needing a path.
        zombie: ZombieId,
    },
    /// Confirms that a milestone buff was applied to living zombies.
    ZombiesEmpowered {
        /// Number of zombies that received the buff.
        count: usize,
    },
    /// Confirms that a cannon plant fired.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Plant that fired.
        plant: PlantId,
        /// Zombie the shot was aimed at.
        target: ZombieId,
    },
    /// Confirms that a projectile struck a zombie.
    ProjectileHit {
        /// Identifier of the projectile.
        projectile: ProjectileId,
        /// Zombie that was struck.
        zombie: ZombieId,
        /// Damage applied after armor mitigation.
        damage: f32,
    },
    /// Confirms that a projectile was reclaimed without hitting anything.
    ProjectileExpired {
        /// Identifier of the projectile.
        projectile: ProjectileId,
    },
    /// Announces a cosmetic effect for renderers.
    EffectTriggered {
        /// Category of the effect.
        kind: EffectKind,
        /// World position of the effect.
        at: Position,
    },
}

/// Target assignment computed by the plant targeting system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlantTarget {
    /// Plant the assignment belongs to.
    pub plant: PlantId,
    /// Zombie chosen as the target.
    pub zombie: ZombieId,
    /// Position of the plant, for targeting beams.
    pub plant_position: Position,
    /// Position of the zombie at assignment time.
    pub zombie_position: Position,
}

/// Immutable representation of a single plant's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlantSnapshot {
    /// Unique identifier assigned to the plant.
    pub id: PlantId,
    /// Catalog kind of the plant.
    pub kind: PlantKind,
    /// Cell the plant occupies.
    pub cell: CellCoord,
    /// Current hit points.
    pub health: f32,
    /// Hit points the plant was placed with.
    pub max_health: f32,
    /// Time until the cannon may fire again; zero for ready or cannon-less
    /// plants.
    pub ready_in: Duration,
}

/// Read-only snapshot describing all plants in the garden.
#[derive(Clone, Debug, Default)]
pub struct PlantView {
    snapshots: Vec<PlantSnapshot>,
}

impl PlantView {
    /// Creates a new plant view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PlantSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &PlantSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<PlantSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single zombie's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZombieSnapshot {
    /// Unique identifier assigned to the zombie.
    pub id: ZombieId,
    /// Catalog kind of the zombie.
    pub kind: ZombieKind,
    /// Continuous world position.
    pub position: Position,
    /// Height above the ground plane, non-zero while vaulting an obstacle.
    pub altitude: f32,
    /// Facing angle in radians, used for projectile lead prediction.
    pub heading: f32,
    /// Movement speed in cells per second.
    pub speed: f32,
    /// Current hit points.
    pub health: f32,
    /// Hit-point ceiling, grown by tank upgrades.
    pub max_health: f32,
}

/// Read-only snapshot describing all zombies in the world.
#[derive(Clone, Debug, Default)]
pub struct ZombieView {
    snapshots: Vec<ZombieSnapshot>,
}

impl ZombieView {
    /// Creates a new zombie view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ZombieSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ZombieSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ZombieSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single projectile used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Unique identifier assigned to the projectile.
    pub id: ProjectileId,
    /// Continuous ground-plane position.
    pub position: Position,
    /// Height above the ground plane.
    pub altitude: f32,
}

/// Read-only snapshot describing all projectiles in flight.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single block used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockSnapshot {
    /// Unique identifier assigned to the block.
    pub id: BlockId,
    /// Catalog kind of the block.
    pub kind: BlockKind,
    /// Cell the block occupies.
    pub cell: CellCoord,
    /// Remaining durability against chewing zombies.
    pub durability: f32,
}

/// Read-only snapshot describing all placed blocks.
#[derive(Clone, Debug, Default)]
pub struct BlockView {
    snapshots: Vec<BlockSnapshot>,
}

impl BlockView {
    /// Creates a new block view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<BlockSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &BlockSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<BlockSnapshot> {
        self.snapshots
    }
}

/// Read-only session summary pushed to interface layers at a throttled rate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    /// Sun currently banked.
    pub sun: u32,
    /// Building materials currently banked.
    pub materials: u32,
    /// Base hit points remaining.
    pub base_health: f32,
    /// Wave currently being fought or prepared for.
    pub wave: u32,
    /// Active phase of the day/night cycle.
    pub phase: Phase,
    /// Fraction of the active phase already elapsed, `0.0..=1.0`.
    pub time_progress: f32,
    /// Current catalog selection.
    pub selection: Selection,
    /// Whether the simulation is paused.
    pub paused: bool,
    /// Active speed setting.
    pub speed: GameSpeed,
    /// Zombies destroyed this session.
    pub zombies_killed: u32,
    /// Total simulated time this session.
    pub elapsed: Duration,
    /// Terminal result, once the session has ended.
    pub outcome: Option<Outcome>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::DeserializeOwned;

    #[test]
    fn manhattan_distance_spans_signed_coordinates() {
        let origin = CellCoord::new(-3, 2);
        let destination = CellCoord::new(1, -1);
        assert_eq!(origin.manhattan_distance(destination), 7);
        assert_eq!(destination.manhattan_distance(origin), 7);
    }

    #[test]
    fn position_cell_floors_toward_negative_infinity() {
        assert_eq!(Position::new(-0.2, 1.9).cell(), CellCoord::new(-1, 1));
        assert_eq!(Position::new(2.0, -3.1).cell(), CellCoord::new(2, -4));
    }

    #[test]
    fn game_speed_toggles_between_both_settings() {
        assert_eq!(GameSpeed::Normal.toggled(), GameSpeed::Double);
        assert_eq!(GameSpeed::Double.toggled(), GameSpeed::Normal);
        assert!((GameSpeed::Double.factor() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn invalid_position_rejections_are_silent() {
        assert!(!PlacementError::InvalidPosition.user_visible());
        assert!(PlacementError::Occupied.user_visible());
        assert!(PlacementError::InsufficientResources.user_visible());
        assert!(PlacementError::InvalidSelection.user_visible());
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: serde::Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn identifiers_round_trip_through_bincode() {
        assert_round_trip(&PlantId::new(7));
        assert_round_trip(&ZombieId::new(11));
        assert_round_trip(&ProjectileId::new(13));
        assert_round_trip(&BlockId::new(17));
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(-10, 9));
    }

    #[test]
    fn placement_error_round_trips_through_bincode() {
        assert_round_trip(&PlacementError::InsufficientResources);
    }

    #[test]
    fn settings_round_trip_through_bincode() {
        assert_round_trip(&GameSettings::default());
    }

    #[test]
    fn views_iterate_in_identifier_order() {
        let view = ZombieView::from_snapshots(vec![
            zombie_snapshot(4),
            zombie_snapshot(1),
            zombie_snapshot(2),
        ]);
        let ids: Vec<u32> = view.iter().map(|snapshot| snapshot.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    fn zombie_snapshot(id: u32) -> ZombieSnapshot {
        ZombieSnapshot {
            id: ZombieId::new(id),
            kind: ZombieKind::Walker,
            position: Position::new(0.0, 0.0),
            altitude: 0.0,
            heading: 0.0,
            speed: 0.5,
            health: 60.0,
            max_health: 60.0,
        }
    }
}
