#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic zombie intelligence: path planning and plant target choice.
//!
//! Paths are straight-line interpolations from the zombie toward the base,
//! clipped to the grid. A step landing on an obstacle takes the first clear
//! neighbour as a local detour, or is flagged as a vault when the obstacle is
//! a jumpable block. Plant targets are chosen on a fixed cadence by scanning
//! the cells around each zombie with a taunt-aware priority.

use std::time::Duration;

use garden_defence_core::{CellCoord, Command, Event, PathStep, PlantKind, ZombieView};

const SCAN_PERIOD: Duration = Duration::from_millis(500);
const SCAN_RADIUS: f32 = 1.5;
const WALL_SHORTCUT_DISTANCE: f32 = 1.0;
const HEALTHY_TARGET_BONUS: f32 = 10.0;
const DISTANCE_PENALTY: f32 = 10.0;

/// Neighbour probe order used when detouring around an obstacle.
const DETOUR_ORDER: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// Cells probed when searching for a plant to attack, nearest first.
const SCAN_OFFSETS: [(i32, i32); 9] = [
    (0, 0),
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// What occupies a cell, from a pathing zombie's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellProbe {
    /// The cell is traversable.
    Clear,
    /// The cell is obstructed. Out-of-bounds cells must report this too.
    Blocked {
        /// Whether the obstruction is a block a zombie may vault over.
        jumpable: bool,
    },
}

/// Summary of a plant a zombie might attack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlantProfile {
    /// Catalog kind of the plant.
    pub kind: PlantKind,
    /// Current health divided by maximum health.
    pub health_ratio: f32,
}

/// Pure system that reacts to world events and emits zombie commands.
#[derive(Debug, Default)]
pub struct ZombieAi {
    since_scan: Duration,
    primed: bool,
}

impl ZombieAi {
    /// Creates a new zombie intelligence system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes world events and immutable views to emit zombie commands.
    ///
    /// `probe` reports obstructions (and must treat out-of-bounds cells as
    /// blocked); `plant_at` mirrors the world's plant-by-cell query.
    pub fn handle<O, P>(
        &mut self,
        events: &[Event],
        zombies: &ZombieView,
        base: CellCoord,
        half: i32,
        probe: O,
        plant_at: P,
        out: &mut Vec<Command>,
    ) where
        O: Fn(CellCoord) -> CellProbe,
        P: Fn(CellCoord) -> Option<PlantProfile>,
    {
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => {
                    self.since_scan = self.since_scan.saturating_add(*dt);
                }
                Event::ZombiePathNeeded { zombie } => {
                    let Some(snapshot) = zombies.iter().find(|candidate| candidate.id == *zombie)
                    else {
                        continue;
                    };
                    let path = plan_path(snapshot.position.cell(), base, half, &probe);
                    if !path.is_empty() {
                        out.push(Command::SetZombiePath {
                            zombie: *zombie,
                            path,
                        });
                    }
                }
                _ => {}
            }
        }

        if self.primed && self.since_scan < SCAN_PERIOD {
            return;
        }
        self.primed = true;
        self.since_scan = Duration::ZERO;

        for zombie in zombies.iter() {
            let target = select_plant_target(zombie.position.cell(), &plant_at);
            out.push(Command::SetZombieTarget {
                zombie: zombie.id,
                cell: target,
            });
        }
    }
}

/// Plans a straight-line path toward the base with local detours.
#[must_use]
pub fn plan_path<O>(from: CellCoord, base: CellCoord, half: i32, probe: &O) -> Vec<PathStep>
where
    O: Fn(CellCoord) -> CellProbe,
{
    let dx = base.x() - from.x();
    let dz = base.z() - from.z();
    let steps = dx.abs().max(dz.abs());

    let mut path = Vec::with_capacity(usize::try_from(steps).unwrap_or(0) + 1);

    for i in 0..=steps {
        let t = if steps == 0 {
            0.0
        } else {
            i as f32 / steps as f32
        };
        let x = clamp_axis((from.x() as f32 + dx as f32 * t).floor() as i32, half);
        let z = clamp_axis((from.z() as f32 + dz as f32 * t).floor() as i32, half);
        let cell = CellCoord::new(x, z);

        match probe(cell) {
            CellProbe::Clear => path.push(PathStep::walk(cell)),
            CellProbe::Blocked { jumpable } => {
                if let Some(detour) = first_clear_neighbour(cell, probe) {
                    path.push(PathStep::walk(detour));
                } else if jumpable {
                    path.push(PathStep::vault(cell));
                }
            }
        }
    }

    path
}

fn clamp_axis(value: i32, half: i32) -> i32 {
    value.clamp(-half, half - 1)
}

fn first_clear_neighbour<O>(cell: CellCoord, probe: &O) -> Option<CellCoord>
where
    O: Fn(CellCoord) -> CellProbe,
{
    DETOUR_ORDER
        .iter()
        .map(|(dx, dz)| cell.offset(*dx, *dz))
        .find(|candidate| probe(*candidate) == CellProbe::Clear)
}

fn select_plant_target<P>(origin: CellCoord, plant_at: &P) -> Option<CellCoord>
where
    P: Fn(CellCoord) -> Option<PlantProfile>,
{
    let mut best: Option<(f32, CellCoord)> = None;

    for (dx, dz) in SCAN_OFFSETS {
        let distance = ((dx * dx + dz * dz) as f32).sqrt();
        if distance > SCAN_RADIUS {
            continue;
        }

        let cell = origin.offset(dx, dz);
        let Some(profile) = plant_at(cell) else {
            continue;
        };

        let mut priority = base_priority(profile.kind);
        if profile.health_ratio > 0.8 {
            priority += HEALTHY_TARGET_BONUS;
        }
        priority -= distance * DISTANCE_PENALTY;

        let improved = match best {
            Some((best_priority, _)) => priority > best_priority,
            None => true,
        };
        if improved {
            best = Some((priority, cell));

            // A wall this close always wins; stop scanning.
            if is_wall(profile.kind) && distance <= WALL_SHORTCUT_DISTANCE {
                break;
            }
        }
    }

    best.map(|(_, cell)| cell)
}

fn base_priority(kind: PlantKind) -> f32 {
    let stats = kind.stats();
    if stats.taunt_level > 0 {
        100.0 + stats.taunt_level as f32 * 10.0
    } else if stats.fuse.is_some() {
        90.0
    } else if stats.cannon.is_some() {
        80.0
    } else if stats.economy.is_some() {
        60.0
    } else {
        50.0
    }
}

fn is_wall(kind: PlantKind) -> bool {
    kind.stats().taunt_level > 0
}
