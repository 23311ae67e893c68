#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns target assignments into firing commands.
//!
//! Cannon plants fire once their cooldown has elapsed; fuse plants detonate
//! the moment anything wanders into their blast radius. The world re-validates
//! every handle before acting, so stale assignments are harmless.

use garden_defence_core::{Command, PlantId, PlantSnapshot, PlantTarget, PlantView};

/// Plant combat system that queues firing commands for ready plants.
#[derive(Debug, Default)]
pub struct PlantCombat {
    scratch: Vec<Command>,
}

impl PlantCombat {
    /// Creates a new combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `FireProjectile` and `Detonate` commands for assigned plants.
    pub fn handle(&mut self, targets: &[PlantTarget], plants: &PlantView, out: &mut Vec<Command>) {
        if targets.is_empty() {
            return;
        }

        self.scratch.clear();

        for target in targets {
            let Some(plant) = find_plant(plants, target.plant) else {
                continue;
            };
            let stats = plant.kind.stats();

            if stats.cannon.is_some() {
                if plant.ready_in.is_zero() {
                    self.scratch.push(Command::FireProjectile {
                        plant: target.plant,
                        target: target.zombie,
                    });
                }
            } else if stats.fuse.is_some() {
                self.scratch.push(Command::Detonate {
                    plant: target.plant,
                });
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}

fn find_plant(plants: &PlantView, id: PlantId) -> Option<&PlantSnapshot> {
    plants.iter().find(|plant| plant.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_defence_core::{CellCoord, PlantKind, Position, ZombieId};
    use std::time::Duration;

    fn snapshot(id: u32, kind: PlantKind, ready_in: Duration) -> PlantSnapshot {
        PlantSnapshot {
            id: PlantId::new(id),
            kind,
            cell: CellCoord::new(0, 0),
            health: kind.stats().health,
            max_health: kind.stats().health,
            ready_in,
        }
    }

    fn target(plant: u32, zombie: u32) -> PlantTarget {
        PlantTarget {
            plant: PlantId::new(plant),
            zombie: ZombieId::new(zombie),
            plant_position: Position::new(0.0, 0.0),
            zombie_position: Position::new(1.0, 0.0),
        }
    }

    #[test]
    fn ready_cannons_fire_at_their_assignment() {
        let mut system = PlantCombat::new();
        let plants = PlantView::from_snapshots(vec![
            snapshot(1, PlantKind::Peashooter, Duration::ZERO),
            snapshot(2, PlantKind::Peashooter, Duration::from_millis(400)),
        ]);
        let targets = vec![target(1, 7), target(2, 8)];
        let mut out = Vec::new();

        system.handle(&targets, &plants, &mut out);

        assert_eq!(
            out,
            vec![Command::FireProjectile {
                plant: PlantId::new(1),
                target: ZombieId::new(7),
            }],
        );
    }

    #[test]
    fn fuse_plants_detonate_regardless_of_cooldown() {
        let mut system = PlantCombat::new();
        let plants = PlantView::from_snapshots(vec![snapshot(
            3,
            PlantKind::CherryBomb,
            Duration::from_secs(1),
        )]);
        let targets = vec![target(3, 2)];
        let mut out = Vec::new();

        system.handle(&targets, &plants, &mut out);

        assert_eq!(
            out,
            vec![Command::Detonate {
                plant: PlantId::new(3),
            }],
        );
    }

    #[test]
    fn assignments_for_missing_plants_are_skipped() {
        let mut system = PlantCombat::new();
        let plants = PlantView::from_snapshots(Vec::new());
        let targets = vec![target(9, 1)];
        let mut out = Vec::new();

        system.handle(&targets, &plants, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn economy_assignments_produce_nothing() {
        let mut system = PlantCombat::new();
        let plants =
            PlantView::from_snapshots(vec![snapshot(4, PlantKind::Sunflower, Duration::ZERO)]);
        let targets = vec![target(4, 1)];
        let mut out = Vec::new();

        system.handle(&targets, &plants, &mut out);
        assert!(out.is_empty());
    }
}
