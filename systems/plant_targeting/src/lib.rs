#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic plant targets from world snapshots.
//!
//! Cannon plants score every zombie inside their range with a weighted
//! heuristic and fire at the winner; fuse plants trigger on any zombie inside
//! their blast radius. Scanning runs on a fixed cadence rather than every
//! tick; between scans the cached assignments are replayed after dropping
//! entries whose zombie or plant has disappeared.

use std::time::Duration;

use garden_defence_core::{
    Event, PlantSnapshot, PlantTarget, PlantView, ZombieSnapshot, ZombieView, PROJECTILE_SPEED,
};

const SCAN_PERIOD: Duration = Duration::from_millis(200);

const CLOSENESS_WEIGHT: f32 = 50.0;
const LOW_HEALTH_BONUS: f32 = 30.0;
const MID_HEALTH_BONUS: f32 = 15.0;
const HIT_PROBABILITY_WEIGHT: f32 = 20.0;

/// Plant targeting system that reuses scratch buffers to avoid repeated
/// allocations.
#[derive(Debug, Default)]
pub struct PlantTargeting {
    since_scan: Duration,
    primed: bool,
    cache: Vec<PlantTarget>,
}

impl PlantTargeting {
    /// Creates a new targeting system with empty caches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes target assignments for the provided world snapshot.
    ///
    /// The output buffer is cleared before populating it with the latest
    /// assignments.
    pub fn handle(
        &mut self,
        events: &[Event],
        plants: &PlantView,
        zombies: &ZombieView,
        out: &mut Vec<PlantTarget>,
    ) {
        out.clear();

        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                self.since_scan = self.since_scan.saturating_add(*dt);
            }
        }

        if !self.primed || self.since_scan >= SCAN_PERIOD {
            self.since_scan = Duration::ZERO;
            self.primed = true;
            self.rescan(plants, zombies);
        } else {
            self.revalidate(plants, zombies);
        }

        out.extend_from_slice(&self.cache);
    }

    fn rescan(&mut self, plants: &PlantView, zombies: &ZombieView) {
        self.cache.clear();

        for plant in plants.iter() {
            let stats = plant.kind.stats();
            let range = match (stats.cannon, stats.fuse) {
                (Some(cannon), _) => cannon.range,
                (None, Some(fuse)) => fuse.range,
                (None, None) => continue,
            };

            if let Some(target) = select_target(plant, zombies, range) {
                self.cache.push(target);
            }
        }
    }

    fn revalidate(&mut self, plants: &PlantView, zombies: &ZombieView) {
        self.cache.retain(|assignment| {
            plants.iter().any(|plant| plant.id == assignment.plant)
                && zombies.iter().any(|zombie| zombie.id == assignment.zombie)
        });
    }
}

fn select_target(
    plant: &PlantSnapshot,
    zombies: &ZombieView,
    range: f32,
) -> Option<PlantTarget> {
    let origin = plant.cell.center();
    let mut best: Option<(f32, PlantTarget)> = None;

    for zombie in zombies.iter() {
        let distance = origin.distance_to(zombie.position);
        if distance > range {
            continue;
        }

        let score = score_candidate(zombie, distance, range);
        let candidate = PlantTarget {
            plant: plant.id,
            zombie: zombie.id,
            plant_position: origin,
            zombie_position: zombie.position,
        };

        // Strict comparison keeps the first-encountered zombie on ties;
        // the view iterates in identifier order.
        match &best {
            Some((best_score, _)) if score <= *best_score => {}
            _ => best = Some((score, candidate)),
        }
    }

    best.map(|(_, target)| target)
}

fn score_candidate(zombie: &ZombieSnapshot, distance: f32, range: f32) -> f32 {
    let mut score = (range - distance) / range * CLOSENESS_WEIGHT;

    let health_ratio = if zombie.max_health > 0.0 {
        zombie.health / zombie.max_health
    } else {
        0.0
    };
    if health_ratio < 0.3 {
        score += LOW_HEALTH_BONUS;
    } else if health_ratio < 0.6 {
        score += MID_HEALTH_BONUS;
    }

    score += zombie.kind.stats().threat_bonus;

    let lead = zombie.speed * (distance / PROJECTILE_SPEED);
    score += (1.0 - lead / 2.0).max(0.0) * HIT_PROBABILITY_WEIGHT;

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_defence_core::{
        CellCoord, PlantId, PlantKind, Position, ZombieId, ZombieKind,
    };

    fn plant(id: u32, kind: PlantKind, cell: (i32, i32)) -> PlantSnapshot {
        PlantSnapshot {
            id: PlantId::new(id),
            kind,
            cell: CellCoord::new(cell.0, cell.1),
            health: kind.stats().health,
            max_health: kind.stats().health,
            ready_in: Duration::ZERO,
        }
    }

    fn zombie(id: u32, kind: ZombieKind, at: (f32, f32)) -> ZombieSnapshot {
        let stats = kind.stats();
        ZombieSnapshot {
            id: ZombieId::new(id),
            kind,
            position: Position::new(at.0, at.1),
            altitude: 0.0,
            heading: 0.0,
            speed: stats.speed,
            health: stats.health,
            max_health: stats.health,
        }
    }

    fn assignments(
        system: &mut PlantTargeting,
        plants: Vec<PlantSnapshot>,
        zombies: Vec<ZombieSnapshot>,
    ) -> Vec<PlantTarget> {
        let mut out = Vec::new();
        system.handle(
            &[],
            &PlantView::from_snapshots(plants),
            &ZombieView::from_snapshots(zombies),
            &mut out,
        );
        out
    }

    #[test]
    fn zombies_outside_range_are_ignored() {
        let mut system = PlantTargeting::new();
        let out = assignments(
            &mut system,
            vec![plant(1, PlantKind::Peashooter, (0, 0))],
            vec![zombie(1, ZombieKind::Walker, (8.0, 0.0))],
        );
        assert!(out.is_empty());
    }

    #[test]
    fn nearest_zombie_wins_between_equals() {
        let mut system = PlantTargeting::new();
        let out = assignments(
            &mut system,
            vec![plant(1, PlantKind::Peashooter, (0, 0))],
            vec![
                zombie(1, ZombieKind::Walker, (2.5, 0.0)),
                zombie(2, ZombieKind::Walker, (1.0, 0.0)),
            ],
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].zombie, ZombieId::new(2));
    }

    #[test]
    fn bomber_threat_outweighs_small_distance_edge() {
        let mut system = PlantTargeting::new();
        let out = assignments(
            &mut system,
            vec![plant(1, PlantKind::Peashooter, (0, 0))],
            vec![
                zombie(1, ZombieKind::Walker, (1.0, 0.0)),
                zombie(2, ZombieKind::Bomber, (1.5, 0.0)),
            ],
        );
        // Walker closeness edge: (3-1)/3*50 vs (3-1.5)/3*50 = 8.3 points.
        // Bomber threat edge over walker: 30 points.
        assert_eq!(out[0].zombie, ZombieId::new(2));
    }

    #[test]
    fn wounded_zombies_are_preferred_for_the_kill() {
        let mut system = PlantTargeting::new();
        let mut wounded = zombie(2, ZombieKind::Walker, (2.0, 0.0));
        wounded.health = wounded.max_health * 0.2;
        let out = assignments(
            &mut system,
            vec![plant(1, PlantKind::Peashooter, (0, 0))],
            vec![zombie(1, ZombieKind::Walker, (2.0, 0.0)), wounded],
        );
        assert_eq!(out[0].zombie, ZombieId::new(2));
    }

    #[test]
    fn first_encountered_zombie_wins_exact_ties() {
        let mut system = PlantTargeting::new();
        let out = assignments(
            &mut system,
            vec![plant(1, PlantKind::Peashooter, (0, 0))],
            vec![
                zombie(1, ZombieKind::Walker, (0.0, 2.0)),
                zombie(2, ZombieKind::Walker, (2.0, 0.0)),
            ],
        );
        assert_eq!(out[0].zombie, ZombieId::new(1));
    }

    #[test]
    fn fuse_plants_trigger_on_zombies_in_blast_radius() {
        let mut system = PlantTargeting::new();
        let out = assignments(
            &mut system,
            vec![plant(1, PlantKind::CherryBomb, (0, 0))],
            vec![zombie(1, ZombieKind::Walker, (1.5, 0.0))],
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].plant, PlantId::new(1));
    }

    #[test]
    fn economy_plants_never_target() {
        let mut system = PlantTargeting::new();
        let out = assignments(
            &mut system,
            vec![plant(1, PlantKind::Sunflower, (0, 0))],
            vec![zombie(1, ZombieKind::Walker, (0.5, 0.0))],
        );
        assert!(out.is_empty());
    }

    #[test]
    fn cached_assignments_drop_dead_zombies_between_scans() {
        let mut system = PlantTargeting::new();
        let plants = vec![plant(1, PlantKind::Peashooter, (0, 0))];
        let zombies = vec![
            zombie(1, ZombieKind::Walker, (1.0, 0.0)),
            zombie(2, ZombieKind::Walker, (2.0, 0.0)),
        ];
        let out = assignments(&mut system, plants.clone(), zombies);
        assert_eq!(out[0].zombie, ZombieId::new(1));

        // Target died; no scan cadence has elapsed, so the stale entry is
        // dropped rather than re-scored.
        let mut out = Vec::new();
        system.handle(
            &[Event::TimeAdvanced {
                dt: Duration::from_millis(50),
            }],
            &PlantView::from_snapshots(plants),
            &ZombieView::from_snapshots(vec![zombie(2, ZombieKind::Walker, (2.0, 0.0))]),
            &mut out,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn scan_cadence_reassigns_after_the_period() {
        let mut system = PlantTargeting::new();
        let plants = vec![plant(1, PlantKind::Peashooter, (0, 0))];
        let _ = assignments(
            &mut system,
            plants.clone(),
            vec![zombie(1, ZombieKind::Walker, (1.0, 0.0))],
        );

        let mut out = Vec::new();
        system.handle(
            &[Event::TimeAdvanced {
                dt: Duration::from_millis(250),
            }],
            &PlantView::from_snapshots(plants),
            &ZombieView::from_snapshots(vec![zombie(3, ZombieKind::Walker, (2.0, 0.0))]),
            &mut out,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].zombie, ZombieId::new(3));
    }
}
