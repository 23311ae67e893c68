#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave director that composes, schedules and scales spawns.
//!
//! A night transition for wave `w` builds a shuffled pool of
//! `floor(zombie_count(w))` zombies, releases one spawn per cadence interval
//! at a uniformly chosen point on the boundary ring, and scales every
//! loadout by the wave's enhancement factors. All randomness flows from a
//! per-wave generator whose seed is derived from the injected session seed,
//! so identical seeds replay identical assaults.

use std::collections::VecDeque;
use std::time::Duration;

use garden_defence_core::{Command, Event, Phase, Position, ZombieKind, ZombieLoadout};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

const BASE_ZOMBIE_COUNT: f32 = 5.0;
const COUNT_PER_WAVE: f32 = 2.5;
const COUNT_PER_TIER: f32 = 3.0;
const MAX_ZOMBIE_COUNT: f32 = 40.0;

const ENHANCEMENT_PER_WAVE: f32 = 0.15;
const SPEED_BONUS_PER_TIER: f32 = 0.2;
const ABILITY_WAVE: u32 = 5;
const VETERAN_WAVE: u32 = 8;
const VETERAN_ARMOR: f32 = 0.3;
const VETERAN_SPEED_FACTOR: f32 = 1.5;
const REGENERATION_RATE: f32 = 2.0;

const MILESTONE_INTERVAL: u32 = 5;
const MILESTONE_HEALTH_FACTOR: f32 = 1.2;
const MILESTONE_SPEED_FACTOR: f32 = 1.1;

const SPAWN_MARGIN: f32 = 2.0;
const WAVE_SEED_LABEL: &[u8] = b"garden-defence/wave";

/// Configuration parameters required to construct the wave director.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    session_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided session seed.
    #[must_use]
    pub const fn new(session_seed: u64) -> Self {
        Self { session_seed }
    }
}

#[derive(Clone, Copy, Debug)]
struct PendingSpawn {
    kind: ZombieKind,
    loadout: ZombieLoadout,
}

/// Pure system that deterministically emits spawn commands at night.
#[derive(Debug)]
pub struct WaveDirector {
    session_seed: u64,
    pending: VecDeque<PendingSpawn>,
    spawn_interval: Duration,
    accumulator: Duration,
    rng: Option<ChaCha8Rng>,
}

impl WaveDirector {
    /// Creates a new wave director using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            session_seed: config.session_seed,
            pending: VecDeque::new(),
            spawn_interval: Duration::ZERO,
            accumulator: Duration::ZERO,
            rng: None,
        }
    }

    /// Consumes events to schedule the wave's spawn commands.
    pub fn handle(&mut self, events: &[Event], world_size: u32, out: &mut Vec<Command>) {
        let mut accumulated = Duration::ZERO;

        for event in events {
            match event {
                Event::TimeAdvanced { dt } => {
                    accumulated = accumulated.saturating_add(*dt);
                }
                Event::PhaseChanged {
                    phase: Phase::Night,
                    wave,
                } => self.begin_wave(*wave, out),
                Event::PhaseChanged {
                    phase: Phase::Day, ..
                }
                | Event::WorldReset => self.abort_wave(),
                _ => {}
            }
        }

        if self.pending.is_empty() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(accumulated);
        let half = world_size as f32 / 2.0;

        while self.accumulator >= self.spawn_interval {
            let Some(spawn) = self.pending.pop_front() else {
                break;
            };
            self.accumulator -= self.spawn_interval;
            let at = self.spawn_point(half);
            out.push(Command::SpawnZombie {
                kind: spawn.kind,
                loadout: spawn.loadout,
                at,
            });
        }
    }

    fn begin_wave(&mut self, wave: u32, out: &mut Vec<Command>) {
        let mut rng = ChaCha8Rng::seed_from_u64(derive_wave_seed(self.session_seed, wave));

        let mut pool = compose_pool(wave);
        pool.shuffle(&mut rng);

        self.pending = pool
            .into_iter()
            .map(|kind| PendingSpawn {
                kind,
                loadout: loadout_for(kind, wave),
            })
            .collect();
        self.spawn_interval = spawn_interval(wave);
        // Prime the accumulator so the first spawn releases immediately.
        self.accumulator = self.spawn_interval;
        self.rng = Some(rng);

        if wave % MILESTONE_INTERVAL == 0 {
            out.push(Command::EmpowerZombies {
                health_factor: MILESTONE_HEALTH_FACTOR,
                speed_factor: MILESTONE_SPEED_FACTOR,
            });
        }
    }

    fn abort_wave(&mut self) {
        self.pending.clear();
        self.accumulator = Duration::ZERO;
        self.rng = None;
    }

    fn spawn_point(&mut self, half: f32) -> Position {
        let extent = (half - SPAWN_MARGIN).max(0.0);
        let Some(rng) = self.rng.as_mut() else {
            return Position::new(-extent, -extent);
        };

        let offset = if extent > 0.0 {
            rng.gen_range(-extent..extent)
        } else {
            0.0
        };
        match rng.gen_range(0u8..4) {
            0 => Position::new(offset, -extent),
            1 => Position::new(offset, extent),
            2 => Position::new(-extent, offset),
            _ => Position::new(extent, offset),
        }
    }
}

/// Nominal zombie budget for a wave, before flooring to the pool size.
#[must_use]
pub fn zombie_count(wave: u32) -> f32 {
    let tier = ((wave.saturating_sub(1)) / 2) as f32;
    (BASE_ZOMBIE_COUNT + wave as f32 * COUNT_PER_WAVE + tier * COUNT_PER_TIER)
        .min(MAX_ZOMBIE_COUNT)
}

/// Number of zombies actually spawned for a wave.
#[must_use]
pub fn pool_size(wave: u32) -> usize {
    zombie_count(wave).floor() as usize
}

/// Builds the kind pool for a wave: ratio-floored counts backfilled with
/// walkers.
#[must_use]
pub fn compose_pool(wave: u32) -> Vec<ZombieKind> {
    let size = pool_size(wave);
    let count = zombie_count(wave);

    let walker_ratio = (1.0 - wave as f32 * 0.1).max(0.4);
    let miner_ratio = (wave as f32 * 0.08).min(0.4);
    let bomber_ratio = if wave >= 4 {
        ((wave as f32 - 3.0) * 0.05).clamp(0.0, 0.2)
    } else {
        0.0
    };

    let mut pool = Vec::with_capacity(size);
    push_kind(&mut pool, ZombieKind::Walker, count * walker_ratio);
    push_kind(&mut pool, ZombieKind::Miner, count * miner_ratio);
    push_kind(&mut pool, ZombieKind::Bomber, count * bomber_ratio);

    while pool.len() < size {
        pool.push(ZombieKind::Walker);
    }

    pool
}

fn push_kind(pool: &mut Vec<ZombieKind>, kind: ZombieKind, budget: f32) {
    for _ in 0..budget.floor() as usize {
        pool.push(kind);
    }
}

/// Scales a kind's catalog stats by the wave's enhancement factors.
#[must_use]
pub fn loadout_for(kind: ZombieKind, wave: u32) -> ZombieLoadout {
    let mut loadout = ZombieLoadout::base(kind);
    let factor = 1.0 + (wave.saturating_sub(1)) as f32 * ENHANCEMENT_PER_WAVE;
    loadout.health = (loadout.health * factor).floor();
    loadout.damage = (loadout.damage * factor).floor();

    if wave >= 2 {
        loadout.speed += ((wave - 1) / 2) as f32 * SPEED_BONUS_PER_TIER;
    }

    if wave >= ABILITY_WAVE {
        loadout.breaks_blocks = true;
        loadout.regeneration = REGENERATION_RATE;
    }

    if wave >= VETERAN_WAVE {
        loadout.armor = VETERAN_ARMOR;
        loadout.speed *= VETERAN_SPEED_FACTOR;
    }

    loadout
}

/// Cadence between spawn releases for a wave.
#[must_use]
pub fn spawn_interval(wave: u32) -> Duration {
    let millis = (1_500i64 - i64::from(wave) * 150).max(200);
    Duration::from_millis(millis as u64)
}

fn derive_wave_seed(session_seed: u64, wave: u32) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(session_seed.to_le_bytes());
    hasher.update(WAVE_SEED_LABEL);
    hasher.update(wave.to_le_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn night(wave: u32) -> Event {
        Event::PhaseChanged {
            phase: Phase::Night,
            wave,
        }
    }

    fn advance(secs: u64) -> Event {
        Event::TimeAdvanced {
            dt: Duration::from_secs(secs),
        }
    }

    #[test]
    fn zombie_count_matches_the_progression_formula() {
        for wave in 1..=10u32 {
            let tier = ((wave - 1) / 2) as f32;
            let expected = (5.0 + wave as f32 * 2.5 + tier * 3.0).min(40.0);
            assert!((zombie_count(wave) - expected).abs() < f32::EPSILON, "wave {wave}");
        }
    }

    #[test]
    fn pool_size_is_the_floored_budget() {
        for wave in 1..=10u32 {
            assert_eq!(pool_size(wave), zombie_count(wave).floor() as usize);
            assert_eq!(compose_pool(wave).len(), pool_size(wave), "wave {wave}");
        }
    }

    #[test]
    fn bombers_stay_out_of_early_waves() {
        for wave in 1..=3u32 {
            assert!(compose_pool(wave)
                .iter()
                .all(|kind| *kind != ZombieKind::Bomber));
        }
        assert!(compose_pool(5)
            .iter()
            .any(|kind| *kind == ZombieKind::Bomber));
    }

    #[test]
    fn miner_share_grows_with_the_wave_index() {
        let early = compose_pool(1)
            .iter()
            .filter(|kind| **kind == ZombieKind::Miner)
            .count();
        let late = compose_pool(6)
            .iter()
            .filter(|kind| **kind == ZombieKind::Miner)
            .count();
        assert!(late > early);
    }

    #[test]
    fn spawn_interval_shrinks_to_its_floor() {
        assert_eq!(spawn_interval(1), Duration::from_millis(1_350));
        assert_eq!(spawn_interval(5), Duration::from_millis(750));
        assert_eq!(spawn_interval(9), Duration::from_millis(200));
        assert_eq!(spawn_interval(10), Duration::from_millis(200));
    }

    #[test]
    fn loadouts_scale_health_damage_and_speed() {
        let base = loadout_for(ZombieKind::Walker, 1);
        assert!((base.health - 60.0).abs() < f32::EPSILON);
        assert!((base.speed - 0.5).abs() < f32::EPSILON);
        assert!(!base.breaks_blocks);

        let third = loadout_for(ZombieKind::Walker, 3);
        assert!((third.health - (60.0f32 * 1.3).floor()).abs() < f32::EPSILON);
        assert!((third.speed - 0.7).abs() < f32::EPSILON);

        let fifth = loadout_for(ZombieKind::Walker, 5);
        assert!(fifth.breaks_blocks);
        assert!((fifth.regeneration - 2.0).abs() < f32::EPSILON);
        assert!((fifth.armor - 0.0).abs() < f32::EPSILON);

        let eighth = loadout_for(ZombieKind::Walker, 8);
        assert!((eighth.armor - 0.3).abs() < f32::EPSILON);
        let expected_speed = (0.5 + 3.0 * 0.2) * 1.5;
        assert!((eighth.speed - expected_speed).abs() < 1e-5);
    }

    #[test]
    fn milestone_waves_empower_the_living() {
        let mut director = WaveDirector::new(Config::new(1));
        let mut out = Vec::new();
        director.handle(&[night(5)], 20, &mut out);
        assert!(out.iter().any(|command| matches!(
            command,
            Command::EmpowerZombies { .. }
        )));

        let mut director = WaveDirector::new(Config::new(1));
        let mut out = Vec::new();
        director.handle(&[night(4)], 20, &mut out);
        assert!(out.iter().all(|command| !matches!(
            command,
            Command::EmpowerZombies { .. }
        )));
    }

    #[test]
    fn spawns_release_on_the_wave_cadence() {
        let mut director = WaveDirector::new(Config::new(0x5eed));
        let mut out = Vec::new();
        director.handle(&[night(1)], 20, &mut out);
        assert_eq!(spawn_count(&out), 1, "primed accumulator releases one");

        out.clear();
        director.handle(&[advance(1)], 20, &mut out);
        assert!(out.is_empty(), "cadence for wave 1 is 1.35 s");

        out.clear();
        director.handle(&[advance(27)], 20, &mut out);
        assert_eq!(
            spawn_count(&out),
            pool_size(1) - 1,
            "a large tick drains the remaining pool"
        );
    }

    #[test]
    fn spawn_points_sit_on_the_boundary_ring() {
        let mut director = WaveDirector::new(Config::new(42));
        let mut out = Vec::new();
        director.handle(&[night(1)], 20, &mut out);
        director.handle(&[advance(60)], 20, &mut out);

        let extent = 10.0 - SPAWN_MARGIN;
        for command in &out {
            let Command::SpawnZombie { at, .. } = command else {
                continue;
            };
            let on_ring = (at.x().abs() - extent).abs() < 1e-4
                || (at.z().abs() - extent).abs() < 1e-4;
            assert!(on_ring, "spawn {at:?} must sit on the ring");
            assert!(at.x().abs() <= extent + 1e-4);
            assert!(at.z().abs() <= extent + 1e-4);
        }
    }

    #[test]
    fn day_transitions_abort_pending_spawns() {
        let mut director = WaveDirector::new(Config::new(7));
        let mut out = Vec::new();
        director.handle(&[night(1)], 20, &mut out);
        director.handle(
            &[Event::PhaseChanged {
                phase: Phase::Day,
                wave: 2,
            }],
            20,
            &mut out,
        );
        director.handle(&[advance(60)], 20, &mut out);
        assert_eq!(spawn_count(&out), 0);
    }

    #[test]
    fn identical_seeds_replay_identical_assaults() {
        let script: Vec<Event> = vec![night(3), advance(2), advance(2), advance(30)];

        let mut first = WaveDirector::new(Config::new(0xfeed));
        let mut first_out = Vec::new();
        for event in &script {
            first.handle(std::slice::from_ref(event), 20, &mut first_out);
        }

        let mut second = WaveDirector::new(Config::new(0xfeed));
        let mut second_out = Vec::new();
        for event in &script {
            second.handle(std::slice::from_ref(event), 20, &mut second_out);
        }

        assert_eq!(first_out, second_out);
        assert_eq!(spawn_count(&first_out), pool_size(3));

        let mut other = WaveDirector::new(Config::new(0xbeef));
        let mut other_out = Vec::new();
        for event in &script {
            other.handle(std::slice::from_ref(event), 20, &mut other_out);
        }
        assert_ne!(first_out, other_out, "different seeds diverge");
    }

    fn spawn_count(commands: &[Command]) -> usize {
        commands
            .iter()
            .filter(|command| matches!(command, Command::SpawnZombie { .. }))
            .count()
    }
}
