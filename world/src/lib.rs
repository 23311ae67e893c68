#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Garden Defence.
//!
//! The world owns every piece of mutable simulation state: the cell grid,
//! the entity registries, the resource ledger, the day/night clock, and the
//! cosmetic effect queue. All mutation flows through [`apply`], which
//! executes one [`Command`] and appends the resulting [`Event`]s. Systems
//! never reach into the world; they read the snapshots exposed by [`query`].

use std::time::Duration;

use garden_defence_core::{
    BlockId, BlockKind, BlockSnapshot, BlockView, CellCoord, Command, EffectKind, Event,
    GameSettings, GameSpeed, HudSnapshot, Outcome, Phase, PlacementError, PlacementSlot, PlantId,
    PlantKind, PlantSnapshot, PlantView, Position, ProjectileId, ProjectileSnapshot,
    ProjectileView, Selection, SunSource, ZombieId, ZombieKind, ZombieLoadout, ZombieSnapshot,
    ZombieView, PROJECTILE_SPEED, WELCOME_BANNER,
};

mod effects;
mod entities;
mod grid;

pub use effects::ActiveEffect;

use effects::EffectQueue;
use entities::{Block, JumpState, Plant, Projectile, Zombie};
use grid::GardenGrid;

const DEFAULT_RNG_SEED: u64 = 0x9e37_79b9_7f4a_7c15;
const RNG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const RNG_INCREMENT: u64 = 1;

const SUN_DRIP_AMOUNT: u32 = 10;
const SUN_DRIP_PERCENT: u64 = 1;

const BASE_CONTACT_RADIUS: f32 = 1.5;
const PROJECTILE_HIT_RADIUS: f32 = 0.5;
const PROJECTILE_GRAVITY: f32 = 2.0;
const PROJECTILE_FLOOR: f32 = -5.0;

const WAYPOINT_RADIUS: f32 = 0.3;
const MELEE_RADIUS: f32 = 0.3;
const CHEW_RADIUS: f32 = 1.0;
const EAT_PERIOD: Duration = Duration::from_millis(500);
const CHEW_PERIOD: Duration = Duration::from_millis(500);

const TANK_UPGRADE_PERIOD: Duration = Duration::from_secs(30);
const TANK_HEALTH_FACTOR: f32 = 1.05;
const TANK_ARMOR_BONUS: f32 = 0.02;

const STUCK_EPSILON: f32 = 0.01;
const STUCK_LIMIT: Duration = Duration::from_secs(2);
const REPLAN_COOLDOWN: Duration = Duration::from_secs(3);

const JUMP_SPEED: f32 = 2.0;
const JUMP_MAX_HEIGHT: f32 = 1.5;

const KNOCKBACK_FACTOR: f32 = 2.0;
const WAVE_CLEAR_GRACE: Duration = Duration::from_secs(10);

/// Construction parameters for a world instance.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig {
    /// Session tuning values.
    pub settings: GameSettings,
    /// Seed for the world's ambient randomness (sun drip, kill rewards).
    pub rng_seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            settings: GameSettings::default(),
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

/// Represents the authoritative Garden Defence world state.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    grid: GardenGrid,
    plants: Vec<Plant>,
    zombies: Vec<Zombie>,
    projectiles: Vec<Projectile>,
    blocks: Vec<Block>,
    next_plant: u32,
    next_zombie: u32,
    next_projectile: u32,
    next_block: u32,
    sun: u32,
    materials: u32,
    base_health: f32,
    base_cell: CellCoord,
    wave: u32,
    phase: Phase,
    phase_timer: Duration,
    elapsed: Duration,
    zombies_killed: u32,
    paused: bool,
    speed: GameSpeed,
    selection: Selection,
    outcome: Option<Outcome>,
    rng_state: u64,
    effects: EffectQueue,
}

impl World {
    /// Creates a new world ready for simulation.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        let grid = GardenGrid::new(config.settings.world_size);
        let rng_state = config.rng_seed;
        Self {
            effects: EffectQueue::default(),
            sun: config.settings.initial_sun,
            materials: config.settings.initial_materials,
            base_health: config.settings.base_health,
            base_cell: CellCoord::new(0, 0),
            grid,
            plants: Vec::new(),
            zombies: Vec::new(),
            projectiles: Vec::new(),
            blocks: Vec::new(),
            next_plant: 0,
            next_zombie: 0,
            next_projectile: 0,
            next_block: 0,
            wave: 1,
            phase: Phase::Day,
            phase_timer: Duration::ZERO,
            elapsed: Duration::ZERO,
            zombies_killed: 0,
            paused: false,
            speed: GameSpeed::Normal,
            selection: Selection::None,
            outcome: None,
            rng_state,
            config,
        }
    }

    fn reset(&mut self) {
        self.grid.clear();
        self.plants.clear();
        self.zombies.clear();
        self.projectiles.clear();
        self.blocks.clear();
        self.next_plant = 0;
        self.next_zombie = 0;
        self.next_projectile = 0;
        self.next_block = 0;
        self.sun = self.config.settings.initial_sun;
        self.materials = self.config.settings.initial_materials;
        self.base_health = self.config.settings.base_health;
        self.wave = 1;
        self.phase = Phase::Day;
        self.phase_timer = Duration::ZERO;
        self.elapsed = Duration::ZERO;
        self.zombies_killed = 0;
        self.paused = false;
        self.speed = GameSpeed::Normal;
        self.selection = Selection::None;
        self.outcome = None;
        self.rng_state = self.config.rng_seed;
        self.effects.clear();
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if self.paused || self.outcome.is_some() {
            return;
        }

        let dt = dt.mul_f32(self.speed.factor());
        self.elapsed = self.elapsed.saturating_add(dt);
        out_events.push(Event::TimeAdvanced { dt });

        self.advance_clock(dt, out_events);
        self.update_plants(dt, out_events);
        self.update_zombies(dt, out_events);
        self.update_projectiles(dt);
        self.resolve_collisions(out_events);
        self.cleanup(out_events);
        self.check_defeat(out_events);
        self.effects.advance(dt);
    }

    fn advance_clock(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.phase_timer = self.phase_timer.saturating_add(dt);
        let cycle = self.cycle_duration();
        if self.phase_timer >= cycle {
            self.phase_timer = Duration::ZERO;
            self.phase = match self.phase {
                Phase::Day => Phase::Night,
                Phase::Night => Phase::Day,
            };
            out_events.push(Event::PhaseChanged {
                phase: self.phase,
                wave: self.wave,
            });
        }

        if self.phase == Phase::Day && next_random(&mut self.rng_state) % 100 < SUN_DRIP_PERCENT {
            self.sun = self.sun.saturating_add(SUN_DRIP_AMOUNT);
            out_events.push(Event::SunGranted {
                amount: SUN_DRIP_AMOUNT,
                total: self.sun,
                source: SunSource::Sky,
            });
        }
    }

    fn cycle_duration(&self) -> Duration {
        match self.phase {
            Phase::Day => self.config.settings.day_duration,
            Phase::Night => self.config.settings.night_duration,
        }
    }

    fn update_plants(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let mut detonations: Vec<PlantId> = Vec::new();

        {
            let Self {
                plants,
                sun,
                effects,
                ..
            } = self;

            for plant in plants.iter_mut().filter(|plant| plant.is_alive()) {
                let stats = plant.kind.stats();
                plant.cooldown = plant.cooldown.saturating_sub(dt);

                if let Some(economy) = stats.economy {
                    plant.production = plant.production.saturating_add(dt);
                    if plant.production >= economy.interval {
                        plant.production = Duration::ZERO;
                        *sun = sun.saturating_add(economy.sun_production);
                        out_events.push(Event::SunGranted {
                            amount: economy.sun_production,
                            total: *sun,
                            source: SunSource::Plant(plant.id),
                        });
                        emit_effect(effects, out_events, EffectKind::SunSparkle, plant.cell.center());
                    }
                }

                if let Some(fuse) = stats.fuse {
                    plant.fuse = plant.fuse.saturating_add(dt);
                    if plant.fuse >= fuse.delay {
                        detonations.push(plant.id);
                    }
                }
            }
        }

        for plant in detonations {
            self.explode(plant, out_events);
        }
    }

    fn explode(&mut self, plant_id: PlantId, out_events: &mut Vec<Event>) {
        let Some(index) = self
            .plants
            .iter()
            .position(|plant| plant.id == plant_id && plant.is_alive())
        else {
            return;
        };

        let Some(spec) = self.plants[index].kind.stats().fuse else {
            return;
        };
        let origin = self.plants[index].cell.center();

        let Self {
            plants,
            zombies,
            effects,
            ..
        } = self;
        plants[index].health = 0.0;

        for zombie in zombies.iter_mut().filter(|zombie| zombie.is_alive()) {
            let distance = zombie.position.distance_to(origin);
            if distance > spec.range {
                continue;
            }

            let damage = (spec.damage * (1.0 - zombie.armor)).max(0.0);
            zombie.health -= damage;

            let force = (spec.range - distance) / spec.range * KNOCKBACK_FACTOR;
            let dx = zombie.position.x() - origin.x();
            let dz = zombie.position.z() - origin.z();
            let length = (dx * dx + dz * dz).sqrt().max(f32::EPSILON);
            zombie.position = Position::new(
                zombie.position.x() + dx / length * force,
                zombie.position.z() + dz / length * force,
            );
            emit_effect(effects, out_events, EffectKind::DamageFlash, zombie.position);
        }

        emit_effect(effects, out_events, EffectKind::Explosion, origin);
    }

    fn update_zombies(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let Self {
            zombies,
            plants,
            blocks,
            grid,
            effects,
            ..
        } = self;

        for zombie in zombies.iter_mut().filter(|zombie| zombie.is_alive()) {
            step_passives(zombie, dt);

            if let Some(cell) = zombie.attack_cell {
                let target = grid
                    .cell(cell)
                    .and_then(|slot| slot.plant)
                    .and_then(|id| plants.iter_mut().find(|plant| plant.id == id));
                match target {
                    Some(plant) if plant.is_alive() => {
                        eat_plant(zombie, plant, dt, effects, out_events);
                        continue;
                    }
                    _ => zombie.attack_cell = None,
                }
            }

            if zombie.breaks_blocks && zombie.jump.is_none() {
                if chew_obstruction(zombie, grid, blocks, dt) {
                    continue;
                }
            }

            if let Some(mut jump) = zombie.jump.take() {
                jump.progress += dt.as_secs_f32() * JUMP_SPEED;
                if jump.progress >= 1.0 {
                    zombie.position = jump.to;
                } else {
                    let t = jump.progress;
                    zombie.position = Position::new(
                        jump.from.x() + (jump.to.x() - jump.from.x()) * t,
                        jump.from.z() + (jump.to.z() - jump.from.z()) * t,
                    );
                    zombie.jump = Some(jump);
                }
            } else {
                follow_path(zombie, dt);
            }

            let moved = zombie.position.distance_to(zombie.last_position);
            if moved < STUCK_EPSILON {
                zombie.stuck = zombie.stuck.saturating_add(dt);
            } else {
                zombie.stuck = Duration::ZERO;
                zombie.last_position = zombie.position;
            }

            zombie.replan_cooldown = zombie.replan_cooldown.saturating_sub(dt);
            if zombie.path.is_empty()
                || zombie.stuck > STUCK_LIMIT
                || zombie.replan_cooldown.is_zero()
            {
                if zombie.mark_path_needed() {
                    out_events.push(Event::ZombiePathNeeded { zombie: zombie.id });
                }
            }
        }
    }

    fn update_projectiles(&mut self, dt: Duration) {
        let seconds = dt.as_secs_f32();
        for projectile in self
            .projectiles
            .iter_mut()
            .filter(|projectile| !projectile.destroyed)
        {
            let (dx, dz) = projectile.direction;
            projectile.position = Position::new(
                projectile.position.x() + dx * PROJECTILE_SPEED * seconds,
                projectile.position.z() + dz * PROJECTILE_SPEED * seconds,
            );
            projectile.altitude -= PROJECTILE_GRAVITY * seconds;
        }
    }

    fn resolve_collisions(&mut self, out_events: &mut Vec<Event>) {
        let Self {
            projectiles,
            zombies,
            effects,
            base_cell,
            base_health,
            ..
        } = self;

        for projectile in projectiles
            .iter_mut()
            .filter(|projectile| !projectile.destroyed)
        {
            for zombie in zombies.iter_mut().filter(|zombie| zombie.is_alive()) {
                if projectile.position.distance_to(zombie.position) >= PROJECTILE_HIT_RADIUS {
                    continue;
                }

                let damage = (projectile.damage * (1.0 - zombie.armor)).max(0.0);
                zombie.health -= damage;
                projectile.destroyed = true;
                out_events.push(Event::ProjectileHit {
                    projectile: projectile.id,
                    zombie: zombie.id,
                    damage,
                });
                emit_effect(effects, out_events, EffectKind::DamageFlash, zombie.position);
                break;
            }
        }

        let base = base_cell.center();
        for zombie in zombies
            .iter_mut()
            .filter(|zombie| zombie.is_alive() && !zombie.reached_base)
        {
            if zombie.position.distance_to(base) >= BASE_CONTACT_RADIUS {
                continue;
            }

            *base_health -= zombie.damage;
            zombie.health = 0.0;
            zombie.reached_base = true;
            out_events.push(Event::ZombieReachedBase {
                zombie: zombie.id,
                damage: zombie.damage,
                base_health: *base_health,
            });
        }
    }

    fn cleanup(&mut self, out_events: &mut Vec<Event>) {
        {
            let Self {
                zombies,
                zombies_killed,
                materials,
                rng_state,
                ..
            } = self;

            let mut index = 0;
            while index < zombies.len() {
                if zombies[index].is_alive() {
                    index += 1;
                    continue;
                }

                let zombie = zombies.remove(index);
                *zombies_killed += 1;
                if !zombie.reached_base {
                    let reward = 1 + (next_random(rng_state) % 3) as u32;
                    *materials = materials.saturating_add(reward);
                    out_events.push(Event::ZombieDied {
                        zombie: zombie.id,
                        reward,
                    });
                }
            }
        }

        {
            let Self {
                projectiles, grid, ..
            } = self;
            let mut index = 0;
            while index < projectiles.len() {
                let projectile = &projectiles[index];
                let expired = projectile.altitude < PROJECTILE_FLOOR
                    || !grid.in_bounds(projectile.position.cell());
                if !projectile.destroyed && !expired {
                    index += 1;
                    continue;
                }

                let projectile = projectiles.remove(index);
                if !projectile.destroyed {
                    out_events.push(Event::ProjectileExpired {
                        projectile: projectile.id,
                    });
                }
            }
        }

        {
            let Self { plants, grid, .. } = self;
            let mut index = 0;
            while index < plants.len() {
                if plants[index].is_alive() {
                    index += 1;
                    continue;
                }

                let plant = plants.remove(index);
                if let Some(cell) = grid.cell_mut(plant.cell) {
                    cell.plant = None;
                }
                out_events.push(Event::PlantDestroyed {
                    plant: plant.id,
                    kind: plant.kind,
                    cell: plant.cell,
                });
            }
        }

        {
            let Self { blocks, grid, .. } = self;
            let mut index = 0;
            while index < blocks.len() {
                if blocks[index].durability > 0.0 {
                    index += 1;
                    continue;
                }

                let block = blocks.remove(index);
                if let Some(cell) = grid.cell_mut(block.cell) {
                    cell.block = None;
                }
                out_events.push(Event::BlockBroken {
                    block: block.id,
                    cell: block.cell,
                });
            }
        }

        if self.phase == Phase::Night
            && self.zombies.is_empty()
            && self.phase_timer > WAVE_CLEAR_GRACE
        {
            out_events.push(Event::WaveCompleted { wave: self.wave });
            self.wave += 1;
            self.phase = Phase::Day;
            self.phase_timer = Duration::ZERO;

            if self.wave > self.config.settings.max_waves {
                self.outcome = Some(Outcome::Won {
                    waves: self.config.settings.max_waves,
                });
                out_events.push(Event::GameWon {
                    waves: self.config.settings.max_waves,
                });
            }
        }
    }

    fn check_defeat(&mut self, out_events: &mut Vec<Event>) {
        if self.outcome.is_none() && self.base_health <= 0.0 {
            self.outcome = Some(Outcome::Lost {
                final_wave: self.wave,
            });
            out_events.push(Event::GameLost {
                final_wave: self.wave,
            });
        }
    }

    fn place(&mut self, cell: CellCoord, slot: PlacementSlot, out_events: &mut Vec<Event>) {
        let rejection = |reason| Event::PlacementRejected { slot, cell, reason };

        match slot {
            PlacementSlot::Plant => {
                let Selection::Plant(index) = self.selection else {
                    out_events.push(rejection(PlacementError::InvalidSelection));
                    return;
                };
                let Some(kind) = PlantKind::ALL.get(index).copied() else {
                    out_events.push(rejection(PlacementError::InvalidSelection));
                    return;
                };
                if !self.grid.in_bounds(cell) {
                    out_events.push(rejection(PlacementError::InvalidPosition));
                    return;
                }
                let occupied = self
                    .grid
                    .cell(cell)
                    .map_or(true, |slot| slot.plant.is_some() || slot.block.is_some());
                if occupied {
                    out_events.push(rejection(PlacementError::Occupied));
                    return;
                }
                let cost = kind.stats().cost;
                if self.sun < cost {
                    out_events.push(rejection(PlacementError::InsufficientResources));
                    return;
                }

                self.sun -= cost;
                let id = PlantId::new(self.next_plant);
                self.next_plant += 1;
                self.plants.push(Plant::new(id, kind, cell));
                if let Some(slot) = self.grid.cell_mut(cell) {
                    slot.plant = Some(id);
                }
                self.selection = Selection::None;
                out_events.push(Event::PlantPlaced {
                    plant: id,
                    kind,
                    cell,
                });
            }
            PlacementSlot::Block => {
                let Selection::Block(index) = self.selection else {
                    out_events.push(rejection(PlacementError::InvalidSelection));
                    return;
                };
                let Some(kind) = BlockKind::ALL.get(index).copied() else {
                    out_events.push(rejection(PlacementError::InvalidSelection));
                    return;
                };
                if !self.grid.in_bounds(cell) {
                    out_events.push(rejection(PlacementError::InvalidPosition));
                    return;
                }
                let occupied = self
                    .grid
                    .cell(cell)
                    .map_or(true, |slot| slot.block.is_some());
                if occupied {
                    out_events.push(rejection(PlacementError::Occupied));
                    return;
                }
                let cost = kind.stats().cost;
                if self.materials < cost {
                    out_events.push(rejection(PlacementError::InsufficientResources));
                    return;
                }

                self.materials -= cost;
                let id = BlockId::new(self.next_block);
                self.next_block += 1;
                self.blocks.push(Block::new(id, kind, cell));
                if let Some(slot) = self.grid.cell_mut(cell) {
                    slot.block = Some(id);
                }
                self.selection = Selection::None;
                out_events.push(Event::BlockPlaced {
                    block: id,
                    kind,
                    cell,
                });
            }
        }
    }

    fn spawn_zombie(
        &mut self,
        kind: ZombieKind,
        loadout: ZombieLoadout,
        at: Position,
        out_events: &mut Vec<Event>,
    ) {
        if !self.grid.in_bounds(at.cell()) {
            return;
        }

        let id = ZombieId::new(self.next_zombie);
        self.next_zombie += 1;
        self.zombies.push(Zombie::spawn(id, kind, loadout, at));
        out_events.push(Event::ZombieSpawned {
            zombie: id,
            kind,
            at,
        });
        out_events.push(Event::ZombiePathNeeded { zombie: id });
    }

    fn fire_projectile(&mut self, plant_id: PlantId, target: ZombieId, out_events: &mut Vec<Event>) {
        let Some(plant) = self
            .plants
            .iter()
            .find(|plant| plant.id == plant_id && plant.is_alive())
        else {
            return;
        };
        let Some(cannon) = plant.kind.stats().cannon else {
            return;
        };
        if !plant.cooldown.is_zero() {
            return;
        }
        let origin = plant.cell.center();

        let Some(zombie) = self
            .zombies
            .iter()
            .find(|zombie| zombie.id == target && zombie.is_alive())
        else {
            return;
        };

        let distance = origin.distance_to(zombie.position);
        let time_to_hit = distance / PROJECTILE_SPEED;
        let lead = zombie.speed * time_to_hit;
        let predicted = Position::new(
            zombie.position.x() + lead * zombie.heading.sin(),
            zombie.position.z() + lead * zombie.heading.cos(),
        );

        let id = ProjectileId::new(self.next_projectile);
        self.next_projectile += 1;
        self.projectiles
            .push(Projectile::launch(id, origin, predicted, cannon.damage));

        if let Some(plant) = self.plants.iter_mut().find(|plant| plant.id == plant_id) {
            plant.cooldown = cannon.fire_period();
        }

        out_events.push(Event::ProjectileFired {
            projectile: id,
            plant: plant_id,
            target,
        });
        emit_effect(
            &mut self.effects,
            out_events,
            EffectKind::MuzzleFlash,
            origin,
        );
    }

    fn empower_zombies(
        &mut self,
        health_factor: f32,
        speed_factor: f32,
        out_events: &mut Vec<Event>,
    ) {
        let Self {
            zombies, effects, ..
        } = self;

        let mut count = 0;
        for zombie in zombies.iter_mut().filter(|zombie| zombie.is_alive()) {
            zombie.health = (zombie.health * health_factor).floor();
            zombie.max_health = (zombie.max_health * health_factor).floor();
            zombie.speed *= speed_factor;
            count += 1;
            emit_effect(effects, out_events, EffectKind::Empowerment, zombie.position);
        }

        if count > 0 {
            out_events.push(Event::ZombiesEmpowered { count });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::SelectPlant { index } => {
            if index < PlantKind::ALL.len() {
                world.selection = Selection::Plant(index);
            }
        }
        Command::SelectBlock { index } => {
            if index < BlockKind::ALL.len() {
                world.selection = Selection::Block(index);
            }
        }
        Command::ClearSelection => world.selection = Selection::None,
        Command::Place { cell, slot } => world.place(cell, slot, out_events),
        Command::TogglePause => world.paused = !world.paused,
        Command::ToggleSpeed => world.speed = world.speed.toggled(),
        Command::Restart => {
            world.reset();
            out_events.push(Event::WorldReset);
        }
        Command::SpawnZombie { kind, loadout, at } => {
            world.spawn_zombie(kind, loadout, at, out_events);
        }
        Command::EmpowerZombies {
            health_factor,
            speed_factor,
        } => world.empower_zombies(health_factor, speed_factor, out_events),
        Command::SetZombiePath { zombie, path } => {
            if let Some(zombie) = world.zombies.iter_mut().find(|z| z.id == zombie) {
                if !zombie.assign_path(path, REPLAN_COOLDOWN) && zombie.mark_path_needed() {
                    out_events.push(Event::ZombiePathNeeded { zombie: zombie.id });
                }
            }
        }
        Command::SetZombieTarget { zombie, cell } => {
            if let Some(zombie) = world.zombies.iter_mut().find(|z| z.id == zombie) {
                zombie.attack_cell = cell;
            }
        }
        Command::FireProjectile { plant, target } => {
            world.fire_projectile(plant, target, out_events);
        }
        Command::Detonate { plant } => world.explode(plant, out_events),
    }
}

fn step_passives(zombie: &mut Zombie, dt: Duration) {
    zombie.upgrade_timer = zombie.upgrade_timer.saturating_add(dt);
    while zombie.upgrade_timer >= TANK_UPGRADE_PERIOD {
        zombie.upgrade_timer -= TANK_UPGRADE_PERIOD;
        zombie.max_health *= TANK_HEALTH_FACTOR;
        zombie.health *= TANK_HEALTH_FACTOR;
        zombie.armor += TANK_ARMOR_BONUS;
    }

    if zombie.regeneration > 0.0 && zombie.health < zombie.max_health {
        zombie.health =
            (zombie.health + zombie.regeneration * dt.as_secs_f32()).min(zombie.max_health);
    }
}

fn eat_plant(
    zombie: &mut Zombie,
    plant: &mut Plant,
    dt: Duration,
    effects: &mut EffectQueue,
    out_events: &mut Vec<Event>,
) {
    let target = plant.cell.center();
    let distance = zombie.position.distance_to(target);

    if distance > MELEE_RADIUS {
        advance_toward(zombie, target, dt);
        return;
    }

    zombie.eat_timer = zombie.eat_timer.saturating_add(dt);
    if zombie.eat_timer >= EAT_PERIOD {
        zombie.eat_timer = Duration::ZERO;
        plant.health -= zombie.damage;
        emit_effect(effects, out_events, EffectKind::DamageFlash, target);
    }
}

fn chew_obstruction(
    zombie: &mut Zombie,
    grid: &GardenGrid,
    blocks: &mut [Block],
    dt: Duration,
) -> bool {
    let Some(step) = zombie.path.front().copied() else {
        return false;
    };
    if step.jump {
        return false;
    }
    let Some(block_id) = grid.cell(step.cell).and_then(|cell| cell.block) else {
        return false;
    };
    if zombie.position.distance_to(step.cell.center()) > CHEW_RADIUS {
        return false;
    }
    let Some(block) = blocks
        .iter_mut()
        .find(|block| block.id == block_id && block.durability > 0.0)
    else {
        return false;
    };

    zombie.chew_timer = zombie.chew_timer.saturating_add(dt);
    if zombie.chew_timer >= CHEW_PERIOD {
        zombie.chew_timer = Duration::ZERO;
        block.durability -= zombie.damage;
    }
    true
}

fn follow_path(zombie: &mut Zombie, dt: Duration) {
    let Some(step) = zombie.path.front().copied() else {
        return;
    };

    let target = step.cell.center();
    let distance = zombie.position.distance_to(target);
    if distance < WAYPOINT_RADIUS {
        let _ = zombie.path.pop_front();
        if step.jump {
            zombie.jump = Some(JumpState {
                from: zombie.position,
                to: target,
                progress: 0.0,
            });
        }
    } else {
        advance_toward(zombie, target, dt);
    }
}

fn advance_toward(zombie: &mut Zombie, target: Position, dt: Duration) {
    let dx = target.x() - zombie.position.x();
    let dz = target.z() - zombie.position.z();
    let distance = (dx * dx + dz * dz).sqrt();
    if distance <= f32::EPSILON {
        return;
    }

    let travel = (zombie.speed * dt.as_secs_f32()).min(distance);
    zombie.position = Position::new(
        zombie.position.x() + dx / distance * travel,
        zombie.position.z() + dz / distance * travel,
    );
    zombie.heading = dx.atan2(dz);
}

fn emit_effect(
    effects: &mut EffectQueue,
    out_events: &mut Vec<Event>,
    kind: EffectKind,
    at: Position,
) {
    effects.push(kind, at);
    out_events.push(Event::EffectTriggered { kind, at });
}

fn next_random(state: &mut u64) -> u64 {
    *state = state.wrapping_mul(RNG_MULTIPLIER).wrapping_add(RNG_INCREMENT);
    *state
}

fn jump_altitude(zombie: &Zombie) -> f32 {
    match &zombie.jump {
        Some(jump) => {
            let t = jump.progress.clamp(0.0, 1.0);
            4.0 * JUMP_MAX_HEIGHT * t * (1.0 - t)
        }
        None => 0.0,
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{
        jump_altitude, ActiveEffect, BlockSnapshot, BlockView, CellCoord, GameSettings,
        HudSnapshot, Outcome, Phase, PlantSnapshot, PlantView, ProjectileSnapshot, ProjectileView,
        World, ZombieSnapshot, ZombieView, WELCOME_BANNER,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(_world: &World) -> &'static str {
        WELCOME_BANNER
    }

    /// Provides read-only access to the session settings.
    #[must_use]
    pub fn settings(world: &World) -> &GameSettings {
        &world.config.settings
    }

    /// Reports whether the coordinate pair addresses a cell inside the grid.
    #[must_use]
    pub fn is_valid_position(world: &World, cell: CellCoord) -> bool {
        world.grid.in_bounds(cell)
    }

    /// Cell occupied by the base.
    #[must_use]
    pub fn base_cell(world: &World) -> CellCoord {
        world.base_cell
    }

    /// Active phase of the day/night cycle.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Wave currently being fought or prepared for.
    #[must_use]
    pub fn wave(world: &World) -> u32 {
        world.wave
    }

    /// Terminal result of the session, once decided.
    #[must_use]
    pub fn outcome(world: &World) -> Option<Outcome> {
        world.outcome
    }

    /// Captures a read-only view of every plant in the garden.
    #[must_use]
    pub fn plant_view(world: &World) -> PlantView {
        PlantView::from_snapshots(
            world
                .plants
                .iter()
                .filter(|plant| plant.is_alive())
                .map(|plant| PlantSnapshot {
                    id: plant.id,
                    kind: plant.kind,
                    cell: plant.cell,
                    health: plant.health,
                    max_health: plant.max_health,
                    ready_in: plant.cooldown,
                })
                .collect(),
        )
    }

    /// Captures a read-only view of every living zombie.
    #[must_use]
    pub fn zombie_view(world: &World) -> ZombieView {
        ZombieView::from_snapshots(
            world
                .zombies
                .iter()
                .filter(|zombie| zombie.is_alive())
                .map(|zombie| ZombieSnapshot {
                    id: zombie.id,
                    kind: zombie.kind,
                    position: zombie.position,
                    altitude: jump_altitude(zombie),
                    heading: zombie.heading,
                    speed: zombie.speed,
                    health: zombie.health,
                    max_health: zombie.max_health,
                })
                .collect(),
        )
    }

    /// Captures a read-only view of every projectile in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .projectiles
                .iter()
                .filter(|projectile| !projectile.destroyed)
                .map(|projectile| ProjectileSnapshot {
                    id: projectile.id,
                    position: projectile.position,
                    altitude: projectile.altitude,
                })
                .collect(),
        )
    }

    /// Captures a read-only view of every placed block.
    #[must_use]
    pub fn block_view(world: &World) -> BlockView {
        BlockView::from_snapshots(
            world
                .blocks
                .iter()
                .filter(|block| block.durability > 0.0)
                .map(|block| BlockSnapshot {
                    id: block.id,
                    kind: block.kind,
                    cell: block.cell,
                    durability: block.durability,
                })
                .collect(),
        )
    }

    /// Snapshot of the plant occupying a cell, if one is alive there.
    #[must_use]
    pub fn plant_at(world: &World, cell: CellCoord) -> Option<PlantSnapshot> {
        let id = world.grid.cell(cell)?.plant?;
        world
            .plants
            .iter()
            .find(|plant| plant.id == id && plant.is_alive())
            .map(|plant| PlantSnapshot {
                id: plant.id,
                kind: plant.kind,
                cell: plant.cell,
                health: plant.health,
                max_health: plant.max_health,
                ready_in: plant.cooldown,
            })
    }

    /// Describes whatever blocks zombie movement through a cell, if anything.
    #[must_use]
    pub fn obstruction_at(world: &World, cell: CellCoord) -> Option<Obstruction> {
        let slot = world.grid.cell(cell)?;

        if let Some(block_id) = slot.block {
            let jumpable = world
                .blocks
                .iter()
                .find(|block| block.id == block_id)
                .map_or(false, |block| block.kind.jumpable());
            return Some(Obstruction { jumpable });
        }

        let plant_id = slot.plant?;
        let blocking = world
            .plants
            .iter()
            .find(|plant| plant.id == plant_id && plant.is_alive())
            .map_or(false, |plant| plant.kind.blocks_path());
        blocking.then_some(Obstruction { jumpable: false })
    }

    /// Cosmetic effects currently visible to renderers.
    #[must_use]
    pub fn active_effects(world: &World) -> &[ActiveEffect] {
        world.effects.active()
    }

    /// Builds the throttled session summary pushed to interface layers.
    #[must_use]
    pub fn hud(world: &World) -> HudSnapshot {
        let cycle = world.cycle_duration();
        let time_progress = if cycle.is_zero() {
            0.0
        } else {
            (world.phase_timer.as_secs_f32() / cycle.as_secs_f32()).min(1.0)
        };

        HudSnapshot {
            sun: world.sun,
            materials: world.materials,
            base_health: world.base_health,
            wave: world.wave,
            phase: world.phase,
            time_progress,
            selection: world.selection,
            paused: world.paused,
            speed: world.speed,
            zombies_killed: world.zombies_killed,
            elapsed: world.elapsed,
            outcome: world.outcome,
        }
    }

    /// Describes an obstacle occupying a cell from a zombie's perspective.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Obstruction {
        /// Whether a zombie may vault over the obstacle.
        pub jumpable: bool,
    }
}
