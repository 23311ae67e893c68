//! Frame orchestration: one authoritative tick per rendered frame.
//!
//! The session owns the world plus every pure system and drives the fixed
//! per-frame pipeline: queued interface commands, then the tick, then the
//! systems reacting to the tick's events until the command stream is
//! quiescent, then renderer synchronisation and the throttled HUD push.

use std::time::Duration;

use garden_defence_core::{
    Command, Event, GameSettings, HudSnapshot, Outcome, PlantTarget,
};
use garden_defence_rendering::{Renderer, SceneSync};
use garden_defence_system_bootstrap::Bootstrap;
use garden_defence_system_plant_combat::PlantCombat;
use garden_defence_system_plant_targeting::PlantTargeting;
use garden_defence_system_wave_director::{Config as WaveConfig, WaveDirector};
use garden_defence_system_zombie_ai::{CellProbe, PlantProfile, ZombieAi};
use garden_defence_world::{self as world, query, World};

/// Cadence of HUD pushes toward interface layers.
const HUD_PERIOD: Duration = Duration::from_millis(100);

/// Outcome of one session frame.
#[derive(Clone, Debug)]
pub struct TickReport {
    /// Every event the world emitted this frame, in order.
    pub events: Vec<Event>,
    /// Fresh HUD snapshot, present at most ten times per simulated second.
    pub hud: Option<HudSnapshot>,
}

/// A running Garden Defence session.
#[derive(Debug)]
pub struct Session {
    world: World,
    zombie_ai: ZombieAi,
    plant_targeting: PlantTargeting,
    plant_combat: PlantCombat,
    wave_director: WaveDirector,
    scene: SceneSync,
    targets: Vec<PlantTarget>,
    queued: Vec<Command>,
    hud_since: Duration,
}

impl Session {
    /// Creates a session from settings and a seed shared by the world's
    /// ambient draws and the wave director's per-wave generators.
    #[must_use]
    pub fn new(settings: GameSettings, seed: u64) -> Self {
        Self {
            world: Bootstrap.launch(settings, seed),
            zombie_ai: ZombieAi::new(),
            plant_targeting: PlantTargeting::new(),
            plant_combat: PlantCombat::new(),
            wave_director: WaveDirector::new(WaveConfig::new(seed)),
            scene: SceneSync::new(),
            targets: Vec::new(),
            queued: Vec::new(),
            hud_since: Duration::ZERO,
        }
    }

    /// Banner to greet the player with.
    #[must_use]
    pub fn banner(&self) -> &str {
        Bootstrap.welcome_banner(&self.world)
    }

    /// Queues an interface command for the next frame.
    pub fn queue(&mut self, command: Command) {
        self.queued.push(command);
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Current HUD snapshot, bypassing the push throttle.
    #[must_use]
    pub fn hud(&self) -> HudSnapshot {
        query::hud(&self.world)
    }

    /// Terminal result of the session, once decided.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        query::outcome(&self.world)
    }

    /// Runs one frame: queued commands, the tick, systems until quiescent,
    /// renderer sync, HUD throttle.
    pub fn tick<R: Renderer>(&mut self, dt: Duration, renderer: &mut R) -> TickReport {
        let mut events = Vec::new();

        for command in std::mem::take(&mut self.queued) {
            world::apply(&mut self.world, command, &mut events);
        }
        world::apply(&mut self.world, Command::Tick { dt }, &mut events);

        let mut batch = events.clone();
        loop {
            let commands = self.run_systems(&batch);
            if commands.is_empty() {
                break;
            }

            let mut fresh = Vec::new();
            for command in commands {
                world::apply(&mut self.world, command, &mut fresh);
            }
            if fresh.is_empty() {
                break;
            }

            events.extend(fresh.iter().cloned());
            batch = fresh;
        }

        log_events(&events);

        self.scene.sync(
            &query::plant_view(&self.world),
            &query::zombie_view(&self.world),
            &query::projectile_view(&self.world),
            &query::block_view(&self.world),
            &events,
            renderer,
        );

        self.hud_since = self.hud_since.saturating_add(dt);
        let hud = if self.hud_since >= HUD_PERIOD {
            self.hud_since = Duration::ZERO;
            Some(query::hud(&self.world))
        } else {
            None
        };

        TickReport { events, hud }
    }

    fn run_systems(&mut self, events: &[Event]) -> Vec<Command> {
        let mut commands = Vec::new();

        let zombies = query::zombie_view(&self.world);
        let plants = query::plant_view(&self.world);
        let settings = query::settings(&self.world);
        let world_size = settings.world_size;
        let half = (world_size / 2) as i32;
        let base = query::base_cell(&self.world);

        let world_ref = &self.world;
        let probe = |cell| {
            if !query::is_valid_position(world_ref, cell) {
                return CellProbe::Blocked { jumpable: false };
            }
            match query::obstruction_at(world_ref, cell) {
                Some(obstruction) => CellProbe::Blocked {
                    jumpable: obstruction.jumpable,
                },
                None => CellProbe::Clear,
            }
        };
        let plant_profile = |cell| {
            query::plant_at(world_ref, cell).map(|plant| PlantProfile {
                kind: plant.kind,
                health_ratio: if plant.max_health > 0.0 {
                    plant.health / plant.max_health
                } else {
                    0.0
                },
            })
        };

        self.zombie_ai
            .handle(events, &zombies, base, half, probe, plant_profile, &mut commands);

        self.plant_targeting
            .handle(events, &plants, &zombies, &mut self.targets);
        self.plant_combat
            .handle(&self.targets, &plants, &mut commands);

        self.wave_director.handle(events, world_size, &mut commands);

        commands
    }
}

fn log_events(events: &[Event]) {
    for event in events {
        match event {
            Event::PhaseChanged { phase, wave } => {
                log::info!("phase changed to {phase:?} during wave {wave}");
            }
            Event::WaveCompleted { wave } => log::info!("wave {wave} survived"),
            Event::GameWon { waves } => log::info!("victory after {waves} waves"),
            Event::GameLost { final_wave } => {
                log::info!("base destroyed during wave {final_wave}");
            }
            Event::ZombieSpawned { zombie, kind, at } => {
                log::debug!("zombie {} ({kind:?}) spawned at {at:?}", zombie.get());
            }
            Event::PlacementRejected { reason, cell, .. } if reason.user_visible() => {
                log::warn!("placement at {cell:?} rejected: {reason:?}");
            }
            _ => {}
        }
    }
}
