#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs headless Garden Defence sessions.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use garden_defence_cli::session::Session;
use garden_defence_cli::settings;
use garden_defence_core::{
    difficulty_label, CellCoord, Command, EffectKind, GameSettings, Outcome, Phase, PlacementSlot,
};
use garden_defence_rendering::{EntityDescriptor, Renderer, SceneEntityId};
use glam::Vec2;
use rand::Rng;

/// Headless Garden Defence simulation runner.
#[derive(Debug, Parser)]
#[command(name = "garden-defence")]
struct Args {
    /// Seed shared by the world's ambient draws and the wave director.
    /// Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated seconds to run before stopping, unless the game ends first.
    #[arg(long, default_value_t = 180.0)]
    duration: f32,

    /// Simulated milliseconds advanced per frame.
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// TOML file overriding the default game settings.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Plant a small opening garden before the first wave.
    #[arg(long)]
    defend: bool,
}

/// Renderer that only tallies notifications; headless runs draw nothing.
#[derive(Debug, Default)]
struct TallyRenderer {
    created: usize,
    destroyed: usize,
    effects: usize,
}

impl Renderer for TallyRenderer {
    fn entity_created(&mut self, _descriptor: EntityDescriptor) {
        self.created += 1;
    }

    fn entity_destroyed(&mut self, _id: SceneEntityId) {
        self.destroyed += 1;
    }

    fn entity_moved(&mut self, _id: SceneEntityId, _position: Vec2, _altitude: f32, _rotation: f32) {
    }

    fn visual_effect(&mut self, _kind: EffectKind, _position: Vec2) {
        self.effects += 1;
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    anyhow::ensure!(
        args.duration > 0.0 && args.duration.is_finite(),
        "duration must be positive"
    );
    anyhow::ensure!(args.tick_ms > 0, "tick-ms must be positive");

    let game_settings = match &args.settings {
        Some(path) => settings::load(path)
            .with_context(|| format!("cannot start session with settings from {}", path.display()))?,
        None => GameSettings::default(),
    };

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut session = Session::new(game_settings, seed);

    println!("{}", session.banner());
    println!("session seed: {seed:#018x}");

    if args.defend {
        queue_opening_garden(&mut session);
    }

    let tick = Duration::from_millis(args.tick_ms);
    let limit = Duration::from_secs_f32(args.duration);
    let mut renderer = TallyRenderer::default();
    let mut simulated = Duration::ZERO;
    let mut last_status = u64::MAX;

    while session.outcome().is_none() && simulated < limit {
        let report = session.tick(tick, &mut renderer);
        simulated += tick;

        if let Some(hud) = report.hud {
            let secs = hud.elapsed.as_secs();
            if secs % 5 == 0 && secs != last_status {
                last_status = secs;
                let phase = match hud.phase {
                    Phase::Day => "day",
                    Phase::Night => "night",
                };
                println!(
                    "[t+{secs:>4}s] wave {} ({}) | {} {:>3.0}% | sun {} mats {} | base {:.0} | kills {}",
                    hud.wave,
                    difficulty_label(hud.wave),
                    phase,
                    hud.time_progress * 100.0,
                    hud.sun,
                    hud.materials,
                    hud.base_health.max(0.0),
                    hud.zombies_killed,
                );
            }
        }
    }

    let hud = session.hud();
    match session.outcome() {
        Some(Outcome::Won { waves }) => {
            println!("victory: all {waves} waves survived");
        }
        Some(Outcome::Lost { final_wave }) => {
            println!(
                "defeat: base destroyed during wave {final_wave} ({})",
                difficulty_label(final_wave)
            );
        }
        None => println!("stopped after {} simulated seconds", simulated.as_secs()),
    }
    println!(
        "zombies destroyed: {} | simulated time: {}s | scene: {} created, {} destroyed, {} effects",
        hud.zombies_killed,
        hud.elapsed.as_secs(),
        renderer.created,
        renderer.destroyed,
        renderer.effects,
    );

    Ok(())
}

/// Queues the default opening layout: two sunflowers, one peashooter and a
/// ring of dirt blocks funnelling zombies toward the shooter.
fn queue_opening_garden(session: &mut Session) {
    let plants = [
        (1usize, CellCoord::new(-2, 0)),
        (1, CellCoord::new(2, 0)),
        (0, CellCoord::new(0, 2)),
    ];
    for (index, cell) in plants {
        session.queue(Command::SelectPlant { index });
        session.queue(Command::Place {
            cell,
            slot: PlacementSlot::Plant,
        });
    }

    let blocks = [
        CellCoord::new(0, 4),
        CellCoord::new(4, 0),
        CellCoord::new(0, -4),
        CellCoord::new(-4, 0),
    ];
    for cell in blocks {
        session.queue(Command::SelectBlock { index: 0 });
        session.queue(Command::Place {
            cell,
            slot: PlacementSlot::Block,
        });
    }
}
