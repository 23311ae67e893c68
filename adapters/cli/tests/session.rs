use std::time::Duration;

use garden_defence_cli::session::Session;
use garden_defence_core::{
    CellCoord, Command, Event, GameSettings, Outcome, Phase, PlacementSlot, Selection,
};
use garden_defence_rendering::RecordingRenderer;
use garden_defence_world::query;

const TICK: Duration = Duration::from_millis(100);

fn run_for(session: &mut Session, simulated: Duration) -> Vec<Event> {
    let mut renderer = RecordingRenderer::new();
    let mut events = Vec::new();
    let mut elapsed = Duration::ZERO;
    while elapsed < simulated {
        let report = session.tick(TICK, &mut renderer);
        events.extend(report.events);
        elapsed += TICK;
        renderer.clear();
    }
    events
}

fn run_until_over(session: &mut Session, limit: Duration) {
    let mut renderer = RecordingRenderer::new();
    let mut elapsed = Duration::ZERO;
    while session.outcome().is_none() && elapsed < limit {
        let _ = session.tick(TICK, &mut renderer);
        elapsed += TICK;
        renderer.clear();
    }
}

#[test]
fn night_falls_and_wave_one_spawns() {
    let mut session = Session::new(GameSettings::default(), 42);
    let hud = session.hud();
    assert_eq!(hud.sun, 200);
    assert_eq!(hud.materials, 50);
    assert!((hud.base_health - 100.0).abs() < f32::EPSILON);
    assert_eq!(hud.wave, 1);
    assert_eq!(hud.phase, Phase::Day);

    let events = run_for(&mut session, Duration::from_secs(16));

    assert!(
        events.iter().any(|event| matches!(
            event,
            Event::PhaseChanged {
                phase: Phase::Night,
                wave: 1,
            }
        )),
        "day ends after its 15 second duration"
    );
    assert_eq!(session.hud().phase, Phase::Night);
    assert!(
        events
            .iter()
            .any(|event| matches!(event, Event::ZombieSpawned { .. })),
        "wave one spawning begins with the night"
    );
    assert!(query::zombie_view(session.world()).iter().next().is_some());
}

#[test]
fn undefended_base_falls_during_wave_one() {
    let mut session = Session::new(GameSettings::default(), 42);
    run_until_over(&mut session, Duration::from_secs(300));

    assert_eq!(
        session.outcome(),
        Some(Outcome::Lost { final_wave: 1 }),
        "with no defences the base falls before any wave completes"
    );
    assert!(session.hud().base_health <= 0.0);
}

#[test]
fn queued_placements_apply_before_the_tick() {
    let mut session = Session::new(GameSettings::default(), 7);
    session.queue(Command::SelectPlant { index: 1 });
    session.queue(Command::Place {
        cell: CellCoord::new(1, 1),
        slot: PlacementSlot::Plant,
    });

    let mut renderer = RecordingRenderer::new();
    let report = session.tick(TICK, &mut renderer);

    assert!(report
        .events
        .iter()
        .any(|event| matches!(event, Event::PlantPlaced { .. })));
    assert_eq!(session.hud().sun, 150);
    assert!(query::plant_at(session.world(), CellCoord::new(1, 1)).is_some());
}

#[test]
fn restart_returns_the_session_to_its_initial_state() {
    let mut session = Session::new(GameSettings::default(), 9);
    session.queue(Command::SelectPlant { index: 0 });
    session.queue(Command::Place {
        cell: CellCoord::new(0, 3),
        slot: PlacementSlot::Plant,
    });
    let _ = run_for(&mut session, Duration::from_secs(40));

    session.queue(Command::Restart);
    let mut renderer = RecordingRenderer::new();
    let report = session.tick(TICK, &mut renderer);
    assert!(report
        .events
        .iter()
        .any(|event| matches!(event, Event::WorldReset)));

    // Restarting reseeds the world, so the restarted session must be
    // indistinguishable from a fresh one advanced by the same single tick.
    let mut fresh = Session::new(GameSettings::default(), 9);
    let _ = fresh.tick(TICK, &mut renderer);
    assert_eq!(session.hud(), fresh.hud());

    let hud = session.hud();
    assert_eq!(hud.materials, 50);
    assert!((hud.base_health - 100.0).abs() < f32::EPSILON);
    assert_eq!(hud.wave, 1);
    assert_eq!(hud.selection, Selection::None);
    assert_eq!(hud.zombies_killed, 0);
    assert_eq!(hud.outcome, None);
    assert!(query::plant_view(session.world()).into_vec().is_empty());
    assert!(query::zombie_view(session.world()).into_vec().is_empty());
    assert!(query::projectile_view(session.world())
        .into_vec()
        .is_empty());
    assert!(query::block_view(session.world()).into_vec().is_empty());
}

#[test]
fn hud_pushes_respect_the_throttle() {
    let mut session = Session::new(GameSettings::default(), 3);
    let mut renderer = RecordingRenderer::new();

    let first = session.tick(Duration::from_millis(50), &mut renderer);
    assert!(first.hud.is_none(), "50 ms since the last push");

    let second = session.tick(Duration::from_millis(50), &mut renderer);
    assert!(second.hud.is_some(), "100 ms reaches the 10 Hz cadence");
}

#[test]
fn identical_seeds_replay_identical_sessions() {
    let first = replay(0xc0ffee, Duration::from_secs(60));
    let second = replay(0xc0ffee, Duration::from_secs(60));
    assert_eq!(first.0, second.0, "event logs diverged");
    assert_eq!(first.1, second.1, "final snapshots diverged");

    let other = replay(0xdecade, Duration::from_secs(60));
    assert_ne!(
        first.0, other.0,
        "different seeds should produce different assaults"
    );
}

fn replay(seed: u64, simulated: Duration) -> (Vec<Event>, garden_defence_core::HudSnapshot) {
    let mut session = Session::new(GameSettings::default(), seed);
    session.queue(Command::SelectPlant { index: 0 });
    session.queue(Command::Place {
        cell: CellCoord::new(0, 3),
        slot: PlacementSlot::Plant,
    });
    let events = run_for(&mut session, simulated);
    let hud = session.hud();
    (events, hud)
}
