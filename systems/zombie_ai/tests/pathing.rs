use garden_defence_core::{CellCoord, Command, PathStep, PlacementSlot};
use garden_defence_system_zombie_ai::{plan_path, CellProbe};
use garden_defence_world::{self as world, query, World, WorldConfig};

fn probe_for(world: &World) -> impl Fn(CellCoord) -> CellProbe + '_ {
    move |cell: CellCoord| {
        if !query::is_valid_position(world, cell) {
            return CellProbe::Blocked { jumpable: false };
        }
        match query::obstruction_at(world, cell) {
            Some(obstruction) => CellProbe::Blocked {
                jumpable: obstruction.jumpable,
            },
            None => CellProbe::Clear,
        }
    }
}

fn place(world: &mut World, command: Command) {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
}

#[test]
fn paths_route_around_wall_plants() {
    let mut world = World::new(WorldConfig::default());
    place(&mut world, Command::SelectPlant { index: 2 });
    place(
        &mut world,
        Command::Place {
            cell: CellCoord::new(2, 0),
            slot: PlacementSlot::Plant,
        },
    );
    assert!(query::obstruction_at(&world, CellCoord::new(2, 0)).is_some());

    let probe = probe_for(&world);
    let path = plan_path(
        CellCoord::new(5, 0),
        query::base_cell(&world),
        10,
        &probe,
    );

    assert!(!path.is_empty());
    assert!(path.iter().all(|step| step.cell != CellCoord::new(2, 0)));
    assert_eq!(path.last(), Some(&PathStep::walk(CellCoord::new(0, 0))));
}

#[test]
fn shooter_plants_are_not_obstacles() {
    let mut world = World::new(WorldConfig::default());
    place(&mut world, Command::SelectPlant { index: 0 });
    place(
        &mut world,
        Command::Place {
            cell: CellCoord::new(2, 0),
            slot: PlacementSlot::Plant,
        },
    );
    assert!(query::obstruction_at(&world, CellCoord::new(2, 0)).is_none());

    let probe = probe_for(&world);
    let path = plan_path(
        CellCoord::new(5, 0),
        query::base_cell(&world),
        10,
        &probe,
    );

    assert!(path.contains(&PathStep::walk(CellCoord::new(2, 0))));
}

#[test]
fn dirt_blocks_report_as_jumpable_obstructions() {
    let mut world = World::new(WorldConfig::default());
    place(&mut world, Command::SelectBlock { index: 0 });
    place(
        &mut world,
        Command::Place {
            cell: CellCoord::new(3, 0),
            slot: PlacementSlot::Block,
        },
    );

    let obstruction =
        query::obstruction_at(&world, CellCoord::new(3, 0)).expect("dirt obstructs");
    assert!(obstruction.jumpable);

    place(&mut world, Command::SelectBlock { index: 2 });
    place(
        &mut world,
        Command::Place {
            cell: CellCoord::new(4, 0),
            slot: PlacementSlot::Block,
        },
    );
    let iron = query::obstruction_at(&world, CellCoord::new(4, 0)).expect("iron obstructs");
    assert!(!iron.jumpable);

    // With clear neighbours the block is detoured, not vaulted.
    let probe = probe_for(&world);
    let path = plan_path(
        CellCoord::new(6, 0),
        query::base_cell(&world),
        10,
        &probe,
    );
    assert!(path.iter().all(|step| !step.jump));
    assert!(path.iter().all(|step| step.cell != CellCoord::new(3, 0)));
    assert!(path.iter().all(|step| step.cell != CellCoord::new(4, 0)));
}
