mod common;

use common::{pin, UniverseBuilder};
use genesis_data::{SignalKind, Species};
use genesis_lib::model::systems::action;
use genesis_lib::model::TickOutcome;

#[test]
fn test_pinned_agent_eats_its_cell() {
    let mut universe = UniverseBuilder::new()
        .with_size(10, 10)
        .quiet()
        .with_uniform_energy(100.0)
        .with_agent(Species::Prey, 5, 5, |a| {
            pin(a);
            a.genome.eat_threshold = 50.0;
        })
        .build();
    let before = universe.agents()[0].clone();

    assert_eq!(universe.update(), TickOutcome::Continue);

    let after = &universe.agents()[0];
    assert_eq!(after.position(), (5, 5));
    assert_eq!(after.facing, before.facing);
    assert_eq!(after.energy, before.energy + 100.0 - 0.5);
    assert_eq!(universe.field().get(5, 5), 0.0);
    assert_eq!(universe.field().total_consumed(), 100.0);
}

#[test]
fn test_below_threshold_cell_is_left_alone() {
    let mut universe = UniverseBuilder::new()
        .with_size(10, 10)
        .quiet()
        .with_uniform_energy(40.0)
        .with_agent(Species::Prey, 2, 2, |a| {
            pin(a);
            a.genome.eat_threshold = 50.0;
        })
        .build();

    universe.update();

    assert_eq!(universe.field().get(2, 2), 40.0);
    assert_eq!(universe.agents()[0].energy, 200.0 - 0.5);
}

#[test]
fn test_predator_kills_prey_sharing_its_cell() {
    let mut universe = UniverseBuilder::new()
        .with_size(20, 20)
        .quiet()
        .with_config(|c| {
            c.features.predators = true;
            c.features.communication = true;
            c.predation.spawn_chance = 0.0;
        })
        .with_agent(Species::Predator, 4, 4, pin)
        .with_agent(Species::Prey, 4, 4, pin)
        .build();
    let predator_id = universe.agents()[0].id();
    let prey_id = universe.agents()[1].id();
    let prey_energy = universe.agents()[1].energy;

    universe.update();

    assert_agent_dead!(universe, prey_id);
    assert_agent_alive!(universe, predator_id);
    assert_population!(universe, 1);

    let predator = &universe.agents()[0];
    assert_eq!(predator.energy, 200.0 - 0.75 + prey_energy * 0.5);

    let alarms: Vec<_> = universe
        .signals()
        .signals()
        .iter()
        .filter(|s| s.kind == SignalKind::Alarm)
        .collect();
    assert_eq!(alarms.len(), 1);
    assert_eq!((alarms[0].x, alarms[0].y), (4, 4));
    assert_eq!(alarms[0].strength, 2.0);

    assert_eq!(universe.stats().total_kills, 1);
    assert_eq!(universe.stats().total_deaths, 1);
}

#[test]
fn test_killed_prey_is_not_hunted_twice() {
    let mut universe = UniverseBuilder::new()
        .with_size(20, 20)
        .quiet()
        .with_config(|c| {
            c.features.predators = true;
            c.predation.spawn_chance = 0.0;
        })
        .with_agent(Species::Predator, 2, 2, pin)
        .with_agent(Species::Predator, 2, 2, pin)
        .with_agent(Species::Prey, 2, 2, pin)
        .build();

    universe.update();

    assert_population!(universe, 2);
    assert_eq!(universe.agents()[0].energy, 200.0 - 0.75 + 100.0);
    assert_eq!(universe.agents()[1].energy, 200.0 - 0.75);
    assert_eq!(universe.stats().total_kills, 1);
}

#[test]
fn test_silent_kill_without_communication() {
    let mut universe = UniverseBuilder::new()
        .with_size(20, 20)
        .quiet()
        .with_config(|c| {
            c.features.predators = true;
            c.predation.spawn_chance = 0.0;
        })
        .with_agent(Species::Predator, 1, 1, pin)
        .with_agent(Species::Prey, 1, 1, pin)
        .build();

    universe.update();

    assert_population!(universe, 1);
    assert!(universe.signals().is_empty());
}

#[test]
fn test_prey_acting_first_is_still_killed() {
    let mut universe = UniverseBuilder::new()
        .with_size(20, 20)
        .quiet()
        .with_config(|c| {
            c.features.predators = true;
            c.predation.spawn_chance = 0.0;
        })
        .with_agent(Species::Prey, 7, 7, pin)
        .with_agent(Species::Predator, 7, 7, pin)
        .build();

    universe.update();

    // The prey paid its upkeep before the predator took half of what remained.
    let predator = &universe.agents()[0];
    assert!(predator.is_predator());
    assert_eq!(predator.energy, 200.0 - 0.75 + (200.0 - 0.5) * 0.5);
}

#[test]
fn test_old_agent_dies_at_end_of_tick() {
    let mut universe = UniverseBuilder::new()
        .with_size(10, 10)
        .quiet()
        .with_agent(Species::Prey, 3, 3, |a| {
            pin(a);
            a.age = 1000;
        })
        .with_agent(Species::Prey, 6, 6, pin)
        .build();
    let old_id = universe.agents()[0].id();
    let young_id = universe.agents()[1].id();

    universe.update();

    assert_agent_dead!(universe, old_id);
    assert_agent_alive!(universe, young_id);
    assert_eq!(universe.stats().total_deaths, 1);
    assert_eq!(universe.metrics().counter("old_age_deaths"), 1);
}

#[test]
fn test_starved_agent_is_swept() {
    let mut universe = UniverseBuilder::new()
        .with_size(10, 10)
        .quiet()
        .with_agent(Species::Prey, 0, 0, |a| {
            pin(a);
            a.energy = 0.25;
        })
        .build();

    universe.update();

    assert_population!(universe, 0);
    assert_eq!(universe.stats().total_deaths, 1);
}

#[test]
fn test_movement_wraps_on_every_edge() {
    let universe = UniverseBuilder::new()
        .with_size(10, 10)
        .quiet()
        .with_agent(Species::Prey, 9, 0, |_| {})
        .build();
    let config = universe.config().clone();
    let mut agent = universe.agents()[0].clone();

    assert!(action::apply_move(&mut agent, 1, -1, &config));
    assert_eq!(agent.position(), (0, 9));
    assert!(action::apply_move(&mut agent, -1, 1, &config));
    assert_eq!(agent.position(), (9, 0));
    assert!(!action::apply_move(&mut agent, 0, 0, &config));
    assert_eq!(agent.position(), (9, 0));
}

#[test]
fn test_rich_agent_reproduces_nearby() {
    let mut universe = UniverseBuilder::new()
        .with_size(10, 10)
        .quiet()
        .with_agent(Species::Prey, 5, 5, |a| {
            pin(a);
            a.genome.reproduce_threshold = 300.0;
            a.energy = 400.0;
        })
        .build();
    let parent_id = universe.agents()[0].id();

    universe.update();

    assert_population!(universe, 2);
    let parent = &universe.agents()[0];
    let child = &universe.agents()[1];
    assert_eq!(parent.energy, 400.0 - 0.5 - 150.0);
    assert_eq!(parent.offspring_count, 1);
    assert_eq!(child.identity.parent_id, Some(parent_id));
    assert_eq!(child.genome.generation, parent.genome.generation + 1);
    assert_eq!(child.energy, 200.0);
    assert_eq!(child.birth_tick, universe.tick());
    assert_eq!(child.birth_tick, 1);
    assert!(child.genome.reproduce_threshold >= 200.0);
    assert_eq!(universe.stats().total_births, 1);
}
