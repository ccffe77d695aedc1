use maze_chase_core::{AdversaryId, Command, Event, Phase};
use maze_chase_system_wandering::{Config, Wandering};
use maze_chase_world::{self as world, query, GameConfig, World};

fn running_world() -> World {
    let mut world = World::new(GameConfig::default().validate().expect("valid config"));
    let mut events = Vec::new();
    world::apply(&mut world, Command::StartNewGame, &mut events);
    world
}

fn steered(commands: &[Command]) -> Vec<AdversaryId> {
    commands
        .iter()
        .filter_map(|command| match command {
            Command::SteerAdversary { adversary, .. } => Some(*adversary),
            _ => None,
        })
        .collect()
}

#[test]
fn zero_probability_never_redirects_before_moving() {
    let world = running_world();
    let mut wandering = Wandering::new(Config::new(0.0, 1));
    let mut commands = Vec::new();
    for _ in 0..500 {
        wandering.steer(Phase::Running, &query::adversary_view(&world), &mut commands);
    }
    assert!(commands.is_empty());
}

#[test]
fn certain_probability_redirects_every_adversary() {
    let world = running_world();
    let mut wandering = Wandering::new(Config::new(1.0, 1));
    let mut commands = Vec::new();
    wandering.steer(Phase::Running, &query::adversary_view(&world), &mut commands);
    assert_eq!(
        steered(&commands),
        (0..4).map(AdversaryId::new).collect::<Vec<_>>()
    );
}

#[test]
fn no_redirects_outside_running() {
    let world = running_world();
    let mut wandering = Wandering::new(Config::new(1.0, 1));
    let mut commands = Vec::new();
    wandering.steer(Phase::Menu, &query::adversary_view(&world), &mut commands);
    wandering.steer(Phase::Over, &query::adversary_view(&world), &mut commands);
    assert!(commands.is_empty());
}

#[test]
fn blocked_adversaries_are_always_resteered() {
    let mut world = running_world();
    let mut wandering = Wandering::new(Config::new(0.0, 1));

    let mut events = Vec::new();
    world::apply(&mut world, Command::Tick, &mut events);
    let blocked: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::AdversaryBlocked { adversary } => Some(*adversary),
            _ => None,
        })
        .collect();
    assert!(!blocked.is_empty());

    let mut commands = Vec::new();
    wandering.handle(&events, &mut commands);
    assert_eq!(steered(&commands), blocked);
}

#[test]
fn same_seed_yields_same_command_stream() {
    let first = replay(0xfeed, 600);
    let second = replay(0xfeed, 600);
    assert_eq!(first, second);
    assert_ne!(first, replay(0xbeef, 600));
}

fn replay(seed: u64, ticks: usize) -> Vec<Command> {
    let mut world = running_world();
    let mut wandering = Wandering::new(Config::new(0.02, seed));
    let mut log = Vec::new();

    for _ in 0..ticks {
        let mut commands = Vec::new();
        wandering.steer(
            query::phase(&world),
            &query::adversary_view(&world),
            &mut commands,
        );

        let mut events = Vec::new();
        for command in commands.drain(..) {
            log.push(command);
            world::apply(&mut world, command, &mut events);
        }
        world::apply(&mut world, Command::Tick, &mut events);

        wandering.handle(&events, &mut commands);
        for command in commands {
            log.push(command);
            let mut ignored = Vec::new();
            world::apply(&mut world, command, &mut ignored);
        }
    }

    log
}
