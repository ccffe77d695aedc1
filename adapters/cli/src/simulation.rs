//! Fixed-tick driver that wires the world, the wandering system and the
//! scheduler to a rendering backend.

use std::time::Duration;

use anyhow::Result;
use glam::Vec2;
use maze_chase_core::{CellCoord, Command, Event, Maze, Phase, Position};
use maze_chase_rendering::{
    AdversaryPresentation, Color, FrameInput, HudPresentation, MazePresentation, OutcomeBanner,
    PlayerPresentation, Scene,
};
use maze_chase_system_scheduler::{Config as SchedulerConfig, TickHandle, TickScheduler};
use maze_chase_system_wandering::{Config as WanderingConfig, Wandering};
use maze_chase_world::{self as world, query, ValidatedConfig, World};

const WALL_COLOR: Color = Color::new(0.0, 0.0, 1.0, 1.0);
const COLLECTIBLE_COLOR: Color = Color::new(1.0, 1.0, 1.0, 1.0);
const PLAYER_COLOR: Color = Color::new(1.0, 1.0, 0.0, 1.0);

/// Owns every piece of mutable game state and advances it once per tick.
#[derive(Debug)]
pub(crate) struct Simulation {
    world: World,
    wandering: Wandering,
    scheduler: TickScheduler,
    ticks: Option<TickHandle>,
    commands: Vec<Command>,
    events: Vec<Event>,
    banner: Option<OutcomeBanner>,
}

impl Simulation {
    pub(crate) fn new(config: ValidatedConfig) -> Self {
        Self::from_world(World::new(config))
    }

    fn from_world(world: World) -> Self {
        let config = query::config(&world);
        let wandering = Wandering::new(WanderingConfig::new(
            config.redirect_probability(),
            config.rng_seed(),
        ));
        let scheduler = TickScheduler::new(SchedulerConfig::new(
            config.tick_rate_hz(),
            config.max_catch_up_ticks(),
        ));

        Self {
            world,
            wandering,
            scheduler,
            ticks: None,
            commands: Vec::new(),
            events: Vec::new(),
            banner: None,
        }
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Builds the initial scene, including the static wall layout.
    pub(crate) fn build_scene(&self) -> Result<Scene> {
        let maze = query::maze(&self.world);
        let presentation = MazePresentation::new(
            maze.columns(),
            maze.rows(),
            query::config(&self.world).cell_size(),
            wall_cells(maze),
            WALL_COLOR,
        )?;

        let mut scene = Scene::new(presentation, COLLECTIBLE_COLOR);
        self.populate_scene(&mut scene);
        Ok(scene)
    }

    /// Runs one rendered frame: input, due ticks, then a scene refresh.
    pub(crate) fn frame(&mut self, dt: Duration, input: FrameInput, scene: &mut Scene) {
        self.apply_input(input);
        self.advance(dt);

        if let Some(banner) = self.banner.as_mut() {
            if !banner.elapse(dt) {
                self.banner = None;
            }
        }

        self.populate_scene(scene);
    }

    fn apply_input(&mut self, input: FrameInput) {
        if input.toggle_menu {
            self.execute(Command::ToggleMenu);
        }
        if input.start_new_game {
            self.execute(Command::StartNewGame);
        }
        if input.continue_game {
            self.execute(Command::ContinueGame);
        }
        if let Some(direction) = input.direction {
            self.execute(Command::SetPlayerDirection { direction });
        }
    }

    fn execute(&mut self, command: Command) {
        self.events.clear();
        world::apply(&mut self.world, command, &mut self.events);
        self.observe_events();
    }

    fn advance(&mut self, dt: Duration) {
        let Some(handle) = self.ticks else {
            return;
        };
        if !self.scheduler.is_active(handle) {
            self.ticks = None;
            return;
        }

        let due = self.scheduler.advance(dt);
        for _ in 0..due {
            let phase = query::phase(&self.world);
            if phase != Phase::Running {
                break;
            }

            self.commands.clear();
            self.wandering
                .steer(phase, &query::adversary_view(&self.world), &mut self.commands);

            self.events.clear();
            for command in self.commands.drain(..) {
                world::apply(&mut self.world, command, &mut self.events);
            }
            world::apply(&mut self.world, Command::Tick, &mut self.events);

            self.wandering.handle(&self.events, &mut self.commands);
            self.observe_events();

            self.events.clear();
            for command in self.commands.drain(..) {
                world::apply(&mut self.world, command, &mut self.events);
            }
        }
    }

    fn observe_events(&mut self) {
        for event in &self.events {
            match *event {
                Event::PhaseChanged { phase } => {
                    tracing::info!(?phase, "phase changed");
                    match phase {
                        Phase::Running => {
                            let handle = self.scheduler.start();
                            if self.ticks != Some(handle) {
                                tracing::debug!(generation = handle.generation(), "ticking started");
                            }
                            self.ticks = Some(handle);
                        }
                        Phase::Menu => {
                            if let Some(handle) = self.scheduler.stop() {
                                tracing::debug!(generation = handle.generation(), "ticking stopped");
                            }
                            self.ticks = None;
                        }
                        Phase::Over => {}
                    }
                }
                Event::EpisodeEnded { outcome } => {
                    tracing::info!(
                        ?outcome,
                        tick = query::tick_index(&self.world),
                        "episode ended"
                    );
                    self.banner = Some(OutcomeBanner::new(outcome));
                }
                Event::LivesChanged { lives } => {
                    tracing::debug!(lives, "lives changed");
                }
                _ => {}
            }
        }
    }

    fn populate_scene(&self, scene: &mut Scene) {
        let frame = query::frame_view(&self.world);

        scene.collectibles.clear();
        scene
            .collectibles
            .extend(frame.collectibles().iter().copied());

        let player = frame.player();
        scene.player = Some(PlayerPresentation::new(
            to_vec2(player.position()),
            player.direction(),
            player.mouth().phase(),
            PLAYER_COLOR,
        ));

        scene.adversaries.clear();
        scene
            .adversaries
            .extend(frame.adversaries().iter().map(|adversary| {
                AdversaryPresentation::new(
                    to_vec2(adversary.position()),
                    Color::from(adversary.color()),
                )
            }));

        scene.hud = HudPresentation {
            score: query::score(&self.world),
            lives: query::lives(&self.world),
        };
        scene.phase = query::phase(&self.world);
        scene.can_continue = query::has_saved_session(&self.world);
        scene.banner = self.banner;
    }
}

fn wall_cells(maze: &dyn Maze) -> Vec<CellCoord> {
    let columns = i32::try_from(maze.columns()).unwrap_or(i32::MAX);
    let rows = i32::try_from(maze.rows()).unwrap_or(i32::MAX);
    (0..rows)
        .flat_map(|row| (0..columns).map(move |column| CellCoord::new(column, row)))
        .filter(|cell| maze.is_wall(*cell))
        .collect()
}

fn to_vec2(position: Position) -> Vec2 {
    Vec2::new(position.x(), position.y())
}
