#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Chase.
//!
//! The world owns the maze, the active [`Session`], the lifecycle [`Phase`]
//! and the snapshot taken when the player leaves for the menu. Every mutation
//! flows through [`apply`]; collaborators observe state through [`query`].

pub mod collision;
mod config;
mod layout;
pub mod motion;

use std::collections::BTreeSet;

use maze_chase_core::{
    AdversaryColor, AdversaryId, CellCoord, Command, Direction, Event, Maze, Outcome, Phase,
    Position, WELCOME_BANNER,
};

pub use config::{ConfigError, GameConfig, ValidatedConfig};
pub use layout::{AdversarySpawn, GridMaze, LayoutKind, Spawns};
pub use motion::MouthOscillator;

/// Player-controlled entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    position: Position,
    direction: Direction,
    mouth: MouthOscillator,
}

impl Player {
    fn spawn(position: Position, mouth_speed: f32) -> Self {
        Self {
            position,
            direction: Direction::Right,
            mouth: MouthOscillator::new(mouth_speed),
        }
    }

    /// Upper-left corner of the player in pixels.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Direction the player travels in.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// State of the mouth animation.
    #[must_use]
    pub const fn mouth(&self) -> MouthOscillator {
        self.mouth
    }
}

/// Wandering adversary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Adversary {
    id: AdversaryId,
    position: Position,
    direction: Direction,
    color: AdversaryColor,
}

impl Adversary {
    /// Spawn slot of the adversary.
    #[must_use]
    pub const fn id(&self) -> AdversaryId {
        self.id
    }

    /// Upper-left corner of the adversary in pixels.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Heading the adversary travels in.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Appearance assigned to the adversary.
    #[must_use]
    pub const fn color(&self) -> AdversaryColor {
        self.color
    }
}

/// Everything that makes up one game in progress.
///
/// Cloning a session yields an independent deep copy, which is how the menu
/// snapshot is taken.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    score: u32,
    lives: u32,
    collectibles: BTreeSet<CellCoord>,
    player: Player,
    adversaries: Vec<Adversary>,
}

impl Session {
    fn fresh(maze: &dyn Maze, spawns: &Spawns, config: &ValidatedConfig) -> Self {
        let cell_size = config.cell_size();
        Self {
            score: 0,
            lives: config.starting_lives(),
            collectibles: maze.open_cells().into_iter().collect(),
            player: Player::spawn(spawns.player().origin(cell_size), config.mouth_speed()),
            adversaries: spawn_adversaries(spawns, cell_size),
        }
    }

    /// Accumulated score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Remaining lives.
    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    /// Cells that still hold a collectible.
    #[must_use]
    pub fn collectibles(&self) -> &BTreeSet<CellCoord> {
        &self.collectibles
    }

    /// The player entity.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Adversaries in spawn slot order.
    #[must_use]
    pub fn adversaries(&self) -> &[Adversary] {
        &self.adversaries
    }
}

/// Represents the authoritative Maze Chase world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: ValidatedConfig,
    maze: Box<dyn Maze>,
    spawns: Spawns,
    phase: Phase,
    session: Session,
    saved: Option<Session>,
    tick_index: u64,
}

impl World {
    /// Creates a world on the layout selected by the configuration.
    ///
    /// The world starts in [`Phase::Menu`] with a fresh session and no snapshot.
    #[must_use]
    pub fn new(config: ValidatedConfig) -> Self {
        let layout = config.layout();
        Self::assemble(config, Box::new(layout.maze()), layout.spawns())
    }

    /// Creates a world on a custom maze with explicit spawn points.
    pub fn with_maze(
        config: ValidatedConfig,
        maze: Box<dyn Maze>,
        spawns: Spawns,
    ) -> Result<Self, ConfigError> {
        if maze.columns() == 0 || maze.rows() == 0 {
            return Err(ConfigError::EmptyLayout {
                columns: maze.columns(),
                rows: maze.rows(),
            });
        }
        Ok(Self::assemble(config, maze, spawns))
    }

    fn assemble(config: ValidatedConfig, maze: Box<dyn Maze>, spawns: Spawns) -> Self {
        let session = Session::fresh(maze.as_ref(), &spawns, &config);
        Self {
            banner: WELCOME_BANNER,
            config,
            maze,
            spawns,
            phase: Phase::Menu,
            session,
            saved: None,
            tick_index: 0,
        }
    }

    fn enter_phase(&mut self, phase: Phase, out_events: &mut Vec<Event>) {
        if self.phase != phase {
            self.phase = phase;
            out_events.push(Event::PhaseChanged { phase });
        }
    }

    fn reset_session(&mut self, out_events: &mut Vec<Event>) {
        self.session = Session::fresh(self.maze.as_ref(), &self.spawns, &self.config);
        out_events.push(Event::SessionReset);
        self.announce_tallies(out_events);
    }

    fn announce_tallies(&self, out_events: &mut Vec<Event>) {
        out_events.push(Event::ScoreChanged {
            score: self.session.score,
        });
        out_events.push(Event::LivesChanged {
            lives: self.session.lives,
        });
    }

    fn start_new_game(&mut self, out_events: &mut Vec<Event>) {
        self.reset_session(out_events);
        self.enter_phase(Phase::Running, out_events);
    }

    fn continue_game(&mut self, out_events: &mut Vec<Event>) {
        if self.phase == Phase::Running {
            return;
        }
        match self.saved.clone() {
            Some(snapshot) => {
                self.session = snapshot;
                out_events.push(Event::SessionRestored);
                self.announce_tallies(out_events);
            }
            None => self.reset_session(out_events),
        }
        self.enter_phase(Phase::Running, out_events);
    }

    fn exit_to_menu(&mut self, out_events: &mut Vec<Event>) {
        if self.phase != Phase::Running {
            return;
        }
        self.saved = Some(self.session.clone());
        out_events.push(Event::SessionSaved);
        self.enter_phase(Phase::Menu, out_events);
    }

    fn respawn(&mut self, out_events: &mut Vec<Event>) {
        let cell_size = self.config.cell_size();
        self.session.player.position = self.spawns.player().origin(cell_size);
        self.session.adversaries = spawn_adversaries(&self.spawns, cell_size);
        out_events.push(Event::PlayerRespawned);
    }

    fn end_episode(&mut self, outcome: Outcome, out_events: &mut Vec<Event>) {
        self.enter_phase(Phase::Over, out_events);
        out_events.push(Event::EpisodeEnded { outcome });
        self.reset_session(out_events);
        self.enter_phase(Phase::Running, out_events);
    }

    fn tick(&mut self, out_events: &mut Vec<Event>) {
        if self.phase != Phase::Running {
            return;
        }

        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced {
            tick: self.tick_index,
        });

        let cell_size = self.config.cell_size();
        let maze = self.maze.as_ref();

        let player = &mut self.session.player;
        player.position = motion::try_move(
            player.position,
            player.direction,
            self.config.player_speed(),
            cell_size,
            maze,
        );
        player.mouth.advance();

        for adversary in &mut self.session.adversaries {
            match motion::step(
                adversary.position,
                adversary.direction,
                self.config.adversary_speed(),
                cell_size,
                maze,
            ) {
                Some(position) => adversary.position = position,
                None => out_events.push(Event::AdversaryBlocked {
                    adversary: adversary.id,
                }),
            }
        }

        self.resolve_collisions(out_events);
    }

    fn resolve_collisions(&mut self, out_events: &mut Vec<Event>) {
        let cell_size = self.config.cell_size();
        let player_position = self.session.player.position;

        if let Some(cell) =
            collision::consume_collectible(&mut self.session.collectibles, player_position, cell_size)
        {
            self.session.score = self
                .session
                .score
                .saturating_add(self.config.collectible_reward());
            out_events.push(Event::CollectibleConsumed { cell });
            out_events.push(Event::ScoreChanged {
                score: self.session.score,
            });
        }

        let hits = collision::adversaries_in_reach(
            player_position,
            self.session
                .adversaries
                .iter()
                .map(|adversary| (adversary.id, adversary.position)),
            cell_size,
        );

        if !hits.is_empty() {
            for adversary in hits {
                self.session.lives = self.session.lives.saturating_sub(1);
                out_events.push(Event::PlayerCaught { adversary });
                out_events.push(Event::LivesChanged {
                    lives: self.session.lives,
                });
            }

            if self.session.lives == 0 {
                self.end_episode(Outcome::Lost, out_events);
                return;
            }
            self.respawn(out_events);
        }

        if self.session.collectibles.is_empty() {
            self.end_episode(Outcome::Won, out_events);
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartNewGame => world.start_new_game(out_events),
        Command::ContinueGame => world.continue_game(out_events),
        Command::ExitToMenu => world.exit_to_menu(out_events),
        Command::ToggleMenu => match world.phase {
            Phase::Running => world.exit_to_menu(out_events),
            Phase::Menu | Phase::Over => world.continue_game(out_events),
        },
        Command::SetPlayerDirection { direction } => {
            if world.phase == Phase::Running {
                world.session.player.direction = direction;
            }
        }
        Command::SteerAdversary {
            adversary,
            direction,
        } => {
            if world.phase != Phase::Running {
                return;
            }
            if let Some(target) = world
                .session
                .adversaries
                .iter_mut()
                .find(|candidate| candidate.id == adversary)
            {
                target.direction = direction;
            }
        }
        Command::Tick => world.tick(out_events),
    }
}

fn spawn_adversaries(spawns: &Spawns, cell_size: f32) -> Vec<Adversary> {
    spawns
        .adversaries()
        .iter()
        .enumerate()
        .map(|(slot, spawn)| Adversary {
            id: AdversaryId::new(u32::try_from(slot).unwrap_or(u32::MAX)),
            position: spawn.cell().origin(cell_size),
            direction: Direction::Right,
            color: spawn.color(),
        })
        .collect()
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::collections::BTreeSet;

    use maze_chase_core::{AdversaryColor, AdversaryId, CellCoord, Direction, Maze, Phase, Position};

    use super::{Adversary, Player, Session, ValidatedConfig, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Accumulated score of the active session.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.session.score
    }

    /// Remaining lives in the active session.
    #[must_use]
    pub fn lives(world: &World) -> u32 {
        world.session.lives
    }

    /// Number of ticks processed since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Provides read-only access to the active session.
    #[must_use]
    pub fn session(world: &World) -> &Session {
        &world.session
    }

    /// Reports whether a menu snapshot is available to continue from.
    #[must_use]
    pub fn has_saved_session(world: &World) -> bool {
        world.saved.is_some()
    }

    /// Validated configuration the world was built from.
    #[must_use]
    pub fn config(world: &World) -> &ValidatedConfig {
        &world.config
    }

    /// Provides read-only access to the maze layout.
    #[must_use]
    pub fn maze(world: &World) -> &dyn Maze {
        world.maze.as_ref()
    }

    /// Captures a read-only view of the adversaries in spawn slot order.
    #[must_use]
    pub fn adversary_view(world: &World) -> AdversaryView {
        AdversaryView {
            snapshots: world
                .session
                .adversaries
                .iter()
                .map(|adversary| AdversarySnapshot {
                    id: adversary.id,
                    position: adversary.position,
                    direction: adversary.direction,
                    color: adversary.color,
                })
                .collect(),
        }
    }

    /// Borrows everything a renderer needs to draw one frame.
    #[must_use]
    pub fn frame_view(world: &World) -> FrameView<'_> {
        FrameView {
            maze: world.maze.as_ref(),
            cell_size: world.config.cell_size(),
            collectibles: &world.session.collectibles,
            player: &world.session.player,
            adversaries: &world.session.adversaries,
        }
    }

    /// Read-only snapshot describing all adversaries.
    #[derive(Clone, Debug)]
    pub struct AdversaryView {
        snapshots: Vec<AdversarySnapshot>,
    }

    impl AdversaryView {
        /// Iterator over the captured snapshots in spawn slot order.
        pub fn iter(&self) -> impl Iterator<Item = &AdversarySnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        pub fn into_vec(self) -> Vec<AdversarySnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single adversary used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct AdversarySnapshot {
        /// Spawn slot of the adversary.
        pub id: AdversaryId,
        /// Upper-left corner of the adversary in pixels.
        pub position: Position,
        /// Heading the adversary travels in.
        pub direction: Direction,
        /// Appearance assigned to the adversary.
        pub color: AdversaryColor,
    }

    /// Borrowed view of the drawable state. Renderers must not retain it.
    #[derive(Clone, Copy, Debug)]
    pub struct FrameView<'a> {
        maze: &'a dyn Maze,
        cell_size: f32,
        collectibles: &'a BTreeSet<CellCoord>,
        player: &'a Player,
        adversaries: &'a [Adversary],
    }

    impl<'a> FrameView<'a> {
        /// Static wall layout.
        #[must_use]
        pub fn maze(&self) -> &'a dyn Maze {
            self.maze
        }

        /// Pixel edge length of one grid cell.
        #[must_use]
        pub fn cell_size(&self) -> f32 {
            self.cell_size
        }

        /// Cells that still hold a collectible.
        #[must_use]
        pub fn collectibles(&self) -> &'a BTreeSet<CellCoord> {
            self.collectibles
        }

        /// The player entity.
        #[must_use]
        pub fn player(&self) -> &'a Player {
            self.player
        }

        /// Adversaries in spawn slot order.
        #[must_use]
        pub fn adversaries(&self) -> &'a [Adversary] {
            self.adversaries
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::new(GameConfig::default().validate().expect("valid config"))
    }

    #[test]
    fn world_starts_in_menu_with_fresh_session() {
        let world = world();
        assert_eq!(query::phase(&world), Phase::Menu);
        assert_eq!(query::score(&world), 0);
        assert_eq!(query::lives(&world), 3);
        assert!(!query::has_saved_session(&world));
        assert_eq!(query::adversary_view(&world).into_vec().len(), 4);
    }

    #[test]
    fn tick_in_menu_is_silent() {
        let mut world = world();
        let mut events = Vec::new();
        apply(&mut world, Command::Tick, &mut events);
        assert!(events.is_empty());
        assert_eq!(query::tick_index(&world), 0);
    }

    #[test]
    fn start_emits_reset_then_phase_change() {
        let mut world = world();
        let mut events = Vec::new();
        apply(&mut world, Command::StartNewGame, &mut events);
        assert_eq!(
            events,
            vec![
                Event::SessionReset,
                Event::ScoreChanged { score: 0 },
                Event::LivesChanged { lives: 3 },
                Event::PhaseChanged {
                    phase: Phase::Running
                },
            ]
        );
    }

    #[test]
    fn steering_is_ignored_outside_running() {
        let mut world = world();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SteerAdversary {
                adversary: AdversaryId::new(0),
                direction: Direction::Up,
            },
            &mut events,
        );
        let first = query::adversary_view(&world).into_vec()[0];
        assert_eq!(first.direction, Direction::Right);
    }

    #[test]
    fn empty_custom_maze_is_rejected() {
        let config = GameConfig::default().validate().expect("valid config");
        let result = World::with_maze(
            config,
            Box::new(GridMaze::open(0, 4)),
            Spawns::new(CellCoord::new(0, 0), Vec::new()),
        );
        assert!(matches!(
            result,
            Err(ConfigError::EmptyLayout {
                columns: 0,
                rows: 4
            })
        ));
    }
}
