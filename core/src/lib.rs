#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! views, and respond exclusively with new command batches.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Chase.";

/// Lifecycle phase of the game state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Idle menu; the simulation does not tick.
    Menu,
    /// Simulation ticks at the configured cadence.
    Running,
    /// Transient terminal state between an episode end and the automatic reset.
    Over,
}

/// Result reported when an episode ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Every collectible was consumed.
    Won,
    /// The player ran out of lives.
    Lost,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Resets the session and starts ticking.
    StartNewGame,
    /// Restores the session saved on the last exit to the menu and resumes ticking.
    ContinueGame,
    /// Saves the running session and returns to the menu.
    ExitToMenu,
    /// Exits to the menu while running, continues the saved game otherwise.
    ToggleMenu,
    /// Changes the direction the player travels in.
    SetPlayerDirection {
        /// Direction the player should travel in from the next tick onward.
        direction: Direction,
    },
    /// Overrides the heading of a single adversary.
    SteerAdversary {
        /// Spawn slot of the adversary being steered.
        adversary: AdversaryId,
        /// Heading assigned to the adversary.
        direction: Direction,
    },
    /// Advances the simulation by one fixed tick.
    Tick,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation advanced by one tick.
    TimeAdvanced {
        /// Number of ticks processed since the world was created.
        tick: u64,
    },
    /// Announces that the state machine entered a new phase.
    PhaseChanged {
        /// Phase that became active.
        phase: Phase,
    },
    /// Score, lives, collectibles and entities returned to their initial values.
    SessionReset,
    /// The running session was copied into the menu snapshot.
    SessionSaved,
    /// The menu snapshot replaced the current session.
    SessionRestored,
    /// An adversary's move was rejected by a wall.
    AdversaryBlocked {
        /// Spawn slot of the blocked adversary.
        adversary: AdversaryId,
    },
    /// The player consumed the collectible in the provided cell.
    CollectibleConsumed {
        /// Cell that held the collectible.
        cell: CellCoord,
    },
    /// The score changed.
    ScoreChanged {
        /// Score after the change.
        score: u32,
    },
    /// An adversary came within reach of the player.
    PlayerCaught {
        /// Spawn slot of the adversary that reached the player.
        adversary: AdversaryId,
    },
    /// The number of remaining lives changed.
    LivesChanged {
        /// Lives remaining after the change.
        lives: u32,
    },
    /// The player and every adversary returned to their spawn points.
    PlayerRespawned,
    /// An episode finished; emitted exactly once per win or loss.
    EpisodeEnded {
        /// How the episode finished.
        outcome: Outcome,
    },
}

/// Cardinal travel directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Movement toward increasing x.
    Right,
    /// Movement toward increasing y.
    Down,
    /// Movement toward decreasing x.
    Left,
    /// Movement toward decreasing y.
    Up,
}

const UNIT_VECTORS: [(f32, f32); 4] = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)];

impl Direction {
    /// Every direction, in clockwise order starting at [`Direction::Right`].
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Unit vector pointing in this direction, in screen space (y grows downward).
    #[must_use]
    pub const fn unit_vector(self) -> (f32, f32) {
        UNIT_VECTORS[self.quarter_turns() as usize]
    }

    /// Number of clockwise quarter turns from [`Direction::Right`].
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Self::Right => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Up => 3,
        }
    }
}

/// Spawn slot of an adversary. Stable across respawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AdversaryId(u32);

impl AdversaryId {
    /// Creates a new adversary identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Visual appearance applied to an adversary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdversaryColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl AdversaryColor {
    /// Classic red chaser.
    pub const RED: Self = Self::from_rgb(0xff, 0x00, 0x00);
    /// Classic pink chaser.
    pub const PINK: Self = Self::from_rgb(0xff, 0xc0, 0xcb);
    /// Classic cyan chaser.
    pub const CYAN: Self = Self::from_rgb(0x00, 0xff, 0xff);
    /// Classic orange chaser.
    pub const ORANGE: Self = Self::from_rgb(0xff, 0xa5, 0x00);

    /// Creates a new adversary color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates are signed so that cells beyond the maze border can be
/// expressed and answered by [`Maze::is_wall`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: i32,
    row: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Pixel position of the cell's upper-left corner.
    #[must_use]
    pub fn origin(self, cell_size: f32) -> Position {
        Position::new(self.column as f32 * cell_size, self.row as f32 * cell_size)
    }
}

/// Continuous position measured in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal pixel coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical pixel coordinate.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Position reached by travelling `distance` pixels in `direction`.
    #[must_use]
    pub fn offset(self, direction: Direction, distance: f32) -> Self {
        let (dx, dy) = direction.unit_vector();
        Self::new(self.x + dx * distance, self.y + dy * distance)
    }

    /// Euclidean distance to another position.
    #[must_use]
    pub fn distance(self, other: Position) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Grid cell containing this position, using floor division by `cell_size`.
    #[must_use]
    pub fn cell(self, cell_size: f32) -> CellCoord {
        CellCoord::new(
            (self.x / cell_size).floor() as i32,
            (self.y / cell_size).floor() as i32,
        )
    }
}

/// Static wall layout of a maze.
///
/// Implementations must be pure and total: every coordinate, including those
/// outside `columns × rows`, yields an answer, and cells outside the bounds
/// are always walls.
pub trait Maze: fmt::Debug {
    /// Number of columns declared by the layout.
    fn columns(&self) -> u32;

    /// Number of rows declared by the layout.
    fn rows(&self) -> u32;

    /// Reports whether the provided cell is a wall.
    fn is_wall(&self, cell: CellCoord) -> bool;

    /// Reports whether the provided cell lies within the declared bounds.
    fn contains(&self, cell: CellCoord) -> bool {
        let column = u32::try_from(cell.column()).ok();
        let row = u32::try_from(cell.row()).ok();
        matches!((column, row), (Some(column), Some(row)) if column < self.columns() && row < self.rows())
    }

    /// Enumerates every in-bounds cell that is not a wall, in row-major order.
    fn open_cells(&self) -> Vec<CellCoord> {
        let columns = i32::try_from(self.columns()).unwrap_or(i32::MAX);
        let rows = i32::try_from(self.rows()).unwrap_or(i32::MAX);
        (0..rows)
            .flat_map(|row| (0..columns).map(move |column| CellCoord::new(column, row)))
            .filter(|cell| !self.is_wall(*cell))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Direction, Maze, Position};

    #[derive(Debug)]
    struct Open {
        columns: u32,
        rows: u32,
    }

    impl Maze for Open {
        fn columns(&self) -> u32 {
            self.columns
        }

        fn rows(&self) -> u32 {
            self.rows
        }

        fn is_wall(&self, cell: CellCoord) -> bool {
            !self.contains(cell)
        }
    }

    #[test]
    fn unit_vectors_follow_clockwise_order() {
        let vectors: Vec<_> = Direction::ALL.iter().map(|d| d.unit_vector()).collect();
        assert_eq!(
            vectors,
            vec![(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)]
        );
    }

    #[test]
    fn position_cell_uses_floor_division() {
        assert_eq!(Position::new(39.9, 20.0).cell(20.0), CellCoord::new(1, 1));
        assert_eq!(Position::new(-0.5, 0.0).cell(20.0), CellCoord::new(-1, 0));
    }

    #[test]
    fn offset_travels_along_unit_vector() {
        let start = Position::new(280.0, 460.0);
        assert_eq!(
            start.offset(Direction::Up, 2.0),
            Position::new(280.0, 458.0)
        );
        assert_eq!(
            start.offset(Direction::Left, 1.5),
            Position::new(278.5, 460.0)
        );
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn open_cells_exclude_out_of_bounds() {
        let maze = Open {
            columns: 3,
            rows: 2,
        };
        assert_eq!(maze.open_cells().len(), 6);
        assert!(maze.is_wall(CellCoord::new(-1, 0)));
        assert!(maze.is_wall(CellCoord::new(3, 0)));
        assert!(maze.is_wall(CellCoord::new(0, 2)));
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        let cell = CellCoord::new(-3, 17);
        let bytes = bincode::serialize(&cell).expect("serialize");
        let restored: CellCoord = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, cell);
    }
}
