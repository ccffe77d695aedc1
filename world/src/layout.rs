//! Reference maze layouts and spawn points.

use std::{ops::RangeInclusive, str::FromStr};

use maze_chase_core::{AdversaryColor, CellCoord, Maze};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

const REFERENCE_COLUMNS: u32 = 28;
const REFERENCE_ROWS: u32 = 31;

const CENTER_COLUMNS: RangeInclusive<i32> = 11..=16;
const CENTER_ROWS: RangeInclusive<i32> = 11..=14;

const SIMPLE_PLAYER_START: CellCoord = CellCoord::new(14, 23);
const DECORATIVE_PLAYER_START: CellCoord = CellCoord::new(14, 17);

const CLASSIC_ADVERSARIES: [AdversarySpawn; 4] = [
    AdversarySpawn::new(CellCoord::new(13, 11), AdversaryColor::RED),
    AdversarySpawn::new(CellCoord::new(14, 11), AdversaryColor::PINK),
    AdversarySpawn::new(CellCoord::new(13, 12), AdversaryColor::CYAN),
    AdversarySpawn::new(CellCoord::new(14, 12), AdversaryColor::ORANGE),
];

/// Straight wall segment: the fixed row or column, then the inclusive span.
#[derive(Clone, Copy, Debug)]
enum Stroke {
    Row(i32, i32, i32),
    Column(i32, i32, i32),
}

const DECORATIVE_STROKES: [Stroke; 26] = [
    Stroke::Row(3, 2, 5),
    Stroke::Column(2, 3, 6),
    Stroke::Row(6, 2, 5),
    Stroke::Column(5, 6, 9),
    Stroke::Row(9, 2, 5),
    Stroke::Column(7, 3, 9),
    Stroke::Column(10, 3, 9),
    Stroke::Row(9, 7, 10),
    Stroke::Column(12, 3, 9),
    Stroke::Row(3, 12, 15),
    Stroke::Column(15, 3, 6),
    Stroke::Row(6, 14, 15),
    Stroke::Column(15, 6, 9),
    Stroke::Column(17, 3, 9),
    Stroke::Column(20, 3, 9),
    Stroke::Row(3, 17, 20),
    Stroke::Row(6, 19, 20),
    Stroke::Row(6, 17, 17),
    Stroke::Column(24, 3, 9),
    Stroke::Row(9, 22, 24),
    Stroke::Column(22, 7, 9),
    Stroke::Row(20, 4, 23),
    Stroke::Column(13, 20, 25),
    Stroke::Column(14, 20, 25),
    Stroke::Row(25, 2, 8),
    Stroke::Row(25, 19, 25),
];

/// Selects one of the built-in maze layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Bordered maze with a single central blockage.
    #[default]
    Simple,
    /// Bordered maze with the central blockage plus decorative strokes.
    Decorative,
}

impl LayoutKind {
    /// Builds the wall grid for the layout.
    #[must_use]
    pub fn maze(self) -> GridMaze {
        match self {
            Self::Simple => GridMaze::simple(),
            Self::Decorative => GridMaze::decorative(),
        }
    }

    /// Spawn points associated with the layout.
    #[must_use]
    pub fn spawns(self) -> Spawns {
        match self {
            Self::Simple => Spawns::with_classic_adversaries(SIMPLE_PLAYER_START),
            Self::Decorative => Spawns::with_classic_adversaries(DECORATIVE_PLAYER_START),
        }
    }
}

impl FromStr for LayoutKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "decorative" => Ok(Self::Decorative),
            other => Err(ConfigError::UnknownLayout(other.to_owned())),
        }
    }
}

/// Dense wall grid backing every built-in layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMaze {
    columns: u32,
    rows: u32,
    walls: Vec<bool>,
}

impl GridMaze {
    /// Creates a grid without any interior walls.
    ///
    /// Cells outside the grid still count as walls.
    #[must_use]
    pub fn open(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            walls: vec![false; capacity],
        }
    }

    /// Creates a grid whose outermost ring of cells is walled.
    #[must_use]
    pub fn bordered(columns: u32, rows: u32) -> Self {
        let mut maze = Self::open(columns, rows);
        let last_column = i32::try_from(columns).unwrap_or(i32::MAX) - 1;
        let last_row = i32::try_from(rows).unwrap_or(i32::MAX) - 1;
        maze.fill_row(0, 0..=last_column);
        maze.fill_row(last_row, 0..=last_column);
        maze.fill_column(0, 0..=last_row);
        maze.fill_column(last_column, 0..=last_row);
        maze
    }

    /// The 28 × 31 layout with a border and a central blockage.
    #[must_use]
    pub fn simple() -> Self {
        let mut maze = Self::bordered(REFERENCE_COLUMNS, REFERENCE_ROWS);
        maze.fill_center_blockage();
        maze
    }

    /// The 28 × 31 layout with a border, the central blockage and decorative strokes.
    #[must_use]
    pub fn decorative() -> Self {
        let mut maze = Self::simple();
        for stroke in DECORATIVE_STROKES {
            match stroke {
                Stroke::Row(row, from, to) => maze.fill_row(row, from..=to),
                Stroke::Column(column, from, to) => maze.fill_column(column, from..=to),
            }
        }
        maze
    }

    /// Parses a textual layout where `#` marks a wall and any other character is open.
    pub fn from_ascii(lines: &[&str]) -> Result<Self, ConfigError> {
        let expected = lines.first().map_or(0, |line| line.chars().count());
        if expected == 0 {
            return Err(ConfigError::EmptyLayout {
                columns: 0,
                rows: u32::try_from(lines.len()).unwrap_or(u32::MAX),
            });
        }

        let mut walls = Vec::with_capacity(expected * lines.len());
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(ConfigError::RaggedLayout {
                    row,
                    expected,
                    found,
                });
            }
            walls.extend(line.chars().map(|symbol| symbol == '#'));
        }

        Ok(Self {
            columns: u32::try_from(expected).unwrap_or(u32::MAX),
            rows: u32::try_from(lines.len()).unwrap_or(u32::MAX),
            walls,
        })
    }

    /// Number of in-bounds wall cells.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.walls.iter().filter(|wall| **wall).count()
    }

    fn fill_center_blockage(&mut self) {
        for row in CENTER_ROWS {
            self.fill_row(row, CENTER_COLUMNS);
        }
    }

    fn fill_row(&mut self, row: i32, columns: RangeInclusive<i32>) {
        for column in columns {
            self.set_wall(CellCoord::new(column, row));
        }
    }

    fn fill_column(&mut self, column: i32, rows: RangeInclusive<i32>) {
        for row in rows {
            self.set_wall(CellCoord::new(column, row));
        }
    }

    fn set_wall(&mut self, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.walls.get_mut(index) {
                *slot = true;
            }
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }
}

impl Maze for GridMaze {
    fn columns(&self) -> u32 {
        self.columns
    }

    fn rows(&self) -> u32 {
        self.rows
    }

    fn is_wall(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .and_then(|index| self.walls.get(index).copied())
            .unwrap_or(true)
    }
}

/// Spawn slot and appearance of a single adversary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdversarySpawn {
    cell: CellCoord,
    color: AdversaryColor,
}

impl AdversarySpawn {
    /// Creates a new adversary spawn description.
    #[must_use]
    pub const fn new(cell: CellCoord, color: AdversaryColor) -> Self {
        Self { cell, color }
    }

    /// Cell whose upper-left corner the adversary spawns at.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Appearance assigned to the adversary.
    #[must_use]
    pub const fn color(&self) -> AdversaryColor {
        self.color
    }
}

/// Start cells of the player and every adversary for a layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spawns {
    player: CellCoord,
    adversaries: Vec<AdversarySpawn>,
}

impl Spawns {
    /// Creates spawn points from explicit cells.
    #[must_use]
    pub fn new(player: CellCoord, adversaries: Vec<AdversarySpawn>) -> Self {
        Self {
            player,
            adversaries,
        }
    }

    /// Creates spawn points with the four classic adversaries at the maze center.
    #[must_use]
    pub fn with_classic_adversaries(player: CellCoord) -> Self {
        Self::new(player, CLASSIC_ADVERSARIES.to_vec())
    }

    /// Cell the player starts from and respawns at.
    #[must_use]
    pub const fn player(&self) -> CellCoord {
        self.player
    }

    /// Adversary spawn slots in slot order.
    #[must_use]
    pub fn adversaries(&self) -> &[AdversarySpawn] {
        &self.adversaries
    }
}
