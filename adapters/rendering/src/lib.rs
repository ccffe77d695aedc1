#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Maze Chase adapters.

use std::{f32::consts::FRAC_PI_2, time::Duration};

use anyhow::Result as AnyResult;
use glam::Vec2;
use maze_chase_core::{AdversaryColor, CellCoord, Direction, Outcome, Phase};
use thiserror::Error;

/// Height of the score and lives strip drawn beneath the maze, in pixels.
pub const HUD_HEIGHT: f32 = 32.0;

/// How long an outcome banner stays on screen.
pub const BANNER_DURATION: Duration = Duration::from_millis(2500);

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

impl From<AdversaryColor> for Color {
    fn from(color: AdversaryColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Direction requested by the player on this frame, if any.
    pub direction: Option<Direction>,
    /// Whether the adapter detected a menu toggle press on this frame.
    pub toggle_menu: bool,
    /// Whether the player asked for a new game on this frame.
    pub start_new_game: bool,
    /// Whether the player asked to continue the saved game on this frame.
    pub continue_game: bool,
}

/// Static wall layout that adapters draw behind the entities.
#[derive(Clone, Debug, PartialEq)]
pub struct MazePresentation {
    /// Number of columns contained in the maze.
    pub columns: u32,
    /// Number of rows contained in the maze.
    pub rows: u32,
    /// Pixel edge length of one cell.
    pub cell_size: f32,
    /// Every in-bounds wall cell.
    pub walls: Vec<CellCoord>,
    /// Fill color applied to wall cells.
    pub wall_color: Color,
}

impl MazePresentation {
    /// Creates a new maze descriptor.
    ///
    /// Returns an error when `cell_size` is not a positive finite number.
    pub fn new(
        columns: u32,
        rows: u32,
        cell_size: f32,
        walls: Vec<CellCoord>,
        wall_color: Color,
    ) -> Result<Self, RenderingError> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(RenderingError::InvalidCellSize { cell_size });
        }

        Ok(Self {
            columns,
            rows,
            cell_size,
            walls,
            wall_color,
        })
    }

    /// Total width of the maze in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_size
    }

    /// Total height of the maze in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_size
    }

    /// Pixel position of the center of `cell`.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(
            (cell.column() as f32 + 0.5) * self.cell_size,
            (cell.row() as f32 + 0.5) * self.cell_size,
        )
    }
}

/// Drawable state of the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPresentation {
    /// Upper-left corner in pixels.
    pub position: Vec2,
    /// Direction the mouth faces.
    pub direction: Direction,
    /// Mouth opening, nominally within `0.0..=0.5`.
    pub mouth_opening: f32,
    /// Body fill color.
    pub color: Color,
}

impl PlayerPresentation {
    /// Creates a new player presentation descriptor.
    #[must_use]
    pub const fn new(position: Vec2, direction: Direction, mouth_opening: f32, color: Color) -> Self {
        Self {
            position,
            direction,
            mouth_opening,
            color,
        }
    }

    /// Rotation of the mouth in radians, measured clockwise from +x in screen space.
    #[must_use]
    pub fn heading(&self) -> f32 {
        f32::from(self.direction.quarter_turns()) * FRAC_PI_2
    }
}

/// Drawable state of a single adversary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdversaryPresentation {
    /// Upper-left corner in pixels.
    pub position: Vec2,
    /// Body fill color.
    pub color: Color,
}

impl AdversaryPresentation {
    /// Creates a new adversary presentation descriptor.
    #[must_use]
    pub const fn new(position: Vec2, color: Color) -> Self {
        Self { position, color }
    }
}

/// Score and lives readout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HudPresentation {
    /// Accumulated score.
    pub score: u32,
    /// Remaining lives.
    pub lives: u32,
}

/// Timed notice announcing how the last episode ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutcomeBanner {
    outcome: Outcome,
    remaining: Duration,
}

impl OutcomeBanner {
    /// Creates a banner that stays visible for [`BANNER_DURATION`].
    #[must_use]
    pub const fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            remaining: BANNER_DURATION,
        }
    }

    /// Outcome being announced.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Text shown to the player.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self.outcome {
            Outcome::Won => "You win!",
            Outcome::Lost => "Game Over!",
        }
    }

    /// Counts down the display time, returning `false` once the banner expired.
    pub fn elapse(&mut self, dt: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(dt);
        !self.remaining.is_zero()
    }
}

/// Scene description combining the maze and its inhabitants.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Wall layout.
    pub maze: MazePresentation,
    /// Cells that still hold a collectible.
    pub collectibles: Vec<CellCoord>,
    /// Fill color applied to collectibles.
    pub collectible_color: Color,
    /// The player, if one should be drawn.
    pub player: Option<PlayerPresentation>,
    /// Adversaries in spawn slot order.
    pub adversaries: Vec<AdversaryPresentation>,
    /// Score and lives readout.
    pub hud: HudPresentation,
    /// Active lifecycle phase.
    pub phase: Phase,
    /// Whether the menu should offer to continue a saved game.
    pub can_continue: bool,
    /// Outcome notice currently on screen.
    pub banner: Option<OutcomeBanner>,
}

impl Scene {
    /// Creates an empty scene around the provided maze.
    #[must_use]
    pub fn new(maze: MazePresentation, collectible_color: Color) -> Self {
        Self {
            maze,
            collectibles: Vec::new(),
            collectible_color,
            player: None,
            adversaries: Vec::new(),
            hud: HudPresentation::default(),
            phase: Phase::Menu,
            can_continue: false,
            banner: None,
        }
    }

    /// Width of the entire scene.
    #[must_use]
    pub fn total_width(&self) -> f32 {
        self.maze.width()
    }

    /// Height of the entire scene including the HUD strip.
    #[must_use]
    pub fn total_height(&self) -> f32 {
        self.maze.height() + HUD_HEIGHT
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Maze Chase scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// per-frame input captured by the adapter, and refreshes the scene before
    /// it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, Error, PartialEq)]
pub enum RenderingError {
    /// Cells must have a positive finite edge length.
    #[error("cell_size must be a positive finite number (received {cell_size})")]
    InvalidCellSize {
        /// Provided edge length that failed validation.
        cell_size: f32,
    },
}
