//! Grid-constrained movement of continuous positions.

use maze_chase_core::{Direction, Maze, Position};

/// Upper bound of the mouth phase before the oscillator reverses.
const MOUTH_PHASE_LIMIT: f32 = 0.5;

/// Attempts to move `position` by `speed` pixels in `direction`.
///
/// The move is accepted in full when the cell containing the candidate
/// position is open, and rejected in full otherwise, in which case the input
/// position is returned unchanged.
#[must_use]
pub fn try_move(
    position: Position,
    direction: Direction,
    speed: f32,
    cell_size: f32,
    maze: &dyn Maze,
) -> Position {
    step(position, direction, speed, cell_size, maze).unwrap_or(position)
}

/// Candidate position after a move, or `None` when a wall rejects it.
pub(crate) fn step(
    position: Position,
    direction: Direction,
    speed: f32,
    cell_size: f32,
    maze: &dyn Maze,
) -> Option<Position> {
    let candidate = position.offset(direction, speed);
    if maze.is_wall(candidate.cell(cell_size)) {
        None
    } else {
        Some(candidate)
    }
}

/// Cosmetic oscillator driving the player's mouth animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouthOscillator {
    phase: f32,
    velocity: f32,
}

impl MouthOscillator {
    /// Creates a closed mouth opening at `speed` per tick.
    #[must_use]
    pub const fn new(speed: f32) -> Self {
        Self {
            phase: 0.0,
            velocity: speed,
        }
    }

    /// Current opening, nominally within `[0, 0.5]`.
    #[must_use]
    pub const fn phase(&self) -> f32 {
        self.phase
    }

    /// Signed phase change applied on the next tick.
    #[must_use]
    pub const fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Advances the phase and reverses direction once it leaves `[0, 0.5]`.
    pub fn advance(&mut self) {
        self.phase += self.velocity;
        if self.phase > MOUTH_PHASE_LIMIT || self.phase < 0.0 {
            self.velocity = -self.velocity;
        }
    }
}
