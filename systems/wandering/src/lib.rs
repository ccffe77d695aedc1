#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Stochastic heading policy for adversaries.
//!
//! Adversaries do not pursue the player. Before each tick every adversary
//! independently has a small chance of picking a new heading, and any
//! adversary whose move was rejected by a wall picks a new heading right after
//! the tick. The system owns a seeded ChaCha generator so a given seed always
//! yields the same command stream.

use maze_chase_core::{AdversaryId, Command, Direction, Event, Phase};
use maze_chase_world::query::AdversaryView;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the wandering system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    redirect_probability: f64,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration.
    ///
    /// `redirect_probability` is clamped into `[0, 1]`.
    #[must_use]
    pub fn new(redirect_probability: f64, rng_seed: u64) -> Self {
        let redirect_probability = if redirect_probability.is_nan() {
            0.0
        } else {
            redirect_probability.clamp(0.0, 1.0)
        };
        Self {
            redirect_probability,
            rng_seed,
        }
    }
}

/// Pure system that emits `SteerAdversary` commands.
#[derive(Debug)]
pub struct Wandering {
    redirect_probability: f64,
    rng: ChaCha8Rng,
}

impl Wandering {
    /// Creates a new wandering system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            redirect_probability: config.redirect_probability,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Rolls the pre-move redirect for every adversary ahead of the next tick.
    ///
    /// Nothing is emitted and no randomness is drawn unless the game is running.
    pub fn steer(&mut self, phase: Phase, adversaries: &AdversaryView, out: &mut Vec<Command>) {
        if phase != Phase::Running {
            return;
        }

        for snapshot in adversaries.iter() {
            if self.rng.gen_bool(self.redirect_probability) {
                out.push(self.redirect(snapshot.id));
            }
        }
    }

    /// Re-steers every adversary reported blocked in the provided events.
    ///
    /// Blocked reports are discarded when the same batch respawned or reset
    /// the adversaries, since the blocked entities no longer exist.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        let repopulated = events
            .iter()
            .any(|event| matches!(event, Event::PlayerRespawned | Event::SessionReset));
        if repopulated {
            return;
        }

        for event in events {
            if let Event::AdversaryBlocked { adversary } = event {
                out.push(self.redirect(*adversary));
            }
        }
    }

    fn redirect(&mut self, adversary: AdversaryId) -> Command {
        let direction = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
        Command::SteerAdversary {
            adversary,
            direction,
        }
    }
}
