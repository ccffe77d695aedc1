//! Tunable parameters and their validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::LayoutKind;

/// Raw game configuration, typically deserialized from TOML.
///
/// Missing fields fall back to the reference values. A configuration must be
/// validated with [`GameConfig::validate`] before a world can be built from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Reference maze layout to play on.
    pub layout: LayoutKind,
    /// Pixel edge length of one grid cell.
    pub cell_size: f32,
    /// Player travel distance per tick, in pixels.
    pub player_speed: f32,
    /// Adversary travel distance per tick, in pixels.
    pub adversary_speed: f32,
    /// Mouth oscillator phase change per tick.
    pub mouth_speed: f32,
    /// Chance that an adversary picks a fresh heading before moving.
    pub redirect_probability: f64,
    /// Score awarded for each collectible.
    pub collectible_reward: u32,
    /// Lives granted at the start of every episode.
    pub starting_lives: u32,
    /// Simulation ticks per second.
    pub tick_rate_hz: u32,
    /// Upper bound on ticks replayed after a slow frame.
    pub max_catch_up_ticks: u32,
    /// Seed for the adversary wandering policy.
    pub rng_seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            layout: LayoutKind::Simple,
            cell_size: 20.0,
            player_speed: 2.0,
            adversary_speed: 1.5,
            mouth_speed: 0.15,
            redirect_probability: 0.02,
            collectible_reward: 10,
            starting_lives: 3,
            tick_rate_hz: 60,
            max_catch_up_ticks: 6,
            rng_seed: 0x6d61_7a65_6368_6173,
        }
    }
}

impl GameConfig {
    /// Checks every parameter, yielding a configuration the world accepts.
    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        ensure_positive("cell_size", self.cell_size)?;
        ensure_positive("player_speed", self.player_speed)?;
        ensure_positive("adversary_speed", self.adversary_speed)?;
        ensure_positive("mouth_speed", self.mouth_speed)?;

        if !(0.0..=1.0).contains(&self.redirect_probability) {
            return Err(ConfigError::ProbabilityOutOfRange(
                self.redirect_probability,
            ));
        }

        ensure_non_zero("starting_lives", self.starting_lives)?;
        ensure_non_zero("tick_rate_hz", self.tick_rate_hz)?;
        ensure_non_zero("max_catch_up_ticks", self.max_catch_up_ticks)?;

        Ok(ValidatedConfig { inner: self })
    }
}

fn ensure_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn ensure_non_zero(field: &'static str, value: u32) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::Zero { field })
    } else {
        Ok(())
    }
}

/// Configuration that passed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedConfig {
    inner: GameConfig,
}

impl ValidatedConfig {
    /// Reference maze layout to play on.
    #[must_use]
    pub fn layout(&self) -> LayoutKind {
        self.inner.layout
    }

    /// Pixel edge length of one grid cell.
    #[must_use]
    pub fn cell_size(&self) -> f32 {
        self.inner.cell_size
    }

    /// Player travel distance per tick, in pixels.
    #[must_use]
    pub fn player_speed(&self) -> f32 {
        self.inner.player_speed
    }

    /// Adversary travel distance per tick, in pixels.
    #[must_use]
    pub fn adversary_speed(&self) -> f32 {
        self.inner.adversary_speed
    }

    /// Mouth oscillator phase change per tick.
    #[must_use]
    pub fn mouth_speed(&self) -> f32 {
        self.inner.mouth_speed
    }

    /// Chance that an adversary picks a fresh heading before moving.
    #[must_use]
    pub fn redirect_probability(&self) -> f64 {
        self.inner.redirect_probability
    }

    /// Score awarded for each collectible.
    #[must_use]
    pub fn collectible_reward(&self) -> u32 {
        self.inner.collectible_reward
    }

    /// Lives granted at the start of every episode.
    #[must_use]
    pub fn starting_lives(&self) -> u32 {
        self.inner.starting_lives
    }

    /// Simulation ticks per second.
    #[must_use]
    pub fn tick_rate_hz(&self) -> u32 {
        self.inner.tick_rate_hz
    }

    /// Upper bound on ticks replayed after a slow frame.
    #[must_use]
    pub fn max_catch_up_ticks(&self) -> u32 {
        self.inner.max_catch_up_ticks
    }

    /// Seed for the adversary wandering policy.
    #[must_use]
    pub fn rng_seed(&self) -> u64 {
        self.inner.rng_seed
    }
}

/// Errors raised while validating configuration or building a maze.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A length or speed was zero, negative, or not finite.
    #[error("`{field}` must be a positive finite number, got {value}")]
    NotPositive {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// A count that must be at least one was zero.
    #[error("`{field}` must be at least 1")]
    Zero {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The redirect probability fell outside `[0, 1]`.
    #[error("`redirect_probability` must lie within [0, 1], got {0}")]
    ProbabilityOutOfRange(f64),
    /// A maze declared no cells.
    #[error("maze layout must have at least one column and one row, got {columns}x{rows}")]
    EmptyLayout {
        /// Declared column count.
        columns: u32,
        /// Declared row count.
        rows: u32,
    },
    /// A textual maze had rows of differing width.
    #[error("maze row {row} has {found} columns, expected {expected}")]
    RaggedLayout {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A layout name did not match any reference layout.
    #[error("unknown layout `{0}`, expected `simple` or `decorative`")]
    UnknownLayout(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let validated = GameConfig::default().validate().expect("valid defaults");
        assert_eq!(validated.cell_size(), 20.0);
        assert_eq!(validated.starting_lives(), 3);
        assert_eq!(validated.tick_rate_hz(), 60);
    }

    #[test]
    fn rejects_non_positive_cell_size() {
        let config = GameConfig {
            cell_size: 0.0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "cell_size",
                value: 0.0
            })
        );
    }

    #[test]
    fn rejects_non_finite_speed() {
        let config = GameConfig {
            adversary_speed: f32::INFINITY,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "adversary_speed",
                ..
            })
        ));
    }

    #[test]
    fn rejects_probability_outside_unit_interval() {
        let config = GameConfig {
            redirect_probability: 1.5,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ProbabilityOutOfRange(1.5))
        );

        let config = GameConfig {
            redirect_probability: f64::NAN,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_counts() {
        for field in ["starting_lives", "tick_rate_hz", "max_catch_up_ticks"] {
            let mut config = GameConfig::default();
            match field {
                "starting_lives" => config.starting_lives = 0,
                "tick_rate_hz" => config.tick_rate_hz = 0,
                _ => config.max_catch_up_ticks = 0,
            }
            assert_eq!(config.validate(), Err(ConfigError::Zero { field }));
        }
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: GameConfig = toml::from_str(
            r#"
            layout = "decorative"
            rng_seed = 7
            "#,
        )
        .expect("parse");
        assert_eq!(config.layout, LayoutKind::Decorative);
        assert_eq!(config.rng_seed, 7);
        assert_eq!(config.player_speed, 2.0);
    }

    #[test]
    fn unknown_toml_fields_are_rejected() {
        let parsed: Result<GameConfig, _> = toml::from_str("ghost_speed = 3.0");
        assert!(parsed.is_err());
    }
}
