#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Maze Chase experience.

mod simulation;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use maze_chase_rendering::{Color, Presentation, RenderingBackend};
use maze_chase_rendering_macroquad::MacroquadBackend;
use maze_chase_world::{query, GameConfig, LayoutKind, ValidatedConfig};
use tracing_subscriber::filter::EnvFilter;

use crate::simulation::Simulation;

const WINDOW_TITLE: &str = "Maze Chase";
const BACKGROUND: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// Command-line arguments accepted by the Maze Chase binary.
#[derive(Debug, Parser)]
#[command(name = "maze-chase", about = "Eat every dot in the maze while the ghosts wander.")]
struct CliArgs {
    /// TOML file providing game configuration.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Maze layout to play on.
    #[arg(long, value_name = "simple|decorative")]
    layout: Option<LayoutKind>,
    /// Seed for the adversary random number generator.
    #[arg(long)]
    seed: Option<u64>,
    /// Simulation ticks per second.
    #[arg(long, value_name = "HZ")]
    tick_rate: Option<u32>,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long, value_name = "BOOL")]
    vsync: Option<bool>,
    /// Log frame timing once per second.
    #[arg(long)]
    show_fps: bool,
}

impl CliArgs {
    /// Layers command-line overrides on top of the file configuration.
    fn apply_overrides(&self, mut config: GameConfig) -> GameConfig {
        if let Some(layout) = self.layout {
            config.layout = layout;
        }
        if let Some(seed) = self.seed {
            config.rng_seed = seed;
        }
        if let Some(tick_rate) = self.tick_rate {
            config.tick_rate_hz = tick_rate;
        }
        config
    }
}

fn load_config(args: &CliArgs) -> Result<ValidatedConfig> {
    let file_config = match &args.config {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str::<GameConfig>(&contents)
                .with_context(|| format!("failed to parse config file {}", path.display()))?
        }
        None => GameConfig::default(),
    };

    args.apply_overrides(file_config)
        .validate()
        .context("invalid game configuration")
}

/// Entry point for the Maze Chase command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    tracing::info!(
        layout = ?config.layout(),
        cell_size = config.cell_size(),
        tick_rate_hz = config.tick_rate_hz(),
        redirect_probability = config.redirect_probability(),
        rng_seed = config.rng_seed(),
        "configuration loaded"
    );

    let mut simulation = Simulation::new(config);
    tracing::info!("{}", query::welcome_banner(simulation.world()));
    let scene = simulation.build_scene()?;

    let backend = MacroquadBackend::new().with_show_fps(args.show_fps);
    let backend = match args.vsync {
        Some(enabled) => backend.with_vsync(enabled),
        None => backend,
    };

    backend.run(
        Presentation::new(WINDOW_TITLE, BACKGROUND, scene),
        move |dt, input, scene| simulation.frame(dt, input, scene),
    )
}
