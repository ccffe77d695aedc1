#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Maze Chase.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The menu uses Macroquad's immediate-mode UI module. All UI-specific calls
//! live inside the local `ui` module to avoid leaking Macroquad UI types
//! throughout the renderer.

mod ui;

use self::ui::{draw_menu_ui, MenuUiContext, MenuUiResult};
use anyhow::Result;
use glam::Vec2;
use macroquad::input::{is_key_pressed, KeyCode};
use macroquad::math::Vec2 as MacroquadVec2;
use maze_chase_core::{Direction, Phase};
use maze_chase_rendering::{
    AdversaryPresentation, Color, FrameInput, MazePresentation, OutcomeBanner,
    PlayerPresentation, Presentation, RenderingBackend, Scene, HUD_HEIGHT,
};
use std::{
    f32::consts::{PI, TAU},
    time::{Duration, Instant},
};

const WINDOW_WIDTH: i32 = 560;
const WINDOW_HEIGHT: i32 = 652;
const MENU_SIZE: Vec2 = Vec2::new(320.0, 220.0);
const COLLECTIBLE_RADIUS: f32 = 2.0;
const ARC_SEGMENTS: u16 = 24;
const HUD_FONT_SIZE: f32 = 22.0;
const BANNER_FONT_SIZE: u16 = 40;

/// Tracks UI-sourced interactions so they can be merged with physical input on the next frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct MenuInputState {
    start_new_game_latched: bool,
    continue_game_latched: bool,
}

impl MenuInputState {
    /// Returns whether the menu requested a new game and clears the latch so the
    /// action fires only once.
    pub fn take_start_new_game(&mut self) -> bool {
        let latched = self.start_new_game_latched;
        self.start_new_game_latched = false;
        latched
    }

    /// Records that the "New Game" button was pressed this frame.
    pub fn register_start_new_game(&mut self) {
        self.start_new_game_latched = true;
    }

    /// Returns whether the menu requested to continue and clears the latch.
    pub fn take_continue_game(&mut self) -> bool {
        let latched = self.continue_game_latched;
        self.continue_game_latched = false;
        latched
    }

    /// Records that the "Continue" button was pressed this frame.
    pub fn register_continue_game(&mut self) {
        self.continue_game_latched = true;
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct KeyboardShortcuts {
    /// `Q` quits the game loop.
    quit_requested: bool,
    /// `Escape` toggles between the menu and the running game.
    toggle_menu: bool,
    /// `N` starts a new game.
    start_new_game: bool,
    /// `C` continues the saved game.
    continue_game: bool,
    /// Last arrow key pressed this frame.
    direction: Option<Direction>,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let arrows = [
            (KeyCode::Right, Direction::Right),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Up, Direction::Up),
        ];
        let direction = arrows
            .iter()
            .filter(|(key, _)| is_key_pressed(*key))
            .map(|(_, direction)| *direction)
            .last();

        Self {
            quit_requested: is_key_pressed(KeyCode::Q),
            toggle_menu: is_key_pressed(KeyCode::Escape),
            start_new_game: is_key_pressed(KeyCode::N),
            continue_game: is_key_pressed(KeyCode::C),
            direction,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct FpsMetrics {
    per_second: f32,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns averages once one second has elapsed.
    fn record_frame(&mut self, frame: Duration, render: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        self.render_accum += render;

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let metrics = FpsMetrics {
            per_second: self.frames as f32 / self.elapsed.as_secs_f32(),
            avg_render: self.render_accum / self.frames.max(1),
        };
        *self = Self::default();
        Some(metrics)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        tracing::debug!(?swap_interval, show_fps, "opening macroquad window");

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut menu_input = MenuInputState::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    tracing::info!("quit requested");
                    break;
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = gather_frame_input(keyboard, &mut menu_input);

                update_scene(frame_dt, frame_input, &mut scene);

                let metrics = SceneMetrics::from_scene(&scene, screen_width, screen_height);
                let render_start = Instant::now();

                draw_walls(&scene.maze, &metrics);
                draw_collectibles(&scene, &metrics);
                if let Some(player) = scene.player {
                    draw_player(player, &metrics, background);
                }
                draw_adversaries(&scene.adversaries, &metrics);
                draw_hud(&scene, &metrics);
                if let Some(banner) = scene.banner {
                    draw_banner(banner, screen_width, screen_height);
                }

                if scene.phase == Phase::Menu {
                    let context = MenuUiContext {
                        origin: MacroquadVec2::new(
                            ((screen_width - MENU_SIZE.x) * 0.5).max(0.0),
                            ((screen_height - MENU_SIZE.y) * 0.5).max(0.0),
                        ),
                        size: MacroquadVec2::new(MENU_SIZE.x, MENU_SIZE.y),
                        background: macroquad::color::Color::from_rgba(0, 0, 0, 220),
                        can_continue: scene.can_continue,
                    };
                    let mut menu_ui = macroquad::ui::root_ui();
                    let MenuUiResult {
                        start_new_game,
                        continue_game,
                    } = draw_menu_ui(&mut menu_ui, context);
                    if start_new_game {
                        menu_input.register_start_new_game();
                    }
                    if continue_game {
                        menu_input.register_continue_game();
                    }
                }

                let render_duration = render_start.elapsed();
                if let Some(FpsMetrics {
                    per_second,
                    avg_render,
                }) = fps_counter.record_frame(frame_dt, render_duration)
                {
                    if show_fps {
                        tracing::info!(
                            fps = per_second,
                            render_ms = avg_render.as_secs_f64() * 1_000.0,
                            "frame timing"
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn gather_frame_input(keyboard: KeyboardShortcuts, menu_input: &mut MenuInputState) -> FrameInput {
    FrameInput {
        direction: keyboard.direction,
        toggle_menu: keyboard.toggle_menu,
        start_new_game: menu_input.take_start_new_game() || keyboard.start_new_game,
        continue_game: menu_input.take_continue_game() || keyboard.continue_game,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    cell_size: f32,
    maze_height_scaled: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let world_width = scene.total_width();
        let world_height = scene.total_height();
        let scale = if world_width <= f32::EPSILON || world_height <= f32::EPSILON {
            1.0
        } else {
            (screen_width / world_width).min(screen_height / world_height)
        };

        Self {
            scale,
            offset_x: ((screen_width - world_width * scale) * 0.5).max(0.0),
            offset_y: ((screen_height - world_height * scale) * 0.5).max(0.0),
            cell_size: scene.maze.cell_size * scale,
            maze_height_scaled: scene.maze.height() * scale,
        }
    }

    fn to_screen(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x + position.x * self.scale,
            self.offset_y + position.y * self.scale,
        )
    }
}

fn draw_walls(maze: &MazePresentation, metrics: &SceneMetrics) {
    let color = to_macroquad_color(maze.wall_color);
    let step = maze.cell_size * metrics.scale;
    for cell in &maze.walls {
        let origin = metrics.to_screen(Vec2::new(
            cell.column() as f32 * maze.cell_size,
            cell.row() as f32 * maze.cell_size,
        ));
        macroquad::shapes::draw_rectangle(origin.x, origin.y, step, step, color);
    }
}

fn draw_collectibles(scene: &Scene, metrics: &SceneMetrics) {
    let color = to_macroquad_color(scene.collectible_color);
    let radius = COLLECTIBLE_RADIUS * metrics.scale;
    for cell in &scene.collectibles {
        let center = metrics.to_screen(scene.maze.cell_center(*cell));
        macroquad::shapes::draw_circle(center.x, center.y, radius, color);
    }
}

fn draw_player(player: PlayerPresentation, metrics: &SceneMetrics, background: macroquad::color::Color) {
    let radius = metrics.cell_size * 0.5;
    let center = metrics.to_screen(player.position) + Vec2::splat(radius);
    let heading = player.heading();
    let half_gap = (0.25 + player.mouth_opening) * PI;

    macroquad::shapes::draw_circle(center.x, center.y, radius, background);
    draw_arc_fan(
        center,
        radius,
        heading + half_gap,
        heading + TAU - half_gap,
        to_macroquad_color(player.color),
    );
}

fn draw_adversaries(adversaries: &[AdversaryPresentation], metrics: &SceneMetrics) {
    for adversary in adversaries {
        let radius = metrics.cell_size * 0.5;
        let origin = metrics.to_screen(adversary.position);
        let center = origin + Vec2::splat(radius);
        let color = to_macroquad_color(adversary.color);

        draw_arc_fan(center, radius, PI, TAU, color);
        macroquad::shapes::draw_rectangle(origin.x, center.y, metrics.cell_size, radius, color);
    }
}

fn draw_arc_fan(center: Vec2, radius: f32, start: f32, end: f32, color: macroquad::color::Color) {
    let sweep = (end - start) / f32::from(ARC_SEGMENTS);
    for segment in 0..ARC_SEGMENTS {
        let from = start + sweep * f32::from(segment);
        let to = from + sweep;
        macroquad::shapes::draw_triangle(
            MacroquadVec2::new(center.x, center.y),
            MacroquadVec2::new(center.x + radius * from.cos(), center.y + radius * from.sin()),
            MacroquadVec2::new(center.x + radius * to.cos(), center.y + radius * to.sin()),
            color,
        );
    }
}

fn draw_hud(scene: &Scene, metrics: &SceneMetrics) {
    let baseline = metrics.offset_y + metrics.maze_height_scaled + HUD_HEIGHT * metrics.scale * 0.7;
    let font_size = HUD_FONT_SIZE * metrics.scale;
    let text = format!("Score: {}   Lives: {}", scene.hud.score, scene.hud.lives);
    let _ = macroquad::text::draw_text(
        &text,
        metrics.offset_x + 8.0 * metrics.scale,
        baseline,
        font_size,
        macroquad::color::WHITE,
    );
}

fn draw_banner(banner: OutcomeBanner, screen_width: f32, screen_height: f32) {
    let message = banner.message();
    let dimensions = macroquad::text::measure_text(message, None, BANNER_FONT_SIZE, 1.0);
    let _ = macroquad::text::draw_text(
        message,
        (screen_width - dimensions.width) * 0.5,
        screen_height * 0.5,
        f32::from(BANNER_FONT_SIZE),
        macroquad::color::YELLOW,
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::CellCoord;

    fn scene() -> Scene {
        let maze = MazePresentation::new(
            28,
            31,
            20.0,
            vec![CellCoord::new(0, 0)],
            Color::from_rgb_u8(33, 33, 222),
        )
        .expect("valid maze");
        Scene::new(maze, Color::from_rgb_u8(255, 255, 255))
    }

    #[test]
    fn metrics_fit_scene_into_screen() {
        let scene = scene();
        let metrics = SceneMetrics::from_scene(&scene, 1120.0, 2000.0);

        assert_eq!(metrics.scale, 2.0);
        assert_eq!(metrics.offset_x, 0.0);
        assert_eq!(metrics.to_screen(Vec2::new(10.0, 10.0)).x, 20.0);
        assert_eq!(metrics.cell_size, 40.0);
        assert_eq!(metrics.maze_height_scaled, 1240.0);
    }

    #[test]
    fn metrics_center_letterboxed_scene() {
        let scene = scene();
        let metrics = SceneMetrics::from_scene(&scene, 1000.0, 652.0);

        assert_eq!(metrics.scale, 1.0);
        assert_eq!(metrics.offset_x, 220.0);
        assert_eq!(metrics.offset_y, 0.0);
    }

    #[test]
    fn keyboard_and_menu_requests_merge() {
        let mut menu_input = MenuInputState::default();
        menu_input.register_continue_game();
        let keyboard = KeyboardShortcuts {
            start_new_game: true,
            direction: Some(Direction::Up),
            ..KeyboardShortcuts::default()
        };

        let input = gather_frame_input(keyboard, &mut menu_input);
        assert_eq!(
            input,
            FrameInput {
                direction: Some(Direction::Up),
                toggle_menu: false,
                start_new_game: true,
                continue_game: true,
            }
        );

        let next = gather_frame_input(KeyboardShortcuts::default(), &mut menu_input);
        assert_eq!(next, FrameInput::default());
    }

    #[test]
    fn fps_counter_reports_once_per_second() {
        let mut counter = FpsCounter::default();
        let frame = Duration::from_millis(250);
        let render = Duration::from_millis(2);

        for _ in 0..3 {
            assert_eq!(counter.record_frame(frame, render), None);
        }
        let metrics = counter.record_frame(frame, render).expect("one second elapsed");
        assert_eq!(metrics.per_second, 4.0);
        assert_eq!(metrics.avg_render, render);
        assert_eq!(counter.frames, 0);
    }
}
