//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter can
//! remain agnostic of Macroquad's UI types.

use macroquad::{
    color::{Color, WHITE},
    math::{RectOffset, Vec2},
    ui::{hash, Ui},
};

/// Outcome of rendering the menu UI during the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct MenuUiResult {
    /// Whether the "New Game" button was pressed during this frame.
    pub(crate) start_new_game: bool,
    /// Whether the "Continue" button was pressed during this frame.
    pub(crate) continue_game: bool,
}

/// Snapshot of the menu's layout and data for the current frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MenuUiContext {
    /// Top-left corner of the menu window in screen coordinates.
    pub(crate) origin: Vec2,
    /// Menu window dimensions in screen space.
    pub(crate) size: Vec2,
    /// Background colour applied to the window skin.
    pub(crate) background: Color,
    /// Whether a saved game exists to continue from.
    pub(crate) can_continue: bool,
}

/// Renders the menu's buttons for the current frame.
pub(crate) fn draw_menu_ui(ui: &mut Ui, context: MenuUiContext) -> MenuUiResult {
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    let window_style = ui
        .style_builder()
        .color(context.background)
        .color_hovered(context.background)
        .color_clicked(context.background)
        .color_selected(context.background)
        .color_selected_hovered(context.background)
        .color_inactive(context.background)
        .text_color(WHITE)
        .margin(RectOffset::new(24.0, 24.0, 24.0, 24.0))
        .build();
    skin.window_style = window_style;

    let label_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .margin(RectOffset::new(0.0, 0.0, 4.0, 12.0))
        .build();
    skin.label_style = label_style;

    let button_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .color(Color::from_rgba(33, 33, 222, 255))
        .color_hovered(Color::from_rgba(72, 72, 255, 255))
        .color_clicked(Color::from_rgba(20, 20, 160, 255))
        .color_selected(Color::from_rgba(33, 33, 222, 255))
        .color_selected_hovered(Color::from_rgba(72, 72, 255, 255))
        .color_inactive(Color::from_rgba(60, 60, 60, 200))
        .margin(RectOffset::new(16.0, 16.0, 8.0, 8.0))
        .build();
    skin.button_style = button_style;

    ui.push_skin(&skin);

    let mut result = MenuUiResult::default();
    let _ = ui.window(hash!("menu"), context.origin, context.size, |ui| {
        ui.label(None, "MAZE CHASE");
        result.start_new_game = ui.button(None, "New Game");
        let continue_label = if context.can_continue {
            "Continue"
        } else {
            "Continue (no saved game)"
        };
        result.continue_game = ui.button(None, continue_label);
        ui.label(None, "Arrows move, Esc toggles the menu, Q quits.");
    });

    ui.pop_skin();

    result
}
