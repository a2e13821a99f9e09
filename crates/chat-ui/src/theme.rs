//! UI theme constants

use chat_types::event::ProviderState;
use egui::{Color32, CornerRadius, Stroke, Vec2};

pub const BG_PRIMARY: Color32 = Color32::from_rgb(17, 19, 26);
pub const BG_SECONDARY: Color32 = Color32::from_rgb(30, 33, 44);
pub const BG_SURFACE: Color32 = Color32::from_rgb(44, 48, 62);
pub const BG_INPUT: Color32 = Color32::from_rgb(12, 13, 18);
pub const BG_ERROR: Color32 = Color32::from_rgb(52, 22, 26);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(150, 156, 176);
pub const ACCENT: Color32 = Color32::from_rgb(56, 189, 248);
pub const SUCCESS: Color32 = Color32::from_rgb(52, 211, 153);
pub const ERROR: Color32 = Color32::from_rgb(248, 113, 113);
pub const WARNING: Color32 = Color32::from_rgb(251, 191, 36);

pub const PANEL_ROUNDING: CornerRadius = CornerRadius::same(8);
pub const PANEL_PADDING: Vec2 = Vec2::new(12.0, 8.0);

/// Status-line color for a provider state
pub fn status_color(state: ProviderState) -> Color32 {
    match state {
        ProviderState::Uninitialized => ERROR,
        ProviderState::Verifying => WARNING,
        ProviderState::Ready => SUCCESS,
    }
}

/// Apply the dark theme to an egui context
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals.dark_mode = true;
    style.visuals.panel_fill = BG_PRIMARY;
    style.visuals.window_fill = BG_SECONDARY;
    style.visuals.extreme_bg_color = BG_INPUT;

    style.visuals.widgets.inactive.bg_fill = BG_SURFACE;
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    style.visuals.widgets.hovered.bg_fill = BG_SURFACE;
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    style.visuals.widgets.active.bg_fill = ACCENT;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, BG_PRIMARY);

    style.visuals.selection.bg_fill = ACCENT.linear_multiply(0.35);
    style.visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    style.spacing.item_spacing = Vec2::new(8.0, 6.0);
    style.spacing.button_padding = Vec2::new(10.0, 4.0);

    ctx.set_style(style);
}
