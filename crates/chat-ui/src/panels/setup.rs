//! Setup bar: credential entry, Initialize, Clear Chat, and status line.

use egui::{self, RichText, Vec2};
use crate::state::UiState;
use crate::theme::*;

/// What the caller should do after rendering the setup bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupAction {
    None,
    /// Verify the provider with this credential
    Initialize(String),
    /// Discard retained conversation history
    Clear,
}

pub fn setup_bar(ui: &mut egui::Ui, state: &mut UiState) -> SetupAction {
    let mut action = SetupAction::None;
    let busy = state.is_busy();

    ui.horizontal(|ui| {
        ui.label(RichText::new("API Key").color(TEXT_SECONDARY).small());
        let key_edit = egui::TextEdit::singleline(&mut state.credential_input)
            .password(true)
            .hint_text("csk-...")
            .desired_width(240.0);
        let response = ui.add_enabled(!busy, key_edit);

        let init_btn = ui.add_enabled(
            !busy,
            egui::Button::new(RichText::new("Initialize").color(TEXT_PRIMARY).strong())
                .fill(ACCENT)
                .corner_radius(PANEL_ROUNDING)
                .min_size(Vec2::new(90.0, 0.0)),
        );
        let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if (init_btn.clicked() || enter) && !busy {
            action = SetupAction::Initialize(state.credential_input.clone());
        }

        let clear_btn = ui.add(
            egui::Button::new(RichText::new("Clear Chat").color(TEXT_PRIMARY))
                .fill(BG_SURFACE)
                .corner_radius(PANEL_ROUNDING),
        );
        if clear_btn.clicked() {
            action = SetupAction::Clear;
        }
    });

    ui.label(
        RichText::new(&state.status_text)
            .color(status_color(state.provider_state))
            .small(),
    );

    action
}
