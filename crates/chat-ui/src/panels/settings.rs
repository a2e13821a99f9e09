//! Settings panel: provider, model, sampling and memory window.
//! Edits take effect on the next Initialize.

use egui::{self, RichText};
use chat_types::config::{ChatConfig, LlmProvider};
use crate::theme::*;

/// Render the settings panel. Returns true when any field changed.
pub fn settings_panel(ui: &mut egui::Ui, config: &mut ChatConfig, stream_replies: &mut bool) -> bool {
    let mut changed = false;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("Settings").color(TEXT_PRIMARY));
            ui.separator();

            // ── Provider ─────────────────────────────────────
            ui.label(RichText::new("Provider").color(ACCENT).strong());
            ui.add_space(2.0);

            let llm = &mut config.provider;
            egui::ComboBox::from_id_salt("llm_provider")
                .selected_text(llm.provider.label())
                .show_ui(ui, |ui| {
                    for p in LlmProvider::all() {
                        if ui
                            .selectable_value(&mut llm.provider, p.clone(), p.label())
                            .changed()
                        {
                            changed = true;
                        }
                    }
                });

            ui.add_space(4.0);
            ui.label(RichText::new("Model").color(TEXT_SECONDARY).small());
            changed |= ui.text_edit_singleline(&mut llm.model).changed();

            ui.add_space(4.0);
            ui.label(RichText::new("API Base URL (optional)").color(TEXT_SECONDARY).small());
            let mut base_url = llm.api_base.clone().unwrap_or_default();
            if ui
                .add(
                    egui::TextEdit::singleline(&mut base_url)
                        .hint_text(llm.provider.default_base_url()),
                )
                .changed()
            {
                llm.api_base = if base_url.trim().is_empty() {
                    None
                } else {
                    Some(base_url)
                };
                changed = true;
            }

            ui.add_space(4.0);
            ui.label(RichText::new("Temperature").color(TEXT_SECONDARY).small());
            changed |= ui
                .add(egui::Slider::new(&mut llm.temperature, 0.0..=2.0))
                .changed();

            ui.label(RichText::new("Max Tokens").color(TEXT_SECONDARY).small());
            changed |= ui
                .add(egui::Slider::new(&mut llm.max_tokens, 64..=8192))
                .changed();

            ui.label(RichText::new("Timeout (ms)").color(TEXT_SECONDARY).small());
            changed |= ui
                .add(egui::Slider::new(&mut llm.timeout_ms, 5_000..=120_000))
                .changed();

            ui.add_space(12.0);
            ui.separator();

            // ── Conversation ─────────────────────────────────
            ui.label(RichText::new("Conversation").color(ACCENT).strong());
            ui.add_space(2.0);

            ui.label(RichText::new("Memory window (exchanges)").color(TEXT_SECONDARY).small());
            changed |= ui
                .add(egui::Slider::new(&mut config.memory_window, 1..=50))
                .changed();

            changed |= ui.checkbox(stream_replies, "Stream replies").changed();

            ui.add_space(8.0);
            ui.label(
                RichText::new("Provider changes apply on the next Initialize.")
                    .color(TEXT_SECONDARY)
                    .small()
                    .italics(),
            );
        });

    changed
}
