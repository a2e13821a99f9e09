//! Chat panel: transcript, in-progress reply, and message input.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use crate::state::{ChatEntry, EntryRole, UiState};
use crate::theme::*;

/// Render the chat panel. Returns Some(message) when the user submits input.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<String> {
    let mut submitted = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                let available_height = ui.available_height() - 48.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        if state.messages.is_empty() && state.streaming_text.is_empty() {
                            ui.add_space(24.0);
                            ui.vertical_centered(|ui| {
                                ui.label(
                                    RichText::new("Start a conversation with Agent Zero")
                                        .color(TEXT_SECONDARY)
                                        .italics(),
                                );
                            });
                        }

                        for entry in &state.messages {
                            render_message(ui, entry);
                            ui.add_space(4.0);
                        }

                        if !state.streaming_text.is_empty() {
                            egui::Frame::default()
                                .fill(BG_SECONDARY)
                                .corner_radius(PANEL_ROUNDING)
                                .inner_margin(8.0)
                                .show(ui, |ui| {
                                    ui.label(RichText::new("Agent Zero").color(SUCCESS).strong().small());
                                    ui.horizontal_wrapped(|ui| {
                                        ui.label(RichText::new(&state.streaming_text).color(TEXT_PRIMARY));
                                        ui.label(RichText::new("▌").color(ACCENT).strong());
                                    });
                                });
                        } else if state.turn_in_flight {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(RichText::new("Thinking...").color(TEXT_SECONDARY).small());
                            });
                        }
                    });

                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text("Type your message...")
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));
                    let response = ui.add(input);

                    let send_enabled = state.can_send();
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if (enter || send_btn.clicked()) && state.can_send() {
                        let text = state.input_text.trim().to_string();
                        state.push_user_message(&text);
                        submitted = Some(text);
                        state.input_text.clear();
                        response.request_focus();
                    }
                });
            });
        });

    submitted
}

fn render_message(ui: &mut egui::Ui, entry: &ChatEntry) {
    let (label, label_color, bg, align) = match entry.role {
        EntryRole::User => ("You", ACCENT, BG_SURFACE, Align::Max),
        EntryRole::Assistant => ("Agent Zero", SUCCESS, BG_SECONDARY, Align::Min),
        EntryRole::Error => ("Error", ERROR, BG_ERROR, Align::Min),
    };

    ui.with_layout(Layout::top_down(align), |ui| {
        egui::Frame::default()
            .fill(bg)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.85);
                ui.label(RichText::new(label).color(label_color).strong().small());
                ui.label(RichText::new(&entry.content).color(TEXT_PRIMARY));
            });
    });
}
