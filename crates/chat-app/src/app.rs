//! Main egui application: composes the panels and drives the chat runtime.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use chat_core::event_bus::EventBus;
use chat_core::ports::CompletionPort;
use chat_core::runtime::ChatRuntime;
use chat_platform::llm::OpenAiCompatProvider;
use chat_types::config::ChatConfig;
use chat_types::event::ChatEvent;
use chat_ui::panels::setup::SetupAction;
use chat_ui::panels::{chat, settings, setup};
use chat_ui::state::UiState;
use chat_ui::theme;

const BUSY_NOTICE: &str = "Please wait for the current request to finish.";

/// The main application state
pub struct ChatApp {
    ui_state: UiState,
    event_bus: EventBus,
    runtime: Rc<RefCell<ChatRuntime>>,
    first_frame: bool,
}

impl ChatApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = ChatConfig::default();
        let event_bus = EventBus::new();
        let runtime = ChatRuntime::new(config.clone(), event_bus.clone());

        let mut ui_state = UiState::with_config(config);
        // Build-time credential, if one was provided
        if let Some(key) = option_env!("CEREBRAS_API_KEY") {
            ui_state.credential_input = key.to_string();
        }

        Self {
            ui_state,
            event_bus,
            runtime: Rc::new(RefCell::new(runtime)),
            first_frame: true,
        }
    }

    /// Whether a task currently holds the runtime
    fn runtime_busy(&self) -> bool {
        self.runtime.try_borrow_mut().is_err()
    }

    /// Verify the provider with the edited settings (async)
    fn dispatch_initialize(&mut self, credential: String, ctx: &egui::Context) {
        if self.runtime_busy() {
            self.ui_state.set_notice(BUSY_NOTICE);
            return;
        }
        let runtime = self.runtime.clone();
        let config = self.ui_state.config.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let Ok(mut rt) = runtime.try_borrow_mut() else {
                log::warn!("Initialize ignored: runtime is busy");
                return;
            };
            let result = rt
                .initialize(config, &credential, |provider_config| -> Rc<dyn CompletionPort> {
                    Rc::new(OpenAiCompatProvider::new(provider_config))
                })
                .await;
            if let Err(e) = result {
                log::warn!("Initialization failed: {}", e);
            }
            ctx.request_repaint();
        });
    }

    /// Dispatch a user message to the runtime (async)
    fn dispatch_message(&mut self, text: String, ctx: &egui::Context) {
        if self.runtime_busy() {
            self.ui_state.reject_message(BUSY_NOTICE);
            return;
        }
        let runtime = self.runtime.clone();
        let event_bus = self.event_bus.clone();
        let stream = self.ui_state.stream_replies;
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let Ok(mut rt) = runtime.try_borrow_mut() else {
                log::warn!("Message dropped: runtime is busy");
                event_bus.emit(ChatEvent::MessageRejected {
                    message: BUSY_NOTICE.to_string(),
                });
                ctx.request_repaint();
                return;
            };
            let result = if stream {
                rt.submit_streaming(&text).await
            } else {
                rt.submit(&text).await
            };
            if let Err(e) = result {
                log::debug!("Turn ended with error: {}", e);
            }
            ctx.request_repaint();
        });
    }

    fn clear_history(&mut self) {
        match self.runtime.try_borrow_mut() {
            Ok(mut rt) => {
                rt.clear();
            }
            Err(_) => self.ui_state.set_notice(BUSY_NOTICE),
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        // Drain events from the chat runtime
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        if let Ok(rt) = self.runtime.try_borrow() {
            self.ui_state.history_summary = rt.summary().to_string();
        }

        if self.ui_state.is_busy() {
            ctx.request_repaint();
        }

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("🤖 Agent Zero")
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                ui.separator();
                ui.label(
                    RichText::new(format!(
                        "Provider: {} | Model: {}",
                        self.ui_state.config.provider.provider.label(),
                        self.ui_state.config.provider.model
                    ))
                    .color(theme::TEXT_SECONDARY)
                    .small(),
                );
                ui.separator();
                ui.label(
                    RichText::new(&self.ui_state.history_summary)
                        .color(theme::TEXT_SECONDARY)
                        .small(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .selectable_label(self.ui_state.show_settings, "Settings")
                        .clicked()
                    {
                        self.ui_state.show_settings = !self.ui_state.show_settings;
                    }
                });
            });
        });

        // ── Setup bar ────────────────────────────────────────
        let action = TopBottomPanel::top("setup_bar")
            .show(ctx, |ui| setup::setup_bar(ui, &mut self.ui_state))
            .inner;
        match action {
            SetupAction::Initialize(credential) => self.dispatch_initialize(credential, ctx),
            SetupAction::Clear => self.clear_history(),
            SetupAction::None => {}
        }

        // ── Settings side panel ──────────────────────────────
        if self.ui_state.show_settings {
            SidePanel::right("settings_panel")
                .min_width(280.0)
                .max_width(350.0)
                .show(ctx, |ui| {
                    let state = &mut self.ui_state;
                    if settings::settings_panel(ui, &mut state.config, &mut state.stream_replies) {
                        log::debug!("Settings changed");
                    }
                });
        }

        // ── Chat ─────────────────────────────────────────────
        let submitted = CentralPanel::default()
            .show(ctx, |ui| chat::chat_panel(ui, &mut self.ui_state))
            .inner;
        if let Some(user_msg) = submitted {
            self.dispatch_message(user_msg, ctx);
        }
    }
}
