#[cfg(test)]
mod tests {
    use chat_types::completion::TokenUsage;
    use chat_types::event::{ChatEvent, ProviderState};

    use crate::panels::setup::{setup_bar, SetupAction};
    use crate::panels::{chat, settings};
    use crate::state::{EntryRole, FAILURE_MARKER, UiState};
    use crate::theme;

    /// Run one headless frame with `body` inside a central panel
    fn run_frame(mut body: impl FnMut(&mut egui::Ui)) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| body(ui));
        });
    }

    // ─── UiState Tests ───────────────────────────────────────

    fn usage(prompt: u32, completion: u32) -> TokenUsage {
        TokenUsage {
            prompt_tokens: prompt,
            completion_tokens: completion,
            total_tokens: prompt + completion,
        }
    }

    #[test]
    fn test_starts_uninitialized_and_idle() {
        let state = UiState::new();
        assert_eq!(state.provider_state, ProviderState::Uninitialized);
        assert!(!state.is_busy());
        assert!(state.messages.is_empty());
    }

    #[test]
    fn test_provider_state_updates_status() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::ProviderStateChanged {
            state: ProviderState::Verifying,
            message: "Testing API connection...".into(),
        }]);
        assert!(state.is_busy());
        assert_eq!(state.status_text, "Testing API connection...");

        state.process_events(vec![ChatEvent::ProviderStateChanged {
            state: ProviderState::Ready,
            message: "ready".into(),
        }]);
        assert!(!state.is_busy());
        assert_eq!(state.status_text, "✅ ready");

        state.process_events(vec![ChatEvent::ProviderStateChanged {
            state: ProviderState::Uninitialized,
            message: "API key is required".into(),
        }]);
        assert_eq!(state.status_text, format!("{}API key is required", FAILURE_MARKER));
    }

    #[test]
    fn test_successful_turn_appends_reply() {
        let mut state = UiState::new();
        state.push_user_message("Hello");
        state.process_events(vec![
            ChatEvent::TurnStart { turn_id: 1 },
            ChatEvent::ReplyDelta { token: "Hi".into() },
        ]);
        assert!(state.turn_in_flight);
        assert_eq!(state.streaming_text, "Hi");

        state.process_events(vec![
            ChatEvent::ReplyDelta { token: " there".into() },
            ChatEvent::ReplyComplete {
                text: "Hi there".into(),
                usage: usage(12, 3),
            },
            ChatEvent::TurnEnd { turn_id: 1 },
        ]);

        assert!(!state.turn_in_flight);
        assert!(state.streaming_text.is_empty());
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[0].role, EntryRole::User);
        assert_eq!(state.messages[1].role, EntryRole::Assistant);
        assert_eq!(state.messages[1].content, "Hi there");
        assert_eq!(state.last_usage, Some(usage(12, 3)));
        assert!(state.status_text.contains("15 tokens"));
    }

    #[test]
    fn test_failed_turn_shows_marked_error() {
        let mut state = UiState::new();
        state.process_events(vec![
            ChatEvent::TurnStart { turn_id: 2 },
            ChatEvent::ReplyDelta { token: "partial".into() },
            ChatEvent::TurnFailed {
                message: "API error 401: bad key".into(),
            },
            ChatEvent::TurnEnd { turn_id: 2 },
        ]);

        assert!(!state.turn_in_flight);
        assert!(state.streaming_text.is_empty());
        let last = state.messages.last().unwrap();
        assert_eq!(last.role, EntryRole::Error);
        assert_eq!(last.content, "❌ API error 401: bad key");
        assert!(state.status_text.starts_with(FAILURE_MARKER));
    }

    #[test]
    fn test_not_ready_failure_without_turn_start() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::TurnFailed {
            message: "Agent not initialized. Please set your API key first.".into(),
        }]);
        assert!(!state.is_busy());
        assert_eq!(state.messages.len(), 1);
    }

    #[test]
    fn test_history_cleared_resets_transcript() {
        let mut state = UiState::new();
        state.push_user_message("hi");
        state.process_events(vec![ChatEvent::ReplyComplete {
            text: "hello".into(),
            usage: usage(1, 1),
        }]);
        state.process_events(vec![ChatEvent::HistoryCleared {
            message: "🧹 Conversation memory cleared.".into(),
        }]);
        assert!(state.messages.is_empty());
        assert_eq!(state.last_usage, None);
        assert_eq!(state.status_text, "🧹 Conversation memory cleared.");
    }

    #[test]
    fn test_can_send_requires_text_and_idle() {
        let mut state = UiState::new();
        assert!(!state.can_send());

        state.input_text = "   ".into();
        assert!(!state.can_send());

        state.input_text = "hello".into();
        assert!(state.can_send());

        state.turn_in_flight = true;
        assert!(!state.can_send());
    }

    #[test]
    fn test_status_colors_follow_state() {
        assert_eq!(theme::status_color(ProviderState::Ready), theme::SUCCESS);
        assert_eq!(theme::status_color(ProviderState::Verifying), theme::WARNING);
        assert_eq!(theme::status_color(ProviderState::Uninitialized), theme::ERROR);
    }

    #[test]
    fn test_message_rejected_keeps_turn_running() {
        let mut state = UiState::new();
        state.push_user_message("second question");
        state.process_events(vec![
            ChatEvent::TurnStart { turn_id: 1 },
            ChatEvent::MessageRejected {
                message: "Please wait for the current request to finish.".into(),
            },
        ]);
        assert!(state.turn_in_flight);
        let last = state.messages.last().unwrap();
        assert_eq!(last.role, EntryRole::Error);
        assert_eq!(last.content, "❌ Please wait for the current request to finish.");
    }

    #[test]
    fn test_reject_message_direct() {
        let mut state = UiState::new();
        state.reject_message("busy");
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.status_text, format!("{}busy", FAILURE_MARKER));
    }

    // ─── Panel Tests ─────────────────────────────────────────

    #[test]
    fn test_setup_bar_idle_frame_has_no_action() {
        let mut state = UiState::new();
        state.credential_input = "csk-abc".into();
        let mut action = None;
        run_frame(|ui| action = Some(setup_bar(ui, &mut state)));
        assert_eq!(action, Some(SetupAction::None));
        assert_eq!(state.credential_input, "csk-abc");
    }

    #[test]
    fn test_setup_bar_renders_while_verifying() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::ProviderStateChanged {
            state: ProviderState::Verifying,
            message: "Testing API connection...".into(),
        }]);
        let mut action = None;
        run_frame(|ui| action = Some(setup_bar(ui, &mut state)));
        assert_eq!(action, Some(SetupAction::None));
    }

    #[test]
    fn test_chat_panel_idle_frame_submits_nothing() {
        let mut state = UiState::new();
        state.input_text = "draft".into();
        state.push_user_message("hello");
        let mut submitted = Some(String::new());
        run_frame(|ui| submitted = chat::chat_panel(ui, &mut state));
        assert_eq!(submitted, None);
        assert_eq!(state.input_text, "draft");
        assert_eq!(state.messages.len(), 1);
    }

    #[test]
    fn test_settings_panel_idle_frame_is_unchanged() {
        let mut state = UiState::new();
        let mut changed = true;
        run_frame(|ui| {
            changed = settings::settings_panel(ui, &mut state.config, &mut state.stream_replies)
        });
        assert!(!changed);
        assert_eq!(state.config.memory_window, 10);
    }
}
