//! Chat runtime: provider initialization and turn dispatch.
//!
//! Owns the verified provider and the conversation session:
//! 1. `initialize` validates the credential, then verifies connectivity
//!    (Uninitialized → Verifying → Ready, or back to Uninitialized)
//! 2. `submit` / `submit_streaming` run one turn, only while Ready
//! 3. Every transition and turn outcome is published on the event bus

use std::rc::Rc;

use chat_types::{
    ChatError, Result,
    config::{ChatConfig, ProviderConfig},
    event::{ChatEvent, ProviderState},
};
use crate::event_bus::EventBus;
use crate::ports::{CompletionPort, NormalizedCompletion};
use crate::session::{ConversationSession, HistorySummary};

const VERIFYING_MESSAGE: &str = "Testing API connection...";
const READY_MESSAGE: &str = "Agent Zero is ready! You can now start chatting.";
const CONNECT_FAILED_MESSAGE: &str =
    "Failed to connect to the completion endpoint. Please check your API key.";

pub struct ChatRuntime {
    pub config: ChatConfig,
    pub session: ConversationSession,
    pub event_bus: EventBus,
    state: ProviderState,
    provider: Option<Rc<dyn CompletionPort>>,
    turn_counter: u64,
}

impl ChatRuntime {
    pub fn new(config: ChatConfig, event_bus: EventBus) -> Self {
        let session = ConversationSession::from_config(&config);
        Self {
            config,
            session,
            event_bus,
            state: ProviderState::Uninitialized,
            provider: None,
            turn_counter: 0,
        }
    }

    pub fn state(&self) -> ProviderState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == ProviderState::Ready && self.provider.is_some()
    }

    /// Validate `credential`, build a provider with `connect`, and verify it.
    ///
    /// A blank or malformed credential fails before any network call.
    /// Any previously verified provider is dropped first.
    pub async fn initialize<F>(
        &mut self,
        config: ChatConfig,
        credential: &str,
        connect: F,
    ) -> Result<()>
    where
        F: FnOnce(ProviderConfig) -> Rc<dyn CompletionPort>,
    {
        self.provider = None;

        let provider_config = match config.provider.with_credential(credential) {
            Ok(c) => c,
            Err(e) => {
                self.set_state(ProviderState::Uninitialized, e.to_string());
                return Err(e);
            }
        };

        self.set_state(ProviderState::Verifying, VERIFYING_MESSAGE);
        self.session.set_max_exchanges(config.memory_window);
        self.config = config;

        log::info!(
            "Verifying {} endpoint {}",
            provider_config.provider.label(),
            provider_config.base_url()
        );
        let provider = connect(provider_config);
        if provider.check_connection().await {
            self.provider = Some(provider);
            self.set_state(ProviderState::Ready, READY_MESSAGE);
            log::info!("Provider verified; session {} ready", self.session.id());
            Ok(())
        } else {
            let err = ChatError::Config(CONNECT_FAILED_MESSAGE.to_string());
            self.set_state(ProviderState::Uninitialized, err.to_string());
            Err(err)
        }
    }

    /// Run one non-streaming turn.
    pub async fn submit(&mut self, user_text: &str) -> Result<String> {
        let provider = self.ready_provider()?;
        let turn_id = self.begin_turn();
        let result = self
            .session
            .submit_completion(user_text, provider.as_ref())
            .await;
        self.finish_turn(turn_id, result)
    }

    /// Run one turn, publishing each fragment as a `ReplyDelta`.
    pub async fn submit_streaming(&mut self, user_text: &str) -> Result<String> {
        let provider = self.ready_provider()?;
        let turn_id = self.begin_turn();
        let bus = self.event_bus.clone();
        let result = self
            .session
            .submit_streaming(user_text, provider.as_ref(), |token| {
                bus.emit(ChatEvent::ReplyDelta {
                    token: token.to_string(),
                })
            })
            .await;
        self.finish_turn(turn_id, result)
    }

    /// Discard retained history (the provider stays verified).
    pub fn clear(&mut self) -> &'static str {
        let message = self.session.clear();
        self.event_bus.emit(ChatEvent::HistoryCleared {
            message: message.to_string(),
        });
        message
    }

    pub fn summary(&self) -> HistorySummary {
        self.session.summary()
    }

    fn ready_provider(&self) -> Result<Rc<dyn CompletionPort>> {
        match (&self.provider, self.state) {
            (Some(provider), ProviderState::Ready) => Ok(provider.clone()),
            _ => {
                let err = ChatError::NotReady;
                self.event_bus.emit(ChatEvent::TurnFailed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    fn begin_turn(&mut self) -> u64 {
        self.turn_counter += 1;
        let turn_id = self.turn_counter;
        self.event_bus.emit(ChatEvent::TurnStart { turn_id });
        turn_id
    }

    fn finish_turn(
        &mut self,
        turn_id: u64,
        result: Result<NormalizedCompletion>,
    ) -> Result<String> {
        let outcome = match result {
            Ok(completion) => {
                self.event_bus.emit(ChatEvent::ReplyComplete {
                    text: completion.content.clone(),
                    usage: completion.usage,
                });
                Ok(completion.content)
            }
            Err(e) => {
                log::error!("Turn {} failed: {}", turn_id, e);
                self.event_bus.emit(ChatEvent::TurnFailed {
                    message: e.to_string(),
                });
                Err(e)
            }
        };
        self.event_bus.emit(ChatEvent::TurnEnd { turn_id });
        outcome
    }

    fn set_state(&mut self, state: ProviderState, message: impl Into<String>) {
        self.state = state;
        self.event_bus.emit(ChatEvent::ProviderStateChanged {
            state,
            message: message.into(),
        });
    }
}
