use serde::{Deserialize, Serialize};
use crate::completion::TokenUsage;

/// Provider initialization state.
///
/// `Uninitialized → Verifying → Ready`, or back to `Uninitialized`
/// when verification fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderState {
    #[default]
    Uninitialized,
    Verifying,
    Ready,
}

/// Events emitted by the chat runtime.
/// UI subscribes to these for reactive updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChatEvent {
    /// The provider moved to a new initialization state
    ProviderStateChanged { state: ProviderState, message: String },

    /// A user message was accepted and sent upstream
    TurnStart { turn_id: u64 },

    /// A fragment of a streamed reply
    ReplyDelta { token: String },

    /// The assistant reply is complete
    ReplyComplete { text: String, usage: TokenUsage },

    /// The turn failed; nothing was recorded into history
    TurnFailed { message: String },

    /// A message was refused before reaching the runtime; any turn in
    /// flight is unaffected
    MessageRejected { message: String },

    /// Turn finished, successfully or not
    TurnEnd { turn_id: u64 },

    /// Retained history was discarded
    HistoryCleared { message: String },
}
