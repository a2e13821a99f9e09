//! Chat core: port traits, response normalization, and the conversation session.
//!
//! Nothing here touches the browser. Transport lives behind `CompletionPort`.

pub mod event_bus;
pub mod ports;
pub mod wire;
pub mod sse;
pub mod completion;
pub mod session;
pub mod runtime;
