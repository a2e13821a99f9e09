//! Browser adapters for the chat core.

pub mod llm;
