pub mod chat;
pub mod setup;
pub mod settings;
