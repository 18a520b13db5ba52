pub mod ai;
pub mod auth;
pub mod chat;
pub mod cli;
pub mod core;
pub mod google;
pub mod openai;
pub mod settings;
pub mod state;
