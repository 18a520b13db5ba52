pub mod chat;
pub mod core;

pub use chat::OpenAiBackend;
pub use self::core::*;
