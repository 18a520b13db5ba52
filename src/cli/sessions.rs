use anyhow::Result;

use super::chat::resolve_session_ref;
use super::view;
use crate::core::AppConfig;
use crate::state::AppState;

pub fn list(config: &AppConfig) -> Result<()> {
    let state = AppState::open(config)?;
    print!("{}", view::chats(&state.sessions, state.translations()));
    Ok(())
}

pub fn delete(config: &AppConfig, id: &str) -> Result<()> {
    let mut state = AppState::open(config)?;
    let id = resolve_session_ref(&state.sessions, id);
    let existed = state.sessions.get(&id).is_some();
    state.sessions.delete_session(&id);
    if existed {
        println!("Deleted {}", id);
    } else {
        println!("No chat with id {}", id);
    }
    Ok(())
}
