use anyhow::Result;

use super::view;
use crate::ai::build_backend;
use crate::core::AppConfig;
use crate::settings::{Language, Theme};
use crate::state::AppState;

pub fn run(
    config: &AppConfig,
    theme: Option<Theme>,
    lang: Option<Language>,
    api_key: Option<&str>,
) -> Result<()> {
    let mut state = AppState::open(config)?;
    if let Some(theme) = theme {
        state.set_theme(theme)?;
    }
    if let Some(lang) = lang {
        state.set_language(lang)?;
    }
    if let Some(key) = api_key {
        state.set_api_key(key)?;
    }

    let config = config.clone().with_stored_api_key(state.stored_api_key());
    let backend = build_backend(&config);
    print!(
        "{}",
        view::settings(&state.preferences, backend.name(), config.has_api_key())
    );
    Ok(())
}
