use std::sync::Arc;

use anyhow::{Error, Result};

use crate::ai::CompletionAdapter;
use crate::auth;
use crate::chat::{Message, SessionId, SessionStore, User};
use crate::core::clock::{Clock, SystemClock};
use crate::core::config::AppConfig;
use crate::core::storage::{API_KEY_KEY, LocalStorage};
use crate::settings::{Language, Preferences, Theme, Translations};

/// Everything the front end reads and mutates. Loaded once at start,
/// and each setter writes its part back to storage.
pub struct AppState {
    pub storage: LocalStorage,
    pub preferences: Preferences,
    pub user: Option<User>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn open(config: &AppConfig) -> Result<Self, Error> {
        Self::open_with_clock(config, Arc::new(SystemClock))
    }

    pub fn open_with_clock(config: &AppConfig, clock: Arc<dyn Clock>) -> Result<Self, Error> {
        let storage = LocalStorage::open(&config.storage_path)?;
        tracing::debug!("Using storage at {}", storage.dir().display());

        let preferences = Preferences::load(&storage);
        let user = auth::load_user(&storage);
        let sessions = SessionStore::load(storage.clone(), clock);

        Ok(Self {
            storage,
            preferences,
            user,
            sessions,
        })
    }

    pub fn translations(&self) -> &'static Translations {
        self.preferences.translations()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), Error> {
        self.preferences.theme = theme;
        self.preferences.save(&self.storage)
    }

    pub fn set_language(&mut self, language: Language) -> Result<(), Error> {
        self.preferences.language = language;
        self.preferences.save(&self.storage)
    }

    /// The locally stored bring-your-own-key credential.
    pub fn stored_api_key(&self) -> Option<String> {
        self.storage
            .get_raw(API_KEY_KEY)
            .inspect_err(|e| tracing::warn!("Failed to read stored API key: {:#}", e))
            .ok()
            .flatten()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }

    /// Store the bring-your-own-key credential as a plain string. An
    /// empty key removes it.
    pub fn set_api_key(&mut self, key: &str) -> Result<(), Error> {
        let key = key.trim();
        if key.is_empty() {
            self.storage.remove(API_KEY_KEY)
        } else {
            self.storage.set_raw(API_KEY_KEY, key)
        }
    }

    pub fn login(&mut self, user: User) -> Result<(), Error> {
        auth::save_user(&self.storage, &user)?;
        tracing::info!("Signed in as {}", user.email);
        self.user = Some(user);
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), Error> {
        self.user = None;
        auth::sign_out(&self.storage)
    }

    /// Create a session titled with the localized "New Chat" label.
    pub fn new_chat(&mut self) -> SessionId {
        let label = self.translations().new_chat;
        self.sessions.create_session(label)
    }

    /// Run one chat turn in the active session: record `text` as the
    /// user's message, ask `adapter` for a reply given the prior
    /// history, then record the reply. Returns the reply, or `None`
    /// when there is no active session or `text` is blank.
    pub async fn send_message(&mut self, adapter: &CompletionAdapter, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        let chat_id = self.sessions.active_session()?.id.clone();
        let history = self
            .sessions
            .get(&chat_id)
            .map(|s| s.messages.clone())
            .unwrap_or_default();

        let user_msg = Message::user(text, self.sessions.now_millis());
        self.sessions.push_message(&chat_id, user_msg);

        let reply = adapter.send_completion(text, &history).await;

        let model_msg = Message::model(&reply, self.sessions.now_millis());
        // The session may be gone by now, in which case this is a no-op
        self.sessions.push_message(&chat_id, model_msg);
        Some(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::storage::{LANG_KEY, THEME_KEY};
    use tempfile::tempdir;

    fn state_in(dir: &std::path::Path) -> AppState {
        let config = AppConfig {
            storage_path: dir.to_path_buf(),
            ..AppConfig::default()
        };
        AppState::open_with_clock(&config, Arc::new(ManualClock::new(0))).unwrap()
    }

    #[test]
    fn test_open_empty_uses_defaults() {
        let dir = tempdir().unwrap();
        let state = state_in(dir.path());

        assert_eq!(state.preferences, Preferences::default());
        assert!(state.user.is_none());
        assert!(state.sessions.is_empty());
    }

    #[test]
    fn test_preferences_survive_reopen() {
        let dir = tempdir().unwrap();
        let mut state = state_in(dir.path());
        state.set_theme(Theme::Light).unwrap();
        state.set_language(Language::Uz).unwrap();

        let reopened = state_in(dir.path());
        assert_eq!(reopened.preferences.theme, Theme::Light);
        assert_eq!(reopened.preferences.language, Language::Uz);
        assert!(reopened.storage.get_raw(THEME_KEY).unwrap().is_some());
        assert!(reopened.storage.get_raw(LANG_KEY).unwrap().is_some());
    }

    #[test]
    fn test_new_chat_uses_localized_label() {
        let dir = tempdir().unwrap();
        let mut state = state_in(dir.path());
        state.set_language(Language::En).unwrap();
        let id = state.new_chat();

        assert_eq!(state.sessions.get(&id).unwrap().title, "New Chat 1");
    }

    #[test]
    fn test_api_key_is_plain_string() {
        let dir = tempdir().unwrap();
        let mut state = state_in(dir.path());
        assert!(state.stored_api_key().is_none());

        state.set_api_key(" sk-test ").unwrap();
        assert_eq!(state.stored_api_key().as_deref(), Some("sk-test"));
        assert_eq!(
            state.storage.get_raw(API_KEY_KEY).unwrap().as_deref(),
            Some("sk-test")
        );

        state.set_api_key("").unwrap();
        assert!(state.stored_api_key().is_none());
    }

    #[test]
    fn test_login_and_logout() {
        let dir = tempdir().unwrap();
        let mut state = state_in(dir.path());
        let user = auth::sign_in(Some("Dilnoza"), Some("dilnoza@example.uz")).unwrap();
        state.login(user.clone()).unwrap();
        assert_eq!(state_in(dir.path()).user, Some(user));

        state.logout().unwrap();
        assert!(state.user.is_none());
        assert!(state_in(dir.path()).user.is_none());
    }
}
