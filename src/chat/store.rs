use std::sync::Arc;

use uuid::Uuid;

use super::models::{ChatSession, Message, SessionId, derive_title};
use crate::core::clock::{Clock, SystemClock};
use crate::core::storage::{CHATS_KEY, LocalStorage};

/// Authoritative collection of chat sessions plus the currently
/// active one.
///
/// Sessions are kept newest first: new sessions are prepended and
/// nothing re-sorts the collection afterwards. When backed by
/// `LocalStorage`, every mutation writes the whole collection back.
pub struct SessionStore {
    sessions: Vec<ChatSession>,
    active: Option<SessionId>,
    storage: Option<LocalStorage>,
    clock: Arc<dyn Clock>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl SessionStore {
    /// An empty store that is never persisted.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Vec::new(),
            active: None,
            storage: None,
            clock,
        }
    }

    /// Load the collection saved in `storage`. A missing or corrupt
    /// value starts an empty collection.
    pub fn load(storage: LocalStorage, clock: Arc<dyn Clock>) -> Self {
        let sessions: Vec<ChatSession> = storage.load(CHATS_KEY).unwrap_or_default();
        tracing::debug!("Loaded {} chat sessions", sessions.len());
        Self {
            sessions,
            active: None,
            storage: Some(storage),
            clock,
        }
    }

    /// Sessions in presentation order (newest created first).
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The active session, or `None` when nothing is active or the
    /// active pointer refers to a session that no longer exists.
    pub fn active_session(&self) -> Option<&ChatSession> {
        self.active.as_deref().and_then(|id| self.get(id))
    }

    /// Create an empty session titled `"{new_chat_label} N"`, make it
    /// active and return its id.
    pub fn create_session(&mut self, new_chat_label: &str) -> SessionId {
        let now = self.clock.now_millis();
        let session = ChatSession {
            id: Uuid::new_v4().to_string(),
            title: format!("{} {}", new_chat_label, self.sessions.len() + 1),
            messages: Vec::new(),
            updated_at: now,
        };
        let id = session.id.clone();
        tracing::debug!("Created chat session {}", id);

        self.sessions.insert(0, session);
        self.active = Some(id.clone());
        self.persist();
        id
    }

    /// Remove the session with `id` if there is one. Clears the active
    /// pointer when it referenced the removed session.
    pub fn delete_session(&mut self, id: &str) {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
        if self.sessions.len() != before {
            tracing::debug!("Deleted chat session {}", id);
            self.persist();
        }
    }

    /// Point the active session at `id`. The id is not checked against
    /// the collection.
    pub fn resume_session(&mut self, id: &str) {
        self.active = Some(id.to_string());
    }

    /// Replace the message list of session `id` with `messages`,
    /// recomputing its title and timestamp. Returns whether a session
    /// was updated.
    ///
    /// Unknown ids are ignored: a reply may arrive after its session
    /// was deleted. A list shorter than the current one is rejected
    /// since message history only grows.
    pub fn append_messages(&mut self, id: &str, messages: Vec<Message>) -> bool {
        let now = self.clock.now_millis();
        let Some(session) = self.sessions.iter_mut().find(|s| s.id == id) else {
            tracing::debug!("Ignoring messages for unknown session {}", id);
            return false;
        };
        if messages.len() < session.messages.len() {
            tracing::warn!(
                "Refusing to shrink session {} from {} to {} messages",
                id,
                session.messages.len(),
                messages.len()
            );
            return false;
        }

        session.title = derive_title(&session.title, &messages);
        session.messages = messages;
        session.updated_at = now.max(session.updated_at);
        self.persist();
        true
    }

    /// Append a single message to the end of session `id`.
    pub fn push_message(&mut self, id: &str, message: Message) -> bool {
        let Some(session) = self.get(id) else {
            tracing::debug!("Ignoring message for unknown session {}", id);
            return false;
        };
        let mut messages = session.messages.clone();
        messages.push(message);
        self.append_messages(id, messages)
    }

    /// Current time according to the store's clock.
    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    // Failures are logged rather than returned so that a full disk
    // never blocks chatting
    fn persist(&self) {
        if let Some(storage) = &self.storage
            && let Err(e) = storage.save(CHATS_KEY, &self.sessions)
        {
            tracing::error!("Failed to save chat sessions: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::models::Role;
    use crate::core::clock::ManualClock;
    use std::collections::HashSet;
    use tempfile::tempdir;

    fn store_at(start: i64) -> (SessionStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start));
        (SessionStore::new(clock.clone()), clock)
    }

    #[test]
    fn test_create_session() {
        let (mut store, _clock) = store_at(100);
        let id = store.create_session("New Chat");

        assert_eq!(store.len(), 1);
        let session = store.get(&id).unwrap();
        assert_eq!(session.title, "New Chat 1");
        assert!(session.messages.is_empty());
        assert_eq!(session.updated_at, 100);
        assert_eq!(store.active_id(), Some(id.as_str()));
    }

    #[test]
    fn test_create_prepends_and_numbers() {
        let (mut store, _clock) = store_at(0);
        let first = store.create_session("New Chat");
        let second = store.create_session("Новый чат");

        let ids: Vec<&str> = store.sessions().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec![second.as_str(), first.as_str()]);
        assert_eq!(store.sessions()[0].title, "Новый чат 2");
        assert_eq!(store.active_id(), Some(second.as_str()));
    }

    #[test]
    fn test_created_ids_are_distinct() {
        let (mut store, _clock) = store_at(0);
        let ids: HashSet<SessionId> = (0..200).map(|_| store.create_session("c")).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_delete_clears_active() {
        let (mut store, _clock) = store_at(0);
        let id = store.create_session("New Chat");
        store.delete_session(&id);

        assert!(store.is_empty());
        assert!(store.active_id().is_none());
    }

    #[test]
    fn test_delete_keeps_other_active() {
        let (mut store, _clock) = store_at(0);
        let a = store.create_session("c");
        let b = store.create_session("c");
        store.delete_session(&a);

        assert_eq!(store.active_id(), Some(b.as_str()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let (mut store, _clock) = store_at(0);
        store.create_session("c");
        store.delete_session("does-not-exist");
        store.delete_session("does-not-exist");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_then_resume_has_no_active_session() {
        let (mut store, _clock) = store_at(0);
        let id = store.create_session("c");
        store.delete_session(&id);
        store.resume_session(&id);

        assert_eq!(store.active_id(), Some(id.as_str()));
        assert!(store.active_session().is_none());
    }

    #[test]
    fn test_resume_switches_active() {
        let (mut store, _clock) = store_at(0);
        let a = store.create_session("c");
        let _b = store.create_session("c");
        store.resume_session(&a);
        assert_eq!(store.active_session().unwrap().id, a);
    }

    #[test]
    fn test_append_updates_title_and_time() {
        let (mut store, clock) = store_at(0);
        let id = store.create_session("New Chat");
        clock.set(50);

        let long = "This first message is definitely longer than thirty characters";
        assert!(store.append_messages(&id, vec![Message::user(long, 50)]));

        let session = store.get(&id).unwrap();
        assert_eq!(session.title, "This first message is definite...");
        assert_eq!(session.updated_at, 50);
        assert_eq!(session.messages.len(), 1);
    }

    #[test]
    fn test_append_leaves_other_sessions_untouched() {
        let (mut store, clock) = store_at(0);
        let a = store.create_session("c");
        let b = store.create_session("c");
        store.append_messages(&a, vec![Message::user("a1", 0)]);
        let before = store.get(&a).unwrap().clone();

        clock.set(99);
        store.append_messages(&b, vec![Message::user("b1", 99)]);

        assert_eq!(store.get(&a).unwrap(), &before);
    }

    #[test]
    fn test_append_unknown_session_is_noop() {
        let (mut store, _clock) = store_at(0);
        store.create_session("c");
        let snapshot = store.sessions().to_vec();

        assert!(!store.append_messages("gone", vec![Message::model("late reply", 1)]));
        assert_eq!(store.sessions(), snapshot.as_slice());
    }

    #[test]
    fn test_append_never_shrinks() {
        let (mut store, _clock) = store_at(0);
        let id = store.create_session("c");
        store.append_messages(&id, vec![Message::user("a", 0), Message::model("b", 0)]);

        assert!(!store.append_messages(&id, vec![Message::user("a", 0)]));
        assert_eq!(store.get(&id).unwrap().messages.len(), 2);
    }

    #[test]
    fn test_updated_at_never_decreases() {
        let (mut store, clock) = store_at(1_000);
        let id = store.create_session("c");
        // Wall clock jumps backwards
        clock.set(500);
        store.push_message(&id, Message::user("hi", 500));

        assert_eq!(store.get(&id).unwrap().updated_at, 1_000);
    }

    #[test]
    fn test_push_message() {
        let (mut store, clock) = store_at(0);
        let id = store.create_session("c");
        clock.advance(10);
        store.push_message(&id, Message::user("hello", 10));
        clock.advance(10);
        store.push_message(&id, Message::model("hi there", 20));

        let session = store.get(&id).unwrap();
        let roles: Vec<Role> = session.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Model]);
        assert_eq!(session.title, "hello");
        assert_eq!(session.updated_at, 20);
    }

    #[test]
    fn test_persist_and_reload_round_trip() {
        let dir = tempdir().unwrap();
        let clock = Arc::new(ManualClock::new(42));
        let storage = LocalStorage::open(dir.path()).unwrap();

        let mut store = SessionStore::load(storage.clone(), clock.clone());
        let a = store.create_session("New Chat");
        store.push_message(&a, Message::user("hello", 42));
        store.create_session("New Chat");
        let saved = store.sessions().to_vec();

        let reloaded = SessionStore::load(storage, clock);
        assert_eq!(reloaded.sessions(), saved.as_slice());
        // The active pointer is not persisted
        assert!(reloaded.active_id().is_none());
    }

    #[test]
    fn test_load_corrupt_collection_starts_empty() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::open(dir.path()).unwrap();
        storage.set_raw(CHATS_KEY, "[{\"id\":").unwrap();

        let store = SessionStore::load(storage, Arc::new(ManualClock::new(0)));
        assert!(store.is_empty());
    }
}
