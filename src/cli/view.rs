//! Plain text renderings of each screen of the app.
use std::fmt::Write;

use chrono::{DateTime, Local, TimeZone};

use crate::chat::{ChatSession, Role, SessionStore, User};
use crate::settings::{Language, Preferences, Theme, Translations};

/// Screens the user can navigate to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Home,
    Chats,
    Settings,
    Profile,
    Products,
    Help,
}

impl View {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "home" => Some(View::Home),
            "chats" => Some(View::Chats),
            "settings" => Some(View::Settings),
            "profile" => Some(View::Profile),
            "products" => Some(View::Products),
            "help" => Some(View::Help),
            _ => None,
        }
    }
}

fn local_time(millis: i64) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(millis).single()
}

fn format_date(millis: i64) -> String {
    local_time(millis)
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn format_clock(millis: i64) -> String {
    local_time(millis)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

/// The active conversation, or a prompt to start one.
pub fn home(session: Option<&ChatSession>, t: &Translations) -> String {
    let mut out = String::new();
    let Some(session) = session else {
        let _ = writeln!(out, "{}", t.welcome);
        let _ = writeln!(out, "{}", t.no_active_chat);
        return out;
    };

    let _ = writeln!(out, "# {}", session.title);
    if session.messages.is_empty() {
        let _ = writeln!(out, "{}", t.no_messages);
    }
    for msg in session.messages.iter() {
        let _ = writeln!(out, "{}", message_line(msg.role, &msg.text, msg.timestamp));
    }
    out
}

pub fn message_line(role: Role, text: &str, timestamp: i64) -> String {
    let who = match role {
        Role::User => "you",
        Role::Model => "celora",
    };
    format!("[{}] {}: {}", format_clock(timestamp), who, text)
}

/// Numbered session listing. The numbers are accepted by `/resume`
/// and `/delete`.
pub fn chats(store: &SessionStore, t: &Translations) -> String {
    let mut out = format!("# {}\n", t.chats);
    if store.is_empty() {
        let _ = writeln!(out, "{}", t.no_chats);
        return out;
    }
    for (i, session) in store.sessions().iter().enumerate() {
        let marker = if store.active_id() == Some(session.id.as_str()) {
            "*"
        } else {
            " "
        };
        let _ = writeln!(
            out,
            "{}{:>3}. {}  ({})  [{}]",
            marker,
            i + 1,
            session.title,
            format_date(session.updated_at),
            session.id
        );
        let preview = session.preview().unwrap_or(t.no_messages);
        let preview: String = preview.chars().take(80).collect();
        let _ = writeln!(out, "      {}", preview.replace('\n', " "));
    }
    out
}

pub fn settings(prefs: &Preferences, backend: &str, has_api_key: bool) -> String {
    let t = prefs.translations();
    let mut out = format!("# {}\n", t.settings);
    let languages: Vec<String> = Language::ALL
        .iter()
        .map(|l| {
            if *l == prefs.language {
                format!("[{}] {}", l.code(), l.native_name())
            } else {
                format!("{} {}", l.code(), l.native_name())
            }
        })
        .collect();
    let _ = writeln!(out, "{}: {}", t.language, languages.join(" | "));
    let theme = match prefs.theme {
        Theme::Light => t.light_mode,
        Theme::Dark => t.dark_mode,
    };
    let _ = writeln!(out, "{}: {}", t.theme, theme);
    let _ = writeln!(
        out,
        "Backend: {} (API key {})",
        backend,
        if has_api_key { "set" } else { "not set" }
    );
    let _ = writeln!(out, "/logout: {}", t.logout);
    out
}

pub fn profile(user: Option<&User>, t: &Translations) -> String {
    let mut out = format!("# {}\n", t.profile);
    match user {
        Some(user) => {
            let _ = writeln!(out, "{}", user.name);
            let _ = writeln!(out, "{}", user.email);
        }
        None => {
            let _ = writeln!(out, "-");
        }
    }
    out
}

pub fn products(t: &Translations) -> String {
    format!("# {}\nCelora AI\n{}\n", t.products, t.coming_soon)
}

pub fn help(t: &Translations) -> String {
    let mut out = format!("# {}\n", t.help);
    let _ = writeln!(out, "{}", t.what_is_celora);
    let _ = writeln!(
        out,
        "  Celora AI is an assistant by Element Intelligent that answers in English, Russian or Uzbek."
    );
    let _ = writeln!(out, "{}", t.is_data_safe);
    let _ = writeln!(
        out,
        "  Chats are stored only on this machine. Messages are sent to the configured model provider."
    );
    out.push_str(COMMANDS);
    out
}

pub const COMMANDS: &str = "\
Commands:
  /new                 start a new chat
  /chats               list chats
  /resume <n|id>       continue a chat
  /delete <n|id>       delete a chat
  /home                show the active chat
  /settings            show settings
  /theme <light|dark>  change theme
  /lang <en|ru|uz>     change language
  /key <api key>       store your own API key
  /profile             show your profile
  /products            show products
  /logout              sign out
  /help                show this help
  /quit                exit
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Message;
    use crate::core::clock::ManualClock;
    use std::sync::Arc;

    fn en() -> &'static Translations {
        Translations::for_language(Language::En)
    }

    #[test]
    fn test_parse_view() {
        assert_eq!(View::parse("Chats"), Some(View::Chats));
        assert_eq!(View::parse("help"), Some(View::Help));
        assert_eq!(View::parse("admin"), None);
    }

    #[test]
    fn test_home_without_session() {
        let out = home(None, en());
        assert!(out.contains("Welcome to Celora AI"));
        assert!(out.contains("/new"));
    }

    #[test]
    fn test_home_lists_messages() {
        let mut store = SessionStore::new(Arc::new(ManualClock::new(0)));
        let id = store.create_session("New Chat");
        store.push_message(&id, Message::user("hello", 0));
        store.push_message(&id, Message::model("hi there", 0));

        let out = home(store.active_session(), en());
        assert!(out.starts_with("# hello\n"));
        assert!(out.contains("you: hello"));
        assert!(out.contains("celora: hi there"));
    }

    #[test]
    fn test_chats_marks_active_and_numbers() {
        let mut store = SessionStore::new(Arc::new(ManualClock::new(0)));
        let first = store.create_session("New Chat");
        store.create_session("New Chat");
        store.resume_session(&first);

        let out = chats(&store, en());
        assert!(out.contains("   1. New Chat 2"));
        assert!(out.contains("*  2. New Chat 1"));
        assert!(out.contains(&first));
    }

    #[test]
    fn test_chats_empty() {
        let store = SessionStore::new(Arc::new(ManualClock::new(0)));
        assert!(chats(&store, en()).contains("No active chats yet"));
    }

    #[test]
    fn test_settings_highlights_current_language() {
        let prefs = Preferences {
            theme: Theme::Light,
            language: Language::En,
        };
        let out = settings(&prefs, "openai", false);
        assert!(out.contains("[en] English"));
        assert!(out.contains("Theme: Light"));
        assert!(out.contains("API key not set"));
    }
}
