use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use super::view::{self, View};
use crate::ai::CompletionAdapter;
use crate::auth;
use crate::chat::{Role, SessionStore};
use crate::core::AppConfig;
use crate::settings::{Language, Theme};
use crate::state::AppState;

/// A parsed line of REPL input.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Message(String),
    New,
    Show(View),
    Resume(String),
    Delete(String),
    Theme(String),
    Lang(String),
    Key(String),
    Logout,
    Quit,
    Unknown(String),
}

impl Input {
    pub fn parse(line: &str) -> Input {
        let line = line.trim();
        let Some(command) = line.strip_prefix('/') else {
            return Input::Message(line.to_string());
        };
        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim().to_string()),
            None => (command, String::new()),
        };
        match name {
            "new" => Input::New,
            "resume" => Input::Resume(arg),
            "delete" => Input::Delete(arg),
            "theme" => Input::Theme(arg),
            "lang" => Input::Lang(arg),
            "key" => Input::Key(arg),
            "logout" => Input::Logout,
            "quit" | "exit" => Input::Quit,
            other => match View::parse(other) {
                Some(v) => Input::Show(v),
                None => Input::Unknown(other.to_string()),
            },
        }
    }
}

/// Resolve a listing position (1 based) or a literal id to a session
/// id. Positions out of range are passed through as ids.
pub fn resolve_session_ref(store: &SessionStore, arg: &str) -> String {
    arg.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| store.sessions().get(i))
        .map(|s| s.id.clone())
        .unwrap_or_else(|| arg.to_string())
}

fn sign_in_prompt(rl: &mut DefaultEditor, state: &mut AppState) -> Result<bool> {
    loop {
        let name = match rl.readline("name: ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(false),
            Err(err) => return Err(err.into()),
        };
        let email = match rl.readline("email: ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(false),
            Err(err) => return Err(err.into()),
        };
        match auth::sign_in(Some(&name), Some(&email)) {
            Ok(user) => {
                state.login(user)?;
                return Ok(true);
            }
            Err(e) => println!("{}", e),
        }
    }
}

fn report(result: Result<()>) {
    if let Err(e) = result {
        tracing::error!("{:#}", e);
        println!("Error: {:#}", e);
    }
}

fn make_adapter(config: &AppConfig, state: &AppState) -> CompletionAdapter {
    let config = config.clone().with_stored_api_key(state.stored_api_key());
    CompletionAdapter::from_config(&config, state.preferences.language)
}

pub async fn run(config: AppConfig) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut state = AppState::open(&config)?;

    if state.user.is_none() {
        println!("Element Intelligent | Celora AI");
        if !sign_in_prompt(&mut rl, &mut state)? {
            return Ok(());
        }
    }

    let mut adapter = make_adapter(&config, &state);
    tracing::debug!("Chatting via {}", adapter.backend_name());
    print!("{}", view::home(state.sessions.active_session(), state.translations()));

    loop {
        let readline = rl.readline(">>> ");
        let line = match readline {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line.as_str());
        let t = state.translations();

        match Input::parse(&line) {
            Input::Message(text) => {
                if state.sessions.active_session().is_none() {
                    println!("{}", t.no_active_chat);
                    continue;
                }
                println!("{}", t.thinking);
                if let Some(reply) = state.send_message(&adapter, &text).await {
                    let now = state.sessions.now_millis();
                    println!("{}", view::message_line(Role::Model, &reply, now));
                }
            }
            Input::New => {
                state.new_chat();
                print!("{}", view::home(state.sessions.active_session(), t));
            }
            Input::Show(View::Home) => {
                print!("{}", view::home(state.sessions.active_session(), t));
            }
            Input::Show(View::Chats) => print!("{}", view::chats(&state.sessions, t)),
            Input::Show(View::Settings) => {
                let has_key = config
                    .clone()
                    .with_stored_api_key(state.stored_api_key())
                    .has_api_key();
                print!(
                    "{}",
                    view::settings(&state.preferences, adapter.backend_name(), has_key)
                );
            }
            Input::Show(View::Profile) => print!("{}", view::profile(state.user.as_ref(), t)),
            Input::Show(View::Products) => print!("{}", view::products(t)),
            Input::Show(View::Help) => print!("{}", view::help(t)),
            Input::Resume(arg) => {
                let id = resolve_session_ref(&state.sessions, &arg);
                state.sessions.resume_session(&id);
                print!("{}", view::home(state.sessions.active_session(), t));
            }
            Input::Delete(arg) => {
                let id = resolve_session_ref(&state.sessions, &arg);
                state.sessions.delete_session(&id);
                print!("{}", view::chats(&state.sessions, t));
            }
            Input::Theme(arg) => match Theme::parse(&arg) {
                Some(theme) => report(state.set_theme(theme)),
                None => println!("/theme light|dark"),
            },
            Input::Lang(arg) => match Language::parse(&arg) {
                Some(lang) => {
                    report(state.set_language(lang));
                    adapter.set_language(lang);
                }
                None => println!("/lang en|ru|uz"),
            },
            Input::Key(arg) => {
                report(state.set_api_key(&arg));
                adapter = make_adapter(&config, &state);
            }
            Input::Logout => {
                report(state.logout());
                println!("{}", state.translations().logout);
                break;
            }
            Input::Quit => break,
            Input::Unknown(name) => {
                println!("Unknown command /{}", name);
                print!("{}", view::COMMANDS);
            }
        }
    }

    Ok(())
}
