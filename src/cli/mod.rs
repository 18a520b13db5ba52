use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod auth;
pub mod chat;
pub mod sessions;
pub mod settings;
pub mod view;

use crate::core::{AppConfig, BackendKind};
use crate::settings::{Language, Theme};

#[derive(Subcommand)]
enum Command {
    /// Start an interactive chat (default)
    Chat {},
    /// List saved chat sessions, newest first
    List {},
    /// Delete a chat session by id or list position
    Delete {
        #[arg()]
        id: String,
    },
    /// Sign in with a display name and email
    Login {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Sign out and forget the stored user
    Logout {},
    /// Show or change preferences
    Settings {
        #[arg(long, value_enum)]
        theme: Option<Theme>,
        #[arg(long, value_enum)]
        lang: Option<Language>,
        /// Key for the bring-your-own-key backend. Pass an empty
        /// string to remove it.
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Completion backend, overriding CELORA_BACKEND
    #[arg(long, value_enum, global = true)]
    backend: Option<BackendKind>,
    #[command(subcommand)]
    command: Option<Command>,
}

// Logs go to stderr so they don't interleave with the transcript on
// stdout
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    init_tracing();

    let mut config = AppConfig::default();
    if let Some(backend) = args.backend {
        config.backend = backend;
    }

    // Handle each sub command
    match args.command {
        Some(Command::Chat {}) | None => {
            chat::run(config).await?;
        }
        Some(Command::List {}) => {
            sessions::list(&config)?;
        }
        Some(Command::Delete { id }) => {
            sessions::delete(&config, &id)?;
        }
        Some(Command::Login { name, email }) => {
            auth::login(&config, name.as_deref(), email.as_deref())?;
        }
        Some(Command::Logout {}) => {
            auth::logout(&config)?;
        }
        Some(Command::Settings {
            theme,
            lang,
            api_key,
        }) => {
            settings::run(&config, theme, lang, api_key.as_deref())?;
        }
    }

    Ok(())
}
