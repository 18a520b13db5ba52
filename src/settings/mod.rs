//! User preferences that survive restarts: theme and language.
pub mod i18n;

use std::fmt;

use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::core::storage::{LANG_KEY, LocalStorage, THEME_KEY};
pub use i18n::Translations;

#[derive(clap::ValueEnum, Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

#[derive(clap::ValueEnum, Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Ru,
    Uz,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Ru, Language::Uz, Language::En];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
            Language::Uz => "uz",
        }
    }

    /// Name of the language in that language.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ru => "Русский",
            Language::Uz => "O'zbekcha",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(s.trim()))
    }

    pub fn translations(&self) -> &'static Translations {
        Translations::for_language(*self)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Theme {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
    pub language: Language,
}

impl Preferences {
    pub fn load(storage: &LocalStorage) -> Self {
        Self {
            theme: storage.load(THEME_KEY).unwrap_or_default(),
            language: storage.load(LANG_KEY).unwrap_or_default(),
        }
    }

    pub fn save(&self, storage: &LocalStorage) -> Result<(), Error> {
        storage.save(THEME_KEY, &self.theme)?;
        storage.save(LANG_KEY, &self.language)?;
        Ok(())
    }

    pub fn translations(&self) -> &'static Translations {
        self.language.translations()
    }
}
