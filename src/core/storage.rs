//! Directory backed key-value storage. Each key is a file holding
//! the value, mirroring the browser `localStorage` layout the chat
//! front end originally persisted to.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const USER_KEY: &str = "celora_user";
pub const THEME_KEY: &str = "celora_theme";
pub const LANG_KEY: &str = "celora_lang";
pub const CHATS_KEY: &str = "celora_chats";
pub const API_KEY_KEY: &str = "celora_api_key";

#[derive(Clone, Debug)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    /// Open storage rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, Error> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create storage directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Raw string value for `key`, `None` when absent.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, Error> {
        match fs::read_to_string(self.path(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::new(e).context(format!("Failed to read key {}", key))),
        }
    }

    /// Write the raw string value for `key`. Writes go to a temp file
    /// first and are renamed into place so a crash never leaves a
    /// half written value behind.
    pub fn set_raw(&self, key: &str, value: &str) -> Result<(), Error> {
        let path = self.path(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, value).with_context(|| format!("Failed to write key {}", key))?;
        fs::rename(&tmp, &path).with_context(|| format!("Failed to commit key {}", key))?;
        Ok(())
    }

    /// Decode the JSON value stored under `key`. Unreadable or
    /// malformed values are treated as absent so startup falls back
    /// to defaults instead of failing.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.get_raw(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Ignoring unreadable stored value for {}: {:#}", key, e);
                return None;
            }
        };
        serde_json::from_str(&raw)
            .inspect_err(|e| tracing::warn!("Ignoring malformed stored value for {}: {}", key, e))
            .ok()
    }

    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), Error> {
        let data = serde_json::to_string(value)?;
        self.set_raw(key, &data)
    }

    /// Remove `key`. Removing an absent key is not an error.
    pub fn remove(&self, key: &str) -> Result<(), Error> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::new(e).context(format!("Failed to remove key {}", key))),
        }
    }
}
