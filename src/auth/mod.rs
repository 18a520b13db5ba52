//! Local sign in. The identity is display data only: nothing here is
//! used to authorize requests.
use anyhow::{Error, Result, bail};

use crate::chat::User;
use crate::core::storage::{LocalStorage, USER_KEY};

const DEFAULT_NAME: &str = "Explorer";
const DEFAULT_EMAIL: &str = "user@celora.ai";

/// Build a `User` from the sign in form. Blank fields fall back to
/// the guest identity.
pub fn sign_in(name: Option<&str>, email: Option<&str>) -> Result<User, Error> {
    let name = name.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_NAME);
    let email = email.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_EMAIL);

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
        _ => bail!("Invalid email address: {}", email),
    }

    Ok(User {
        name: name.to_string(),
        email: email.to_string(),
    })
}

pub fn load_user(storage: &LocalStorage) -> Option<User> {
    storage.load(USER_KEY)
}

pub fn save_user(storage: &LocalStorage, user: &User) -> Result<(), Error> {
    storage.save(USER_KEY, user)
}

pub fn sign_out(storage: &LocalStorage) -> Result<(), Error> {
    tracing::info!("Signing out");
    storage.remove(USER_KEY)
}
